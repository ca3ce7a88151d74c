//! View-State Controller - navigation state and its transitions.
//!
//! [`ViewState`] holds everything the user has chosen. Each user intent is an
//! [`Action`], and [`ViewState::apply`] is a pure `(state, action) -> state`
//! function. Derived outputs are recomputed from scratch by [`derive_view`].

mod derived;

pub use derived::*;

use atlas_data::{ChapterNumber, Dataset, MethodTag, Year};
use serde::{Deserialize, Serialize};

use crate::selectors::{resolve_active_year, NavTarget, TagSet, YearExtent};

/// Base navigation mode. Event focus is an overlay on either mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrowseMode {
    #[default]
    Year,
    Chapter,
}

/// A single user intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Enter year mode without moving the cursor.
    SwitchToYearMode,
    /// Enter year mode at an in-range year (e.g. from the scrubber).
    NavigateYear(Year),
    /// Enter year mode at a typed year, clamped into the dataset extent.
    JumpToYear(Year),
    /// Enter chapter mode on the currently selected chapter.
    SwitchToChapterMode,
    /// Enter chapter mode on a chapter and snap the cursor to its end.
    NavigateChapter(ChapterNumber),
    ToggleTag(MethodTag),
    ClearTags,
    SelectEvent(String),
    ClearFocus,
    SearchChapters(String),
}

/// Everything the user has selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    pub mode: BrowseMode,
    pub active_year: Year,
    pub selected_chapter: ChapterNumber,
    pub selected_tags: TagSet,
    pub focused_event: Option<String>,
    pub chapter_query: String,
}

impl ViewState {
    /// Year mode at the start of the timeline, first chapter selected.
    pub fn initial(dataset: &Dataset, extent: YearExtent) -> Self {
        Self {
            mode: BrowseMode::Year,
            active_year: extent.min_year,
            selected_chapter: dataset.chapters().first().map(|c| c.number).unwrap_or(1),
            selected_tags: TagSet::new(),
            focused_event: None,
            chapter_query: String::new(),
        }
    }

    /// Compute the state that results from `action`.
    pub fn apply(&self, action: Action, dataset: &Dataset, extent: YearExtent) -> Self {
        tracing::debug!(?action, "Applying view action");

        let mut next = self.clone();
        match action {
            Action::SwitchToYearMode => {
                next.mode = BrowseMode::Year;
            }
            Action::NavigateYear(year) => {
                next.mode = BrowseMode::Year;
                next.active_year = year;
            }
            Action::JumpToYear(year) => {
                next.mode = BrowseMode::Year;
                next.active_year = extent.clamp(year);
            }
            Action::SwitchToChapterMode => {
                let number = next.selected_chapter;
                next.enter_chapter(number, dataset, extent);
            }
            Action::NavigateChapter(number) => {
                next.enter_chapter(number, dataset, extent);
            }
            Action::ToggleTag(tag) => {
                if !next.selected_tags.remove(&tag) {
                    next.selected_tags.insert(tag);
                }
            }
            Action::ClearTags => {
                next.selected_tags.clear();
            }
            Action::SelectEvent(id) => {
                next.focused_event = Some(id);
            }
            Action::ClearFocus => {
                next.focused_event = None;
            }
            Action::SearchChapters(query) => {
                next.chapter_query = query;
            }
        }

        tracing::debug!(mode = ?next.mode, year = next.active_year, "View state updated");
        next
    }

    /// Select a chapter and snap the cursor to its end, or to the start of
    /// the timeline when the chapter is unknown.
    fn enter_chapter(&mut self, number: ChapterNumber, dataset: &Dataset, extent: YearExtent) {
        self.mode = BrowseMode::Chapter;
        self.selected_chapter = number;
        self.active_year = resolve_active_year(
            NavTarget::Chapter(Some(number)),
            dataset.chapters(),
            extent.min_year,
        );
    }

    /// "Chapter N" in chapter mode, "Year Y" in year mode.
    pub fn window_label(&self) -> String {
        match self.mode {
            BrowseMode::Chapter => format!("Chapter {}", self.selected_chapter),
            BrowseMode::Year => format!("Year {}", self.active_year),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atlas_data::Chapter;

    const EXTENT: YearExtent = YearExtent {
        min_year: 1924,
        max_year: 1968,
    };

    fn dataset() -> Dataset {
        let chapters = vec![
            Chapter::new(1, "Parks for the People", 1924, 1929),
            Chapter::new(3, "Triborough", 1930, 1934),
            Chapter::new(4, "The Expressway Era", 1946, 1968),
        ];
        Dataset::new(chapters, vec![], vec![], vec![], vec![]).unwrap()
    }

    #[test]
    fn test_initial_state() {
        let state = ViewState::initial(&dataset(), EXTENT);
        assert_eq!(state.mode, BrowseMode::Year);
        assert_eq!(state.active_year, 1924);
        assert_eq!(state.selected_chapter, 1);
        assert!(state.selected_tags.is_empty());
        assert!(state.focused_event.is_none());
    }

    #[test]
    fn test_initial_chapter_defaults_to_one_without_chapters() {
        let state = ViewState::initial(&Dataset::default(), EXTENT);
        assert_eq!(state.selected_chapter, 1);
    }

    #[test]
    fn test_navigate_chapter_snaps_to_chapter_end() {
        let dataset = dataset();
        let state = ViewState::initial(&dataset, EXTENT).apply(
            Action::NavigateChapter(3),
            &dataset,
            EXTENT,
        );

        assert_eq!(state.mode, BrowseMode::Chapter);
        assert_eq!(state.selected_chapter, 3);
        assert_eq!(state.active_year, 1934);
    }

    #[test]
    fn test_chapter_zero_is_a_real_chapter() {
        let chapters = vec![
            Chapter::new(0, "Prologue", 1900, 1910),
            Chapter::new(1, "One", 1924, 1929),
        ];
        let dataset = Dataset::new(chapters, vec![], vec![], vec![], vec![]).unwrap();
        let extent = YearExtent {
            min_year: 1900,
            max_year: 1929,
        };

        let state = ViewState::initial(&dataset, extent)
            .apply(Action::NavigateYear(1950), &dataset, extent)
            .apply(Action::NavigateChapter(0), &dataset, extent);

        assert_eq!(state.mode, BrowseMode::Chapter);
        assert_eq!(state.selected_chapter, 0);
        assert_eq!(state.active_year, 1910);

        let state = state
            .apply(Action::NavigateYear(1925), &dataset, extent)
            .apply(Action::SwitchToChapterMode, &dataset, extent);
        assert_eq!(state.active_year, 1910);
    }

    #[test]
    fn test_unknown_chapter_falls_back_to_min_year() {
        let dataset = dataset();
        let state = ViewState::initial(&dataset, EXTENT)
            .apply(Action::NavigateYear(1950), &dataset, EXTENT)
            .apply(Action::NavigateChapter(99), &dataset, EXTENT);

        assert_eq!(state.mode, BrowseMode::Chapter);
        assert_eq!(state.selected_chapter, 99);
        assert_eq!(state.active_year, 1924);
    }

    #[test]
    fn test_year_navigation() {
        let dataset = dataset();
        let state = ViewState::initial(&dataset, EXTENT)
            .apply(Action::NavigateChapter(4), &dataset, EXTENT)
            .apply(Action::SwitchToYearMode, &dataset, EXTENT);
        assert_eq!(state.mode, BrowseMode::Year);
        assert_eq!(state.active_year, 1968);

        let state = state.apply(Action::NavigateYear(1940), &dataset, EXTENT);
        assert_eq!(state.active_year, 1940);
    }

    #[test]
    fn test_jump_is_clamped() {
        let dataset = dataset();
        let state = ViewState::initial(&dataset, EXTENT);

        assert_eq!(state.apply(Action::JumpToYear(1800), &dataset, EXTENT).active_year, 1924);
        assert_eq!(state.apply(Action::JumpToYear(2024), &dataset, EXTENT).active_year, 1968);
        assert_eq!(state.apply(Action::JumpToYear(1950), &dataset, EXTENT).active_year, 1950);
    }

    #[test]
    fn test_switch_to_chapter_mode_renavigates() {
        let dataset = dataset();
        let state = ViewState::initial(&dataset, EXTENT)
            .apply(Action::NavigateChapter(3), &dataset, EXTENT)
            .apply(Action::NavigateYear(1960), &dataset, EXTENT)
            .apply(Action::SwitchToChapterMode, &dataset, EXTENT);

        assert_eq!(state.mode, BrowseMode::Chapter);
        assert_eq!(state.selected_chapter, 3);
        assert_eq!(state.active_year, 1934);
    }

    #[test]
    fn test_switch_to_chapter_mode_matches_navigate_chapter() {
        let dataset = dataset();
        let state = ViewState::initial(&dataset, EXTENT)
            .apply(Action::NavigateChapter(4), &dataset, EXTENT)
            .apply(Action::NavigateYear(1930), &dataset, EXTENT);

        let switched = state.apply(Action::SwitchToChapterMode, &dataset, EXTENT);
        let navigated = state.apply(Action::NavigateChapter(4), &dataset, EXTENT);
        assert_eq!(switched, navigated);
    }

    #[test]
    fn test_toggle_tag_twice_is_identity() {
        let dataset = dataset();
        let start = ViewState::initial(&dataset, EXTENT).apply(
            Action::ToggleTag(MethodTag::AgendaSetting),
            &dataset,
            EXTENT,
        );

        let once = start.apply(Action::ToggleTag(MethodTag::BudgetControl), &dataset, EXTENT);
        assert!(once.selected_tags.contains(&MethodTag::BudgetControl));
        assert_eq!(once.selected_tags.len(), 2);

        let twice = once.apply(Action::ToggleTag(MethodTag::BudgetControl), &dataset, EXTENT);
        assert_eq!(twice.selected_tags, start.selected_tags);

        let cleared = twice.apply(Action::ClearTags, &dataset, EXTENT);
        assert!(cleared.selected_tags.is_empty());
    }

    #[test]
    fn test_focus_is_an_overlay() {
        let dataset = dataset();
        let state = ViewState::initial(&dataset, EXTENT)
            .apply(Action::NavigateChapter(3), &dataset, EXTENT)
            .apply(Action::SelectEvent("triborough".to_string()), &dataset, EXTENT);

        assert_eq!(state.mode, BrowseMode::Chapter);
        assert_eq!(state.active_year, 1934);
        assert_eq!(state.focused_event.as_deref(), Some("triborough"));

        let state = state.apply(Action::ClearFocus, &dataset, EXTENT);
        assert!(state.focused_event.is_none());
    }

    #[test]
    fn test_apply_is_pure() {
        let dataset = dataset();
        let state = ViewState::initial(&dataset, EXTENT);
        let _ = state.apply(Action::SearchChapters("park".to_string()), &dataset, EXTENT);
        assert!(state.chapter_query.is_empty());
    }

    #[test]
    fn test_window_label() {
        let dataset = dataset();
        let state = ViewState::initial(&dataset, EXTENT);
        assert_eq!(state.window_label(), "Year 1924");

        let state = state.apply(Action::NavigateChapter(4), &dataset, EXTENT);
        assert_eq!(state.window_label(), "Chapter 4");
    }
}
