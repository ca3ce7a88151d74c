//! The session controller tying dataset, configuration and view state together.

use std::path::Path;

use atlas_data::{ChapterNumber, Dataset, DatasetError, MethodTag, Year};

use crate::config::{AtlasConfig, ConfigError};
use crate::selectors::{year_extent, YearExtent};
use crate::view::{derive_view, Action, DerivedView, ViewState};

/// Errors raised while setting up an atlas session.
#[derive(Debug, thiserror::Error)]
pub enum AtlasError {
    /// Neither chapters nor events carry a year, so there is no timeline.
    #[error("dataset has no dated chapters or events")]
    EmptyTimeline,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Dataset(#[from] DatasetError),
}

/// Owns the dataset for a session and applies user actions one at a time.
#[derive(Debug, Clone)]
pub struct AtlasController {
    dataset: Dataset,
    config: AtlasConfig,
    extent: YearExtent,
    state: ViewState,
}

impl AtlasController {
    /// Start a session at the beginning of the timeline.
    pub fn new(dataset: Dataset, config: AtlasConfig) -> Result<Self, AtlasError> {
        let extent = year_extent(dataset.events(), dataset.chapters())
            .ok_or(AtlasError::EmptyTimeline)?;
        let state = ViewState::initial(&dataset, extent);

        tracing::info!(
            min_year = extent.min_year,
            max_year = extent.max_year,
            "Atlas session started"
        );

        Ok(Self {
            dataset,
            config,
            extent,
            state,
        })
    }

    pub fn with_defaults(dataset: Dataset) -> Result<Self, AtlasError> {
        Self::new(dataset, AtlasConfig::default())
    }

    /// Load a TOML config, then the dataset directory it names.
    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self, AtlasError> {
        let config = AtlasConfig::from_file(path)?;
        let dataset = config.load_dataset()?;
        Self::new(dataset, config)
    }

    /// Apply one action to completion.
    pub fn dispatch(&mut self, action: Action) {
        self.state = self.state.apply(action, &self.dataset, self.extent);
    }

    pub fn navigate_year(&mut self, year: Year) {
        self.dispatch(Action::NavigateYear(year));
    }

    pub fn jump_to_year(&mut self, year: Year) {
        self.dispatch(Action::JumpToYear(year));
    }

    pub fn navigate_chapter(&mut self, chapter: ChapterNumber) {
        self.dispatch(Action::NavigateChapter(chapter));
    }

    pub fn toggle_tag(&mut self, tag: MethodTag) {
        self.dispatch(Action::ToggleTag(tag));
    }

    pub fn select_event(&mut self, id: impl Into<String>) {
        self.dispatch(Action::SelectEvent(id.into()));
    }

    /// Derived outputs for the current state.
    pub fn view(&self) -> DerivedView<'_> {
        derive_view(&self.dataset, &self.state, self.extent, &self.config)
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn config(&self) -> &AtlasConfig {
        &self.config
    }

    pub fn extent(&self) -> YearExtent {
        self.extent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selectors::PowerLabel;
    use crate::view::BrowseMode;

    fn controller() -> AtlasController {
        AtlasController::with_defaults(Dataset::sample().unwrap()).unwrap()
    }

    #[test]
    fn test_sample_extent() {
        let atlas = controller();
        assert_eq!(
            atlas.extent(),
            YearExtent {
                min_year: 1924,
                max_year: 1968
            }
        );
        assert_eq!(atlas.state().active_year, 1924);
    }

    #[test]
    fn test_empty_dataset_has_no_timeline() {
        let err = AtlasController::with_defaults(Dataset::default()).unwrap_err();
        assert!(matches!(err, AtlasError::EmptyTimeline));
    }

    #[test]
    fn test_chapter_navigation_snaps_year() {
        let mut atlas = controller();
        atlas.navigate_chapter(2);

        assert_eq!(atlas.state().mode, BrowseMode::Chapter);
        assert_eq!(atlas.state().active_year, 1934);

        let ids: Vec<_> = atlas.view().feed.iter().map(|f| f.event.id.clone()).collect();
        assert_eq!(ids, ["northern-state-route"]);
    }

    #[test]
    fn test_session_walkthrough() {
        let mut atlas = controller();

        atlas.jump_to_year(1890);
        assert_eq!(atlas.state().active_year, 1924);

        atlas.navigate_year(1968);
        let view = atlas.view();
        // Every event has concluded: 48 + 8 + 6 + 4 + 7 + 9 + 5 + 3 - 20.
        assert_eq!(view.power.score, 70);
        assert_eq!(view.power.label, PowerLabel::Rising);
        assert_eq!(view.map.visible_builds(atlas.dataset().builds()).len(), 4);

        atlas.toggle_tag(MethodTag::FederalLeverage);
        atlas.select_event("cross-bronx");
        let view = atlas.view();
        assert!(view.feed[0].focused);
        assert_eq!(view.feed.len(), 1);
        assert!(view.map.is_filtering());
        assert_eq!(view.map.visible_builds(atlas.dataset().builds()).len(), 1);

        atlas.toggle_tag(MethodTag::FederalLeverage);
        assert!(atlas.state().selected_tags.is_empty());
        assert!(!atlas.view().map.is_filtering());
    }

    #[test]
    fn test_configured_opposition_in_index() {
        let mut config = AtlasConfig::default();
        config.index.include_opposition = true;
        config.index.base = 46;

        let mut atlas = AtlasController::new(Dataset::sample().unwrap(), config).unwrap();
        atlas.navigate_year(1968);

        // 70 - 2 for the lower base, then -5 and -6 for the opposition events.
        assert_eq!(atlas.view().power.score, 57);
        assert_eq!(atlas.view().power.label, PowerLabel::Contested);
    }

    #[test]
    fn test_missing_config_file() {
        let err = AtlasController::from_config_file("/nonexistent/atlas.toml").unwrap_err();
        assert!(matches!(err, AtlasError::Config(ConfigError::Io { .. })));
    }
}
