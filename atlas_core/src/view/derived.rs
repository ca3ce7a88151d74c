//! Derived outputs handed to the presentation layer.

use atlas_data::{
    BuildFeature, BuildProperties, Chapter, Dataset, Edge, Event, EventType, Stakeholder, Year,
};
use serde::Serialize;
use std::collections::BTreeSet;

use super::{BrowseMode, ViewState};
use crate::config::AtlasConfig;
use crate::selectors::{
    chapter_at_year, compute_power_index, event_by_id, filter_edges_by_chapter,
    filter_edges_by_year, filter_events_by_chapter, filter_events_by_year, resolve_stakeholders,
    search_chapters, PowerIndex, TagSet, YearExtent,
};

/// One row of the event feed.
#[derive(Debug, Clone, Serialize)]
pub struct FeedEntry<'a> {
    pub event: &'a Event,
    pub focused: bool,
    /// A build event that has concluded by the active year.
    pub completed: bool,
}

/// Plain-data description of which build features the map reveals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MapFilter {
    pub active_year: Year,
    /// Event ids whose builds are highlighted. Empty means no event filter.
    pub highlighted_events: BTreeSet<String>,
    pub hidden_categories: BTreeSet<String>,
}

impl MapFilter {
    pub fn is_filtering(&self) -> bool {
        !self.highlighted_events.is_empty()
    }

    /// Whether a build is revealed at the active year.
    pub fn reveals(&self, build: &BuildProperties) -> bool {
        build.year_start <= self.active_year
            && !self.hidden_categories.contains(&build.category)
            && (!self.is_filtering() || self.highlighted_events.contains(&build.primary_event_id))
    }

    pub fn visible_builds<'a>(&self, builds: &'a [BuildFeature]) -> Vec<&'a BuildFeature> {
        builds.iter().filter(|b| self.reveals(&b.properties)).collect()
    }
}

/// Everything the renderers need after one action.
#[derive(Debug, Clone, Serialize)]
pub struct DerivedView<'a> {
    pub mode: BrowseMode,
    pub active_year: Year,
    pub extent: YearExtent,
    pub window_label: String,
    /// The chapter whose range contains the active year.
    pub active_chapter: Option<&'a Chapter>,
    /// Chapters matching the current search query.
    pub chapters: Vec<&'a Chapter>,
    pub feed: Vec<FeedEntry<'a>>,
    pub map: MapFilter,
    pub power: PowerIndex,
    pub focused_stakeholders: Vec<&'a Stakeholder>,
    /// Stakeholder edges for the current window.
    pub network: Vec<&'a Edge>,
}

impl DerivedView<'_> {
    /// Serialize for a renderer living outside the process.
    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

/// Pin `focused` to the front of `filtered` without duplicating it, then cap.
pub fn merge_focused<'a>(
    filtered: &[&'a Event],
    focused: Option<&'a Event>,
    cap: usize,
) -> Vec<&'a Event> {
    let mut merged: Vec<&Event> = Vec::with_capacity(filtered.len() + 1);
    if let Some(event) = focused {
        merged.push(event);
    }
    merged.extend(filtered.iter().copied().filter(|e| focused.map_or(true, |f| f.id != e.id)));
    merged.truncate(cap);
    merged
}

/// Event ids to highlight on the map.
///
/// Empty when no tags are selected. Otherwise every filtered event plus the
/// focused one.
pub fn map_highlights(
    filtered: &[&Event],
    focused: Option<&Event>,
    tags: &TagSet,
) -> BTreeSet<String> {
    if tags.is_empty() {
        return BTreeSet::new();
    }

    filtered
        .iter()
        .copied()
        .chain(focused)
        .map(|e| e.id.clone())
        .collect()
}

/// Recompute every derived output for `state`.
pub fn derive_view<'a>(
    dataset: &'a Dataset,
    state: &ViewState,
    extent: YearExtent,
    config: &AtlasConfig,
) -> DerivedView<'a> {
    let events = dataset.events();
    let focused = state.focused_event.as_deref().and_then(|id| event_by_id(events, id));

    let (filtered, network) = match state.mode {
        BrowseMode::Chapter => (
            filter_events_by_chapter(
                events,
                state.selected_chapter,
                &state.selected_tags,
                config.feed.include_opposition,
            ),
            filter_edges_by_chapter(dataset.edges(), state.selected_chapter),
        ),
        BrowseMode::Year => (
            filter_events_by_year(
                events,
                state.active_year,
                &state.selected_tags,
                config.feed.include_opposition,
            ),
            filter_edges_by_year(dataset.edges(), state.active_year),
        ),
    };

    let feed: Vec<FeedEntry> = merge_focused(&filtered, focused, config.feed.max_entries)
        .into_iter()
        .map(|event| FeedEntry {
            event,
            focused: focused.map_or(false, |f| f.id == event.id),
            completed: event.kind == EventType::Build && event.year_end <= state.active_year,
        })
        .collect();

    let map = MapFilter {
        active_year: state.active_year,
        highlighted_events: map_highlights(&filtered, focused, &state.selected_tags),
        hidden_categories: config.map.hidden_categories.clone(),
    };

    let power = compute_power_index(
        events,
        state.active_year,
        config.index.include_opposition,
        config.index.base,
    );

    let focused_stakeholders = focused
        .map(|e| resolve_stakeholders(dataset.stakeholders(), e.stakeholders.as_slice()))
        .unwrap_or_default();

    tracing::trace!(
        filtered = filtered.len(),
        feed = feed.len(),
        highlighted = map.highlighted_events.len(),
        score = power.score,
        "Derived view recomputed"
    );

    DerivedView {
        mode: state.mode,
        active_year: state.active_year,
        extent,
        window_label: state.window_label(),
        active_chapter: chapter_at_year(dataset.chapters(), state.active_year),
        chapters: search_chapters(dataset.chapters(), &state.chapter_query),
        feed,
        map,
        power,
        focused_stakeholders,
        network,
    }
}
