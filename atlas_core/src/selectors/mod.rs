//! Selector Engine - pure selection over the immutable dataset.
//!
//! Nothing in here allocates state or fails. Lookups return `Option`,
//! filters return possibly-empty vectors of borrowed records, and every
//! filtered list is stably sorted by `year_start`.

mod power;

pub use power::*;

use atlas_data::{Chapter, ChapterNumber, Dated, Edge, Event, MethodTag, Stakeholder, Year};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

/// Selected method tags. Empty means "no restriction".
pub type TagSet = BTreeSet<MethodTag>;

/// Inclusive `[min_year, max_year]` range spanned by the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearExtent {
    pub min_year: Year,
    pub max_year: Year,
}

impl YearExtent {
    /// Clamp a scrubber or jump input into the extent.
    pub fn clamp(&self, year: Year) -> Year {
        year.clamp(self.min_year, self.max_year)
    }
}

/// Compute the year range over every event and chapter boundary.
///
/// Returns `None` only when both collections are empty.
pub fn year_extent(events: &[Event], chapters: &[Chapter]) -> Option<YearExtent> {
    let event_years = events.iter().flat_map(|e| [e.year_start, e.year_end]);
    let chapter_years = chapters.iter().flat_map(|c| [c.year_start, c.year_end]);

    event_years
        .chain(chapter_years)
        .fold(None, |extent, year| match extent {
            None => Some(YearExtent {
                min_year: year,
                max_year: year,
            }),
            Some(YearExtent { min_year, max_year }) => Some(YearExtent {
                min_year: min_year.min(year),
                max_year: max_year.max(year),
            }),
        })
}

/// First chapter with the given number.
pub fn chapter_by_number(chapters: &[Chapter], number: ChapterNumber) -> Option<&Chapter> {
    chapters.iter().find(|c| c.number == number)
}

/// First event with the given id.
pub fn event_by_id<'a>(events: &'a [Event], id: &str) -> Option<&'a Event> {
    events.iter().find(|e| e.id == id)
}

/// First chapter whose range contains `year`.
pub fn chapter_at_year(chapters: &[Chapter], year: Year) -> Option<&Chapter> {
    chapters.iter().find(|c| c.is_active_at(year))
}

fn select_events<'a>(
    events: &'a [Event],
    in_window: impl Fn(&Event) -> bool,
    tags: &TagSet,
    include_opposition: bool,
) -> Vec<&'a Event> {
    let mut selected: Vec<&Event> = events
        .iter()
        .filter(|e| in_window(*e))
        .filter(|e| include_opposition || !e.is_opposition())
        .filter(|e| tags.is_empty() || e.has_any_method(tags))
        .collect();

    // Stable, so equal start years keep input order.
    selected.sort_by_key(|e| e.year_start);
    selected
}

/// Events active at `year`, optionally without opposition, matching any of `tags`.
pub fn filter_events_by_year<'a>(
    events: &'a [Event],
    year: Year,
    tags: &TagSet,
    include_opposition: bool,
) -> Vec<&'a Event> {
    select_events(events, |e| e.is_active_at(year), tags, include_opposition)
}

/// Events referencing `chapter`, with the same opposition and tag rules.
pub fn filter_events_by_chapter<'a>(
    events: &'a [Event],
    chapter: ChapterNumber,
    tags: &TagSet,
    include_opposition: bool,
) -> Vec<&'a Event> {
    select_events(events, |e| e.in_chapter(chapter), tags, include_opposition)
}

/// Edges active at `year`.
pub fn filter_edges_by_year(edges: &[Edge], year: Year) -> Vec<&Edge> {
    let mut selected: Vec<&Edge> = edges.iter().filter(|e| e.is_active_at(year)).collect();
    selected.sort_by_key(|e| e.year_start);
    selected
}

/// Edges referencing `chapter`.
pub fn filter_edges_by_chapter(edges: &[Edge], chapter: ChapterNumber) -> Vec<&Edge> {
    let mut selected: Vec<&Edge> = edges.iter().filter(|e| e.in_chapter(chapter)).collect();
    selected.sort_by_key(|e| e.year_start);
    selected
}

/// Resolve stakeholder ids in order, silently dropping unknown ids.
pub fn resolve_stakeholders<'a, S: AsRef<str>>(
    stakeholders: &'a [Stakeholder],
    ids: &[S],
) -> Vec<&'a Stakeholder> {
    let lookup: HashMap<&str, &Stakeholder> =
        stakeholders.iter().map(|s| (s.id.as_str(), s)).collect();

    ids.iter()
        .filter_map(|id| lookup.get(id.as_ref()).copied())
        .collect()
}

pub fn event_ids<'a>(events: &[&'a Event]) -> Vec<&'a str> {
    events.iter().map(|e| e.id.as_str()).collect()
}

/// `"1934"` for a single year, `"1934-1936"` for a span.
pub fn format_year_range(start: Year, end: Year) -> String {
    if start == end {
        start.to_string()
    } else {
        format!("{}-{}", start, end)
    }
}

/// Chapters whose title or summary contains `query` (case-insensitive), or
/// whose number contains it as text. An empty query matches everything.
pub fn search_chapters<'a>(chapters: &'a [Chapter], query: &str) -> Vec<&'a Chapter> {
    let query = query.to_lowercase();
    chapters
        .iter()
        .filter(|c| {
            c.title.to_lowercase().contains(&query)
                || c.summary.to_lowercase().contains(&query)
                || c.number.to_string().contains(&query)
        })
        .collect()
}

/// A navigation target whose year is to be resolved.
#[derive(Debug, Clone, Copy)]
pub enum NavTarget<'a> {
    Year(Option<Year>),
    Chapter(Option<ChapterNumber>),
    Event(Option<&'a Event>),
}

/// Resolve a navigation target to the year that drives filtering.
///
/// Years pass through when nonzero, chapters (including chapter 0) resolve
/// to their `year_end`, events to their `year_end`. Anything else, including
/// an unknown chapter, resolves to `fallback`.
pub fn resolve_active_year(target: NavTarget<'_>, chapters: &[Chapter], fallback: Year) -> Year {
    match target {
        NavTarget::Year(Some(year)) if year != 0 => year,
        NavTarget::Chapter(Some(number)) => {
            chapter_by_number(chapters, number).map_or(fallback, |c| c.year_end)
        }
        NavTarget::Event(Some(event)) => event.year_end,
        _ => fallback,
    }
}
