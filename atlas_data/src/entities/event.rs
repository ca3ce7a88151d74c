//! Dated events on the narrative timeline.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{ChapterNumber, ChapterRef, Dated, Year};
use crate::vocabulary::{EventType, MethodTag};

/// A bibliographic citation backing an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub citation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
}

impl Source {
    pub fn new(citation: impl Into<String>) -> Self {
        Self {
            citation: citation.into(),
            url: None,
            page: None,
        }
    }
}

/// A dated event with its tags, participants and effect on the power index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    pub year_start: Year,
    pub year_end: Year,
    #[serde(default)]
    pub chapter_refs: Vec<ChapterRef>,
    #[serde(rename = "type")]
    pub kind: EventType,
    #[serde(default)]
    pub methods: BTreeSet<MethodTag>,
    /// Stakeholder ids, in narrative order.
    #[serde(default)]
    pub stakeholders: Vec<String>,
    /// Signed contribution to the power index once the event concludes.
    #[serde(default)]
    pub power_delta: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote_snippet: Option<String>,
    #[serde(default)]
    pub sources: Vec<Source>,
}

impl Event {
    /// Create a `policy` event with no tags, participants or delta.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        year_start: Year,
        year_end: Year,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            summary: String::new(),
            year_start,
            year_end,
            chapter_refs: Vec::new(),
            kind: EventType::Policy,
            methods: BTreeSet::new(),
            stakeholders: Vec::new(),
            power_delta: 0,
            quote_snippet: None,
            sources: Vec::new(),
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn with_type(mut self, kind: EventType) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_method(mut self, tag: MethodTag) -> Self {
        self.methods.insert(tag);
        self
    }

    pub fn with_methods(mut self, tags: impl IntoIterator<Item = MethodTag>) -> Self {
        self.methods.extend(tags);
        self
    }

    pub fn with_chapter(mut self, chapter: ChapterNumber) -> Self {
        self.chapter_refs.push(ChapterRef::new(chapter));
        self
    }

    pub fn with_chapter_ref(mut self, chapter_ref: ChapterRef) -> Self {
        self.chapter_refs.push(chapter_ref);
        self
    }

    pub fn with_stakeholder(mut self, id: impl Into<String>) -> Self {
        self.stakeholders.push(id.into());
        self
    }

    pub fn with_power_delta(mut self, delta: i32) -> Self {
        self.power_delta = delta;
        self
    }

    pub fn with_quote(mut self, quote: impl Into<String>) -> Self {
        self.quote_snippet = Some(quote.into());
        self
    }

    pub fn with_source(mut self, source: Source) -> Self {
        self.sources.push(source);
        self
    }

    /// Check if any chapter ref names `chapter`.
    pub fn in_chapter(&self, chapter: ChapterNumber) -> bool {
        self.chapter_refs.iter().any(|r| r.chapter == chapter)
    }

    /// Check if the event carries at least one of `tags`.
    pub fn has_any_method(&self, tags: &BTreeSet<MethodTag>) -> bool {
        tags.iter().any(|tag| self.methods.contains(tag))
    }

    pub fn is_opposition(&self) -> bool {
        self.kind == EventType::Opposition
    }
}

impl Dated for Event {
    fn year_start(&self) -> Year {
        self.year_start
    }

    fn year_end(&self) -> Year {
        self.year_end
    }
}
