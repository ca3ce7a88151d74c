//! Entity definitions for the atlas dataset.

mod event;
mod network;

pub use event::*;
pub use network::*;

use serde::{Deserialize, Serialize};

use crate::vocabulary::StakeholderKind;

/// A calendar year.
pub type Year = i32;

/// Ordinal number of a book chapter.
pub type ChapterNumber = u32;

/// Anything with an inclusive `[year_start, year_end]` range.
pub trait Dated {
    fn year_start(&self) -> Year;
    fn year_end(&self) -> Year;

    /// Whether `year` falls inside the inclusive range.
    fn is_active_at(&self, year: Year) -> bool {
        self.year_start() <= year && year <= self.year_end()
    }
}

/// Back-reference from an event to a chapter, optionally narrowed to a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterRef {
    pub chapter: ChapterNumber,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
}

impl ChapterRef {
    pub fn new(chapter: ChapterNumber) -> Self {
        Self {
            chapter,
            section: None,
        }
    }

    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }
}

/// A chapter of the narrative and the years it covers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    pub number: ChapterNumber,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    pub year_start: Year,
    pub year_end: Year,
}

impl Chapter {
    pub fn new(
        number: ChapterNumber,
        title: impl Into<String>,
        year_start: Year,
        year_end: Year,
    ) -> Self {
        Self {
            number,
            title: title.into(),
            summary: String::new(),
            year_start,
            year_end,
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }
}

impl Dated for Chapter {
    fn year_start(&self) -> Year {
        self.year_start
    }

    fn year_end(&self) -> Year {
        self.year_end
    }
}

/// A person or institution taking part in events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stakeholder {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: StakeholderKind,
    #[serde(default)]
    pub description: String,
}

impl Stakeholder {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: StakeholderKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chapter_range_is_inclusive() {
        let chapter = Chapter::new(3, "The Parkways", 1924, 1929);
        assert!(chapter.is_active_at(1924));
        assert!(chapter.is_active_at(1929));
        assert!(!chapter.is_active_at(1923));
        assert!(!chapter.is_active_at(1930));
    }

    #[test]
    fn test_chapter_ref_section_is_optional() {
        let plain: ChapterRef = serde_json::from_str(r#"{"chapter": 4}"#).unwrap();
        assert_eq!(plain, ChapterRef::new(4));

        let sectioned: ChapterRef =
            serde_json::from_str(r#"{"chapter": 4, "section": "ii"}"#).unwrap();
        assert_eq!(sectioned.section.as_deref(), Some("ii"));
    }

    #[test]
    fn test_stakeholder_type_field() {
        let json = r#"{
            "id": "moses",
            "name": "Robert Moses",
            "type": "person",
            "description": "Builder"
        }"#;
        let stakeholder: Stakeholder = serde_json::from_str(json).unwrap();
        assert_eq!(stakeholder.kind, StakeholderKind::Person);
        assert_eq!(stakeholder.description, "Builder");
    }
}
