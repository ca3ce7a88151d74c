//! Load-time integrity checks.

use std::collections::HashSet;
use std::fmt;

use super::{Dataset, DatasetError};
use crate::entities::{ChapterNumber, Dated};

/// A reference to an entity that is not in the dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DanglingRef {
    /// An event, edge or build names a chapter that does not exist.
    Chapter { owner: String, chapter: ChapterNumber },
    /// An event or edge names a stakeholder that does not exist.
    Stakeholder { owner: String, stakeholder: String },
    /// A build points at an event that does not exist.
    PrimaryEvent { build: String, event: String },
}

impl fmt::Display for DanglingRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DanglingRef::Chapter { owner, chapter } => {
                write!(f, "{} references unknown chapter {}", owner, chapter)
            }
            DanglingRef::Stakeholder { owner, stakeholder } => {
                write!(f, "{} references unknown stakeholder {}", owner, stakeholder)
            }
            DanglingRef::PrimaryEvent { build, event } => {
                write!(f, "build {} references unknown event {}", build, event)
            }
        }
    }
}

fn edge_key(source: &str, target: &str) -> String {
    format!("{}->{}", source, target)
}

fn check_range<T: Dated>(
    collection: &'static str,
    id: impl FnOnce() -> String,
    item: &T,
) -> Result<(), DatasetError> {
    if item.year_start() > item.year_end() {
        return Err(DatasetError::InvertedYearRange {
            collection,
            id: id(),
            year_start: item.year_start(),
            year_end: item.year_end(),
        });
    }
    Ok(())
}

fn check_unique(
    collection: &'static str,
    ids: impl Iterator<Item = String>,
) -> Result<(), DatasetError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id.clone()) {
            return Err(DatasetError::DuplicateId { collection, id });
        }
    }
    Ok(())
}

impl Dataset {
    pub(super) fn check_year_ranges(&self) -> Result<(), DatasetError> {
        for chapter in &self.chapters {
            check_range("chapters", || chapter.number.to_string(), chapter)?;
        }
        for event in &self.events {
            check_range("events", || event.id.clone(), event)?;
        }
        for edge in &self.edges {
            check_range("edges", || edge_key(&edge.source_id, &edge.target_id), edge)?;
        }
        for build in &self.builds {
            check_range("builds", || build.properties.id.clone(), &build.properties)?;
        }
        Ok(())
    }

    pub(super) fn check_unique_ids(&self) -> Result<(), DatasetError> {
        check_unique("chapters", self.chapters.iter().map(|c| c.number.to_string()))?;
        check_unique("events", self.events.iter().map(|e| e.id.clone()))?;
        check_unique("stakeholders", self.stakeholders.iter().map(|s| s.id.clone()))?;
        check_unique("builds", self.builds.iter().map(|b| b.properties.id.clone()))?;
        Ok(())
    }

    /// Collect every reference that does not resolve inside this dataset.
    pub fn dangling_refs(&self) -> Vec<DanglingRef> {
        let chapters: HashSet<ChapterNumber> = self.chapters.iter().map(|c| c.number).collect();
        let stakeholders: HashSet<&str> = self.stakeholders.iter().map(|s| s.id.as_str()).collect();
        let events: HashSet<&str> = self.events.iter().map(|e| e.id.as_str()).collect();

        let mut dangling = Vec::new();

        for event in &self.events {
            for r in event.chapter_refs.iter().filter(|r| !chapters.contains(&r.chapter)) {
                dangling.push(DanglingRef::Chapter {
                    owner: event.id.clone(),
                    chapter: r.chapter,
                });
            }
            for id in event.stakeholders.iter().filter(|id| !stakeholders.contains(id.as_str())) {
                dangling.push(DanglingRef::Stakeholder {
                    owner: event.id.clone(),
                    stakeholder: id.clone(),
                });
            }
        }

        for edge in &self.edges {
            let owner = edge_key(&edge.source_id, &edge.target_id);
            for id in [&edge.source_id, &edge.target_id] {
                if !stakeholders.contains(id.as_str()) {
                    dangling.push(DanglingRef::Stakeholder {
                        owner: owner.clone(),
                        stakeholder: id.clone(),
                    });
                }
            }
            for chapter in edge.chapter_refs.iter().filter(|c| !chapters.contains(c)) {
                dangling.push(DanglingRef::Chapter {
                    owner: owner.clone(),
                    chapter: *chapter,
                });
            }
        }

        for build in &self.builds {
            let props = &build.properties;
            if !events.contains(props.primary_event_id.as_str()) {
                dangling.push(DanglingRef::PrimaryEvent {
                    build: props.id.clone(),
                    event: props.primary_event_id.clone(),
                });
            }
            for chapter in props.chapter_refs.iter().filter(|c| !chapters.contains(c)) {
                dangling.push(DanglingRef::Chapter {
                    owner: props.id.clone(),
                    chapter: *chapter,
                });
            }
        }

        dangling
    }

    pub(super) fn report_dangling_refs(&self) -> usize {
        let dangling = self.dangling_refs();
        for r in &dangling {
            tracing::warn!(reference = %r, "Dangling dataset reference");
        }
        dangling.len()
    }
}
