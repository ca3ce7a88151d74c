//! Stakeholder edges and geographic build features.

use serde::{Deserialize, Serialize};

use super::{ChapterNumber, Dated, Year};
use crate::vocabulary::{BuildStatus, Relation};

/// Directed, time-bounded relation between two stakeholders.
///
/// Several edges may link the same pair over different year ranges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub source_id: String,
    pub target_id: String,
    pub relation: Relation,
    pub year_start: Year,
    pub year_end: Year,
    #[serde(default)]
    pub chapter_refs: Vec<ChapterNumber>,
    #[serde(default = "default_weight")]
    pub weight: f32,
}

fn default_weight() -> f32 {
    1.0
}

impl Edge {
    pub fn new(
        source_id: impl Into<String>,
        target_id: impl Into<String>,
        relation: Relation,
        year_start: Year,
        year_end: Year,
    ) -> Self {
        Self {
            source_id: source_id.into(),
            target_id: target_id.into(),
            relation,
            year_start,
            year_end,
            chapter_refs: Vec::new(),
            weight: default_weight(),
        }
    }

    pub fn with_chapter(mut self, chapter: ChapterNumber) -> Self {
        self.chapter_refs.push(chapter);
        self
    }

    pub fn with_weight(mut self, weight: f32) -> Self {
        self.weight = weight;
        self
    }

    pub fn in_chapter(&self, chapter: ChapterNumber) -> bool {
        self.chapter_refs.contains(&chapter)
    }
}

impl Dated for Edge {
    fn year_start(&self) -> Year {
        self.year_start
    }

    fn year_end(&self) -> Year {
        self.year_end
    }
}

/// Metadata of a geographic build feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildProperties {
    pub id: String,
    pub name: String,
    /// Free-form category ("parkway", "pool", "bridge", "contested", ...).
    pub category: String,
    pub year_start: Year,
    pub year_end: Year,
    #[serde(default)]
    pub chapter_refs: Vec<ChapterNumber>,
    pub status: BuildStatus,
    /// The event this build belongs to. The event does not track its builds.
    pub primary_event_id: String,
}

impl BuildProperties {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        year_start: Year,
        year_end: Year,
        primary_event_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            year_start,
            year_end,
            chapter_refs: Vec::new(),
            status: BuildStatus::Completed,
            primary_event_id: primary_event_id.into(),
        }
    }

    pub fn with_status(mut self, status: BuildStatus) -> Self {
        self.status = status;
        self
    }
}

impl Dated for BuildProperties {
    fn year_start(&self) -> Year {
        self.year_start
    }

    fn year_end(&self) -> Year {
        self.year_end
    }
}

/// A GeoJSON feature: build metadata plus an opaque geometry for the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildFeature {
    pub properties: BuildProperties,
    #[serde(default)]
    pub geometry: serde_json::Value,
}

impl BuildFeature {
    pub fn new(properties: BuildProperties) -> Self {
        Self {
            properties,
            geometry: serde_json::Value::Null,
        }
    }

    /// GeoJSON geometry type ("Point", "LineString", "Polygon", ...), if any.
    pub fn geometry_type(&self) -> Option<&str> {
        self.geometry.get("type").and_then(|t| t.as_str())
    }
}

/// The `FeatureCollection` wrapper used by the builds file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildCollection {
    #[serde(default)]
    pub features: Vec<BuildFeature>,
}
