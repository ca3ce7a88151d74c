//! The Dataset Store - every collection the atlas browses, loaded once.
//!
//! A [`Dataset`] is immutable after construction. All selection happens over
//! borrowed slices, so the store can be shared freely for the whole session.

mod validation;

pub use validation::*;

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::entities::{BuildCollection, BuildFeature, Chapter, Edge, Event, Stakeholder};

pub const CHAPTERS_FILE: &str = "chapters.json";
pub const EVENTS_FILE: &str = "events.json";
pub const STAKEHOLDERS_FILE: &str = "stakeholders.json";
pub const EDGES_FILE: &str = "edges.json";
pub const BUILDS_FILE: &str = "builds.json";

/// Errors raised while loading or validating a dataset.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// A collection file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A collection is not valid JSON for its record type.
    #[error("failed to parse {collection}: {source}")]
    Json {
        collection: &'static str,
        source: serde_json::Error,
    },

    /// An entity ends before it starts.
    #[error("{collection} entry {id} has year_start {year_start} after year_end {year_end}")]
    InvertedYearRange {
        collection: &'static str,
        id: String,
        year_start: i32,
        year_end: i32,
    },

    /// Two entries of a keyed collection share the same key.
    #[error("duplicate {collection} id: {id}")]
    DuplicateId { collection: &'static str, id: String },
}

/// Raw JSON text of the five collections.
#[derive(Debug, Clone, Copy)]
pub struct DatasetJson<'a> {
    pub chapters: &'a str,
    pub events: &'a str,
    pub stakeholders: &'a str,
    pub edges: &'a str,
    /// A GeoJSON `FeatureCollection`.
    pub builds: &'a str,
}

const SAMPLE: DatasetJson<'static> = DatasetJson {
    chapters: include_str!("../../data/chapters.json"),
    events: include_str!("../../data/events.json"),
    stakeholders: include_str!("../../data/stakeholders.json"),
    edges: include_str!("../../data/edges.json"),
    builds: include_str!("../../data/builds.json"),
};

/// The complete, read-only atlas dataset.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Dataset {
    chapters: Vec<Chapter>,
    events: Vec<Event>,
    stakeholders: Vec<Stakeholder>,
    edges: Vec<Edge>,
    builds: Vec<BuildFeature>,
}

impl Dataset {
    /// Validate and seal a set of collections.
    ///
    /// Inverted year ranges and duplicate keys are rejected. Dangling
    /// references are logged and kept, lookups tolerate them.
    pub fn new(
        chapters: Vec<Chapter>,
        events: Vec<Event>,
        stakeholders: Vec<Stakeholder>,
        edges: Vec<Edge>,
        builds: Vec<BuildFeature>,
    ) -> Result<Self, DatasetError> {
        let dataset = Self {
            chapters,
            events,
            stakeholders,
            edges,
            builds,
        };

        dataset.check_year_ranges()?;
        dataset.check_unique_ids()?;
        let dangling = dataset.report_dangling_refs();

        tracing::info!(
            chapters = dataset.chapters.len(),
            events = dataset.events.len(),
            stakeholders = dataset.stakeholders.len(),
            edges = dataset.edges.len(),
            builds = dataset.builds.len(),
            dangling,
            "Dataset loaded"
        );

        Ok(dataset)
    }

    /// Parse all five collections from JSON text.
    pub fn from_json(json: DatasetJson<'_>) -> Result<Self, DatasetError> {
        let chapters = parse("chapters", json.chapters)?;
        let events = parse("events", json.events)?;
        let stakeholders = parse("stakeholders", json.stakeholders)?;
        let edges = parse("edges", json.edges)?;
        let builds: BuildCollection = parse("builds", json.builds)?;

        Self::new(chapters, events, stakeholders, edges, builds.features)
    }

    /// Load the collection files from a directory.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let dir = dir.as_ref();
        let chapters = read(dir, CHAPTERS_FILE)?;
        let events = read(dir, EVENTS_FILE)?;
        let stakeholders = read(dir, STAKEHOLDERS_FILE)?;
        let edges = read(dir, EDGES_FILE)?;
        let builds = read(dir, BUILDS_FILE)?;

        tracing::debug!(dir = %dir.display(), "Read dataset files");

        Self::from_json(DatasetJson {
            chapters: &chapters,
            events: &events,
            stakeholders: &stakeholders,
            edges: &edges,
            builds: &builds,
        })
    }

    /// The bundled sample dataset.
    pub fn sample() -> Result<Self, DatasetError> {
        Self::from_json(SAMPLE)
    }

    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn stakeholders(&self) -> &[Stakeholder] {
        &self.stakeholders
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn builds(&self) -> &[BuildFeature] {
        &self.builds
    }
}

fn parse<T: serde::de::DeserializeOwned>(
    collection: &'static str,
    text: &str,
) -> Result<T, DatasetError> {
    serde_json::from_str(text).map_err(|source| DatasetError::Json { collection, source })
}

fn read(dir: &Path, file: &str) -> Result<String, DatasetError> {
    let path = dir.join(file);
    std::fs::read_to_string(&path).map_err(|source| DatasetError::Io { path, source })
}
