//! # Atlas Data
//!
//! The Dataset Store for the historical atlas: chapters, dated events,
//! stakeholders, relationship edges and geographic build features.
//! Everything here is loaded once and never mutated. Selection logic lives in
//! `atlas_core`.

pub mod dataset;
pub mod entities;
pub mod vocabulary;

pub use dataset::*;
pub use entities::*;
pub use vocabulary::*;
