//! # Atlas Core
//!
//! The selection engine of the historical atlas. Given a timeline cursor
//! (a year or a chapter) and a set of method tags, it produces the event
//! feed, the build features to reveal on the map and the power index.
//!
//! ## Core Components
//!
//! - **selectors**: Pure filters, lookups and the power index over the dataset
//! - **view**: Navigation state, its transitions and the derived outputs
//! - **controller**: A session owning the dataset and the current view state
//! - **config**: TOML configuration for the engine constants
//!
//! Rendering is out of scope. Everything exposed here is plain data.

pub mod config;
pub mod controller;
pub mod selectors;
pub mod view;

pub use config::*;
pub use controller::*;
pub use selectors::*;
pub use view::*;
