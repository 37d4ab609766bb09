#![forbid(unsafe_code)]

//! Core domain model and composition logic for the superset workout planner.
//!
//! This crate provides:
//! - Domain types (exercises, tags, requests, workouts)
//! - Catalog access and the built-in exercise catalog
//! - Filter pipeline with relaxation fallback
//! - Similarity and movement-plane classification
//! - Workout composition and single-exercise swapping

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod similarity;
pub mod filter;
pub mod duration;
pub mod composer;
pub mod swap;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{build_default_catalog, get_default_catalog, CatalogSource, JsonCatalogFile};
pub use config::Config;
pub use similarity::{are_similar, is_plane_exercise};
pub use filter::{filter_catalog, FilterStrategy};
pub use duration::estimate_seconds;
pub use composer::compose;
pub use swap::swap;
