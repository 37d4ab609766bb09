//! Error types for the superset_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for superset_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The catalog had no exercises to compose from
    #[error("No exercises available in the catalog")]
    NoExercises,

    /// No exercise/round combination met the movement-plane requirement
    #[error(
        "No {target_minutes}-minute workout satisfies the constraints \
         (needs {required_plane} frontal/transverse exercise(s))"
    )]
    InfeasibleConstraints {
        target_minutes: u32,
        required_plane: usize,
    },

    /// The exercise to swap out is not part of the given workout
    #[error("Exercise {0} is not part of the workout")]
    NotInWorkout(u32),

    /// Nothing left to swap in
    #[error("No replacement available for exercise {0}")]
    NoReplacement(u32),

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration or argument validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Catalog validation error
    #[error("Catalog validation error: {0}")]
    CatalogValidation(String),
}
