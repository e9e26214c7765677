//! Build errors for planning problems.

use crate::core::StateError;
use thiserror::Error;

/// Errors that can occur when building a problem.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BuildError {
    #[error("No locations defined. Add at least one with .location(name)")]
    NoLocations,

    #[error("Location '{0}' is defined twice")]
    DuplicateLocation(String),

    #[error("Object '{0}' is defined twice")]
    DuplicateObject(String),

    #[error("Unknown location '{0}'")]
    UnknownLocation(String),

    #[error("Unknown object '{0}'")]
    UnknownObject(String),

    #[error("Gripper already holds '{held}', cannot also hold '{requested}'")]
    AlreadyHolding { held: String, requested: String },

    #[error("Invalid state: {0}")]
    InvalidState(#[from] StateError),
}
