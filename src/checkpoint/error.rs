//! Checkpoint error types.

use crate::actions::Action;
use crate::core::{ObjectId, StateError};
use thiserror::Error;

/// Why a checkpoint could not be written, read or restored.
#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error("Could not encode checkpoint as {format}: {reason}")]
    SerializationFailed { format: &'static str, reason: String },

    #[error("Could not decode {format} checkpoint: {reason}")]
    DeserializationFailed { format: &'static str, reason: String },

    #[error("Unsupported checkpoint version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("Checkpoint does not replay: {0}")]
    ValidationFailed(#[from] ReplayError),
}

/// A recorded plan that no longer holds up when replayed.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ReplayError {
    #[error("initial configuration is invalid: {0}")]
    InvalidInitial(StateError),

    #[error("goal is invalid: {0}")]
    InvalidGoal(StateError),

    /// Goals only constrain resting objects.
    #[error("goal leaves {0} without a pose")]
    UnplacedGoalObject(ObjectId),

    #[error("step {step}: {action} is infeasible")]
    InfeasibleStep { step: usize, action: Action },

    #[error("{actions} actions replayed without reaching the goal")]
    GoalNotReached { actions: usize },
}
