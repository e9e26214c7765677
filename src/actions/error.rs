//! Construction errors for the action schema.

use super::ActionKind;
use crate::core::{ObjectId, PoseId};
use thiserror::Error;

/// Preconditions, effects or actions were assembled from operands that do
/// not fit their action kind.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConstructionError {
    #[error("PICK requires an empty gripper, but the precondition expects {0} to be held")]
    PickWhileHolding(ObjectId),

    #[error("PLACE requires a held object")]
    PlaceWithoutHolding,

    #[error("{kind} needs an object operand")]
    MissingObject { kind: ActionKind },

    #[error("PLACE needs a destination pose")]
    MissingDestination,

    #[error("{kind} does not take a destination (got {destination})")]
    UnexpectedDestination {
        kind: ActionKind,
        destination: PoseId,
    },

    #[error("Preconditions are for {preconditions} but effects are for {effects}")]
    KindMismatch {
        preconditions: ActionKind,
        effects: ActionKind,
    },

    #[error("Precondition expects {held} in hand but effects move {moved}")]
    OperandMismatch { held: ObjectId, moved: ObjectId },

    #[error("Precondition checks {checked} but effects place at {placed}")]
    DestinationMismatch { checked: PoseId, placed: PoseId },
}
