//! Errors raised while constructing States.

use super::domain::{ObjectId, PoseId};
use thiserror::Error;

/// A State could not be built from the given objects.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StateError {
    #[error("Object {0} appears more than once")]
    DuplicateObject(ObjectId),

    #[error("Object {object} refers to pose {pose}, which is not in the environment")]
    UnknownPose { object: ObjectId, pose: PoseId },

    #[error("Objects {first} and {second} both occupy pose {pose}")]
    SharedPose {
        pose: PoseId,
        first: ObjectId,
        second: ObjectId,
    },

    #[error("Object {0} has no pose and is not held")]
    UnplacedObject(ObjectId),

    #[error("Held object {object} is also recorded at pose {pose}")]
    HeldObjectHasPose { object: ObjectId, pose: PoseId },

    #[error("Object {0} is not part of the problem")]
    UnknownObject(ObjectId),

    #[error("Initial and goal states use different environments")]
    EnvironmentMismatch,
}
