//! Effects of the two action kinds.

use super::error::ConstructionError;
use super::ActionKind;
use crate::core::{ObjectId, PoseId, State};
use serde::{Deserialize, Serialize};

/// How an action changes a State.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Effects {
    /// Lift `object` into the gripper. Its pose is cleared.
    Pick { object: ObjectId },
    /// Set `object` down at `destination` and empty the gripper.
    Place {
        object: ObjectId,
        destination: PoseId,
    },
}

impl Effects {
    /// Checked constructor from loose operands.
    pub fn new(
        kind: ActionKind,
        object: Option<ObjectId>,
        destination: Option<PoseId>,
    ) -> Result<Self, ConstructionError> {
        let object = object.ok_or(ConstructionError::MissingObject { kind })?;
        match (kind, destination) {
            (ActionKind::Pick, None) => Ok(Self::Pick { object }),
            (ActionKind::Pick, Some(destination)) => {
                Err(ConstructionError::UnexpectedDestination { kind, destination })
            }
            (ActionKind::Place, Some(destination)) => Ok(Self::Place {
                object,
                destination,
            }),
            (ActionKind::Place, None) => Err(ConstructionError::MissingDestination),
        }
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            Self::Pick { .. } => ActionKind::Pick,
            Self::Place { .. } => ActionKind::Place,
        }
    }

    pub fn object(&self) -> ObjectId {
        match self {
            Self::Pick { object } | Self::Place { object, .. } => *object,
        }
    }

    pub fn destination(&self) -> Option<PoseId> {
        match self {
            Self::Pick { .. } => None,
            Self::Place { destination, .. } => Some(*destination),
        }
    }

    /// Produce the successor configuration. `state` is left untouched.
    ///
    /// Callers check the matching preconditions first; the result carries
    /// no lineage until the owning action attaches it.
    pub fn apply(&self, state: &State) -> State {
        let mut next = state.detached();
        match *self {
            Self::Pick { object } => {
                next.set_pose(object, None);
                next.set_holding(Some(object));
            }
            Self::Place {
                object,
                destination,
            } => {
                next.set_pose(object, Some(destination));
                next.set_holding(None);
            }
        }
        next
    }
}
