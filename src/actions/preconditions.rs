//! Preconditions of the two action kinds.

use super::error::ConstructionError;
use super::ActionKind;
use crate::core::{ObjectId, PoseId, State};
use serde::{Deserialize, Serialize};

/// What must hold in a State before an action applies.
///
/// # Example
///
/// ```rust
/// use pickplace::actions::{ActionKind, ConstructionError, Preconditions};
/// use pickplace::core::{ObjectId, PoseId};
///
/// let place = Preconditions::new(ActionKind::Place, Some(ObjectId(0)), Some(PoseId(1)));
/// assert!(place.is_ok());
///
/// let bad = Preconditions::new(ActionKind::Place, None, Some(PoseId(1)));
/// assert_eq!(bad.unwrap_err(), ConstructionError::PlaceWithoutHolding);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Preconditions {
    /// The gripper must be empty.
    Pick,
    /// The gripper must hold exactly `holding`, and `destination` must be a
    /// free location of the State's environment.
    Place {
        holding: ObjectId,
        destination: PoseId,
    },
}

impl Preconditions {
    /// Checked constructor from loose operands.
    ///
    /// `holding` is the required holding status; `destination` is the pose
    /// whose occupancy PLACE checks.
    pub fn new(
        kind: ActionKind,
        holding: Option<ObjectId>,
        destination: Option<PoseId>,
    ) -> Result<Self, ConstructionError> {
        match kind {
            ActionKind::Pick => {
                if let Some(held) = holding {
                    return Err(ConstructionError::PickWhileHolding(held));
                }
                if let Some(destination) = destination {
                    return Err(ConstructionError::UnexpectedDestination { kind, destination });
                }
                Ok(Self::Pick)
            }
            ActionKind::Place => {
                let holding = holding.ok_or(ConstructionError::PlaceWithoutHolding)?;
                let destination = destination.ok_or(ConstructionError::MissingDestination)?;
                Ok(Self::Place {
                    holding,
                    destination,
                })
            }
        }
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            Self::Pick => ActionKind::Pick,
            Self::Place { .. } => ActionKind::Place,
        }
    }

    /// The holding status this precondition requires.
    pub fn required_holding(&self) -> Option<ObjectId> {
        match self {
            Self::Pick => None,
            Self::Place { holding, .. } => Some(*holding),
        }
    }

    /// Check the precondition against a State (pure).
    pub fn satisfied(&self, state: &State) -> bool {
        if state.holding() != self.required_holding() {
            return false;
        }
        match self {
            Self::Pick => true,
            Self::Place { destination, .. } => {
                state.environment().contains(*destination)
                    && state.occupant(*destination).is_none()
            }
        }
    }
}
