//! The PICK/PLACE action schema.
//!
//! An [`Action`] pairs [`Preconditions`] with [`Effects`]. Actions are plain
//! values: they are built without a State and can be applied to any number
//! of States. Applying an action whose preconditions fail yields `None`,
//! which the search treats as ordinary pruning rather than an error.
//!
//! # Example
//!
//! ```rust
//! use pickplace::actions::Action;
//! use pickplace::core::{Environment, Object, ObjectId, PoseId, State};
//! use std::sync::Arc;
//!
//! let env = Arc::new(Environment::new(["A", "B"]));
//! let root = Arc::new(State::initial(env, [Object::at(ObjectId(0), PoseId(0))], None).unwrap());
//!
//! // Nothing is held yet, so PLACE does not apply.
//! assert!(Action::place(ObjectId(0), PoseId(1)).apply(&root).is_none());
//!
//! let picked = Action::pick(ObjectId(0)).apply(&root).unwrap();
//! assert_eq!(picked.holding(), Some(ObjectId(0)));
//! ```

mod effects;
mod error;
mod preconditions;

pub use effects::Effects;
pub use error::ConstructionError;
pub use preconditions::Preconditions;

use crate::core::{ObjectId, PoseId, State};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// The two action types.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum ActionKind {
    Pick,
    Place,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pick => f.write_str("PICK"),
            Self::Place => f.write_str("PLACE"),
        }
    }
}

/// A named transition: preconditions plus effects of one kind.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Action {
    preconditions: Preconditions,
    effects: Effects,
}

impl Action {
    /// Pair preconditions with effects, checking that they agree.
    pub fn new(preconditions: Preconditions, effects: Effects) -> Result<Self, ConstructionError> {
        match (preconditions, effects) {
            (Preconditions::Pick, Effects::Pick { .. }) => {}
            (
                Preconditions::Place {
                    holding,
                    destination,
                },
                Effects::Place {
                    object,
                    destination: placed,
                },
            ) => {
                if holding != object {
                    return Err(ConstructionError::OperandMismatch {
                        held: holding,
                        moved: object,
                    });
                }
                if destination != placed {
                    return Err(ConstructionError::DestinationMismatch {
                        checked: destination,
                        placed,
                    });
                }
            }
            _ => {
                return Err(ConstructionError::KindMismatch {
                    preconditions: preconditions.kind(),
                    effects: effects.kind(),
                })
            }
        }

        Ok(Self {
            preconditions,
            effects,
        })
    }

    /// PICK `object`: requires an empty gripper.
    pub fn pick(object: ObjectId) -> Self {
        Self {
            preconditions: Preconditions::Pick,
            effects: Effects::Pick { object },
        }
    }

    /// PLACE `object` at `destination`: requires holding `object` and a
    /// free destination.
    pub fn place(object: ObjectId, destination: PoseId) -> Self {
        Self {
            preconditions: Preconditions::Place {
                holding: object,
                destination,
            },
            effects: Effects::Place {
                object,
                destination,
            },
        }
    }

    pub fn kind(&self) -> ActionKind {
        self.effects.kind()
    }

    pub fn object(&self) -> ObjectId {
        self.effects.object()
    }

    pub fn destination(&self) -> Option<PoseId> {
        self.effects.destination()
    }

    pub fn preconditions(&self) -> &Preconditions {
        &self.preconditions
    }

    pub fn effects(&self) -> &Effects {
        &self.effects
    }

    /// Apply to `state`, returning the child State or `None` if the action
    /// is infeasible there.
    ///
    /// The child records `state` as its parent and `self` as the action
    /// that produced it.
    pub fn apply(&self, state: &Arc<State>) -> Option<State> {
        // The operand must already be part of the problem.
        if !state.objects().contains_key(&self.object()) {
            return None;
        }
        if !self.preconditions.satisfied(state) {
            return None;
        }
        let child = self.effects.apply(state);
        Some(child.with_origin(Arc::clone(state), *self))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.effects {
            Effects::Pick { object } => write!(f, "PICK {object}"),
            Effects::Place {
                object,
                destination,
            } => write!(f, "PLACE {object} -> {destination}"),
        }
    }
}
