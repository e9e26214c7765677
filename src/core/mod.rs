//! Domain model and planning states.
//!
//! This module holds the pure data side of the planner:
//! - Identity types for locations and objects, and the shared `Environment`
//! - `State`, its successor enumeration and goal test
//! - `Plan`, the reconstructed path from an initial State to a goal
//!
//! Nothing here performs I/O or keeps process-wide state.

mod domain;
mod error;
mod plan;
mod state;

pub use domain::{Environment, Object, ObjectId, Pose, PoseId};
pub use error::StateError;
pub use plan::{Plan, PlanStep};
pub use state::{State, StateKey};
