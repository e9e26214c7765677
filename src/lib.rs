//! Pickplace: a symbolic planner for pick-and-place domains
//!
//! Given objects resting at symbolic locations and a target arrangement,
//! pickplace finds a shortest sequence of PICK and PLACE actions that turns
//! the initial arrangement into one satisfying the goal. The gripper holds
//! at most one object and no two objects may share a location.
//!
//! # Core Concepts
//!
//! - **State**: An immutable configuration plus a link to the State it came from
//! - **Actions**: PICK/PLACE values made of preconditions and effects
//! - **Search**: Breadth-first search with duplicate detection and optional budgets
//! - **Checkpoints**: Serializable records of solved plans
//!
//! # Example
//!
//! ```rust
//! use pickplace::builder::ProblemBuilder;
//! use pickplace::search::Planner;
//!
//! // Swap X and Y using C as a spare location.
//! let problem = ProblemBuilder::new()
//!     .locations(["A", "B", "C"])
//!     .object("X", "A")
//!     .object("Y", "B")
//!     .goal("X", "B")
//!     .goal("Y", "A")
//!     .build()
//!     .unwrap();
//!
//! let outcome = problem.solve(&Planner::unbounded()).unwrap();
//! let steps: Vec<String> = outcome
//!     .plan
//!     .actions()
//!     .iter()
//!     .map(|action| problem.describe(action))
//!     .collect();
//!
//! assert_eq!(
//!     steps,
//!     vec![
//!         "PICK X",
//!         "PLACE X at C",
//!         "PICK Y",
//!         "PLACE Y at A",
//!         "PICK X",
//!         "PLACE X at B",
//!     ]
//! );
//! ```

pub mod actions;
pub mod budget;
pub mod builder;
pub mod checkpoint;
pub mod core;
pub mod search;

// Re-export commonly used types
pub use actions::{Action, ActionKind};
pub use core::{Environment, Object, ObjectId, Plan, Pose, PoseId, State};
pub use search::{plan, PlanError, Planner};
