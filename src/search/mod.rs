//! State-space search.
//!
//! [`Planner`] runs a breadth-first search over the implicit graph defined
//! by [`State::next_states`](crate::core::State::next_states), de-duplicating
//! configurations and honouring an optional [`SearchBudget`](crate::budget::SearchBudget).
//! [`plan`] is the budget-free entry point.

mod error;
mod planner;

pub use error::PlanError;
pub use planner::{plan, Planner, SearchOutcome, SearchStats};
