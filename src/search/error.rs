//! Search errors.

use crate::budget::BudgetViolation;
use crate::core::StateError;
use std::time::Duration;
use thiserror::Error;

/// Why the planner did not return a plan.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PlanError {
    /// The whole reachable state space was explored without meeting the
    /// goal. This is a definitive answer.
    #[error("No plan reaches the goal ({explored} states explored)")]
    NoPlanFound { explored: usize },

    /// The expansion limit stopped the search; a plan may still exist.
    #[error("Search stopped after {expanded} expansions (limit {max})")]
    SearchExhausted { max: usize, expanded: usize },

    /// The time limit stopped the search; a plan may still exist.
    #[error("Search timed out after {elapsed:?} (limit {timeout:?})")]
    SearchTimedOut { timeout: Duration, elapsed: Duration },

    #[error("Goal state is not marked as a goal specification")]
    NotAGoal,

    #[error("Invalid problem: {0}")]
    InvalidProblem(#[from] StateError),
}

impl From<BudgetViolation> for PlanError {
    fn from(violation: BudgetViolation) -> Self {
        match violation {
            BudgetViolation::ExpansionsExceeded { max, expanded } => {
                Self::SearchExhausted { max, expanded }
            }
            BudgetViolation::TimeoutExceeded { timeout, elapsed } => {
                Self::SearchTimedOut { timeout, elapsed }
            }
        }
    }
}
