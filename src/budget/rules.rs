//! Search budget rules using Validation.

use crate::budget::context::SearchProgress;
use crate::budget::violations::BudgetViolation;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Limits on how much work a search may do.
///
/// Both limits are inclusive: a search stops once it has expanded
/// `max_expansions` States or run for `timeout`.
///
/// The default budget is unbounded. Budgets are plain values and can be
/// loaded from configuration:
///
/// ```rust
/// use pickplace::budget::SearchBudget;
///
/// let budget: SearchBudget = serde_json::from_str(r#"{"max_expansions": 500}"#).unwrap();
/// assert_eq!(budget.max_expansions, Some(500));
/// assert_eq!(budget.timeout, None);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchBudget {
    #[serde(default)]
    pub max_expansions: Option<usize>,
    #[serde(default)]
    pub timeout: Option<Duration>,
}

impl SearchBudget {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn is_unbounded(&self) -> bool {
        self.max_expansions.is_none() && self.timeout.is_none()
    }

    /// Check every limit, accumulating ALL violations.
    /// Returns Validation::Success(()) if the search may keep expanding.
    pub fn enforce(&self, progress: &SearchProgress) -> Validation<(), NonEmptyVec<BudgetViolation>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<BudgetViolation>>> = Vec::new();

        if let Some(max) = self.max_expansions {
            let check = if progress.expanded >= max {
                Validation::fail(BudgetViolation::ExpansionsExceeded {
                    max,
                    expanded: progress.expanded,
                })
            } else {
                Validation::success(())
            };
            checks.push(check);
        }

        if let Some(timeout) = self.timeout {
            let elapsed = progress.elapsed();
            let check = if elapsed >= timeout {
                Validation::fail(BudgetViolation::TimeoutExceeded { timeout, elapsed })
            } else {
                Validation::success(())
            };
            checks.push(check);
        }

        Validation::all_vec(checks).map(|_| ())
    }

    /// Like [`enforce`](Self::enforce), reporting only the first violation.
    pub fn check(&self, progress: &SearchProgress) -> Result<(), BudgetViolation> {
        match self.enforce(progress) {
            Validation::Success(()) => Ok(()),
            Validation::Failure(violations) => match violations.iter().next() {
                Some(violation) => Err(violation.clone()),
                None => Ok(()),
            },
        }
    }
}
