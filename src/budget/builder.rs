//! Builder API for search budgets.

use crate::budget::rules::SearchBudget;
use std::time::Duration;

/// Fluent builder for [`SearchBudget`].
#[derive(Clone, Debug, Default)]
pub struct BudgetBuilder {
    max_expansions: Option<usize>,
    timeout: Option<Duration>,
}

impl BudgetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop after this many States have been expanded
    pub fn max_expansions(mut self, n: usize) -> Self {
        self.max_expansions = Some(n);
        self
    }

    /// Stop once this much wall-clock time has passed
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    pub fn build(self) -> SearchBudget {
        SearchBudget {
            max_expansions: self.max_expansions,
            timeout: self.timeout,
        }
    }
}
