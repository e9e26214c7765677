//! Budget violations.

use std::time::Duration;
use thiserror::Error;

/// A search limit that was exceeded.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BudgetViolation {
    #[error("Expansion limit ({max}) reached (expanded: {expanded})")]
    ExpansionsExceeded { max: usize, expanded: usize },

    #[error("Timeout ({timeout:?}) reached (elapsed: {elapsed:?})")]
    TimeoutExceeded {
        timeout: Duration,
        elapsed: Duration,
    },
}
