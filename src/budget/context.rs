//! Progress snapshot handed to budget checks.

use chrono::{DateTime, Utc};
use std::time::Duration;

/// How far a search has come.
#[derive(Clone, Debug)]
pub struct SearchProgress {
    /// States dequeued and expanded so far
    pub expanded: usize,
    pub started_at: DateTime<Utc>,
}

impl SearchProgress {
    pub fn start() -> Self {
        Self {
            expanded: 0,
            started_at: Utc::now(),
        }
    }

    /// Elapsed wall-clock time since the search started.
    pub fn elapsed(&self) -> Duration {
        let now = Utc::now();
        now.signed_duration_since(self.started_at)
            .to_std()
            .unwrap_or(Duration::ZERO)
    }
}
