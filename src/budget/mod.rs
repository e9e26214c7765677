//! Resource limits for the search.
//!
//! Breadth-first search over a large domain can run for a long time. A
//! [`SearchBudget`] caps the number of expanded States and the wall-clock
//! time. Checks use Stillwater's `Validation` so that every exceeded limit
//! is reported together.
//!
//! # Example
//!
//! ```rust
//! use pickplace::budget::{BudgetBuilder, SearchBudget};
//! use std::time::Duration;
//!
//! let budget: SearchBudget = BudgetBuilder::new()
//!     .max_expansions(10_000)
//!     .timeout(Duration::from_secs(5))
//!     .build();
//! assert!(!budget.is_unbounded());
//! ```

pub mod builder;
pub mod context;
pub mod rules;
pub mod violations;

pub use builder::BudgetBuilder;
pub use context::SearchProgress;
pub use rules::SearchBudget;
pub use violations::BudgetViolation;
