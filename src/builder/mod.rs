//! Builder API for planning problems.
//!
//! Problems are described with names ("put the cup on the table") and
//! resolved to handles once, at build time. The builder reports every
//! naming mistake as a [`BuildError`] instead of panicking.

pub mod error;
pub mod problem;

pub use error::BuildError;
pub use problem::{Problem, ProblemBuilder};
