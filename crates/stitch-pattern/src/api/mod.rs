//! Public API for the stitch-pattern crate.
//!
//! This module provides the high-level API: the [`StitchPattern`] builder,
//! the finished [`Pattern`] and the [`PatternError`] unified error type.

mod builder;
mod error;

pub use builder::{Pattern, StitchPattern};
pub use error::PatternError;
