//! High-level commands for zeta operations.
//!
//! These are the entry points frontends call; they take care of expanding
//! the input into roots and keeping one root's failure from affecting the
//! others.

pub mod link;

pub use link::{LinkCommand, LinkOptions, LinkOutcome};
