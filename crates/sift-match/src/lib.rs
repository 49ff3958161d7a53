//! Match tables and the decision-tree compiler.
//!
//! This crate lowers type-driven pattern matches into decision trees.
//! Given a static upper bound on the scrutinee and one pattern union per
//! case, [`compile`] produces a [`DecisionTree`] whose evaluation against
//! a runtime value is observationally the same as testing the cases in
//! order, while skipping every test the type information already decides.
//!
//! # Architecture
//!
//! - [`table`]: the [`MatchTable`] and its refinement operations
//!   (specialize success/fail, expand, remove-redundant)
//! - [`compile`](mod@compile): candidate-check selection, the
//!   skippable-check fast path, and the recursive compiler
//! - [`tree`]: the [`DecisionTree`] output with its printer
//!
//! The compiler is a pure function over immutable values: no I/O, no
//! shared state, and deterministic output for a given input.

pub mod compile;
pub mod table;
pub mod tree;

pub use compile::compile;
pub use table::MatchTable;
pub use tree::{CaseIndex, DecisionTree};
