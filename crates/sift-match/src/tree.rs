//! Decision trees: the compiler's output.
//!
//! A tree has three node kinds:
//!
//! - `Fail` -- no case matched; the consumer emits its default or a trap
//! - `Success` -- dispatch to the case with the carried original index
//! - `Check` -- a single runtime shape test at one occurrence, with a
//!   success and a fail branch
//!
//! The type carried by a `Check` always has its arguments made unknown:
//! the consumer emits exactly one outer-shape test and nothing deeper.

use std::fmt;

use sift_types::{Occurrence, Ty};

/// Original case number carried through compilation. The compiler never
/// interprets it; a front-end conventionally represents a default case as
/// a final catch-all pattern with index `-1`.
pub type CaseIndex = i32;

/// A compiled decision tree.
#[derive(Clone, Debug, PartialEq)]
pub enum DecisionTree {
    /// No case matched.
    Fail,
    /// Dispatch to the case with this original index.
    Success(CaseIndex),
    /// Test the value at `occurrence` against the outer shape of `ty`.
    Check {
        /// The outer shape to test; every nested position is `unknown`.
        ty: Ty,
        /// The position in the scrutinee the test reads.
        occurrence: Occurrence,
        /// Taken when the value has the shape.
        success: Box<DecisionTree>,
        /// Taken otherwise.
        fail: Box<DecisionTree>,
    },
}

impl DecisionTree {
    /// Build a check node.
    pub fn check(
        ty: Ty,
        occurrence: Occurrence,
        success: DecisionTree,
        fail: DecisionTree,
    ) -> DecisionTree {
        DecisionTree::Check {
            ty,
            occurrence,
            success: Box::new(success),
            fail: Box::new(fail),
        }
    }

    /// Longest root-to-leaf path, counting every node.
    pub fn depth(&self) -> usize {
        match self {
            DecisionTree::Fail | DecisionTree::Success(_) => 1,
            DecisionTree::Check { success, fail, .. } => {
                1 + success.depth().max(fail.depth())
            }
        }
    }

    /// Total number of nodes.
    pub fn node_count(&self) -> usize {
        match self {
            DecisionTree::Fail | DecisionTree::Success(_) => 1,
            DecisionTree::Check { success, fail, .. } => {
                1 + success.node_count() + fail.node_count()
            }
        }
    }

    fn fmt_at(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        let pad = "  ".repeat(indent);
        match self {
            DecisionTree::Fail => write!(f, "{}fail", pad),
            DecisionTree::Success(case) => write!(f, "{}success {}", pad, case),
            DecisionTree::Check { ty, occurrence, success, fail } => {
                writeln!(f, "{}check {} is {}", pad, occurrence, ty)?;
                success.fmt_at(f, indent + 1)?;
                writeln!(f)?;
                fail.fmt_at(f, indent + 1)
            }
        }
    }
}

impl fmt::Display for DecisionTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_at(f, 0)
    }
}
