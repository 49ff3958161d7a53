//! Structural type lattice for the sift match compiler.
//!
//! This crate models the runtime shapes a scrutinee can take and the
//! lattice operations the decision-tree compiler in `sift-match` is built
//! on. Types are plain owned trees; every operation returns fresh values
//! and nothing is mutated after construction, so values can be shared
//! across threads freely.
//!
//! # Architecture
//!
//! - [`literal`]: exact values ([`Literal`]) and primitive kinds ([`Prim`])
//! - [`ty`]: the [`Ty`] sum, object fields, constructor helpers, and the
//!   constructor-shape operations (arguments, access, args-made-unknown)
//! - [`union`]: [`Union`] multisets with flatten, dedup, canonicalize, and
//!   replace-at-occurrence
//! - [`subtype`]: the subtype relation plus [`minima`] / [`maxima`]
//! - [`intersect`]: intersection on types and unions
//! - [`access`]: [`Accessor`] steps and [`Occurrence`] paths

pub mod access;
pub mod intersect;
pub mod literal;
pub mod subtype;
pub mod ty;
pub mod union;

pub use access::{Accessor, Occurrence};
pub use literal::{Literal, Prim};
pub use subtype::{maxima, minima};
pub use ty::{ObjectField, Ty};
pub use union::Union;
