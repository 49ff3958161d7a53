//! The subtype relation and extremal elements.
//!
//! Subtyping is defined by cases on the supertype: everything is below
//! `unknown`; a literal is below the primitive of its kind; a tuple is
//! below an array whose element union covers the flattened elements; an
//! object is below an object with fewer fields (width subtyping) and
//! below a record whose value union covers all of its field unions.

use crate::ty::Ty;
use crate::union::Union;

impl Ty {
    /// Whether `self <: other`.
    pub fn is_subtype_of(&self, other: &Ty) -> bool {
        match other {
            Ty::Unknown => true,
            Ty::Literal(b) => matches!(self, Ty::Literal(a) if a == b),
            Ty::Primitive(p) => match self {
                Ty::Primitive(a) => a == p,
                Ty::Literal(lit) => lit.prim() == Some(*p),
                _ => false,
            },
            Ty::Tuple(bs) => match self {
                Ty::Tuple(elements) => {
                    elements.len() == bs.len()
                        && elements
                            .iter()
                            .zip(bs)
                            .all(|(a, b)| a.is_subunion_of(b))
                }
                _ => false,
            },
            Ty::Array(e) => match self {
                Ty::Array(a) => a.is_subunion_of(e),
                Ty::Tuple(elements) => Union::flatten(elements).is_subunion_of(e),
                _ => false,
            },
            Ty::Object(bf) => match self {
                Ty::Object(af) => bf.iter().all(|b| {
                    af.iter()
                        .any(|a| a.name == b.name && a.union.is_subunion_of(&b.union))
                }),
                _ => false,
            },
            Ty::Record(e) => match self {
                Ty::Record(a) => a.is_subunion_of(e),
                Ty::Object(af) => {
                    let unions: Vec<Union> =
                        af.iter().map(|f| f.union.clone()).collect();
                    Union::flatten(&unions).is_subunion_of(e)
                }
                _ => false,
            },
        }
    }

    /// Whether `self <: other` but not `other <: self`.
    pub fn is_strict_subtype_of(&self, other: &Ty) -> bool {
        self.is_subtype_of(other) && !other.is_subtype_of(self)
    }
}

impl Union {
    /// Whether every member of `self` is a subtype of some member of
    /// `other`. The empty union is a subunion of everything.
    pub fn is_subunion_of(&self, other: &Union) -> bool {
        self.iter()
            .all(|t| other.iter().any(|s| t.is_subtype_of(s)))
    }
}

/// The members of `ts` with no strict subtype also in `ts`: the most
/// specific representatives. Non-empty for non-empty input; reflexive
/// equals are kept.
pub fn minima(ts: &[Ty]) -> Vec<Ty> {
    ts.iter()
        .filter(|t| !ts.iter().any(|s| s.is_strict_subtype_of(t)))
        .cloned()
        .collect()
}

/// The members of `ts` with no strict supertype also in `ts`: the most
/// general representatives. Dual of [`minima`].
pub fn maxima(ts: &[Ty]) -> Vec<Ty> {
    ts.iter()
        .filter(|t| !ts.iter().any(|s| t.is_strict_subtype_of(s)))
        .cloned()
        .collect()
}
