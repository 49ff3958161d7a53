//! Unions of types and the operations the compiler drives them with.
//!
//! A [`Union`] is semantically a multiset of [`Ty`]s: order is never a
//! semantic property, but it is preserved so iteration (and therefore code
//! emission downstream) stays deterministic. Duplicates are permitted until
//! [`Union::dedup`] or [`Union::canonicalize`] runs.

use std::fmt;

use crate::access::{Accessor, Occurrence};
use crate::subtype::maxima;
use crate::ty::{ObjectField, Ty};

/// An unordered (but deterministically iterated) collection of types.
#[derive(Clone, Debug, Default)]
pub struct Union {
    types: Vec<Ty>,
}

impl Union {
    /// A union over the given member types.
    pub fn new(types: Vec<Ty>) -> Union {
        Union { types }
    }

    /// The singleton union `{ty}`.
    pub fn single(ty: Ty) -> Union {
        Union { types: vec![ty] }
    }

    /// The empty (uninhabited) union.
    pub fn empty() -> Union {
        Union { types: Vec::new() }
    }

    /// The member types in iteration order.
    pub fn types(&self) -> &[Ty] {
        &self.types
    }

    /// Number of members (before any dedup).
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the union has no members.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Iterate the members.
    pub fn iter(&self) -> std::slice::Iter<'_, Ty> {
        self.types.iter()
    }

    /// Whether some member equals `ty`.
    pub fn contains(&self, ty: &Ty) -> bool {
        self.types.iter().any(|t| t == ty)
    }

    /// The sole member of a singleton union.
    pub fn single_type(&self) -> Option<&Ty> {
        match self.types.as_slice() {
            [ty] => Some(ty),
            _ => None,
        }
    }

    /// Drop duplicate members, keeping the first of each equality class.
    pub fn dedup(&self) -> Union {
        let mut kept: Vec<Ty> = Vec::new();
        for ty in &self.types {
            if !kept.iter().any(|k| k == ty) {
                kept.push(ty.clone());
            }
        }
        Union::new(kept)
    }

    /// Concatenate several unions and dedup the result.
    pub fn flatten(unions: &[Union]) -> Union {
        let mut all = Vec::new();
        for u in unions {
            all.extend(u.types.iter().cloned());
        }
        Union::new(all).dedup()
    }

    /// Canonical form: members recursively canonicalized, duplicates
    /// dropped, then only the maxima kept (members subsumed by a more
    /// general member are absorbed). Idempotent.
    pub fn canonicalize(&self) -> Union {
        let members: Vec<Ty> = self.types.iter().map(canonicalize_ty).collect();
        let deduped = Union::new(members).dedup();
        Union::new(maxima(deduped.types()))
    }

    /// Replace the sub-union reachable by `occurrence` with `replacement`.
    ///
    /// Each member is walked down the path with matching constructors;
    /// members whose constructor disagrees with the next accessor are
    /// dropped, as are members with out-of-range tuple indices. The
    /// receiver is unchanged.
    pub fn replace_at(&self, occurrence: &Occurrence, replacement: &Union) -> Union {
        replace_union(self, occurrence.steps(), replacement)
    }
}

fn canonicalize_ty(ty: &Ty) -> Ty {
    match ty {
        Ty::Unknown | Ty::Literal(_) | Ty::Primitive(_) => ty.clone(),
        Ty::Tuple(elements) => {
            Ty::Tuple(elements.iter().map(|u| u.canonicalize()).collect())
        }
        Ty::Array(element) => Ty::array(element.canonicalize()),
        Ty::Object(fields) => Ty::Object(
            fields
                .iter()
                .map(|f| ObjectField {
                    name: f.name.clone(),
                    union: f.union.canonicalize(),
                    optional: f.optional,
                })
                .collect(),
        ),
        Ty::Record(values) => Ty::record(values.canonicalize()),
    }
}

fn replace_union(u: &Union, steps: &[Accessor], replacement: &Union) -> Union {
    if steps.is_empty() {
        return replacement.clone();
    }
    let kept: Vec<Ty> = u
        .iter()
        .filter_map(|ty| replace_ty(ty, steps, replacement))
        .collect();
    Union::new(kept)
}

fn replace_ty(ty: &Ty, steps: &[Accessor], replacement: &Union) -> Option<Ty> {
    match (ty, &steps[0]) {
        (Ty::Tuple(elements), Accessor::Index(i)) => {
            if *i >= elements.len() {
                return None;
            }
            let mut elements = elements.clone();
            elements[*i] = replace_union(&elements[*i], &steps[1..], replacement);
            Some(Ty::Tuple(elements))
        }
        (Ty::Array(element), Accessor::ArrayElement) => {
            Some(Ty::array(replace_union(element, &steps[1..], replacement)))
        }
        (Ty::Object(fields), Accessor::Property(name)) => {
            let idx = fields.iter().position(|f| f.name == *name)?;
            let mut fields = fields.clone();
            fields[idx].union =
                replace_union(&fields[idx].union, &steps[1..], replacement);
            Some(Ty::Object(fields))
        }
        (Ty::Record(values), Accessor::RecordValues) => {
            Some(Ty::record(replace_union(values, &steps[1..], replacement)))
        }
        _ => None,
    }
}

impl PartialEq for Union {
    /// Multiset equality: same members with the same multiplicities,
    /// in any order.
    fn eq(&self, other: &Union) -> bool {
        if self.types.len() != other.types.len() {
            return false;
        }
        let mut used = vec![false; other.types.len()];
        'members: for ty in &self.types {
            for (i, candidate) in other.types.iter().enumerate() {
                if !used[i] && ty == candidate {
                    used[i] = true;
                    continue 'members;
                }
            }
            return false;
        }
        true
    }
}

impl fmt::Display for Union {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.types.is_empty() {
            return write!(f, "never");
        }
        for (i, ty) in self.types.iter().enumerate() {
            if i > 0 {
                write!(f, " | ")?;
            }
            write!(f, "{}", ty)?;
        }
        Ok(())
    }
}
