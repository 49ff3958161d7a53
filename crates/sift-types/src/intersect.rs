//! Intersection on types and unions.
//!
//! Intersection is defined only on compatible constructors; a pair whose
//! constructors cannot overlap (and the cross-constructor pairs tuple with
//! array and object with record, which are left undefined) contributes
//! nothing to a union intersection.

use rustc_hash::FxHashMap;

use crate::ty::{ObjectField, Ty};
use crate::union::Union;

impl Ty {
    /// `self ⊓ other`, or `None` when the constructors cannot overlap.
    ///
    /// `unknown` is the identity. Literals and primitives intersect only
    /// when one is a subtype of the other. Tuples intersect element-wise
    /// when lengths agree; arrays and records intersect their carried
    /// unions; objects union their field names and intersect the common
    /// fields. Tuple-with-array and object-with-record are undefined.
    pub fn intersect(&self, other: &Ty) -> Option<Ty> {
        match (self, other) {
            (Ty::Unknown, _) => Some(other.clone()),
            (_, Ty::Unknown) => Some(self.clone()),
            (Ty::Literal(a), Ty::Literal(b)) => {
                if a == b {
                    Some(self.clone())
                } else {
                    None
                }
            }
            (Ty::Literal(lit), Ty::Primitive(p)) => {
                if lit.prim() == Some(*p) {
                    Some(self.clone())
                } else {
                    None
                }
            }
            (Ty::Primitive(p), Ty::Literal(lit)) => {
                if lit.prim() == Some(*p) {
                    Some(other.clone())
                } else {
                    None
                }
            }
            (Ty::Primitive(a), Ty::Primitive(b)) => {
                if a == b {
                    Some(self.clone())
                } else {
                    None
                }
            }
            (Ty::Tuple(a), Ty::Tuple(b)) => {
                if a.len() != b.len() {
                    return None;
                }
                let elements =
                    a.iter().zip(b).map(|(x, y)| x.intersect(y)).collect();
                Some(Ty::Tuple(elements))
            }
            (Ty::Array(a), Ty::Array(b)) => Some(Ty::array(a.intersect(b))),
            (Ty::Object(a), Ty::Object(b)) => {
                Some(Ty::Object(intersect_fields(a, b)))
            }
            (Ty::Record(a), Ty::Record(b)) => Some(Ty::record(a.intersect(b))),
            _ => None,
        }
    }
}

/// Union of field names; common fields intersect their unions and keep the
/// left side's optionality, fields unique to one side are carried as-is.
fn intersect_fields(a: &[ObjectField], b: &[ObjectField]) -> Vec<ObjectField> {
    let by_name: FxHashMap<&str, &ObjectField> =
        b.iter().map(|f| (f.name.as_str(), f)).collect();

    let mut fields = Vec::with_capacity(a.len() + b.len());
    for fa in a {
        match by_name.get(fa.name.as_str()) {
            Some(fb) => fields.push(ObjectField {
                name: fa.name.clone(),
                union: fa.union.intersect(&fb.union),
                optional: fa.optional,
            }),
            None => fields.push(fa.clone()),
        }
    }
    for fb in b {
        if !a.iter().any(|fa| fa.name == fb.name) {
            fields.push(fb.clone());
        }
    }
    fields
}

impl Union {
    /// All defined pairwise intersections of members, deduplicated. A
    /// subunion of both operands; possibly empty.
    pub fn intersect(&self, other: &Union) -> Union {
        let mut members = Vec::new();
        for a in self.iter() {
            for b in other.iter() {
                if let Some(ty) = a.intersect(b) {
                    members.push(ty);
                }
            }
        }
        Union::new(members).dedup()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::literal::Literal;

    fn s(ty: Ty) -> Union {
        Union::single(ty)
    }

    fn lit_num(v: f64) -> Ty {
        Ty::Literal(Literal::number(v))
    }

    #[test]
    fn test_unknown_is_identity() {
        let tuple = Ty::tuple(vec![s(Ty::string())]);
        assert_eq!(Ty::Unknown.intersect(&tuple), Some(tuple.clone()));
        assert_eq!(tuple.intersect(&Ty::Unknown), Some(tuple));
    }

    #[test]
    fn test_literal_and_primitive() {
        assert_eq!(lit_num(5.0).intersect(&Ty::number()), Some(lit_num(5.0)));
        assert_eq!(Ty::number().intersect(&lit_num(5.0)), Some(lit_num(5.0)));
        assert_eq!(lit_num(5.0).intersect(&Ty::string()), None);
        assert_eq!(lit_num(5.0).intersect(&lit_num(6.0)), None);
        assert_eq!(Ty::string().intersect(&Ty::number()), None);
    }

    #[test]
    fn test_tuples_require_equal_lengths() {
        let pair = Ty::tuple(vec![s(Ty::number()), s(Ty::string())]);
        let narrowed = Ty::tuple(vec![s(lit_num(1.0)), s(Ty::Unknown)]);
        assert_eq!(
            pair.intersect(&narrowed),
            Some(Ty::tuple(vec![s(lit_num(1.0)), s(Ty::string())])),
        );
        assert_eq!(pair.intersect(&Ty::tuple(vec![s(Ty::number())])), None);
    }

    #[test]
    fn test_objects_union_field_names() {
        let a = Ty::object(vec![
            ObjectField::new("x", Union::new(vec![Ty::number(), Ty::string()])),
            ObjectField::new("only_a", s(Ty::boolean())),
        ]);
        let b = Ty::object(vec![
            ObjectField::new("x", s(Ty::number())),
            ObjectField::new("only_b", s(Ty::string())),
        ]);
        let expected = Ty::object(vec![
            ObjectField::new("x", s(Ty::number())),
            ObjectField::new("only_a", s(Ty::boolean())),
            ObjectField::new("only_b", s(Ty::string())),
        ]);
        assert_eq!(a.intersect(&b), Some(expected));
    }

    #[test]
    fn test_cross_constructor_pairs_are_undefined() {
        let tuple = Ty::tuple(vec![s(Ty::number())]);
        let array = Ty::array(s(Ty::number()));
        let object = Ty::object(vec![ObjectField::new("a", s(Ty::number()))]);
        let record = Ty::record(s(Ty::number()));
        assert_eq!(tuple.intersect(&array), None);
        assert_eq!(array.intersect(&tuple), None);
        assert_eq!(object.intersect(&record), None);
        assert_eq!(record.intersect(&object), None);
    }

    #[test]
    fn test_union_intersection_is_pairwise() {
        let a = Union::new(vec![Ty::number(), Ty::string(), Ty::boolean()]);
        let b = Union::new(vec![lit_num(1.0), Ty::string()]);
        let both = a.intersect(&b);
        assert_eq!(both, Union::new(vec![lit_num(1.0), Ty::string()]));
        assert!(both.is_subunion_of(&a));
        assert!(both.is_subunion_of(&b));
    }

    #[test]
    fn test_union_intersection_can_be_empty() {
        let a = s(Ty::tuple(vec![s(Ty::number())]));
        let b = s(Ty::array(s(Ty::number())));
        assert!(a.intersect(&b).is_empty());
    }
}
