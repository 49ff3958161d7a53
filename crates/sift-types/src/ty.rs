//! The structural type representation.
//!
//! [`Ty`] is a closed, finitely recursive sum over runtime shapes: the top
//! `unknown`, literals, primitives, tuples, arrays, objects, and records.
//! Composite constructors carry [`Union`]s at every nested position.
//!
//! Alongside the representation this module holds the constructor-shape
//! operations the match compiler drives:
//!
//! - [`Ty::equal_constructor`] -- outer-shape equality, nested unions ignored
//! - [`Ty::ctor_key`] -- a string key with the same granularity, for
//!   seen-sets and diversity counts
//! - [`Ty::make_arguments_unknown`] -- the outer shape with every nested
//!   union widened to `{unknown}`, the form checks are emitted in
//! - [`Ty::arguments`] -- the immediate (accessor, union) children
//! - [`Ty::access`] -- one accessor step into the type

use std::fmt;

use crate::access::Accessor;
use crate::literal::{Literal, Prim};
use crate::union::Union;

// ── Object fields ───────────────────────────────────────────────────

/// One field of an object type.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectField {
    /// The field name.
    pub name: String,
    /// The types the field's value may have.
    pub union: Union,
    /// Whether the field may be absent. Optional fields are skipped by
    /// the emitted presence test but still refine the field's value type.
    pub optional: bool,
}

impl ObjectField {
    /// A required field.
    pub fn new(name: impl Into<String>, union: Union) -> ObjectField {
        ObjectField { name: name.into(), union, optional: false }
    }

    /// An optional field.
    pub fn optional(name: impl Into<String>, union: Union) -> ObjectField {
        ObjectField { name: name.into(), union, optional: true }
    }
}

// ── Types ───────────────────────────────────────────────────────────

/// A structural type.
#[derive(Clone, Debug)]
pub enum Ty {
    /// The top type; every value inhabits it.
    Unknown,
    /// Exactly one literal value.
    Literal(Literal),
    /// Any value of one primitive kind.
    Primitive(Prim),
    /// A fixed-length heterogeneous sequence.
    Tuple(Vec<Union>),
    /// A homogeneous variable-length sequence.
    Array(Box<Union>),
    /// A presence-checked structural record. Field order is irrelevant
    /// for equality but preserved for deterministic iteration.
    Object(Vec<ObjectField>),
    /// A dictionary of string-keyed entries whose values all lie in the
    /// carried union.
    Record(Box<Union>),
}

impl Ty {
    /// The `string` primitive type.
    pub fn string() -> Ty {
        Ty::Primitive(Prim::String)
    }

    /// The `number` primitive type.
    pub fn number() -> Ty {
        Ty::Primitive(Prim::Number)
    }

    /// The `bigint` primitive type.
    pub fn bigint() -> Ty {
        Ty::Primitive(Prim::BigInt)
    }

    /// The `boolean` primitive type.
    pub fn boolean() -> Ty {
        Ty::Primitive(Prim::Boolean)
    }

    /// A tuple type from its element unions.
    pub fn tuple(elements: Vec<Union>) -> Ty {
        Ty::Tuple(elements)
    }

    /// An array type from its element union.
    pub fn array(element: Union) -> Ty {
        Ty::Array(Box::new(element))
    }

    /// An object type from its fields.
    pub fn object(fields: Vec<ObjectField>) -> Ty {
        Ty::Object(fields)
    }

    /// A record type from its value union.
    pub fn record(values: Union) -> Ty {
        Ty::Record(Box::new(values))
    }

    /// Whether `self` and `other` share an outer constructor: same tuple
    /// length, same object field-name set, same literal value, same
    /// primitive kind. Nested unions are not inspected.
    pub fn equal_constructor(&self, other: &Ty) -> bool {
        match (self, other) {
            (Ty::Unknown, Ty::Unknown) => true,
            (Ty::Literal(a), Ty::Literal(b)) => a == b,
            (Ty::Primitive(a), Ty::Primitive(b)) => a == b,
            (Ty::Tuple(a), Ty::Tuple(b)) => a.len() == b.len(),
            (Ty::Array(_), Ty::Array(_)) => true,
            (Ty::Object(a), Ty::Object(b)) => {
                a.len() == b.len()
                    && a.iter().all(|fa| b.iter().any(|fb| fb.name == fa.name))
            }
            (Ty::Record(_), Ty::Record(_)) => true,
            _ => false,
        }
    }

    /// A string key with the granularity of [`Ty::equal_constructor`]:
    /// two types with equal constructors render the same key. (Number
    /// literals inherit the strict-equality corners: `-0` and `0` share
    /// a key, `NaN` keys equal while comparing unequal.)
    pub fn ctor_key(&self) -> String {
        match self {
            Ty::Unknown => "unknown".to_string(),
            Ty::Literal(lit) => format!("lit:{}", lit.key()),
            Ty::Primitive(p) => format!("prim:{}", p),
            Ty::Tuple(elements) => format!("tuple:{}", elements.len()),
            Ty::Array(_) => "array".to_string(),
            Ty::Object(fields) => {
                let mut names: Vec<&str> =
                    fields.iter().map(|f| f.name.as_str()).collect();
                names.sort_unstable();
                format!("object:{}", names.join(","))
            }
            Ty::Record(_) => "record".to_string(),
        }
    }

    /// The same outer constructor with every nested union replaced by
    /// `{unknown}`. Decision-tree checks carry types in this form, so
    /// emitted tests commit to nothing below the outer shape.
    pub fn make_arguments_unknown(&self) -> Ty {
        match self {
            Ty::Unknown | Ty::Literal(_) | Ty::Primitive(_) => self.clone(),
            Ty::Tuple(elements) => {
                Ty::Tuple(vec![Union::single(Ty::Unknown); elements.len()])
            }
            Ty::Array(_) => Ty::array(Union::single(Ty::Unknown)),
            Ty::Object(fields) => Ty::Object(
                fields
                    .iter()
                    .map(|f| ObjectField {
                        name: f.name.clone(),
                        union: Union::single(Ty::Unknown),
                        optional: f.optional,
                    })
                    .collect(),
            ),
            Ty::Record(_) => Ty::record(Union::single(Ty::Unknown)),
        }
    }

    /// Every immediate (accessor, union) child: positional elements for
    /// tuples, the element union for arrays, one entry per field for
    /// objects, the value union for records. Leaves have none.
    pub fn arguments(&self) -> Vec<(Accessor, Union)> {
        match self {
            Ty::Unknown | Ty::Literal(_) | Ty::Primitive(_) => Vec::new(),
            Ty::Tuple(elements) => elements
                .iter()
                .enumerate()
                .map(|(i, u)| (Accessor::Index(i), u.clone()))
                .collect(),
            Ty::Array(element) => {
                vec![(Accessor::ArrayElement, (**element).clone())]
            }
            Ty::Object(fields) => fields
                .iter()
                .map(|f| (Accessor::Property(f.name.clone()), f.union.clone()))
                .collect(),
            Ty::Record(values) => {
                vec![(Accessor::RecordValues, (**values).clone())]
            }
        }
    }

    /// The union reachable by one accessor step, or `None` when the
    /// accessor is structurally incompatible. `unknown` propagates as
    /// `{unknown}` through any step. Pseudo-steps flatten: a tuple seen
    /// through array-element yields the flattened union of its elements,
    /// an object seen through record-values the flattened union of its
    /// field unions. An object property the type says nothing about
    /// reads as `{unknown}` (width subtyping leaves extra fields
    /// unconstrained); a record property reads as the value union.
    pub fn access(&self, accessor: &Accessor) -> Option<Union> {
        match (self, accessor) {
            (Ty::Unknown, _) => Some(Union::single(Ty::Unknown)),
            (Ty::Tuple(elements), Accessor::Index(i)) => elements.get(*i).cloned(),
            (Ty::Tuple(elements), Accessor::ArrayElement) => {
                Some(Union::flatten(elements))
            }
            (Ty::Array(element), Accessor::Index(_))
            | (Ty::Array(element), Accessor::ArrayElement) => {
                Some((**element).clone())
            }
            (Ty::Object(fields), Accessor::Property(name)) => Some(
                fields
                    .iter()
                    .find(|f| f.name == *name)
                    .map(|f| f.union.clone())
                    .unwrap_or_else(|| Union::single(Ty::Unknown)),
            ),
            (Ty::Object(fields), Accessor::RecordValues) => {
                let unions: Vec<Union> =
                    fields.iter().map(|f| f.union.clone()).collect();
                Some(Union::flatten(&unions))
            }
            (Ty::Record(values), Accessor::Property(_))
            | (Ty::Record(values), Accessor::RecordValues) => {
                Some((**values).clone())
            }
            _ => None,
        }
    }
}

impl PartialEq for Ty {
    fn eq(&self, other: &Ty) -> bool {
        match (self, other) {
            (Ty::Unknown, Ty::Unknown) => true,
            (Ty::Literal(a), Ty::Literal(b)) => a == b,
            (Ty::Primitive(a), Ty::Primitive(b)) => a == b,
            (Ty::Tuple(a), Ty::Tuple(b)) => a == b,
            (Ty::Array(a), Ty::Array(b)) => a == b,
            (Ty::Object(a), Ty::Object(b)) => {
                a.len() == b.len()
                    && a.iter().all(|fa| {
                        b.iter().any(|fb| {
                            fb.name == fa.name
                                && fb.optional == fa.optional
                                && fb.union == fa.union
                        })
                    })
            }
            (Ty::Record(a), Ty::Record(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ty::Unknown => write!(f, "unknown"),
            Ty::Literal(lit) => write!(f, "{}", lit),
            Ty::Primitive(p) => write!(f, "{}", p),
            Ty::Tuple(elements) => {
                write!(f, "[")?;
                for (i, u) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", u)?;
                }
                write!(f, "]")
            }
            Ty::Array(element) => {
                if element.len() == 1 {
                    write!(f, "{}[]", element)
                } else {
                    write!(f, "({})[]", element)
                }
            }
            Ty::Object(fields) => {
                if fields.is_empty() {
                    return write!(f, "{{}}");
                }
                write!(f, "{{ ")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    let opt = if field.optional { "?" } else { "" };
                    write!(f, "{}{}: {}", field.name, opt, field.union)?;
                }
                write!(f, " }}")
            }
            Ty::Record(values) => write!(f, "Record<string, {}>", values),
        }
    }
}
