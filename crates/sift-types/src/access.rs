//! Accessors and occurrences: paths into the scrutinee.

use std::fmt;

/// A single step into a value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Accessor {
    /// A named property of an object.
    Property(String),
    /// A fixed position of a tuple.
    Index(usize),
    /// Some element of an array. A pseudo-step: emitted tests quantify
    /// over every element.
    ArrayElement,
    /// Some value of a record. A pseudo-step: emitted tests quantify
    /// over every value.
    RecordValues,
}

impl fmt::Display for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accessor::Property(name) => write!(f, ".{}", name),
            Accessor::Index(i) => write!(f, "[{}]", i),
            Accessor::ArrayElement => write!(f, "[*]"),
            Accessor::RecordValues => write!(f, "{{*}}"),
        }
    }
}

/// An ordered list of accessors naming a position inside the scrutinee.
///
/// The empty occurrence denotes the scrutinee itself.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Occurrence(Vec<Accessor>);

impl Occurrence {
    /// The occurrence of the scrutinee itself.
    pub fn root() -> Occurrence {
        Occurrence(Vec::new())
    }

    /// An occurrence from an explicit step list.
    pub fn new(steps: Vec<Accessor>) -> Occurrence {
        Occurrence(steps)
    }

    /// Extend this occurrence with one more step.
    pub fn child(&self, step: Accessor) -> Occurrence {
        let mut steps = self.0.clone();
        steps.push(step);
        Occurrence(steps)
    }

    /// The steps from the scrutinee down to this position.
    pub fn steps(&self) -> &[Accessor] {
        &self.0
    }

    /// Whether this is the scrutinee itself.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Occurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x")?;
        for step in &self.0 {
            write!(f, "{}", step)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_extends_without_mutating() {
        let root = Occurrence::root();
        let kind = root.child(Accessor::Property("kind".to_string()));
        assert!(root.is_root());
        assert_eq!(kind.steps().len(), 1);
    }

    #[test]
    fn test_display() {
        let occ = Occurrence::root()
            .child(Accessor::Property("items".to_string()))
            .child(Accessor::ArrayElement)
            .child(Accessor::Index(0));
        assert_eq!(occ.to_string(), "x.items[*][0]");
        assert_eq!(Occurrence::root().to_string(), "x");
        assert_eq!(
            Occurrence::root().child(Accessor::RecordValues).to_string(),
            "x{*}"
        );
    }
}
