//! The match table and its algebraic operations.
//!
//! A [`MatchTable`] is a rectangular table: one column per tested
//! occurrence, one row per (possibly expanded) case, each cell a pattern
//! union. The compiler refines tables through five operations:
//!
//! - [`MatchTable::specialize_success`] -- restrict to rows compatible
//!   with a constructor at one column, replacing the column with one
//!   column per constructor argument
//! - [`MatchTable::specialize_fail`] -- restrict to rows whose pattern at
//!   one column has a different constructor
//! - [`MatchTable::expand`] -- Cartesian-explode union cells so every
//!   remaining row is single-constructor
//! - [`MatchTable::remove_redundant`] -- drop rows shadowed cellwise by
//!   an earlier row
//! - the shape queries [`MatchTable::is_fail`] and
//!   [`MatchTable::success_case_index`]
//!
//! Operations with a single-constructor precondition return `None` when it
//! is violated; the compiler always normalizes with `expand` first, so a
//! `None` reaching it is an internal bug.

use sift_types::{Accessor, Occurrence, Ty, Union};

use crate::tree::CaseIndex;

/// A table of pattern unions over occurrences, with an input-type
/// refinement and the original case index of each row.
#[derive(Clone, Debug)]
pub struct MatchTable {
    input: Union,
    occurrences: Vec<Occurrence>,
    case_indices: Vec<CaseIndex>,
    rows: Vec<Vec<Union>>,
}

impl MatchTable {
    /// Build a table.
    ///
    /// # Panics
    ///
    /// Panics unless every row has one cell per occurrence and there is
    /// one case index per row.
    pub fn new(
        input: Union,
        occurrences: Vec<Occurrence>,
        case_indices: Vec<CaseIndex>,
        rows: Vec<Vec<Union>>,
    ) -> MatchTable {
        assert_eq!(
            case_indices.len(),
            rows.len(),
            "match table needs one case index per pattern row",
        );
        for row in &rows {
            assert_eq!(
                row.len(),
                occurrences.len(),
                "match table rows must have one cell per occurrence",
            );
        }
        MatchTable { input, occurrences, case_indices, rows }
    }

    /// The current static upper bound on the scrutinee.
    pub fn input(&self) -> &Union {
        &self.input
    }

    /// The occurrence each column tests.
    pub fn occurrences(&self) -> &[Occurrence] {
        &self.occurrences
    }

    /// The original case number of each row.
    pub fn case_indices(&self) -> &[CaseIndex] {
        &self.case_indices
    }

    /// The pattern rows.
    pub fn rows(&self) -> &[Vec<Union>] {
        &self.rows
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.occurrences.len()
    }

    /// No rows remain: nothing can match.
    pub fn is_fail(&self) -> bool {
        self.rows.is_empty()
    }

    /// Exactly one row with no columns left: that row's case matched.
    pub fn success_case_index(&self) -> Option<CaseIndex> {
        if self.rows.len() == 1 && self.occurrences.is_empty() {
            Some(self.case_indices[0])
        } else {
            None
        }
    }

    fn rows_single_constructor(&self) -> bool {
        self.rows
            .iter()
            .all(|row| row.iter().all(|cell| cell.len() == 1))
    }

    /// Restrict to the case where the value at column `column` has the
    /// outer constructor of `ty`.
    ///
    /// The column is replaced by one column per argument of the
    /// constructor, each occurrence extended with the matching accessor,
    /// and the input refinement is intersected with the forced shape.
    /// A row survives when its pattern's outer shape overlaps the checked
    /// shape in either direction of the subtype order (a catch-all
    /// `unknown` row survives every check); surviving rows have their
    /// pattern's children spliced into the new columns, positions the
    /// pattern does not constrain reading as `{unknown}`.
    ///
    /// Returns `None` when `column` is out of bounds or some row is not
    /// single-constructor.
    pub fn specialize_success(&self, ty: &Ty, column: usize) -> Option<MatchTable> {
        if column >= self.column_count() || !self.rows_single_constructor() {
            return None;
        }
        let shape = ty.make_arguments_unknown();
        let accessors: Vec<Accessor> =
            shape.arguments().into_iter().map(|(a, _)| a).collect();

        let occurrence = &self.occurrences[column];
        let mut occurrences =
            Vec::with_capacity(self.occurrences.len() - 1 + accessors.len());
        occurrences.extend_from_slice(&self.occurrences[..column]);
        for accessor in &accessors {
            occurrences.push(occurrence.child(accessor.clone()));
        }
        occurrences.extend_from_slice(&self.occurrences[column + 1..]);

        let forced = self
            .input
            .replace_at(occurrence, &Union::single(shape.clone()));
        let input = self.input.intersect(&forced);

        let mut case_indices = Vec::new();
        let mut rows = Vec::new();
        for (row, &case) in self.rows.iter().zip(&self.case_indices) {
            let pattern = row[column].single_type()?;
            let pattern_shape = pattern.make_arguments_unknown();
            if !pattern_shape.is_subtype_of(&shape)
                && !shape.is_subtype_of(&pattern_shape)
            {
                continue;
            }
            let mut cells =
                Vec::with_capacity(row.len() - 1 + accessors.len());
            cells.extend_from_slice(&row[..column]);
            for accessor in &accessors {
                let child = pattern.access(accessor).unwrap_or_else(|| {
                    panic!(
                        "pattern `{}` has no `{}` argument after passing the \
                         `{}` shape test; this indicates a bug in the match \
                         compiler",
                        pattern, accessor, shape,
                    )
                });
                cells.push(child);
            }
            cells.extend_from_slice(&row[column + 1..]);
            case_indices.push(case);
            rows.push(cells);
        }
        Some(MatchTable::new(input, occurrences, case_indices, rows))
    }

    /// Restrict to rows that could still match when the constructor at
    /// `column` is *not* that of `ty`: rows whose pattern there has a
    /// different outer constructor. Columns and occurrences are untouched.
    ///
    /// Returns `None` when `column` is out of bounds or some row is not
    /// single-constructor.
    pub fn specialize_fail(&self, ty: &Ty, column: usize) -> Option<MatchTable> {
        if column >= self.column_count() || !self.rows_single_constructor() {
            return None;
        }
        let mut case_indices = Vec::new();
        let mut rows = Vec::new();
        for (row, &case) in self.rows.iter().zip(&self.case_indices) {
            let pattern = row[column].single_type()?;
            if !pattern.equal_constructor(ty) {
                case_indices.push(case);
                rows.push(row.clone());
            }
        }
        Some(MatchTable::new(
            self.input.clone(),
            self.occurrences.clone(),
            case_indices,
            rows,
        ))
    }

    /// Cartesian-explode union cells: each row becomes one row per
    /// combination of cell members, every cell a singleton union, the
    /// original case index repeated. A row with an empty-union cell
    /// produces no rows.
    pub fn expand(&self) -> MatchTable {
        let mut case_indices = Vec::new();
        let mut rows = Vec::new();
        for (row, &case) in self.rows.iter().zip(&self.case_indices) {
            let mut combos: Vec<Vec<Union>> = vec![Vec::new()];
            for cell in row {
                let mut next = Vec::with_capacity(combos.len() * cell.len());
                for combo in &combos {
                    for ty in cell.iter() {
                        let mut extended = combo.clone();
                        extended.push(Union::single(ty.clone()));
                        next.push(extended);
                    }
                }
                combos = next;
            }
            for combo in combos {
                case_indices.push(case);
                rows.push(combo);
            }
        }
        MatchTable::new(
            self.input.clone(),
            self.occurrences.clone(),
            case_indices,
            rows,
        )
    }

    /// Drop every row shadowed by an earlier one: a row goes when some
    /// earlier kept row is a superunion of it in every cell.
    pub fn remove_redundant(&self) -> MatchTable {
        let mut case_indices = Vec::new();
        let mut rows: Vec<Vec<Union>> = Vec::new();
        for (row, &case) in self.rows.iter().zip(&self.case_indices) {
            let shadowed = rows.iter().any(|kept| {
                kept.iter().zip(row).all(|(k, cell)| cell.is_subunion_of(k))
            });
            if !shadowed {
                case_indices.push(case);
                rows.push(row.clone());
            }
        }
        MatchTable::new(
            self.input.clone(),
            self.occurrences.clone(),
            case_indices,
            rows,
        )
    }
}
