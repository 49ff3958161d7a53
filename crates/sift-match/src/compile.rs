//! Match table to decision tree compiler.
//!
//! The compiler recursively reduces a match table to a [`DecisionTree`]:
//!
//! 1. An empty table compiles to `Fail`; a table with a single width-zero
//!    row compiles to `Success` with that row's case index.
//! 2. Otherwise every column proposes candidate checks: the minima of its
//!    patterns under the subtype order, with arguments made unknown.
//! 3. A candidate whose outcome is already forced by the input refinement
//!    is *skippable*: the compiler descends into its success table without
//!    emitting a node.
//! 4. Otherwise one candidate is chosen and a `Check` node is emitted,
//!    with the specialized success table on one side and the
//!    specialize-fail table on the other.
//!
//! Candidate selection is deterministic: the candidate whose column shows
//! the most distinct outer constructors wins, ties falling to the lowest
//! column and then to pattern order. Compilation is a pure function of its
//! inputs; correctness does not depend on the choice, only tree shape does.

use rustc_hash::FxHashSet;

use sift_types::{minima, Occurrence, Ty, Union};

use crate::table::MatchTable;
use crate::tree::{CaseIndex, DecisionTree};

/// A proposed runtime test: an outer shape at one column's occurrence.
#[derive(Clone, Debug)]
struct Check {
    ty: Ty,
    column: usize,
}

/// Compile a match into a decision tree.
///
/// `input` is the static upper bound on the scrutinee; `patterns` holds
/// one top-level pattern union per case and `case_indices` the original
/// case number of each. A front-end with a default case conventionally
/// appends a final `{unknown}` pattern with index `-1`.
///
/// Evaluating the tree against a value dispatches to the first case whose
/// pattern the value inhabits, or reaches `Fail` when none does.
///
/// # Panics
///
/// Panics when `patterns` and `case_indices` have different lengths.
pub fn compile(
    input: Union,
    patterns: &[Union],
    case_indices: &[CaseIndex],
) -> DecisionTree {
    assert_eq!(
        patterns.len(),
        case_indices.len(),
        "one case index per pattern",
    );
    let rows = patterns.iter().map(|p| vec![p.clone()]).collect();
    let table = MatchTable::new(
        input,
        vec![Occurrence::root()],
        case_indices.to_vec(),
        rows,
    );
    compile_table(&normalize(&table))
}

/// Bring a table to single-constructor rows with shadowed rows dropped.
fn normalize(table: &MatchTable) -> MatchTable {
    table.expand().remove_redundant()
}

fn compile_table(table: &MatchTable) -> DecisionTree {
    if table.is_fail() {
        return DecisionTree::Fail;
    }
    if let Some(case) = table.success_case_index() {
        return DecisionTree::Success(case);
    }

    let candidates = candidate_checks(table);
    assert!(
        !candidates.is_empty(),
        "a live match table proposed no candidate checks; this indicates \
         a bug in the match compiler",
    );

    let skippable: Vec<Check> = candidates
        .iter()
        .filter(|c| is_skippable(table, c))
        .cloned()
        .collect();
    if !skippable.is_empty() {
        // The test's outcome is statically forced: descend without
        // emitting a node.
        let check = pick(table, &skippable);
        return compile_table(&success_table(table, check));
    }

    let check = pick(table, &candidates);
    let success = compile_table(&success_table(table, check));
    let fail_table = table
        .specialize_fail(&check.ty, check.column)
        .unwrap_or_else(|| {
            panic!(
                "specialize-fail rejected an expanded table; this indicates \
                 a bug in the match compiler",
            )
        });
    let fail = compile_table(&fail_table);
    DecisionTree::Check {
        ty: check.ty.clone(),
        occurrence: table.occurrences()[check.column].clone(),
        success: Box::new(success),
        fail: Box::new(fail),
    }
}

/// Specialize on a chosen check and renormalize.
fn success_table(table: &MatchTable, check: &Check) -> MatchTable {
    let specialized = table
        .specialize_success(&check.ty, check.column)
        .unwrap_or_else(|| {
            panic!(
                "specialize-success rejected an expanded table; this \
                 indicates a bug in the match compiler",
            )
        });
    normalize(&specialized)
}

/// All candidate checks: for every column, the minima of its patterns
/// under the subtype order, arguments made unknown, deduplicated by
/// column and constructor key.
fn candidate_checks(table: &MatchTable) -> Vec<Check> {
    let mut pool = Vec::new();
    let mut seen = FxHashSet::default();
    for column in 0..table.column_count() {
        let patterns = column_patterns(table, column);
        for ty in minima(&patterns) {
            let shape = ty.make_arguments_unknown();
            if seen.insert(format!("{}:{}", column, shape.ctor_key())) {
                pool.push(Check { ty: shape, column });
            }
        }
    }
    pool
}

/// One column's patterns as plain types (rows are single-constructor
/// whenever this runs).
fn column_patterns(table: &MatchTable, column: usize) -> Vec<Ty> {
    table
        .rows()
        .iter()
        .map(|row| {
            row[column]
                .single_type()
                .unwrap_or_else(|| {
                    panic!(
                        "candidate selection ran on a non-expanded table; \
                         this indicates a bug in the match compiler",
                    )
                })
                .clone()
        })
        .collect()
}

/// A check is skippable when the input refinement already forces the
/// value at its occurrence to have the checked constructor.
fn is_skippable(table: &MatchTable, check: &Check) -> bool {
    let occurrence = &table.occurrences()[check.column];
    let forced = table
        .input()
        .replace_at(occurrence, &Union::single(check.ty.clone()));
    table.input().is_subunion_of(&forced)
}

/// Deterministic selection among candidates: most distinct outer
/// constructors in the candidate's column wins; ties fall to the earliest
/// pool entry, which is also the lowest column and then pattern order.
fn pick<'a>(table: &MatchTable, pool: &'a [Check]) -> &'a Check {
    let mut best = &pool[0];
    let mut best_score = column_diversity(table, best.column);
    for check in &pool[1..] {
        let score = column_diversity(table, check.column);
        if score > best_score {
            best = check;
            best_score = score;
        }
    }
    best
}

/// Number of distinct outer constructors among a column's patterns.
fn column_diversity(table: &MatchTable, column: usize) -> usize {
    let mut seen = FxHashSet::default();
    for ty in column_patterns(table, column) {
        seen.insert(ty.ctor_key());
    }
    seen.len()
}
