use std::collections::BTreeMap;
use std::fmt;

use super::model::{Table, Value};
use crate::error::Result;

// ---------------------------------------------------------------------------
// Filter predicate: one selection per column
// ---------------------------------------------------------------------------

/// A dropdown choice for one column.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Selection {
    /// No constraint.
    #[default]
    All,
    /// Keep rows whose value equals this one.
    Only(Value),
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => write!(f, "All"),
            Selection::Only(v) => write!(f, "{v}"),
        }
    }
}

impl Selection {
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(wanted) => wanted == value,
        }
    }
}

/// Per-column selections: maps column_name → selection.
/// Columns are combined with AND; absent columns are unconstrained.
pub type ConstraintSet = BTreeMap<String, Selection>;

/// Union of two constraint sets. For a column present in both, `right` wins.
pub fn merge_constraints(left: &ConstraintSet, right: &ConstraintSet) -> ConstraintSet {
    let mut merged = left.clone();
    merged.extend(right.iter().map(|(c, s)| (c.clone(), s.clone())));
    merged
}

/// Return indices of rows that pass all constraints, in row order.
///
/// Every named column is checked, even those set to [`Selection::All`].
pub fn matching_indices(table: &Table, constraints: &ConstraintSet) -> Result<Vec<usize>> {
    let mut active: Vec<(usize, &Value)> = Vec::new();
    for (col, selection) in constraints {
        let idx = table.column_index(col)?;
        if let Selection::Only(value) = selection {
            active.push((idx, value));
        }
    }

    Ok(table
        .rows
        .iter()
        .enumerate()
        .filter(|(_, rec)| active.iter().all(|(idx, value)| rec.get(*idx) == *value))
        .map(|(i, _)| i)
        .collect())
}

/// The subset of `table` satisfying every constraint, as a new table.
pub fn filter(table: &Table, constraints: &ConstraintSet) -> Result<Table> {
    let indices = matching_indices(table, constraints)?;
    Ok(table.select_rows(&indices))
}

/// Dropdown contents for a column: `All`, then its distinct non-null values in sorted order.
pub fn selection_options(table: &Table, column: &str) -> Result<Vec<Selection>> {
    let values = table.unique_values(column)?;
    Ok(std::iter::once(Selection::All)
        .chain(
            values
                .into_iter()
                .filter(|v| !v.is_null())
                .map(Selection::Only),
        )
        .collect())
}
