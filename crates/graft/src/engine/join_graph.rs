//! Execution order of sibling includes.
//!
//! A sibling whose predicate references another sibling's table can only be
//! queried once that sibling's rows are known, so references form a
//! dependency graph over the includes of one parent.

use crate::{Error, Result};

use std::{cmp::Ordering, collections::BTreeSet};

/// What ordering needs to know about one include.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Join {
    /// Field the include populates
    pub field: String,

    /// Table the include reads from
    pub table: String,

    /// Tables of sibling includes its predicate references
    pub references: Vec<String>,
}

impl Join {
    pub fn new(field: impl Into<String>, table: impl Into<String>) -> Join {
        Join {
            field: field.into(),
            table: table.into(),
            references: vec![],
        }
    }

    pub fn reference(mut self, table: impl Into<String>) -> Join {
        self.references.push(table.into());
        self
    }

    fn references(&self, other: &Join) -> bool {
        self.table != other.table && self.references.contains(&other.table)
    }
}

/// Compares two includes for execution order.
///
/// `a` sorts after `b` when `a` references `b`'s table and before it when
/// `b` references `a`'s. Unrelated includes, and includes referencing each
/// other, compare equal; [`order`] is what reports the latter as a cycle.
pub fn compare(a: &Join, b: &Join) -> Ordering {
    match (a.references(b), b.references(a)) {
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        _ => Ordering::Equal,
    }
}

/// Returns the indices of `joins` in an order where every include comes
/// after the includes it references.
///
/// Pairwise [`compare`] is not transitive across unrelated includes, so the
/// order comes from a topological sort. Ties are broken by declaration
/// order, which keeps the result deterministic.
pub fn order(joins: &[Join]) -> Result<Vec<usize>> {
    // dependents[i] = includes that must run after `i`
    let mut dependents = vec![vec![]; joins.len()];
    let mut blocked_on = vec![0usize; joins.len()];

    for (i, a) in joins.iter().enumerate() {
        for (j, b) in joins.iter().enumerate() {
            if i != j && a.references(b) {
                dependents[j].push(i);
                blocked_on[i] += 1;
            }
        }
    }

    let mut ready: BTreeSet<usize> = (0..joins.len()).filter(|&i| blocked_on[i] == 0).collect();
    let mut ordered = Vec::with_capacity(joins.len());

    while let Some(next) = ready.pop_first() {
        ordered.push(next);

        for &dependent in &dependents[next] {
            blocked_on[dependent] -= 1;
            if blocked_on[dependent] == 0 {
                ready.insert(dependent);
            }
        }
    }

    if ordered.len() < joins.len() {
        return Err(Error::cyclic_reference(
            (0..joins.len())
                .filter(|&i| blocked_on[i] > 0)
                .map(|i| joins[i].field.as_str()),
        ));
    }

    Ok(ordered)
}
