use super::{
    join_graph::{self, Join},
    tree::{NodeId, Tree},
    Config,
};
use crate::{
    stmt::{ExprColumn, Query},
    Error, Result,
};

use std::collections::VecDeque;

/// One node of a planned request.
///
/// Plans are built breadth first and siblings are stored in execution
/// order, so every node a given node depends on has a smaller id.
#[derive(Debug, Clone)]
pub(crate) struct PlanNode {
    pub(crate) id: NodeId,

    /// Field the node populates in its parent rows. Empty for the root.
    pub(crate) field: String,

    /// Fields of the siblings declared after this one. The node's field is
    /// placed before them in the parent rows.
    pub(crate) later: Vec<String>,

    /// Dotted path from the root table, used to identify the node in errors
    /// and logs: `film.actors`
    pub(crate) name: String,

    /// The node's query, without includes
    pub(crate) query: Query,

    /// Columns correlating this node with the nodes it references, in
    /// grouping key order
    pub(crate) key: Vec<KeyPart>,
}

#[derive(Debug, Clone)]
pub(crate) struct KeyPart {
    /// Column of this node
    pub(crate) column: String,

    /// Node whose rows supply the values
    pub(crate) source: NodeId,

    /// Column of the source node
    pub(crate) source_column: String,

    pub(crate) relation: Relation,
}

/// How a referenced node relates to the referencing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Relation {
    Parent,
    Sibling,
    Ancestor { depth: usize },
}

impl PlanNode {
    fn new(field: &str, name: String, query: &Query) -> PlanNode {
        PlanNode {
            id: NodeId::from_usize(0),
            field: field.to_string(),
            later: vec![],
            name,
            query: query.without_includes(),
            key: vec![],
        }
    }

    pub(crate) fn key_columns(&self) -> Vec<String> {
        self.key.iter().map(|part| part.column.clone()).collect()
    }

    /// Nodes whose rows must be known before this node can be queried.
    pub(crate) fn sources(&self) -> Vec<NodeId> {
        let mut sources = vec![];
        for part in &self.key {
            if !sources.contains(&part.source) {
                sources.push(part.source);
            }
        }
        sources
    }

    /// Whether the node's rows are placed in the output.
    pub(crate) fn is_placed(&self) -> bool {
        !self.query.hidden
    }

    pub(crate) fn is_lazy(&self) -> bool {
        self.query.lazy && self.is_placed()
    }
}

/// Validates `query` and lays it out for execution.
///
/// Every structural problem is reported here, before any backend sees a
/// query: unresolvable or cyclic references, malformed grouping keys,
/// unsupported correlation operators and over-deep nesting.
pub(crate) fn plan(query: &Query, config: &Config) -> Result<Tree<PlanNode>> {
    if let Some((_, reference)) = query.filter.values().find_map(|value| value.reference()) {
        return Err(Error::unresolved_reference(&query.from, reference));
    }

    if query.hidden || query.lazy {
        return Err(Error::invalid_query(format!(
            "the root query `{}` cannot be hidden or lazy",
            query.from
        )));
    }

    if !query.grouping_id.is_empty() {
        return Err(Error::malformed_grouping_key(
            &query.from,
            "the root query has nothing to correlate with",
        ));
    }

    validate(&query.from, query)?;

    let mut tree = Tree::new(PlanNode::new("", query.from.clone(), query));
    let mut queue = VecDeque::from([(tree.root(), query)]);

    while let Some((parent, query)) = queue.pop_front() {
        if query.include.is_empty() {
            continue;
        }

        let parent_name = tree[parent].value.name.clone();

        if tree[parent].value.query.hidden {
            return Err(Error::invalid_query(format!(
                "hidden include `{parent_name}` cannot have includes of its own"
            )));
        }

        if tree[parent].depth + 1 > config.max_depth {
            return Err(Error::invalid_query(format!(
                "`{parent_name}` nests includes deeper than the maximum depth of {}",
                config.max_depth
            )));
        }

        let includes: Vec<(&String, &Query)> = query.include.iter().collect();
        let joins = sibling_joins(&tree, parent, &includes);
        let order = join_graph::order(&joins)?;

        // Siblings are pushed in execution order; `ids` is by declaration
        let mut ids = vec![tree.root(); includes.len()];
        for &i in &order {
            let (field, include) = includes[i];
            let name = format!("{parent_name}.{field}");

            validate(&name, include)?;

            let id = tree.push_child(parent, PlanNode::new(field, name, include));
            tree.value_mut(id).id = id;
            tree.value_mut(id).later = includes[i + 1..]
                .iter()
                .map(|(field, _)| field.to_string())
                .collect();
            ids[i] = id;
        }

        let siblings: Vec<(&str, NodeId)> = includes
            .iter()
            .zip(&ids)
            .map(|((_, include), &id)| (include.from.as_str(), id))
            .collect();

        for &i in &order {
            let (_, include) = includes[i];
            let key = correlate(&tree, parent, ids[i], include, &siblings)?;
            tree.value_mut(ids[i]).key = key;
            queue.push_back((ids[i], include));
        }
    }

    Ok(tree)
}

fn validate(name: &str, query: &Query) -> Result<()> {
    if query.limit == Some(0) {
        return Err(Error::invalid_query(format!("`{name}` has a limit of 0")));
    }

    if let Some(field) = query
        .include
        .keys()
        .find(|field| query.select.columns().is_some_and(|columns| columns.contains(*field)))
    {
        return Err(Error::invalid_query(format!(
            "`{name}` selects `{field}` and also includes it"
        )));
    }

    Ok(())
}

/// Sibling dependencies of each include of `parent`. A reference only
/// counts when it does not resolve to the parent itself.
fn sibling_joins(tree: &Tree<PlanNode>, parent: NodeId, includes: &[(&String, &Query)]) -> Vec<Join> {
    let parent_table = &tree[parent].value.query.from;

    includes
        .iter()
        .map(|(field, include)| {
            let mut join = Join::new(field.as_str(), &include.from);

            for (_, reference) in include.filter.values().filter_map(|value| value.reference()) {
                let is_sibling = includes
                    .iter()
                    .any(|(other, sibling)| other != field && sibling.from == reference.table);

                if reference.table != *parent_table && is_sibling {
                    join = join.reference(&reference.table);
                }
            }

            join
        })
        .collect()
}

fn correlate(
    tree: &Tree<PlanNode>,
    parent: NodeId,
    id: NodeId,
    query: &Query,
    siblings: &[(&str, NodeId)],
) -> Result<Vec<KeyPart>> {
    let name = &tree[id].value.name;
    let mut key = vec![];

    for (column, value) in &query.filter {
        let Some((op, reference)) = value.reference() else {
            continue;
        };

        if !op.is_correlation() {
            return Err(Error::invalid_query(format!(
                "`{name}` correlates `{column}` with `{op}`; only equality and membership can correlate"
            )));
        }

        let (source, relation) = resolve_reference(tree, parent, id, reference, siblings)
            .ok_or_else(|| Error::unresolved_reference(name, reference))?;

        let source_node = &tree[source].value;
        if !source_node.query.select.contains(&reference.column) {
            return Err(Error::invalid_query(format!(
                "`{name}` references `{reference}`, which `{}` does not select",
                source_node.name
            )));
        }

        key.push(KeyPart {
            column: column.clone(),
            source,
            source_column: reference.column.clone(),
            relation,
        });
    }

    if !query.grouping_id.is_empty() {
        key = regroup(name, key, &query.grouping_id)?;
    }

    for part in &key {
        if !query.select.contains(&part.column) {
            return Err(Error::malformed_grouping_key(
                name,
                format!("correlated column `{}` is not selected", part.column),
            ));
        }
    }

    Ok(key)
}

/// Puts `key` in the order of an explicit grouping key, which must name
/// exactly the correlated columns.
fn regroup(name: &str, mut key: Vec<KeyPart>, grouping_id: &[String]) -> Result<Vec<KeyPart>> {
    let mut regrouped = Vec::with_capacity(key.len());

    for column in grouping_id {
        match key.iter().position(|part| part.column == *column) {
            Some(i) => regrouped.push(key.remove(i)),
            None => {
                return Err(Error::malformed_grouping_key(
                    name,
                    format!("`{column}` is not a correlated column"),
                ))
            }
        }
    }

    if let Some(part) = key.first() {
        return Err(Error::malformed_grouping_key(
            name,
            format!("correlated column `{}` is missing from the key", part.column),
        ));
    }

    Ok(regrouped)
}

/// Finds the node a reference points at: the parent first, then a
/// sibling, then the nearest ancestor reading that table.
fn resolve_reference(
    tree: &Tree<PlanNode>,
    parent: NodeId,
    id: NodeId,
    reference: &ExprColumn,
    siblings: &[(&str, NodeId)],
) -> Option<(NodeId, Relation)> {
    if tree[parent].value.query.from == reference.table {
        return Some((parent, Relation::Parent));
    }

    // A sibling reading the same table as `id` is never a dependency
    let own_table = &tree[id].value.query.from;
    if let Some(&(_, sibling)) = siblings
        .iter()
        .find(|&&(table, _)| table == reference.table && table != own_table)
    {
        return Some((sibling, Relation::Sibling));
    }

    tree.ancestors(parent)
        .find(|&ancestor| tree[ancestor].value.query.from == reference.table)
        .map(|ancestor| {
            (
                ancestor,
                Relation::Ancestor {
                    depth: tree[ancestor].depth,
                },
            )
        })
}
