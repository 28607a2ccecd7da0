use super::{
    cardinality,
    hash_join::{Index, JoinKey},
    plan::{PlanNode, Relation},
    tree::{NodeId, Tree},
    Config,
};
use crate::{
    driver::Driver,
    stmt::{Lazy, Path, Query, Value, ValueRecord, WhereValue},
    Error, Result,
};

use futures::{
    future::{try_join_all, BoxFuture, Shared},
    FutureExt,
};
use index_vec::IndexVec;
use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};
use tracing::{debug, trace, warn, Instrument, Span};

/// Rows of one node, fetched at most once per execution and shared by every
/// node that needs them.
type Fetch = Shared<BoxFuture<'static, Result<Arc<Fetched>>>>;

#[derive(Debug, Default)]
pub(crate) struct Fetched {
    rows: Vec<ValueRecord>,

    /// `rows` grouped by the node's key columns
    index: Index,
}

/// What mapping one plan node produced.
#[derive(Debug, Clone)]
pub(crate) struct NodeOutput {
    /// Where each placed row of the node ended up
    placements: Arc<Vec<Placement>>,

    /// Whether the node's includes should be resolved
    live: bool,

    /// Fields the patched field goes before
    pub(crate) later: Arc<Vec<String>>,

    /// Writes into the output tree, applied in order
    pub(crate) patches: Arc<Vec<(Path, Value)>>,
}

#[derive(Debug, Clone)]
struct Placement {
    path: Path,

    /// Row index of every node from the root down to this one
    rows: Vec<usize>,
}

/// State of one execution of a plan.
pub(crate) struct Exec {
    plan: Arc<Tree<PlanNode>>,
    fetches: IndexVec<NodeId, Fetch>,
}

impl NodeOutput {
    fn new(placements: Vec<Placement>, patches: Vec<(Path, Value)>) -> NodeOutput {
        NodeOutput {
            placements: Arc::new(placements),
            live: true,
            later: Arc::default(),
            patches: Arc::new(patches),
        }
    }

    /// The node will not be resolved and neither will its includes.
    fn dead(patches: Vec<(Path, Value)>) -> NodeOutput {
        NodeOutput {
            placements: Arc::default(),
            live: false,
            later: Arc::default(),
            patches: Arc::new(patches),
        }
    }
}

impl Exec {
    pub(crate) fn new(
        driver: Arc<dyn Driver>,
        plan: Arc<Tree<PlanNode>>,
        config: &Config,
        span: &Span,
    ) -> Exec {
        let mut fetches: IndexVec<NodeId, Fetch> = IndexVec::with_capacity(plan.len());

        for (id, node) in plan.iter() {
            // Plans are breadth first, so sources are always set up already
            let sources = node
                .value
                .sources()
                .into_iter()
                .map(|source| {
                    debug_assert!(source < id);
                    (source, fetches[source].clone())
                })
                .collect();

            let fetch = fetch(
                driver.clone(),
                node.value.clone(),
                sources,
                config.skip_empty_correlations,
            );

            fetches.push(fetch.instrument(span.clone()).boxed().shared());
        }

        Exec { plan, fetches }
    }

    pub(crate) fn plan(&self) -> &Arc<Tree<PlanNode>> {
        &self.plan
    }

    /// Resolves node `id` given its parent's output.
    pub(crate) async fn map_node(&self, id: NodeId, parent: Option<NodeOutput>) -> Result<NodeOutput> {
        let node = &self.plan[id].value;

        let output = match parent {
            None => self.map_root(node).await?,
            Some(parent) if !parent.live => {
                trace!(node = %node.name, "parent unresolved; skipping");
                NodeOutput::dead(vec![])
            }
            Some(parent) => self.map_include(node, &parent).await?,
        };

        Ok(NodeOutput {
            later: Arc::new(node.later.clone()),
            ..output
        })
    }

    async fn map_root(&self, node: &PlanNode) -> Result<NodeOutput> {
        let fetched = self.fetches[node.id].clone().await?;
        let many = node.query.cardinality.is_many();

        let values = fetched
            .rows
            .iter()
            .map(|row| self.row_value(node, row))
            .collect();
        let value = cardinality::resolve(&node.name, node.query.cardinality, values)?;

        let placements = (0..fetched.rows.len())
            .map(|i| Placement {
                path: if many { Path::root().join(i) } else { Path::root() },
                rows: vec![i],
            })
            .collect();

        Ok(NodeOutput::new(placements, vec![(Path::root(), value)]))
    }

    async fn map_include(&self, node: &PlanNode, parent: &NodeOutput) -> Result<NodeOutput> {
        let field = node.field.as_str();

        let fetched = match self.fetch_related(node).await {
            Ok(fetched) => fetched,
            Err(err) if node.is_lazy() => {
                warn!(node = %node.name, error = %err, "lazy include failed");
                let slot = Value::Lazy(Lazy::error(err.to_string()));

                return Ok(NodeOutput::dead(
                    parent
                        .placements
                        .iter()
                        .map(|placement| (placement.path.join(field), slot.clone()))
                        .collect(),
                ));
            }
            Err(err) => return Err(err),
        };

        if !node.is_placed() {
            return Ok(NodeOutput::new(vec![], vec![]));
        }

        let rows = &get(&fetched, node.id)?.rows;
        let many = node.query.cardinality.is_many();
        let mut placements = vec![];
        let mut patches = Vec::with_capacity(parent.placements.len());

        for placement in parent.placements.iter() {
            let matched = self.matches(node, placement, &fetched)?;
            let path = placement.path.join(field);
            let values = matched
                .iter()
                .map(|&i| self.row_value(node, &rows[i]))
                .collect();

            let value = if node.is_lazy() {
                let slot = cardinality::resolve_lazy(&node.name, node.query.cardinality, values);

                if let Lazy::Error(message) = &slot {
                    warn!(node = %node.name, path = %path, error = %message, "lazy include failed");
                    patches.push((path, Value::Lazy(slot)));
                    continue;
                }

                Value::Lazy(slot)
            } else {
                cardinality::resolve(&node.name, node.query.cardinality, values)?
            };

            for (k, &i) in matched.iter().enumerate() {
                let mut stack = placement.rows.clone();
                stack.push(i);

                placements.push(Placement {
                    path: if many { path.join(k) } else { path.clone() },
                    rows: stack,
                });
            }

            patches.push((path, value));
        }

        debug!(node = %node.name, placed = placements.len(), "assembled include");

        Ok(NodeOutput::new(placements, patches))
    }

    /// Fetches `node` and every node its matching reads from.
    async fn fetch_related(&self, node: &PlanNode) -> Result<HashMap<NodeId, Arc<Fetched>>> {
        let mut ids = vec![node.id];
        let mut i = 0;

        // Matching through a sibling also matches that sibling
        while i < ids.len() {
            for part in &self.plan[ids[i]].value.key {
                if !ids.contains(&part.source) {
                    ids.push(part.source);
                }
            }
            i += 1;
        }

        let fetched = try_join_all(ids.iter().map(|&id| self.fetches[id].clone())).await?;

        Ok(ids.into_iter().zip(fetched).collect())
    }

    /// Indices of the rows of `node` that belong under `placement`, in row
    /// order.
    fn matches(
        &self,
        node: &PlanNode,
        placement: &Placement,
        fetched: &HashMap<NodeId, Arc<Fetched>>,
    ) -> Result<Vec<usize>> {
        let mut candidates = Vec::with_capacity(node.key.len());

        for part in &node.key {
            let source_rows = match part.relation {
                Relation::Parent => placement.rows.last().copied().into_iter().collect(),
                Relation::Ancestor { depth } => placement.rows.get(depth).copied().into_iter().collect(),
                Relation::Sibling => self.matches(&self.plan[part.source].value, placement, fetched)?,
            };

            let source = get(fetched, part.source)?;
            candidates.push(
                source_rows
                    .iter()
                    .filter_map(|&i| source.rows.get(i)?.get(&part.source_column))
                    .collect::<Vec<_>>(),
            );
        }

        get(fetched, node.id)?.index.matching(&candidates)
    }

    /// A row as placed in the output. Lazy includes start out pending.
    fn row_value(&self, node: &PlanNode, row: &ValueRecord) -> Value {
        let mut record = row.clone();

        for &child in self.plan.children(node.id) {
            let child = &self.plan[child].value;
            if child.is_lazy() {
                record.insert_before(child.field.as_str(), Lazy::Pending, &child.later);
            }
        }

        Value::Record(record)
    }
}

fn get(fetched: &HashMap<NodeId, Arc<Fetched>>, id: NodeId) -> Result<&Fetched> {
    fetched
        .get(&id)
        .map(|fetched| &**fetched)
        .ok_or_else(|| Error::assembly_invariant(format!("rows of node {id:?} were not fetched")))
}

async fn fetch(
    driver: Arc<dyn Driver>,
    node: PlanNode,
    sources: Vec<(NodeId, Fetch)>,
    skip_empty_correlations: bool,
) -> Result<Arc<Fetched>> {
    let mut resolved = HashMap::with_capacity(sources.len());
    for (id, source) in sources {
        resolved.insert(id, source.await?);
    }

    let (query, empty) = correlate(&node, &resolved)?;

    if empty && skip_empty_correlations {
        debug!(node = %node.name, "nothing to correlate with; skipping backend");
        return Ok(Arc::default());
    }

    debug!(node = %node.name, table = %query.from, "executing query");

    let response = driver
        .exec(&query)
        .await
        .map_err(|err| err.backend_at(&node.name))?;

    trace!(node = %node.name, rows = response.rows.len(), "query returned");

    let index = Index::build(&response.rows, &node.key_columns())?;

    Ok(Arc::new(Fetched {
        rows: response.rows,
        index,
    }))
}

/// Replaces every cross reference of `node` with the set of distinct,
/// non-null values the referenced column took. Also reports whether any of
/// those sets came out empty.
fn correlate(node: &PlanNode, sources: &HashMap<NodeId, Arc<Fetched>>) -> Result<(Query, bool)> {
    let mut query = node.query.clone();
    let mut empty = false;

    for part in &node.key {
        let source = get(sources, part.source)?;
        let mut seen = HashSet::new();
        let mut values = vec![];

        for value in source
            .rows
            .iter()
            .filter_map(|row| row.get(&part.source_column))
        {
            if let Some(key) = JoinKey::from_values([value])? {
                if seen.insert(key) {
                    values.push(value.clone());
                }
            }
        }

        trace!(node = %node.name, column = %part.column, values = values.len(), "correlated");

        empty |= values.is_empty();
        query.filter.insert(part.column.clone(), WhereValue::In(values));
    }

    Ok((query, empty))
}

