mod builder;
pub use builder::Builder;

pub mod cardinality;

mod exec;
use exec::{Exec, NodeOutput};

pub mod hash_join;

pub mod join_graph;

mod plan;
use plan::PlanNode;

mod registry;
pub use registry::{QueryId, Registry};

mod request;
pub use request::Request;

pub mod tree;
pub use tree::{map_tree, NodeId, Snapshot, Tree};

use crate::{
    driver::Driver,
    stmt::{Query, Value},
    Error, Result,
};

use std::{pin::Pin, sync::Arc};
use tokio_stream::{Stream, StreamExt};
use tracing::{debug, Instrument};

/// Whole-tree snapshots of one execution, one per level of the request.
/// Every snapshot contains everything the previous one did.
pub type Snapshots = Pin<Box<dyn Stream<Item = Result<Value>> + Send>>;

/// Executes nested requests against a driver.
///
/// Cheap to clone; clones share the driver and the registry.
#[derive(Debug, Clone)]
pub struct Engine {
    shared: Arc<Shared>,
}

#[derive(Debug)]
struct Shared {
    driver: Arc<dyn Driver>,
    registry: Registry,
    config: Config,
}

#[derive(Debug, Clone)]
pub(crate) struct Config {
    pub(crate) skip_empty_correlations: bool,
    pub(crate) max_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            skip_empty_correlations: true,
            max_depth: 16,
        }
    }
}

impl Engine {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn registry(&self) -> &Registry {
        &self.shared.registry
    }

    /// Starts executing `request`, returning its snapshots as they are
    /// assembled.
    ///
    /// Problems with the request itself (unknown query id, missing
    /// parameters, unresolvable references, ...) are reported here, before
    /// any query reaches the driver.
    pub fn stream(&self, request: impl Into<Request>) -> Result<Snapshots> {
        let query = self.resolve(request.into())?;
        let plan = Arc::new(plan::plan(&query, &self.shared.config)?);

        let span = tracing::info_span!("execute", id = %uuid::Uuid::new_v4(), from = %query.from);
        debug!(parent: &span, nodes = plan.len(), "planned request");

        let exec = Arc::new(Exec::new(
            self.shared.driver.clone(),
            plan,
            &self.shared.config,
            &span,
        ));

        let snapshots = async_stream::try_stream! {
            let plan = exec.plan().clone();
            let mapper = exec.clone();

            let rounds = map_tree(&*plan, move |node: &PlanNode, parent: Option<&NodeOutput>| {
                let exec = mapper.clone();
                let (id, parent) = (node.id, parent.cloned());
                async move { exec.map_node(id, parent).await }.instrument(span.clone())
            });
            tokio::pin!(rounds);

            let mut output = Value::Null;

            while let Some(round) = rounds.next().await {
                let round = round?;

                for &id in &round.round {
                    let node = &round.tree[id].value;

                    for (path, value) in node.patches.iter() {
                        output.patch_before_mut(path, &node.later, |_| value.clone())?;
                    }
                }

                yield output.clone();
            }
        };

        Ok(Box::pin(snapshots))
    }

    /// Executes `request` to completion and returns the final tree.
    pub async fn exec(&self, request: impl Into<Request>) -> Result<Value> {
        let mut snapshots = self.stream(request)?;
        let mut last = None;

        while let Some(snapshot) = snapshots.next().await {
            last = Some(snapshot?);
        }

        last.ok_or_else(|| Error::assembly_invariant("execution produced no snapshot"))
    }

    /// The query a request names, with its parameters bound.
    fn resolve(&self, request: Request) -> Result<Query> {
        let (mut query, params) = match request {
            Request::Inline { query, params } => (query, params),
            Request::Registered { id, params } => match self.shared.registry.get(&id) {
                Some(query) => (query.clone(), params),
                None => {
                    return Err(Error::invalid_query(format!(
                        "no query registered as `{id}`"
                    )))
                }
            },
        };

        query.bind_params(&params)?;
        Ok(query)
    }
}
