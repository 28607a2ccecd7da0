use super::{Config, Engine, QueryId, Registry, Shared};
use crate::{driver::Driver, stmt::Query, Error, Result};

use std::sync::Arc;

#[derive(Default)]
pub struct Builder {
    driver: Option<Arc<dyn Driver>>,

    /// Queries callable by id
    registry: Registry,

    config: Config,
}

impl Builder {
    /// The backend every query is executed against.
    pub fn driver(&mut self, driver: impl Driver) -> &mut Self {
        self.driver = Some(Arc::new(driver));
        self
    }

    /// Registers `query` under an explicit id.
    pub fn register(&mut self, id: impl Into<QueryId>, query: Query) -> &mut Self {
        self.registry.insert(id.into(), query);
        self
    }

    /// Registers `query` under an id derived from its contents and returns
    /// that id.
    pub fn register_query(&mut self, query: Query) -> Result<QueryId> {
        let id = QueryId::of(&query)?;
        self.registry.insert(id.clone(), query);
        Ok(id)
    }

    /// Whether a node whose correlated value set is empty skips the backend
    /// and resolves to no rows. Defaults to `true`.
    pub fn skip_empty_correlations(&mut self, skip: bool) -> &mut Self {
        self.config.skip_empty_correlations = skip;
        self
    }

    /// Deepest include nesting a query may use. Defaults to 16.
    pub fn max_depth(&mut self, max_depth: usize) -> &mut Self {
        self.config.max_depth = max_depth;
        self
    }

    pub fn build(&mut self) -> Result<Engine> {
        let Some(driver) = self.driver.take() else {
            return Err(Error::invalid_query("no driver configured"));
        };

        Ok(Engine {
            shared: Arc::new(Shared {
                driver,
                registry: std::mem::take(&mut self.registry),
                config: self.config.clone(),
            }),
        })
    }
}
