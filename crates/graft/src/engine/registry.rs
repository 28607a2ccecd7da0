use crate::{stmt::Query, Result};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Identifies a query registered with an engine ahead of time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryId(String);

impl QueryId {
    pub fn new(id: impl Into<String>) -> QueryId {
        QueryId(id.into())
    }

    /// Derives an id from the query's document form: the first 8 bytes of
    /// its SHA-256 digest, hex encoded. Equal queries get equal ids, on any
    /// build.
    pub fn of(query: &Query) -> Result<QueryId> {
        let mut hasher = Sha256::new();
        hasher.update(query.to_json()?.as_bytes());
        let digest = hasher.finalize();

        Ok(QueryId(hex::encode(&digest[..8])))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for QueryId {
    fn from(id: &str) -> Self {
        QueryId::new(id)
    }
}

impl From<String> for QueryId {
    fn from(id: String) -> Self {
        QueryId(id)
    }
}

impl fmt::Display for QueryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Queries known to an engine by id.
#[derive(Debug, Default)]
pub struct Registry {
    queries: IndexMap<QueryId, Query>,
}

impl Registry {
    /// Registers `query` under `id`, replacing any query registered there
    /// before.
    pub fn insert(&mut self, id: QueryId, query: Query) {
        self.queries.insert(id, query);
    }

    pub fn get(&self, id: &QueryId) -> Option<&Query> {
        self.queries.get(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &QueryId> {
        self.queries.keys()
    }

    pub fn len(&self) -> usize {
        self.queries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }
}
