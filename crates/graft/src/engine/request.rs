use super::QueryId;
use crate::stmt::{Query, Value};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One execution request: a query, inline or by id, and the parameter
/// values to bind into it.
///
/// ```text
/// {"query": {"from": "film", ...}, "params": {"id": 7}}
/// {"queryId": "film_by_id", "params": {"id": 7}}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Request {
    Inline {
        query: Query,

        #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
        params: IndexMap<String, Value>,
    },

    Registered {
        #[serde(rename = "queryId")]
        id: QueryId,

        #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
        params: IndexMap<String, Value>,
    },
}

impl Request {
    pub fn registered(id: impl Into<QueryId>) -> Request {
        Request::Registered {
            id: id.into(),
            params: IndexMap::new(),
        }
    }

    /// Binds `value` to the parameter `id`.
    pub fn param(mut self, id: impl Into<String>, value: impl Into<Value>) -> Request {
        self.params_mut().insert(id.into(), value.into());
        self
    }

    pub fn params(&self) -> &IndexMap<String, Value> {
        match self {
            Request::Inline { params, .. } | Request::Registered { params, .. } => params,
        }
    }

    fn params_mut(&mut self) -> &mut IndexMap<String, Value> {
        match self {
            Request::Inline { params, .. } | Request::Registered { params, .. } => params,
        }
    }

    pub fn from_json(json: &str) -> crate::Result<Request> {
        Ok(serde_json::from_str(json)?)
    }
}

impl From<Query> for Request {
    fn from(query: Query) -> Self {
        Request::Inline {
            query,
            params: IndexMap::new(),
        }
    }
}

impl From<QueryId> for Request {
    fn from(id: QueryId) -> Self {
        Request::registered(id)
    }
}
