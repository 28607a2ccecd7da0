use crate::{
    async_trait,
    stmt::{Query, ValueRecord},
};

use std::fmt::Debug;

/// A backend that executes one flat query at a time.
///
/// The engine hands the driver a single node of the request tree with its
/// includes removed and every cross reference already replaced by the
/// concrete set of values it resolved to. Compiling that node into the
/// backend's native query language, pooling connections and retrying are
/// the driver's business.
#[async_trait]
pub trait Driver: Debug + Send + Sync + 'static {
    /// Execute a query and return its rows.
    ///
    /// Failures should be reported with [`Error::backend`](crate::Error::backend).
    async fn exec(&self, query: &Query) -> crate::Result<Response>;
}

#[derive(Debug, Default)]
pub struct Response {
    /// Rows keyed by column name
    pub rows: Vec<ValueRecord>,
}

impl Response {
    pub fn from_rows(rows: impl Into<Vec<ValueRecord>>) -> Response {
        Response { rows: rows.into() }
    }

    pub fn empty() -> Response {
        Response::default()
    }
}
