use super::{Driver, Response};
use crate::{
    stmt::{ExprColumn, Input, Query, Select, Value, ValueRecord},
    Error, Result,
};

use graft_core::async_trait;
use indexmap::IndexMap;
use std::{
    io,
    sync::{Arc, Mutex},
};

/// A driver over tables held in memory.
///
/// Evaluates each query's predicate row by row with the expression model,
/// then applies the selection and limit. Every query it receives is kept in
/// an execution log, shared between clones, so callers can observe what the
/// engine sent and in which order.
#[derive(Debug, Clone, Default)]
pub struct Memory {
    tables: Arc<IndexMap<String, Vec<ValueRecord>>>,
    log: Arc<Mutex<Vec<Query>>>,
}

struct Row<'a> {
    table: &'a str,
    row: &'a ValueRecord,
}

impl Memory {
    pub fn new() -> Memory {
        Memory::default()
    }

    /// Adds (or replaces) table `name` with `rows`.
    pub fn table(mut self, name: impl Into<String>, rows: impl IntoIterator<Item = ValueRecord>) -> Memory {
        Arc::make_mut(&mut self.tables).insert(name.into(), rows.into_iter().collect());
        self
    }

    /// Queries executed so far, in the order they were received.
    pub fn log(&self) -> Vec<Query> {
        match self.log.lock() {
            Ok(log) => log.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Tables of the queries executed so far, in order.
    pub fn executed_tables(&self) -> Vec<String> {
        self.log().into_iter().map(|query| query.from).collect()
    }

    fn record(&self, query: &Query) {
        match self.log.lock() {
            Ok(mut log) => log.push(query.clone()),
            Err(poisoned) => poisoned.into_inner().push(query.clone()),
        }
    }
}

#[async_trait]
impl Driver for Memory {
    async fn exec(&self, query: &Query) -> Result<Response> {
        self.record(query);

        let Some(rows) = self.tables.get(&query.from) else {
            return Err(Error::backend(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no table named `{}`", query.from),
            )));
        };

        let filter = query.filter_expr();
        let limit = query.limit.map(|limit| limit as usize).unwrap_or(usize::MAX);
        let mut matched = vec![];

        for row in rows {
            if matched.len() >= limit {
                break;
            }

            let input = Row {
                table: &query.from,
                row,
            };

            if filter.eval_bool(input)? {
                matched.push(project(row, &query.select));
            }
        }

        Ok(Response::from_rows(matched))
    }
}

fn project(row: &ValueRecord, select: &Select) -> ValueRecord {
    match select {
        Select::All => row.clone(),
        Select::Columns(columns) => columns
            .iter()
            .map(|column| (column.as_str(), row.get(column).cloned().unwrap_or(Value::Null)))
            .collect(),
    }
}

impl Input for Row<'_> {
    fn resolve_column(&mut self, column: &ExprColumn) -> Option<Value> {
        if !column.table.is_empty() && column.table != self.table {
            return None;
        }

        Some(self.row.get(&column.column).cloned().unwrap_or(Value::Null))
    }
}
