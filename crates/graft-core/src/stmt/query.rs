use super::{Cardinality, Expr, Select, WhereValue};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One level of a nested request: a table, its predicate, and the
/// sub-requests grafted into each of its rows.
///
/// Deserializes from the query document format:
///
/// ```text
/// {
///   "from": "film",
///   "select": ["film_id", "title", "language_id"],
///   "where": { "film_id": { "$param": "id" } },
///   "cardinality": "one",
///   "include": {
///     "language": {
///       "from": "language",
///       "where": { "language_id": { "$ref": "film.language_id" } },
///       "cardinality": "maybe"
///     }
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Query {
    /// Table to read rows from
    pub from: String,

    #[serde(default)]
    pub select: Select,

    #[serde(default, rename = "where", skip_serializing_if = "IndexMap::is_empty")]
    pub filter: IndexMap<String, WhereValue>,

    /// Nested sub-requests, keyed by the field they populate in each row
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub include: IndexMap<String, Query>,

    #[serde(default)]
    pub cardinality: Cardinality,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,

    /// Columns of this node that correlate it with the node it references.
    /// Derived from the cross references in `filter` when empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub grouping_id: Vec<String>,

    /// Resolve this include independently; the slot goes through
    /// pending/done/error instead of failing the whole request.
    #[serde(default, skip_serializing_if = "is_false")]
    pub lazy: bool,

    /// Execute for correlation only. The rows are never placed in the
    /// output tree.
    #[serde(default, skip_serializing_if = "is_false")]
    pub hidden: bool,
}

fn is_false(v: &bool) -> bool {
    !*v
}

impl Query {
    pub fn table(from: impl Into<String>) -> Query {
        Query {
            from: from.into(),
            select: Select::All,
            filter: IndexMap::new(),
            include: IndexMap::new(),
            cardinality: Cardinality::Many,
            limit: None,
            grouping_id: vec![],
            lazy: false,
            hidden: false,
        }
    }

    pub fn columns<I, S>(mut self, columns: I) -> Query
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.select = columns.into_iter().collect();
        self
    }

    pub fn filter(mut self, column: impl Into<String>, value: impl Into<WhereValue>) -> Query {
        self.filter.insert(column.into(), value.into());
        self
    }

    pub fn include(mut self, field: impl Into<String>, query: Query) -> Query {
        self.include.insert(field.into(), query);
        self
    }

    pub fn one(mut self) -> Query {
        self.cardinality = Cardinality::One;
        self
    }

    pub fn maybe(mut self) -> Query {
        self.cardinality = Cardinality::Maybe;
        self
    }

    pub fn many(mut self) -> Query {
        self.cardinality = Cardinality::Many;
        self
    }

    pub fn limit(mut self, limit: u64) -> Query {
        self.limit = Some(limit);
        self
    }

    pub fn grouping_id<I, S>(mut self, columns: I) -> Query
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.grouping_id = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn lazy(mut self) -> Query {
        self.lazy = true;
        self
    }

    pub fn hidden(mut self) -> Query {
        self.hidden = true;
        self
    }

    /// This node without its includes, as handed to a driver.
    pub fn without_includes(&self) -> Query {
        Query {
            include: IndexMap::new(),
            ..self.clone()
        }
    }

    /// The `where` map as a single predicate over this node's table.
    pub fn filter_expr(&self) -> Expr {
        Expr::and_from_vec(
            self.filter
                .iter()
                .map(|(column, value)| value.to_expr(&self.from, column))
                .collect(),
        )
    }

    pub fn from_json(json: &str) -> crate::Result<Query> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
