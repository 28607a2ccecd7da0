use super::{ExprParam, Query, Value, WhereValue};
use crate::{Error, Result};

use indexmap::IndexMap;

impl Query {
    /// Ids of every parameter slot, in document order.
    ///
    /// Slots without an explicit id are named by the dotted path of include
    /// fields leading to them followed by the column: `film_id` at the root,
    /// `language.language_id` one level down.
    pub fn params(&self) -> Vec<String> {
        let mut ids = vec![];
        self.for_each_param(&mut vec![], &mut |id, _| ids.push(id.to_string()));
        ids
    }

    /// Fills every parameter slot from a flat `"dotted.path" -> value`
    /// mapping. Slots keep their inline value when the mapping has no entry
    /// for them; a slot with neither fails with a configuration error.
    pub fn bind_params(&mut self, params: &IndexMap<String, Value>) -> Result<()> {
        let mut missing = None;

        self.for_each_param_mut(&mut vec![], &mut |id, param| {
            if let Some(value) = params.get(id) {
                param.value = Some(value.clone());
            }
            if param.id.is_none() {
                param.id = Some(id.to_string());
            }
            if param.value.is_none() && missing.is_none() {
                missing = Some(id.to_string());
            }
        });

        match missing {
            Some(id) => Err(Error::missing_parameter(&id)),
            None => Ok(()),
        }
    }

    fn for_each_param(&self, path: &mut Vec<String>, f: &mut impl FnMut(&str, &ExprParam)) {
        for (column, value) in &self.filter {
            if let Some(param) = value.param() {
                f(&param_id(path, column, param), param);
            }
        }

        for (field, query) in &self.include {
            path.push(field.clone());
            query.for_each_param(path, f);
            path.pop();
        }
    }

    fn for_each_param_mut(
        &mut self,
        path: &mut Vec<String>,
        f: &mut impl FnMut(&str, &mut ExprParam),
    ) {
        for (column, value) in &mut self.filter {
            if let Some(param) = value.param_mut() {
                let id = param_id(path, column, param);
                f(&id, param);
            }
        }

        for (field, query) in &mut self.include {
            path.push(field.clone());
            query.for_each_param_mut(path, f);
            path.pop();
        }
    }
}

impl WhereValue {
    fn param(&self) -> Option<&ExprParam> {
        match self {
            WhereValue::Param(param) => Some(param),
            WhereValue::Op { operand, .. } => operand.param(),
            _ => None,
        }
    }

    fn param_mut(&mut self) -> Option<&mut ExprParam> {
        match self {
            WhereValue::Param(param) => Some(param),
            WhereValue::Op { operand, .. } => operand.param_mut(),
            _ => None,
        }
    }
}

fn param_id(path: &[String], column: &str, param: &ExprParam) -> String {
    match &param.id {
        Some(id) => id.clone(),
        None if path.is_empty() => column.to_string(),
        None => format!("{}.{}", path.join("."), column),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stmt::{param, ExprParam};

    #[test]
    fn derived_ids_follow_include_path() {
        let query = Query::table("film")
            .filter("film_id", ExprParam::positional())
            .include(
                "actors",
                Query::table("actor").filter("first_name", param("name")),
            )
            .include(
                "language",
                Query::table("language").filter("name", ExprParam::positional()),
            );

        assert_eq!(query.params(), ["film_id", "name", "language.name"]);
    }
}
