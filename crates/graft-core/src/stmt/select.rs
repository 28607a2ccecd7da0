use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// The columns a node selects.
///
/// In query documents `"*"` selects every column and an array of strings
/// selects those columns.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum Select {
    #[default]
    All,
    Columns(Vec<String>),
}

impl Select {
    /// Returns `true` if the column is part of the selection.
    pub fn contains(&self, column: &str) -> bool {
        match self {
            Select::All => true,
            Select::Columns(columns) => columns.iter().any(|c| c == column),
        }
    }

    pub fn columns(&self) -> Option<&[String]> {
        match self {
            Select::All => None,
            Select::Columns(columns) => Some(columns),
        }
    }
}

impl<S: Into<String>> FromIterator<S> for Select {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Select::Columns(iter.into_iter().map(Into::into).collect())
    }
}

impl Serialize for Select {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Select::All => serializer.serialize_str("*"),
            Select::Columns(columns) => columns.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Select {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(s) if s == "*" => Ok(Select::All),
            serde_json::Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    serde_json::Value::String(column) => Ok(column),
                    other => Err(de::Error::custom(format!(
                        "select expects column names, found `{other}`"
                    ))),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Select::Columns),
            other => Err(de::Error::custom(format!(
                "select expects \"*\" or a list of columns, found `{other}`"
            ))),
        }
    }
}
