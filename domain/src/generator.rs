//! Generators: named sets of columns whose rows feed template variables into test runs.

use crate::error::Error;
use log::*;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Payload for creating a generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Generator {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generator_type: Option<String>,
    pub columns: Vec<Column>,
}

/// A generator column. `id` is assigned by the server and omitted on create.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub name: String,
}

impl Column {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }
}

impl Generator {
    /// A tabular (CSV-backed) generator with the given column names.
    pub fn tabular<I, S>(name: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            description: None,
            generator_type: Some("tabular".to_string()),
            columns: columns.into_iter().map(Column::named).collect(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// A generator needs a non-empty name and at least one column.
    pub fn validate(&self) -> Result<(), Error> {
        if self.name.is_empty() {
            warn!("Rejecting generator without a name");
            return Err(Error::precondition("Generator needs a `name`."));
        }
        if self.columns.is_empty() {
            warn!("Rejecting generator {} without columns", self.name);
            return Err(Error::precondition(
                "Generator needs at least 1 column in `columns`.",
            ));
        }
        Ok(())
    }
}

/// A generator as returned by the server, with ids on the generator and its columns.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorRecord {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub columns: Vec<Column>,
}

/// A generator row as returned by the server, keyed by column id.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorRowRecord {
    pub id: u64,
    #[serde(default)]
    pub data: Map<String, Value>,
}

/// Maps positional row values onto column ids.
///
/// Values past the last column are dropped; columns past the last value are left out.
pub fn row_data(row: &[Value], columns: &[Column]) -> Result<Map<String, Value>, Error> {
    let mut data = Map::new();
    for (i, column) in columns.iter().enumerate() {
        let id = column.id.ok_or_else(|| {
            warn!("Column {} has no id; was the generator created?", column.name);
            Error::precondition("Generator row columns need an `id`.")
        })?;
        if let Some(value) = row.get(i) {
            data.insert(id.to_string(), value.clone());
        }
    }
    Ok(data)
}
