use crate::error::SearchError;
use crate::index::types::EntryType;
use crate::loader::RecordSource;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Data file of each category, relative to the data directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataFiles {
    pub creatures: PathBuf,
    pub items: PathBuf,
    pub abilities: PathBuf,
    pub moves: PathBuf,
}

impl Default for DataFiles {
    fn default() -> Self {
        Self {
            creatures: PathBuf::from("pokemon_data.json"),
            items: PathBuf::from("items").join("items_data.json"),
            abilities: PathBuf::from("abilities_data.json"),
            moves: PathBuf::from("moves_data.json"),
        }
    }
}

impl DataFiles {
    pub fn get(&self, category: EntryType) -> &Path {
        match category {
            EntryType::Creature => &self.creatures,
            EntryType::Item => &self.items,
            EntryType::Ability => &self.abilities,
            EntryType::Move => &self.moves,
        }
    }
}

/// Reads one JSON file per category from a data directory.
///
/// A file may hold the records as a top-level array, or wrap them in an
/// object under the category's plural key (`{"items": [...]}`) or `data`.
#[derive(Debug, Clone)]
pub struct JsonDirSource {
    root: PathBuf,
    files: DataFiles,
}

impl JsonDirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_files(root, DataFiles::default())
    }

    pub fn with_files(root: impl Into<PathBuf>, files: DataFiles) -> Self {
        Self {
            root: root.into(),
            files,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full path of a category's data file
    pub fn path_for(&self, category: EntryType) -> PathBuf {
        self.root.join(self.files.get(category))
    }
}

impl RecordSource for JsonDirSource {
    async fn fetch(&self, category: EntryType) -> Result<Vec<Value>, SearchError> {
        let path = self.path_for(category);
        let load_error = |message: String| SearchError::Load { category, message };

        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| load_error(format!("{}: {}", path.display(), e)))?;
        let value: Value = serde_json::from_slice(&bytes)
            .map_err(|e| load_error(format!("{}: {}", path.display(), e)))?;

        tracing::debug!(%category, path = %path.display(), "read data file");
        extract_records(category, value).map_err(load_error)
    }
}

/// Pull the record array out of a parsed data file
fn extract_records(category: EntryType, value: Value) -> Result<Vec<Value>, String> {
    match value {
        Value::Array(records) => Ok(records),
        Value::Object(mut map) => {
            for key in [category.plural(), "data", category.as_str()] {
                if let Some(Value::Array(records)) = map.remove(key) {
                    return Ok(records);
                }
            }
            Err(format!(
                "expected an array or an object with a {:?} array",
                category.plural()
            ))
        }
        other => Err(format!("expected an array, found {}", json_kind(&other))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
