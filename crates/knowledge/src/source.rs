//! Data sources: where dataset documents come from.

use crate::dataset::Dataset;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tremitibot_core::error::KnowledgeError;

/// Yields one parsed JSON document per dataset.
pub trait DataSource: Send + Sync {
    /// Human-readable description for logs (e.g., the directory path).
    fn describe(&self) -> String;

    /// Load and parse one dataset.
    fn load(&self, dataset: Dataset) -> Result<Value, KnowledgeError>;
}

/// Reads `json_<key>.json` files from a directory.
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, dataset: Dataset) -> PathBuf {
        self.root.join(dataset.file_name())
    }
}

impl DataSource for DirectorySource {
    fn describe(&self) -> String {
        self.root.display().to_string()
    }

    fn load(&self, dataset: Dataset) -> Result<Value, KnowledgeError> {
        let path = self.path_for(dataset);
        let content = std::fs::read_to_string(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                KnowledgeError::NotFound {
                    dataset: dataset.key().into(),
                    path: path.display().to_string(),
                }
            } else {
                KnowledgeError::Read {
                    dataset: dataset.key().into(),
                    reason: e.to_string(),
                }
            }
        })?;

        serde_json::from_str(&content).map_err(|e| KnowledgeError::Parse {
            dataset: dataset.key().into(),
            reason: e.to_string(),
        })
    }
}

/// Serves documents held in memory.
#[derive(Default)]
pub struct StaticSource {
    documents: HashMap<Dataset, Value>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, dataset: Dataset, document: Value) -> Self {
        self.documents.insert(dataset, document);
        self
    }
}

impl DataSource for StaticSource {
    fn describe(&self) -> String {
        format!("static ({} documents)", self.documents.len())
    }

    fn load(&self, dataset: Dataset) -> Result<Value, KnowledgeError> {
        self.documents
            .get(&dataset)
            .cloned()
            .ok_or_else(|| KnowledgeError::Unavailable(dataset.key().into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn directory_source_reads_and_parses() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("json_cale.json"), r#"[{"id":1,"name":"Cala delle Arene"}]"#)
            .unwrap();

        let source = DirectorySource::new(dir.path());
        let doc = source.load(Dataset::Coves).unwrap();
        assert_eq!(doc[0]["name"], "Cala delle Arene");
    }

    #[test]
    fn directory_source_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = DirectorySource::new(dir.path());
        assert!(matches!(
            source.load(Dataset::FastFerry),
            Err(KnowledgeError::NotFound { .. })
        ));
    }

    #[test]
    fn directory_source_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("json_nave.json"), "{ not json").unwrap();
        let source = DirectorySource::new(dir.path());
        assert!(matches!(
            source.load(Dataset::Ship),
            Err(KnowledgeError::Parse { .. })
        ));
    }

    #[test]
    fn static_source_serves_documents() {
        let source = StaticSource::new().with(Dataset::Helicopter, json!({"tratte": []}));
        assert!(source.load(Dataset::Helicopter).is_ok());
        assert!(matches!(
            source.load(Dataset::Coves),
            Err(KnowledgeError::Unavailable(_))
        ));
    }
}
