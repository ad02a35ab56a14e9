//! The immutable, process-lifetime knowledge store.

use crate::dataset::Dataset;
use crate::links::{self, LinkAnnotator};
use crate::source::DataSource;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Options applied while loading.
#[derive(Debug, Clone)]
pub struct KnowledgeOptions {
    pub annotate_links: bool,
    pub link_base_url: String,
    pub link_prefix: String,
}

impl Default for KnowledgeOptions {
    fn default() -> Self {
        Self {
            annotate_links: false,
            link_base_url: links::DEFAULT_BASE_URL.into(),
            link_prefix: links::DEFAULT_PREFIX.into(),
        }
    }
}

/// Parsed datasets keyed by [`Dataset`].
///
/// Contents never change after construction. Share it as `Arc<KnowledgeStore>`.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeStore {
    datasets: BTreeMap<Dataset, Value>,
}

impl KnowledgeStore {
    /// Load every dataset from `source`.
    ///
    /// A dataset that fails to load is logged and left absent; construction
    /// itself never fails.
    pub fn load(source: &dyn DataSource, options: &KnowledgeOptions) -> Self {
        let annotator = options
            .annotate_links
            .then(|| LinkAnnotator::new(&options.link_base_url, &options.link_prefix));

        let mut datasets = BTreeMap::new();
        for dataset in Dataset::ALL {
            match source.load(dataset) {
                Ok(mut doc) => {
                    if let Some(annotator) = &annotator {
                        let annotated = annotator.annotate_in_place(&mut doc);
                        debug!(dataset = %dataset, annotated, "Deep links added");
                    }
                    datasets.insert(dataset, doc);
                }
                Err(e) if dataset.is_optional() => {
                    debug!(dataset = %dataset, error = %e, "Optional dataset not loaded");
                }
                Err(e) => {
                    warn!(dataset = %dataset, error = %e, "Dataset not loaded, continuing without it");
                }
            }
        }

        info!(
            source = %source.describe(),
            loaded = datasets.len(),
            total = Dataset::ALL.len(),
            "Knowledge store loaded"
        );
        Self { datasets }
    }

    /// Build a store from documents already in memory.
    pub fn from_documents(documents: impl IntoIterator<Item = (Dataset, Value)>) -> Self {
        Self {
            datasets: documents.into_iter().collect(),
        }
    }

    pub fn get(&self, dataset: Dataset) -> Option<&Value> {
        self.datasets.get(&dataset)
    }

    pub fn contains(&self, dataset: Dataset) -> bool {
        self.datasets.contains_key(&dataset)
    }

    /// Number of datasets that loaded.
    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }

    /// Datasets that failed to load or were never provided.
    pub fn missing(&self) -> Vec<Dataset> {
        Dataset::ALL
            .into_iter()
            .filter(|d| !self.datasets.contains_key(d))
            .collect()
    }
}
