//! Knowledge base for TremitiBot.
//!
//! Datasets are loaded once from a [`DataSource`] into an immutable
//! [`KnowledgeStore`]; the [`ContextSelector`] derives per-request slices.

pub mod dataset;
pub mod links;
pub mod selector;
pub mod source;
pub mod store;

pub use dataset::Dataset;
pub use links::LinkAnnotator;
pub use selector::{ContextSelector, labels_for};
pub use source::{DataSource, DirectorySource, StaticSource};
pub use store::{KnowledgeOptions, KnowledgeStore};
