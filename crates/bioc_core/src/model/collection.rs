//! Collection model: a corpus or corpus slice plus header metadata.
//!
//! A collection owns its documents and does no offset arithmetic of its own.

use crate::config::CollectionConfig;
use crate::error::BiocResult;
use crate::model::document::Document;
use crate::model::infons::{HasInfons, Infons};
use crate::model::passage::Passage;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub encoding: String,
    pub version: String,
    pub standalone: bool,
    /// Date the documents were obtained from the source.
    pub date: String,
    /// Original source of the documents.
    pub source: String,
    /// Name of a file describing the contents and conventions of the corpus.
    pub key: String,
    #[serde(default)]
    pub infons: Infons,
    #[serde(default)]
    pub documents: Vec<Document>,
}

impl Collection {
    /// Creates an empty collection from `CollectionConfig::default()`.
    pub fn new() -> Self {
        let config = CollectionConfig::default();
        Self::from_valid_config(&config)
    }

    pub fn with_source_key(source: impl Into<String>, key: impl Into<String>) -> Self {
        let mut collection = Self::new();
        collection.source = source.into();
        collection.key = key.into();
        collection
    }

    /// Creates an empty collection with explicit header values.
    ///
    /// # Errors
    /// - `InvalidArgument` when `config` fails `CollectionConfig::validate`.
    pub fn with_config(config: &CollectionConfig) -> BiocResult<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: &CollectionConfig) -> Self {
        Self {
            encoding: config.encoding.clone(),
            version: config.version.clone(),
            standalone: config.standalone,
            date: config.resolved_date(),
            source: String::new(),
            key: String::new(),
            infons: Infons::new(),
            documents: Vec::new(),
        }
    }

    pub fn add_document(&mut self, document: Document) {
        self.documents.push(document);
    }

    /// Replaces all documents.
    pub fn set_documents(&mut self, documents: impl IntoIterator<Item = Document>) {
        self.documents.clear();
        self.documents.extend(documents);
    }

    pub fn clear_documents(&mut self) {
        self.documents.clear();
    }

    pub fn document(&self, index: usize) -> Option<&Document> {
        self.documents.get(index)
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Every passage in document order, then passage order.
    pub fn iter_passages(&self) -> impl Iterator<Item = &Passage> {
        self.documents.iter().flat_map(Document::iter_passages)
    }
}

impl Default for Collection {
    fn default() -> Self {
        Self::new()
    }
}

impl HasInfons for Collection {
    fn infons(&self) -> &Infons {
        &self.infons
    }

    fn infons_mut(&mut self) -> &mut Infons {
        &mut self.infons
    }
}
