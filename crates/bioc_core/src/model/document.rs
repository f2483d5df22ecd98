//! Document model.

use crate::model::annotation::Annotation;
use crate::model::infons::Infons;
use crate::model::passage::Passage;
use crate::model::relation::Relation;
use crate::model::scope::impl_container_scope;
use serde::{Deserialize, Serialize};

/// One document: an id plus ordered passages.
///
/// A document has no stored text of its own. Document-level annotations are
/// addressed against the concatenated passage texts, starting at offset 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    #[serde(default)]
    pub infons: Infons,
    #[serde(default)]
    pub passages: Vec<Passage>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub relations: Vec<Relation>,
}

impl Document {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn add_passage(&mut self, passage: Passage) {
        self.passages.push(passage);
    }

    /// Replaces all passages.
    pub fn set_passages(&mut self, passages: impl IntoIterator<Item = Passage>) {
        self.passages.clear();
        self.passages.extend(passages);
    }

    pub fn clear_passages(&mut self) {
        self.passages.clear();
    }

    pub fn passage(&self, index: usize) -> Option<&Passage> {
        self.passages.get(index)
    }

    pub fn passage_count(&self) -> usize {
        self.passages.len()
    }

    pub fn iter_passages(&self) -> std::slice::Iter<'_, Passage> {
        self.passages.iter()
    }
}

impl_container_scope!(Document);
