//! Passage model.
//!
//! # Invariants
//! - `offset` is document-absolute.
//! - When `text` is absent, the passage text is rebuilt from its sentences
//!   (see `crate::text`); sentence offsets are then expected to be
//!   `>= offset` and in ascending order.

use crate::model::annotation::Annotation;
use crate::model::infons::Infons;
use crate::model::relation::Relation;
use crate::model::scope::impl_container_scope;
use crate::model::sentence::Sentence;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passage {
    pub offset: usize,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub infons: Infons,
    #[serde(default)]
    pub sentences: Vec<Sentence>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub relations: Vec<Relation>,
}

impl Passage {
    pub fn new(offset: usize) -> Self {
        Self {
            offset,
            ..Self::default()
        }
    }

    pub fn with_text(offset: usize, text: impl Into<String>) -> Self {
        Self {
            offset,
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn add_sentence(&mut self, sentence: Sentence) {
        self.sentences.push(sentence);
    }

    /// Replaces all sentences.
    pub fn set_sentences(&mut self, sentences: impl IntoIterator<Item = Sentence>) {
        self.sentences.clear();
        self.sentences.extend(sentences);
    }

    pub fn clear_sentences(&mut self) {
        self.sentences.clear();
    }

    /// Sentence starting exactly at document-absolute `offset`.
    pub fn sentence_at(&self, offset: usize) -> Option<&Sentence> {
        self.sentences
            .iter()
            .find(|sentence| sentence.offset == offset)
    }
}

impl_container_scope!(Passage);
