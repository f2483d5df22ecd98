//! Sentence model: the leaf text container.

use crate::model::annotation::Annotation;
use crate::model::infons::Infons;
use crate::model::relation::Relation;
use crate::model::scope::impl_container_scope;
use serde::{Deserialize, Serialize};

/// Sentence inside a passage.
///
/// Sentences have no children, so annotations on a sentence are only checked
/// when `text` is stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    /// Document-absolute offset of the first character.
    pub offset: usize,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub infons: Infons,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub relations: Vec<Relation>,
}

impl Sentence {
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
}

impl_container_scope!(Sentence);
