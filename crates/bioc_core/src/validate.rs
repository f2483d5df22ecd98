//! Integrity validation for documents and collections.
//!
//! # Responsibility
//! - Check that every annotation's recorded text equals the text addressed by
//!   its locations inside the owning container.
//! - Check that every relation node resolves to an annotation or relation id
//!   owned by the same container.
//!
//! # Invariants
//! - Validation is read-only and deterministic: the same unmutated input
//!   always yields the same failures in the same order.
//! - Traversal order is document level, then passages in list order, then
//!   sentences in list order within each passage. Within one container,
//!   annotations are checked before relations.
//! - Multi-span annotations are compared as the slices of their locations in
//!   ascending offset order, joined with `ValidationConfig::span_separator`.
//! - Container text is only obtained when the container holds an annotation
//!   with recorded text; a container without any has nothing to address.

use crate::config::{FailureStrategy, ValidationConfig};
use crate::error::BiocError;
use crate::model::annotation::Annotation;
use crate::model::collection::Collection;
use crate::model::document::Document;
use crate::model::relation::Node;
use crate::model::scope::AnnotationScope;
use crate::text::{reconstruct_text, IndexedText, TextContainer};
use log::{debug, info, warn};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt::{Display, Formatter};
use std::time::Instant;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Recorded annotation text differs from the addressed text.
    TextMismatch,
    /// A relation node names an id not owned by the same container.
    DanglingReference,
    /// Container text was needed but could not be obtained.
    MissingText,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TextMismatch => "text_mismatch",
            Self::DanglingReference => "dangling_reference",
            Self::MissingText => "missing_text",
        }
    }
}

impl Display for FailureKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One integrity violation with its diagnostic context.
///
/// - `TextMismatch`: `entity_id` is the annotation id, `expected` the addressed
///   text (`None` when a location falls outside the container text), `actual`
///   the recorded text.
/// - `DanglingReference`: `entity_id` is the relation id, `expected` the
///   unresolved refid, `node` the offending node.
/// - `MissingText`: `entity_id` is the full path of the container whose text
///   is missing, `location_path` the container whose annotations needed it.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("{kind}: {entity_id} at {location_path} (expected {expected:?}, actual {actual:?})")]
pub struct ValidationFailure {
    pub kind: FailureKind,
    pub entity_id: String,
    /// Path such as `document[d1]/passage[0]/sentence[5]`.
    pub location_path: String,
    pub expected: Option<String>,
    pub actual: Option<String>,
    pub node: Option<Node>,
}

impl ValidationFailure {
    fn text_mismatch(
        annotation: &Annotation,
        location_path: &str,
        expected: Option<String>,
    ) -> Self {
        Self {
            kind: FailureKind::TextMismatch,
            entity_id: annotation.id().to_string(),
            location_path: location_path.to_string(),
            expected,
            actual: annotation.text().map(str::to_string),
            node: None,
        }
    }

    fn dangling_reference(relation_id: &str, node: &Node, location_path: &str) -> Self {
        Self {
            kind: FailureKind::DanglingReference,
            entity_id: relation_id.to_string(),
            location_path: location_path.to_string(),
            expected: Some(node.refid.clone()),
            actual: None,
            node: Some(node.clone()),
        }
    }

    fn missing_text(container: String, location_path: &str) -> Self {
        Self {
            kind: FailureKind::MissingText,
            entity_id: container,
            location_path: location_path.to_string(),
            expected: None,
            actual: None,
            node: None,
        }
    }
}

pub type ValidationResult = Result<(), Vec<ValidationFailure>>;

// Unwinds the walk once a fail-fast run has recorded its failure.
struct Halt;

struct FailureSink {
    strategy: FailureStrategy,
    failures: Vec<ValidationFailure>,
}

impl FailureSink {
    fn new(strategy: FailureStrategy) -> Self {
        Self {
            strategy,
            failures: Vec::new(),
        }
    }

    fn record(&mut self, failure: ValidationFailure) -> Result<(), Halt> {
        warn!(
            "event=integrity_failure module=validate kind={} entity={} location={}",
            failure.kind, failure.entity_id, failure.location_path
        );
        self.failures.push(failure);
        match self.strategy {
            FailureStrategy::FailFast => Err(Halt),
            FailureStrategy::CollectAll => Ok(()),
        }
    }

    fn finish(self) -> ValidationResult {
        if self.failures.is_empty() {
            Ok(())
        } else {
            Err(self.failures)
        }
    }
}

/// Document/collection integrity checker.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validates one document.
    ///
    /// Returns every failure (collect-all) or only the first one (fail-fast).
    pub fn validate_document(&self, document: &Document) -> ValidationResult {
        let started_at = Instant::now();
        let mut sink = FailureSink::new(self.config.strategy);
        if self.walk_document(document, &mut sink).is_err() {
            debug!(
                "event=validate_document module=validate status=halted document={}",
                document.id
            );
        }
        info!(
            "event=validate_document module=validate status={} document={} failures={} strategy={} duration_ms={}",
            status(&sink),
            document.id,
            sink.failures.len(),
            self.config.strategy.as_str(),
            started_at.elapsed().as_millis()
        );
        sink.finish()
    }

    /// Validates every document of `collection` in order.
    ///
    /// A collection without documents is trivially valid.
    pub fn validate_collection(&self, collection: &Collection) -> ValidationResult {
        let started_at = Instant::now();
        let mut sink = FailureSink::new(self.config.strategy);
        for document in &collection.documents {
            if self.walk_document(document, &mut sink).is_err() {
                break;
            }
        }
        info!(
            "event=validate_collection module=validate status={} documents={} failures={} strategy={} duration_ms={}",
            status(&sink),
            collection.document_count(),
            sink.failures.len(),
            self.config.strategy.as_str(),
            started_at.elapsed().as_millis()
        );
        sink.finish()
    }

    fn walk_document(&self, document: &Document, sink: &mut FailureSink) -> Result<(), Halt> {
        let document_path = format!("document[{}]", document.id);
        self.check_container(document, &document_path, sink)?;

        for passage in &document.passages {
            let passage_path = format!("{document_path}/passage[{}]", passage.offset);
            self.check_container(passage, &passage_path, sink)?;

            for sentence in &passage.sentences {
                let sentence_path = format!("{passage_path}/sentence[{}]", sentence.offset);
                self.check_container(sentence, &sentence_path, sink)?;
            }
        }
        Ok(())
    }

    fn check_container<C>(
        &self,
        container: &C,
        path: &str,
        sink: &mut FailureSink,
    ) -> Result<(), Halt>
    where
        C: TextContainer + AnnotationScope,
    {
        self.check_annotations(container, path, sink)?;
        check_relations(container, path, sink)
    }

    fn check_annotations<C>(
        &self,
        container: &C,
        path: &str,
        sink: &mut FailureSink,
    ) -> Result<(), Halt>
    where
        C: TextContainer + AnnotationScope,
    {
        let annotations = container.annotations();
        if annotations.iter().all(|annotation| annotation.text().is_none()) {
            return Ok(());
        }

        let text = match reconstruct_text(container) {
            Ok(text) => text,
            Err(err) => {
                let missing = match err {
                    BiocError::MissingText { container: inner } => {
                        missing_container_path(path, &container.label(), &inner)
                    }
                    other => other.to_string(),
                };
                return sink.record(ValidationFailure::missing_text(missing, path));
            }
        };
        let indexed = IndexedText::new(&text);
        let base = container.base_offset();

        for annotation in annotations {
            let Some(recorded) = annotation.text() else {
                continue;
            };
            match self.addressed_text(&indexed, base, annotation) {
                Some(expected) if expected == recorded => {}
                expected => {
                    sink.record(ValidationFailure::text_mismatch(annotation, path, expected))?;
                }
            }
        }
        Ok(())
    }

    /// Joined slices addressed by `annotation`, or `None` when any location
    /// falls outside the container text.
    fn addressed_text(
        &self,
        text: &IndexedText<'_>,
        base: usize,
        annotation: &Annotation,
    ) -> Option<String> {
        let mut slices = Vec::with_capacity(annotation.location_count());
        for location in annotation.sorted_locations() {
            let start = location.offset().checked_sub(base)?;
            slices.push(text.slice(start, start + location.length())?);
        }
        Some(slices.join(self.config.span_separator.as_str()))
    }
}

fn check_relations<C>(container: &C, path: &str, sink: &mut FailureSink) -> Result<(), Halt>
where
    C: AnnotationScope,
{
    let relations = container.relations();
    if relations.is_empty() {
        return Ok(());
    }

    let known_ids: HashSet<&str> = container
        .annotations()
        .iter()
        .map(Annotation::id)
        .chain(relations.iter().map(|relation| relation.id()))
        .collect();

    for relation in relations {
        for node in relation.nodes() {
            if !known_ids.contains(node.refid.as_str()) {
                sink.record(ValidationFailure::dangling_reference(
                    relation.id(),
                    node,
                    path,
                ))?;
            }
        }
    }
    Ok(())
}

/// Rebases the reconstructor's container path (rooted at `label`) onto the
/// validator's full path, so the same container is named the same way no
/// matter which ancestor requested its text.
fn missing_container_path(path: &str, label: &str, inner: &str) -> String {
    match inner.strip_prefix(label) {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => format!("{path}{rest}"),
        _ => format!("{path}/{inner}"),
    }
}

fn status(sink: &FailureSink) -> &'static str {
    if sink.failures.is_empty() {
        "ok"
    } else {
        "error"
    }
}

/// Validates `document` with the default (collect-all) configuration.
pub fn validate_document(document: &Document) -> ValidationResult {
    Validator::default().validate_document(document)
}

/// Validates `collection` with the default (collect-all) configuration.
pub fn validate_collection(collection: &Collection) -> ValidationResult {
    Validator::default().validate_collection(collection)
}
