//! Stand-off annotation corpus model with integrity checking.
//!
//! A collection holds documents, documents hold passages, passages hold
//! sentences; each level owns annotations (text spans) and relations (typed
//! links by id). This crate rebuilds container text from children when none is
//! stored and verifies that annotation text and relation references are
//! consistent with the tree. Parsing and serialization I/O live elsewhere.

pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod text;
pub mod validate;

pub use config::{CollectionConfig, FailureStrategy, ValidationConfig};
pub use error::{BiocError, BiocResult};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use model::annotation::{Annotation, AnnotationBuilder};
pub use model::collection::Collection;
pub use model::document::Document;
pub use model::infons::{HasInfons, Infons};
pub use model::location::Location;
pub use model::passage::Passage;
pub use model::relation::{Node, Relation};
pub use model::scope::AnnotationScope;
pub use model::sentence::Sentence;
pub use text::{reconstruct_text, slice_chars, IndexedText, TextContainer};
pub use validate::{
    validate_collection, validate_document, FailureKind, ValidationFailure, ValidationResult,
    Validator,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
