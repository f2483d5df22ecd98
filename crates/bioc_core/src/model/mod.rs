//! Stand-off annotation data model.
//!
//! # Responsibility
//! - Define the containment tree: collection, document, passage, sentence.
//! - Define the leaf entities: location, annotation, relation, node.
//!
//! # Invariants
//! - Each container exclusively owns its children; nothing is shared.
//! - Container offsets are document-absolute, counted in `char`s.
//! - Relations reference annotations/relations by id, resolved on demand.

pub mod annotation;
pub mod collection;
pub mod document;
pub mod infons;
pub mod location;
pub mod passage;
pub mod relation;
pub mod scope;
pub mod sentence;
