//! Relation model: typed links between annotations and other relations.
//!
//! # Invariants
//! - A relation id is non-empty.
//! - Nodes are unique by value (`refid`, `role`).
//! - Node references are resolved by the validator against the enclosing
//!   container, never held as live pointers.

use crate::error::{BiocError, BiocResult};
use crate::model::infons::{HasInfons, Infons};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

/// Typed pointer from a relation into the annotation/relation id space.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Node {
    /// Id of the referenced annotation or relation.
    pub refid: String,
    /// How the referenced entity participates in the relation.
    pub role: String,
}

impl Node {
    pub fn new(refid: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            refid: refid.into(),
            role: role.into(),
        }
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.role, self.refid)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RelationWire")]
pub struct Relation {
    id: String,
    infons: Infons,
    nodes: BTreeSet<Node>,
}

impl Relation {
    /// Creates an empty relation.
    ///
    /// # Errors
    /// - `InvalidArgument` when `id` is blank.
    pub fn new(id: impl Into<String>) -> BiocResult<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(BiocError::invalid_argument("relation id has to be set"));
        }
        Ok(Self {
            id,
            infons: Infons::new(),
            nodes: BTreeSet::new(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Adds `node`; returns `false` when an equal node was already present.
    pub fn add_node(&mut self, node: Node) -> bool {
        self.nodes.insert(node)
    }

    /// Chaining form of [`Relation::add_node`].
    pub fn with_node(mut self, refid: impl Into<String>, role: impl Into<String>) -> Self {
        self.nodes.insert(Node::new(refid, role));
        self
    }

    pub fn remove_node(&mut self, node: &Node) -> bool {
        self.nodes.remove(node)
    }

    pub fn clear_nodes(&mut self) {
        self.nodes.clear();
    }

    /// Replaces all nodes.
    pub fn set_nodes(&mut self, nodes: impl IntoIterator<Item = Node>) {
        self.nodes.clear();
        self.nodes.extend(nodes);
    }

    pub fn contains_node(&self, node: &Node) -> bool {
        self.nodes.contains(node)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// First node (in node order) that has `role`.
    pub fn node_by_role(&self, role: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.role == role)
    }
}

impl HasInfons for Relation {
    fn infons(&self) -> &Infons {
        &self.infons
    }

    fn infons_mut(&mut self) -> &mut Infons {
        &mut self.infons
    }
}

#[derive(Deserialize)]
struct RelationWire {
    id: String,
    #[serde(default)]
    infons: Infons,
    #[serde(default)]
    nodes: Vec<Node>,
}

impl TryFrom<RelationWire> for Relation {
    type Error = BiocError;

    fn try_from(wire: RelationWire) -> Result<Self, Self::Error> {
        let mut relation = Relation::new(wire.id)?;
        relation.infons = wire.infons;
        relation.set_nodes(wire.nodes);
        Ok(relation)
    }
}
