//! Per-container annotation and relation ownership.
//!
//! Every container level (document, passage, sentence) owns its own
//! annotations and relations. Relation nodes resolve only inside the scope
//! that owns the relation.

use crate::model::annotation::Annotation;
use crate::model::relation::Relation;

pub trait AnnotationScope {
    fn annotations(&self) -> &[Annotation];

    fn annotations_mut(&mut self) -> &mut Vec<Annotation>;

    fn relations(&self) -> &[Relation];

    fn relations_mut(&mut self) -> &mut Vec<Relation>;

    /// First annotation with `id`.
    fn annotation(&self, id: &str) -> Option<&Annotation> {
        self.annotations()
            .iter()
            .find(|annotation| annotation.id() == id)
    }

    /// First relation with `id`.
    fn relation(&self, id: &str) -> Option<&Relation> {
        self.relations().iter().find(|relation| relation.id() == id)
    }

    fn add_annotation(&mut self, annotation: Annotation) {
        self.annotations_mut().push(annotation);
    }

    fn add_relation(&mut self, relation: Relation) {
        self.relations_mut().push(relation);
    }

    /// Replaces all annotations.
    fn set_annotations(&mut self, annotations: impl IntoIterator<Item = Annotation>)
    where
        Self: Sized,
    {
        let owned = self.annotations_mut();
        owned.clear();
        owned.extend(annotations);
    }

    /// Replaces all relations.
    fn set_relations(&mut self, relations: impl IntoIterator<Item = Relation>)
    where
        Self: Sized,
    {
        let owned = self.relations_mut();
        owned.clear();
        owned.extend(relations);
    }

    fn clear_annotations(&mut self) {
        self.annotations_mut().clear();
    }

    fn clear_relations(&mut self) {
        self.relations_mut().clear();
    }
}

/// Implements [`AnnotationScope`] and `HasInfons` for a container with
/// `annotations`, `relations` and `infons` fields.
macro_rules! impl_container_scope {
    ($container:ty) => {
        impl $crate::model::scope::AnnotationScope for $container {
            fn annotations(&self) -> &[$crate::model::annotation::Annotation] {
                &self.annotations
            }

            fn annotations_mut(&mut self) -> &mut Vec<$crate::model::annotation::Annotation> {
                &mut self.annotations
            }

            fn relations(&self) -> &[$crate::model::relation::Relation] {
                &self.relations
            }

            fn relations_mut(&mut self) -> &mut Vec<$crate::model::relation::Relation> {
                &mut self.relations
            }
        }

        impl $crate::model::infons::HasInfons for $container {
            fn infons(&self) -> &$crate::model::infons::Infons {
                &self.infons
            }

            fn infons_mut(&mut self) -> &mut $crate::model::infons::Infons {
                &mut self.infons
            }
        }
    };
}

pub(crate) use impl_container_scope;
