//! Stand-off annotation model.
//!
//! # Responsibility
//! - Hold one (possibly discontiguous) annotated span and its metadata.
//! - Assemble immutable annotations through a validating builder.
//!
//! # Invariants
//! - `id` is non-empty.
//! - There is at least one location. Multiple locations form one multi-span
//!   annotation and are conventionally ordered by ascending offset.
//! - `text`, when present, is checked against the addressed document text by
//!   the validator, not here.

use crate::error::{BiocError, BiocResult};
use crate::model::infons::{HasInfons, Infons};
use crate::model::location::Location;
use serde::{Deserialize, Serialize};

/// Immutable stand-off annotation. Use [`Annotation::builder`] or
/// [`Annotation::to_builder`] to create or derive one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AnnotationWire")]
pub struct Annotation {
    id: String,
    infons: Infons,
    locations: Vec<Location>,
    text: Option<String>,
}

impl Annotation {
    pub fn builder() -> AnnotationBuilder {
        AnnotationBuilder::default()
    }

    /// Creates a single-span annotation.
    pub fn new(
        id: impl Into<String>,
        location: Location,
        text: impl Into<String>,
    ) -> BiocResult<Self> {
        Self::builder().id(id).location(location).text(text).build()
    }

    /// Id used by relation nodes to reference this annotation.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn location(&self, index: usize) -> Option<&Location> {
        self.locations.get(index)
    }

    pub fn location_count(&self) -> usize {
        self.locations.len()
    }

    /// Recorded text of the annotated span.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Smallest location covering every span of this annotation.
    pub fn total_location(&self) -> Location {
        let mut locations = self.locations.iter();
        let first = locations.next().copied().unwrap_or_default();
        locations.fold(first, |total, location| total.union(location))
    }

    /// Locations sorted by ascending `(offset, length)`.
    pub fn sorted_locations(&self) -> Vec<Location> {
        let mut sorted = self.locations.clone();
        sorted.sort();
        sorted
    }

    /// Returns a builder initialized with this annotation's fields.
    pub fn to_builder(&self) -> AnnotationBuilder {
        AnnotationBuilder {
            id: Some(self.id.clone()),
            infons: self.infons.clone(),
            spans: self.locations.iter().copied().map(PendingSpan::Checked).collect(),
            text: self.text.clone(),
        }
    }
}

impl HasInfons for Annotation {
    fn infons(&self) -> &Infons {
        &self.infons
    }

    fn infons_mut(&mut self) -> &mut Infons {
        &mut self.infons
    }
}

/// Mutable assembly area for an [`Annotation`].
///
/// Raw spans are kept unchecked so a malformed span surfaces as a single
/// `InvalidArgument` from [`AnnotationBuilder::build`].
#[derive(Debug, Clone, Default)]
pub struct AnnotationBuilder {
    id: Option<String>,
    infons: Infons,
    spans: Vec<PendingSpan>,
    text: Option<String>,
}

#[derive(Debug, Clone, Copy)]
enum PendingSpan {
    Checked(Location),
    Raw(i64, i64),
}

impl PendingSpan {
    fn resolve(self) -> BiocResult<Location> {
        match self {
            Self::Checked(location) => Ok(location),
            Self::Raw(offset, length) => Location::new(offset, length),
        }
    }
}

impl AnnotationBuilder {
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn clear_id(mut self) -> Self {
        self.id = None;
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn clear_text(mut self) -> Self {
        self.text = None;
        self
    }

    pub fn infon(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.infons.insert(key.into(), value.into());
        self
    }

    /// Replaces all infons.
    pub fn infons(mut self, infons: Infons) -> Self {
        self.infons = infons;
        self
    }

    pub fn location(mut self, location: Location) -> Self {
        self.spans.push(PendingSpan::Checked(location));
        self
    }

    /// Appends a span given as raw offset/length.
    pub fn span(mut self, offset: i64, length: i64) -> Self {
        self.spans.push(PendingSpan::Raw(offset, length));
        self
    }

    pub fn clear_locations(mut self) -> Self {
        self.spans.clear();
        self
    }

    /// Validates required fields and produces the annotation.
    ///
    /// # Errors
    /// - `InvalidArgument` when the id is missing or blank.
    /// - `InvalidArgument` when no location was added.
    /// - `InvalidArgument` when any span has a negative offset or length.
    pub fn build(self) -> BiocResult<Annotation> {
        let id = match self.id {
            Some(id) if !id.trim().is_empty() => id,
            _ => return Err(BiocError::invalid_argument("annotation id has to be set")),
        };
        if self.spans.is_empty() {
            return Err(BiocError::invalid_argument(format!(
                "annotation {id} must have at least one location"
            )));
        }
        let locations = self
            .spans
            .into_iter()
            .map(PendingSpan::resolve)
            .collect::<BiocResult<Vec<_>>>()?;

        Ok(Annotation {
            id,
            infons: self.infons,
            locations,
            text: self.text,
        })
    }
}

#[derive(Deserialize)]
struct AnnotationWire {
    id: String,
    #[serde(default)]
    infons: Infons,
    locations: Vec<Location>,
    #[serde(default)]
    text: Option<String>,
}

impl TryFrom<AnnotationWire> for Annotation {
    type Error = BiocError;

    fn try_from(wire: AnnotationWire) -> Result<Self, Self::Error> {
        let mut builder = Annotation::builder().id(wire.id).infons(wire.infons);
        for location in wire.locations {
            builder = builder.location(location);
        }
        if let Some(text) = wire.text {
            builder = builder.text(text);
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::Annotation;
    use crate::model::location::Location;

    #[test]
    fn total_location_spans_all_locations() {
        let annotation = Annotation::builder()
            .id("T1")
            .span(10, 2)
            .span(0, 2)
            .span(4, 1)
            .build()
            .unwrap();
        assert_eq!(annotation.total_location(), Location::new(0, 12).unwrap());
    }

    #[test]
    fn sorted_locations_does_not_reorder_stored_locations() {
        let annotation = Annotation::builder()
            .id("T1")
            .span(10, 2)
            .span(0, 2)
            .build()
            .unwrap();
        assert_eq!(annotation.location(0), Some(&Location::new(10, 2).unwrap()));
        assert_eq!(
            annotation.sorted_locations()[0],
            Location::new(0, 2).unwrap()
        );
    }

    #[test]
    fn to_builder_round_trips_fields() {
        let annotation = Annotation::builder()
            .id("T1")
            .span(3, 4)
            .text("abcd")
            .infon("type", "gene")
            .build()
            .unwrap();
        let derived = annotation.to_builder().build().unwrap();
        assert_eq!(derived, annotation);

        let renamed = annotation.to_builder().id("T2").build().unwrap();
        assert_eq!(renamed.id(), "T2");
        assert_eq!(renamed.locations(), annotation.locations());
    }

    #[test]
    fn builder_keeps_locations_near_the_offset_limit() {
        let far = Location::from_unsigned(i64::MAX as usize, 0).unwrap();
        let annotation = Annotation::builder()
            .id("T1")
            .span(0, 1)
            .location(far)
            .build()
            .unwrap();
        assert_eq!(annotation.location(1), Some(&far));
        assert_eq!(annotation.total_location().end(), i64::MAX as usize);

        let derived = annotation.to_builder().build().unwrap();
        assert_eq!(derived.locations(), annotation.locations());
    }
}
