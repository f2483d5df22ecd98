//! Text reconstruction and char-indexed slicing.
//!
//! # Responsibility
//! - Produce a container's full text from its stored text, or rebuild it from
//!   its children when no text is stored.
//! - Translate char offsets into `&str` slices.
//!
//! # Invariants
//! - In a reconstructed text, the char at local index `k` sits at absolute
//!   offset `container.base_offset() + k`.
//! - Gaps between children are filled with `'\n'`; padding carries no meaning
//!   beyond keeping offsets aligned.
//! - Reconstruction never mutates the container.

use crate::error::{BiocError, BiocResult};
use crate::model::document::Document;
use crate::model::passage::Passage;
use crate::model::sentence::Sentence;
use log::debug;
use std::borrow::Cow;

const PADDING: char = '\n';

/// A node of the containment tree that can yield text.
pub trait TextContainer {
    /// Absolute offset of the container's first char.
    fn base_offset(&self) -> usize;

    /// Text stored directly on the container, if any.
    fn stored_text(&self) -> Option<&str>;

    /// Children whose texts make up this container's text, in order.
    fn text_children(&self) -> Vec<&dyn TextContainer>;

    /// Short label such as `passage[120]`, used in diagnostics.
    fn label(&self) -> String;
}

impl TextContainer for Sentence {
    fn base_offset(&self) -> usize {
        self.offset
    }

    fn stored_text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    fn text_children(&self) -> Vec<&dyn TextContainer> {
        Vec::new()
    }

    fn label(&self) -> String {
        format!("sentence[{}]", self.offset)
    }
}

impl TextContainer for Passage {
    fn base_offset(&self) -> usize {
        self.offset
    }

    fn stored_text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    fn text_children(&self) -> Vec<&dyn TextContainer> {
        self.sentences
            .iter()
            .map(|sentence| sentence as &dyn TextContainer)
            .collect()
    }

    fn label(&self) -> String {
        format!("passage[{}]", self.offset)
    }
}

impl TextContainer for Document {
    fn base_offset(&self) -> usize {
        0
    }

    fn stored_text(&self) -> Option<&str> {
        None
    }

    fn text_children(&self) -> Vec<&dyn TextContainer> {
        self.passages
            .iter()
            .map(|passage| passage as &dyn TextContainer)
            .collect()
    }

    fn label(&self) -> String {
        format!("document[{}]", self.id)
    }
}

/// Returns the best available full text of `container`.
///
/// Non-empty stored text is returned as-is; child offsets are then trusted but
/// not used. Otherwise children are concatenated, each preceded by enough
/// `'\n'` padding to land at `child.base_offset() - container.base_offset()`.
/// A child that starts before the current end of the buffer is appended
/// without padding.
///
/// # Errors
/// - `MissingText` when the container has no stored text and no children, or
///   when any child's text cannot be obtained. The error names the full
///   container path.
pub fn reconstruct_text<C>(container: &C) -> BiocResult<Cow<'_, str>>
where
    C: TextContainer + ?Sized,
{
    let children = container.text_children();
    match container.stored_text() {
        Some(text) if !text.is_empty() || children.is_empty() => {
            return Ok(Cow::Borrowed(text));
        }
        _ => {}
    }
    if children.is_empty() {
        return Err(BiocError::missing_text(container.label()));
    }

    let base = container.base_offset();
    let mut buffer = String::new();
    let mut cursor = 0usize;
    for child in children {
        let child_text = reconstruct_text(child).map_err(|err| match err {
            BiocError::MissingText { container: inner } => {
                BiocError::missing_text(format!("{}/{}", container.label(), inner))
            }
            other => other,
        })?;

        let target = child.base_offset().saturating_sub(base);
        if cursor < target {
            let padding = target - cursor;
            debug!(
                "event=text_padding module=text container={} child={} padding={}",
                container.label(),
                child.label(),
                padding
            );
            buffer.extend(std::iter::repeat(PADDING).take(padding));
            cursor = target;
        } else if cursor > target {
            debug!(
                "event=text_overlap module=text container={} child={} cursor={} target={}",
                container.label(),
                child.label(),
                cursor,
                target
            );
        }

        buffer.push_str(&child_text);
        cursor += child_text.chars().count();
    }

    Ok(Cow::Owned(buffer))
}

/// Text with a precomputed char-to-byte index for repeated slicing.
#[derive(Debug, Clone)]
pub struct IndexedText<'a> {
    text: &'a str,
    // Byte offset of every char boundary, including the end of the text.
    boundaries: Vec<usize>,
}

impl<'a> IndexedText<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut boundaries: Vec<usize> = text.char_indices().map(|(byte, _)| byte).collect();
        boundaries.push(text.len());
        Self { text, boundaries }
    }

    pub fn as_str(&self) -> &'a str {
        self.text
    }

    /// Length in chars.
    pub fn char_len(&self) -> usize {
        self.boundaries.len() - 1
    }

    /// Slice covering chars `start..end`, or `None` when out of range.
    pub fn slice(&self, start: usize, end: usize) -> Option<&'a str> {
        if start > end || end > self.char_len() {
            return None;
        }
        Some(&self.text[self.boundaries[start]..self.boundaries[end]])
    }
}

/// One-off char-indexed slice of `text`.
pub fn slice_chars(text: &str, start: usize, end: usize) -> Option<&str> {
    IndexedText::new(text).slice(start, end)
}
