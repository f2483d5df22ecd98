//! Explicit configuration objects.
//!
//! The core reads no environment variables and keeps no process-wide
//! defaults. Callers pass these structures into the validator and the
//! collection constructor.

use crate::error::{BiocError, BiocResult};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// What the validator does after the first integrity failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureStrategy {
    /// Stop and report only the first failure in traversal order.
    FailFast,
    /// Walk the whole tree and report every failure in traversal order.
    #[default]
    CollectAll,
}

impl FailureStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FailFast => "fail_fast",
            Self::CollectAll => "collect_all",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    pub strategy: FailureStrategy,
    /// Inserted between the slices of a multi-span annotation before the
    /// joined text is compared with the recorded text.
    pub span_separator: String,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            strategy: FailureStrategy::CollectAll,
            span_separator: String::new(),
        }
    }
}

impl ValidationConfig {
    pub fn fail_fast() -> Self {
        Self {
            strategy: FailureStrategy::FailFast,
            ..Self::default()
        }
    }

    pub fn collect_all() -> Self {
        Self::default()
    }
}

/// Header values for a new collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionConfig {
    pub encoding: String,
    pub version: String,
    pub standalone: bool,
    /// `None` resolves to the current UTC date formatted `yyyy-MM-dd`.
    pub date: Option<String>,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            encoding: "UTF-8".to_string(),
            version: "1.0".to_string(),
            standalone: true,
            date: None,
        }
    }
}

impl CollectionConfig {
    pub fn validate(&self) -> BiocResult<()> {
        if self.encoding.trim().is_empty() {
            return Err(BiocError::invalid_argument(
                "collection encoding must not be empty",
            ));
        }
        if self.version.trim().is_empty() {
            return Err(BiocError::invalid_argument(
                "collection version must not be empty",
            ));
        }
        Ok(())
    }

    /// The configured date, or today's UTC date.
    pub fn resolved_date(&self) -> String {
        match &self.date {
            Some(date) => date.clone(),
            None => today_utc(),
        }
    }
}

fn today_utc() -> String {
    OffsetDateTime::now_utc().date().to_string()
}
