//! Content domain models.

use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::error::{Result, ScribeError};

/// The closed set of output formats produced per request.
///
/// Fixed at compile time; there is no dynamic registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum ContentKind {
    Blog,
    LinkedIn,
    X,
}

impl ContentKind {
    /// All kinds, in the order they appear in records and exports.
    pub const ALL: [ContentKind; 3] = [ContentKind::Blog, ContentKind::LinkedIn, ContentKind::X];
}

/// A single content-generation submission.
///
/// Transient: constructed per user submission and never persisted on its
/// own. Callers are expected to pre-validate at the form level, but the
/// generator re-validates and must not assume this happened.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub campaign: String,
    pub content_subject: String,
    pub target_audience: String,
}

impl GenerationRequest {
    pub fn new(
        campaign: impl Into<String>,
        content_subject: impl Into<String>,
        target_audience: impl Into<String>,
    ) -> Self {
        Self {
            campaign: campaign.into(),
            content_subject: content_subject.into(),
            target_audience: target_audience.into(),
        }
    }

    /// Ensures every field carries non-whitespace content.
    pub fn validate(&self) -> Result<()> {
        let mut missing = Vec::new();
        if self.campaign.trim().is_empty() {
            missing.push("campaign");
        }
        if self.content_subject.trim().is_empty() {
            missing.push("content_subject");
        }
        if self.target_audience.trim().is_empty() {
            missing.push("target_audience");
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ScribeError::validation(format!(
                "missing required fields: {}",
                missing.join(", ")
            )))
        }
    }
}

/// The persisted unit of work output.
///
/// One generated text per content kind plus the request metadata that
/// produced it. All three kinds are present on every record; a request
/// that cannot fill all three never produces a record at all.
///
/// The serde field names are the on-disk layout of the history file and
/// must not change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRecord {
    /// Timestamp-derived identifier, unique within the history and
    /// lexically sortable in generation order.
    pub id: String,
    /// Human-readable generation time (`%Y-%m-%d %H:%M:%S`).
    pub timestamp: String,
    pub campaign: String,
    pub content_subject: String,
    pub target_audience: String,
    pub blog_content: String,
    pub linkedin_content: String,
    pub x_content: String,
}

impl ContentRecord {
    /// Returns the generated text for the given kind.
    pub fn content(&self, kind: ContentKind) -> &str {
        match kind {
            ContentKind::Blog => &self.blog_content,
            ContentKind::LinkedIn => &self.linkedin_content,
            ContentKind::X => &self.x_content,
        }
    }
}
