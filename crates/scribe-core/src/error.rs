//! Error types for the Scribe application.

use thiserror::Error;

/// A shared error type for the entire Scribe application.
///
/// The variants follow the failure taxonomy of the generation pipeline.
/// Every failure is caught at the presentation boundary, logged with
/// context, and surfaced to the user; only `Config` aborts the process,
/// and only at startup. There is no automatic retry anywhere.
#[derive(Error, Debug, Clone)]
pub enum ScribeError {
    /// A required request field is missing; the request was never attempted.
    #[error("validation error: {0}")]
    Validation(String),

    /// The search collaborator failed during retrieval.
    #[error("search error: {0}")]
    Search(String),

    /// A completion collaborator failed during one of the fan-out calls.
    #[error("generation error: {0}")]
    Generation(String),

    /// Durable storage could not be read or written.
    #[error("persistence error: {0}")]
    Persist(String),

    /// Persisted state exists but could not be parsed.
    #[error("corrupt history state: {0}")]
    CorruptState(String),

    /// The export projection failed.
    #[error("export error: {0}")]
    Export(String),

    /// Startup configuration is missing or malformed.
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation).
    #[error("internal error: {0}")]
    Internal(String),
}

impl ScribeError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a Search error
    pub fn search(message: impl Into<String>) -> Self {
        Self::Search(message.into())
    }

    /// Creates a Generation error
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation(message.into())
    }

    /// Creates a Persist error
    pub fn persist(message: impl Into<String>) -> Self {
        Self::Persist(message.into())
    }

    /// Creates a CorruptState error
    pub fn corrupt_state(message: impl Into<String>) -> Self {
        Self::CorruptState(message.into())
    }

    /// Creates an Export error
    pub fn export(message: impl Into<String>) -> Self {
        Self::Export(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a Validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a Search error
    pub fn is_search(&self) -> bool {
        matches!(self, Self::Search(_))
    }

    /// Check if this is a Generation error
    pub fn is_generation(&self) -> bool {
        matches!(self, Self::Generation(_))
    }

    /// Check if this is a Persist error
    pub fn is_persist(&self) -> bool {
        matches!(self, Self::Persist(_))
    }

    /// Check if this is a Config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Check if this is an Export error
    pub fn is_export(&self) -> bool {
        matches!(self, Self::Export(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for ScribeError {
    fn from(err: std::io::Error) -> Self {
        Self::Persist(format!("{} (kind: {:?})", err, err.kind()))
    }
}

/// A type alias for `Result<T, ScribeError>`.
pub type Result<T> = std::result::Result<T, ScribeError>;
