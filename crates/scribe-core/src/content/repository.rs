//! History store contract.
//!
//! Defines the interface for persisting the generated-content history,
//! decoupling the orchestration layer from the storage mechanism.

use async_trait::async_trait;

use crate::content::ContentRecord;
use crate::error::Result;

/// An abstract store for the generated-content history.
///
/// The history is a whole-file collection: implementations load it fully,
/// rewrite it fully after every mutation, and assume a single writer.
/// Insertion order is chronological generation order, and identifiers are
/// unique within the collection.
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// Loads the full history, oldest first.
    ///
    /// Missing state yields an empty collection. Malformed state is
    /// reported and degrades to an empty collection rather than failing
    /// the caller.
    async fn load(&self) -> Result<Vec<ContentRecord>>;

    /// Replaces the persisted history with `records`.
    ///
    /// Not incremental and not transactional; concurrent callers must
    /// serialize their own calls.
    async fn save(&self, records: &[ContentRecord]) -> Result<()>;

    /// Removes the record with the given id and persists the result.
    ///
    /// An absent id is not an error: a warning is reported and the
    /// collection is returned unchanged.
    async fn remove(&self, id: &str) -> Result<Vec<ContentRecord>>;
}
