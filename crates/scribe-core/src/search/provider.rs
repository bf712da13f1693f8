//! Search provider trait definition.

use async_trait::async_trait;

use crate::error::Result;
use crate::search::SearchFinding;

/// Capability interface for web search collaborators.
///
/// A single search failure aborts the request that issued it; providers
/// perform no retries of their own.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Searches for `query` and returns findings in provider order.
    async fn search(&self, query: &str) -> Result<Vec<SearchFinding>>;
}
