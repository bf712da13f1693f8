//! Completion backend trait definition.

use async_trait::async_trait;

use crate::error::Result;

/// Capability interface for LLM chat-completion collaborators.
///
/// Provider, model, temperature, and output limits are configuration of
/// the backend instance; callers supply only the rendered messages.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Runs one completion with the given system and user messages.
    ///
    /// Fails on transport errors, provider errors, and completions that
    /// come back without usable text.
    async fn complete(&self, system_message: &str, user_message: &str) -> Result<String>;
}
