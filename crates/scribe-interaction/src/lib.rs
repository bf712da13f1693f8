//! HTTP collaborators for Scribe.
//!
//! The Tavily search provider and the OpenAI-compatible chat completions
//! backend. Both implement capability traits from `scribe-core` so the
//! orchestration layer never sees a concrete provider.

pub mod chat_completions;
pub mod tavily_search;

pub use chat_completions::ChatCompletionsBackend;
pub use tavily_search::TavilySearchProvider;
