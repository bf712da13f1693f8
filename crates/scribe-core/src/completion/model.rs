//! Completion provider selection.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Supported chat-completion providers.
///
/// DeepSeek exposes an OpenAI-compatible API, so both variants share one
/// backend implementation and differ only in credentials and base URL.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LlmProvider {
    #[default]
    OpenAi,
    DeepSeek,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_parses_config_values() {
        assert_eq!("openai".parse::<LlmProvider>(), Ok(LlmProvider::OpenAi));
        assert_eq!("deepseek".parse::<LlmProvider>(), Ok(LlmProvider::DeepSeek));
        assert!("anthropic".parse::<LlmProvider>().is_err());
    }
}
