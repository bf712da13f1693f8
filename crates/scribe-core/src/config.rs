//! Configuration surface for the Scribe application.
//!
//! Every recognized option is read from the process environment at
//! startup. Missing required keys are fatal at startup and nowhere else;
//! every optional key has the documented default.

use std::path::PathBuf;

use crate::completion::LlmProvider;
use crate::error::{Result, ScribeError};
use crate::search::SearchOptions;

const DEFAULT_LLM_MODEL: &str = "gpt-4o";
const DEFAULT_LLM_TEMPERATURE: f32 = 0.0;
const DEFAULT_LLM_MAX_TOKENS: u32 = 1024;
const DEFAULT_DEEPSEEK_API_BASE: &str = "https://api.deepseek.com";
const DEFAULT_TAVILY_API_URL: &str = "https://api.tavily.com";
const DEFAULT_HISTORY_PATH: &str = "./history/content.json";

/// Settings for the chat-completion backend.
///
/// `api_key` and `api_base` are already resolved for the selected
/// provider; only the key of the provider in use is required.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub provider: LlmProvider,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub api_key: String,
    /// Base URL override for OpenAI-compatible providers. `None` means
    /// the backend's default endpoint.
    pub api_base: Option<String>,
}

/// Settings for the search collaborator.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub api_key: String,
    pub api_url: String,
    pub options: SearchOptions,
}

/// Full application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub llm: LlmConfig,
    pub search: SearchConfig,
    pub history_path: PathBuf,
}

impl AppConfig {
    /// Loads the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads the configuration from an arbitrary key lookup.
    ///
    /// `from_env` delegates here; tests pass a map so they never mutate
    /// process state.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let provider = match lookup("LLM_PROVIDER") {
            None => LlmProvider::default(),
            Some(raw) => raw
                .trim()
                .to_ascii_lowercase()
                .parse()
                .map_err(|_| ScribeError::config(format!("unknown LLM provider '{raw}'")))?,
        };

        let (api_key, api_base) = match provider {
            LlmProvider::OpenAi => (required(&lookup, "OPENAI_API_KEY")?, None),
            LlmProvider::DeepSeek => (
                required(&lookup, "DEEPSEEK_API_KEY")?,
                Some(
                    lookup("DEEPSEEK_API_BASE")
                        .unwrap_or_else(|| DEFAULT_DEEPSEEK_API_BASE.to_string()),
                ),
            ),
        };

        let llm = LlmConfig {
            provider,
            model: lookup("LLM_MODEL").unwrap_or_else(|| DEFAULT_LLM_MODEL.to_string()),
            temperature: parsed(&lookup, "LLM_TEMPERATURE", DEFAULT_LLM_TEMPERATURE)?,
            max_tokens: parsed(&lookup, "LLM_MAX_TOKENS", DEFAULT_LLM_MAX_TOKENS)?,
            api_key,
            api_base,
        };

        let defaults = SearchOptions::default();
        let search = SearchConfig {
            api_key: required(&lookup, "TAVILY_API_KEY")?,
            api_url: lookup("TAVILY_API_URL").unwrap_or_else(|| DEFAULT_TAVILY_API_URL.to_string()),
            options: SearchOptions {
                depth: parsed(&lookup, "TAVILY_SEARCH_DEPTH", defaults.depth)?,
                topic: lookup("TAVILY_TOPIC").unwrap_or(defaults.topic),
                include_answer: parsed_bool(
                    &lookup,
                    "TAVILY_INCLUDE_ANSWER",
                    defaults.include_answer,
                )?,
                include_raw_content: parsed_bool(
                    &lookup,
                    "TAVILY_INCLUDE_RAW_CONTENT",
                    defaults.include_raw_content,
                )?,
                max_results: parsed(&lookup, "TAVILY_MAX_RESULTS", defaults.max_results)?,
            },
        };

        let history_path = lookup("SCRIBE_HISTORY_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_HISTORY_PATH));

        Ok(Self {
            llm,
            search,
            history_path,
        })
    }
}

fn required(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String> {
    lookup(key)
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| ScribeError::config(format!("missing required environment variable {key}")))
}

fn parsed<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T> {
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ScribeError::config(format!("invalid value '{raw}' for {key}"))),
    }
}

fn parsed_bool(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: bool,
) -> Result<bool> {
    match lookup(key) {
        None => Ok(default),
        Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" => Ok(false),
            _ => Err(ScribeError::config(format!(
                "invalid value '{raw}' for {key}"
            ))),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::SearchDepth;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn lookup_in(map: &HashMap<String, String>) -> impl Fn(&str) -> Option<String> + '_ {
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_required_keys_are_set() {
        let map = env(&[("OPENAI_API_KEY", "sk-test"), ("TAVILY_API_KEY", "tvly")]);
        let config = AppConfig::from_lookup(lookup_in(&map)).unwrap();

        assert_eq!(config.llm.provider, LlmProvider::OpenAi);
        assert_eq!(config.llm.model, "gpt-4o");
        assert_eq!(config.llm.max_tokens, 1024);
        assert!(config.llm.api_base.is_none());
        assert_eq!(config.search.options.depth, SearchDepth::Basic);
        assert_eq!(config.search.options.topic, "news");
        assert_eq!(config.search.options.max_results, 3);
        assert!(config.search.options.include_answer);
        assert_eq!(config.history_path, PathBuf::from("./history/content.json"));
    }

    #[test]
    fn missing_search_key_is_fatal() {
        let map = env(&[("OPENAI_API_KEY", "sk-test")]);
        let err = AppConfig::from_lookup(lookup_in(&map)).unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains("TAVILY_API_KEY"));
    }

    #[test]
    fn deepseek_provider_requires_its_own_key() {
        let map = env(&[("LLM_PROVIDER", "deepseek"), ("TAVILY_API_KEY", "tvly")]);
        let err = AppConfig::from_lookup(lookup_in(&map)).unwrap_err();
        assert!(err.to_string().contains("DEEPSEEK_API_KEY"));

        let map = env(&[
            ("LLM_PROVIDER", "deepseek"),
            ("DEEPSEEK_API_KEY", "dsk"),
            ("TAVILY_API_KEY", "tvly"),
        ]);
        let config = AppConfig::from_lookup(lookup_in(&map)).unwrap();
        assert_eq!(config.llm.provider, LlmProvider::DeepSeek);
        assert_eq!(
            config.llm.api_base.as_deref(),
            Some("https://api.deepseek.com")
        );
    }

    #[test]
    fn malformed_numeric_values_are_fatal() {
        let map = env(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("TAVILY_API_KEY", "tvly"),
            ("LLM_TEMPERATURE", "warm"),
        ]);
        let err = AppConfig::from_lookup(lookup_in(&map)).unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains("LLM_TEMPERATURE"));
    }

    #[test]
    fn boolean_flags_accept_common_spellings() {
        let map = env(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("TAVILY_API_KEY", "tvly"),
            ("TAVILY_INCLUDE_ANSWER", "False"),
            ("TAVILY_INCLUDE_RAW_CONTENT", "1"),
        ]);
        let config = AppConfig::from_lookup(lookup_in(&map)).unwrap();
        assert!(!config.search.options.include_answer);
        assert!(config.search.options.include_raw_content);
    }

    #[test]
    fn unknown_provider_is_fatal() {
        let map = env(&[("LLM_PROVIDER", "claude"), ("TAVILY_API_KEY", "tvly")]);
        let err = AppConfig::from_lookup(lookup_in(&map)).unwrap_err();
        assert!(err.is_config());
    }
}
