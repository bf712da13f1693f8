//! Tavily web search provider.
//!
//! Sends `POST /search` requests to the Tavily REST API and maps each
//! result item to a [`SearchFinding`], preferring full raw page content
//! over the short snippet when the provider returns it.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use scribe_core::config::SearchConfig;
use scribe_core::error::{Result, ScribeError};
use scribe_core::search::{SearchDepth, SearchFinding, SearchOptions, SearchProvider};

const DEFAULT_BASE_URL: &str = "https://api.tavily.com";

/// Search provider backed by the Tavily REST API.
#[derive(Clone)]
pub struct TavilySearchProvider {
    client: Client,
    api_key: String,
    base_url: String,
    options: SearchOptions,
}

impl TavilySearchProvider {
    /// Creates a new provider with the given API key and default options.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            options: SearchOptions::default(),
        }
    }

    /// Creates a provider from the application search configuration.
    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(config.api_key.clone())
            .with_base_url(config.api_url.clone())
            .with_options(config.options.clone())
    }

    /// Overrides the API base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Overrides the search options sent with every query.
    pub fn with_options(mut self, options: SearchOptions) -> Self {
        self.options = options;
        self
    }

    async fn perform_search(&self, query: &str) -> Result<Vec<SearchFinding>> {
        let url = format!("{}/search", self.base_url.trim_end_matches('/'));

        let request = SearchRequest {
            query,
            search_depth: self.options.depth,
            topic: &self.options.topic,
            include_answer: self.options.include_answer,
            include_raw_content: self.options.include_raw_content,
            max_results: self.options.max_results,
        };

        let response = self
            .client
            .post(url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|err| ScribeError::search(format!("Tavily request failed: {err}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read Tavily error body".to_string());
            return Err(map_http_error(status, body));
        }

        let payload: SearchResponse = response
            .json()
            .await
            .map_err(|err| ScribeError::search(format!("failed to parse Tavily response: {err}")))?;

        Ok(collect_findings(payload))
    }
}

#[async_trait]
impl SearchProvider for TavilySearchProvider {
    async fn search(&self, query: &str) -> Result<Vec<SearchFinding>> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(ScribeError::search("search query cannot be empty"));
        }

        tracing::debug!(
            query = trimmed,
            depth = %self.options.depth,
            max_results = self.options.max_results,
            "querying Tavily"
        );
        let findings = self.perform_search(trimmed).await?;
        tracing::info!(count = findings.len(), "Tavily returned findings");
        Ok(findings)
    }
}

#[derive(Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
    search_depth: SearchDepth,
    topic: &'a str,
    include_answer: bool,
    include_raw_content: bool,
    max_results: usize,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<ResultItem>,
}

#[derive(Deserialize)]
struct ResultItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    raw_content: Option<String>,
}

fn collect_findings(payload: SearchResponse) -> Vec<SearchFinding> {
    payload
        .results
        .into_iter()
        .map(|item| {
            let content = item
                .raw_content
                .filter(|raw| !raw.trim().is_empty())
                .unwrap_or(item.content);
            SearchFinding {
                title: item.title,
                content,
            }
        })
        .collect()
}

fn map_http_error(status: StatusCode, body: String) -> ScribeError {
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|json| {
            let detail = json.get("detail")?;
            detail
                .get("error")
                .and_then(|e| e.as_str())
                .or_else(|| detail.as_str())
                .map(|s| s.to_string())
        })
        .unwrap_or(body);

    ScribeError::search(format!("Tavily returned {status}: {message}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn findings_prefer_raw_content_over_snippet() {
        let payload: SearchResponse = serde_json::from_str(
            r#"{
                "results": [
                    {"title": "E-bike trends", "content": "snippet", "raw_content": "full article text"},
                    {"title": "Commuting", "content": "snippet only"},
                    {"title": "Blank raw", "content": "fallback", "raw_content": "   "}
                ]
            }"#,
        )
        .unwrap();

        let findings = collect_findings(payload);
        assert_eq!(findings.len(), 3);
        assert_eq!(findings[0].content, "full article text");
        assert_eq!(findings[1].content, "snippet only");
        assert_eq!(findings[2].content, "fallback");
    }

    #[test]
    fn empty_results_map_to_empty_findings() {
        let payload: SearchResponse = serde_json::from_str(r#"{"answer": "nothing"}"#).unwrap();
        assert!(collect_findings(payload).is_empty());
    }

    #[test]
    fn http_error_extracts_provider_detail() {
        let err = map_http_error(
            StatusCode::UNAUTHORIZED,
            r#"{"detail": {"error": "invalid API key"}}"#.to_string(),
        );
        assert!(err.is_search());
        assert!(err.to_string().contains("invalid API key"));
        assert!(err.to_string().contains("401"));
    }

    #[test]
    fn http_error_falls_back_to_raw_body() {
        let err = map_http_error(StatusCode::BAD_GATEWAY, "upstream down".to_string());
        assert!(err.to_string().contains("upstream down"));
    }

    #[tokio::test]
    async fn blank_query_is_rejected_before_any_request() {
        let provider = TavilySearchProvider::new("tvly-test");
        let err = provider.search("   ").await.unwrap_err();
        assert!(err.is_search());
    }
}
