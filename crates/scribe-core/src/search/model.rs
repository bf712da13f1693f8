//! Search domain models.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// A single background finding returned by the search collaborator.
///
/// Immutable once produced. `content` carries the provider's raw page
/// content when available, else its short snippet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchFinding {
    pub title: String,
    pub content: String,
}

/// Requested depth of the search pass.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SearchDepth {
    #[default]
    Basic,
    Advanced,
}

/// Options forwarded to the search collaborator on every query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchOptions {
    pub depth: SearchDepth,
    pub topic: String,
    pub include_answer: bool,
    pub include_raw_content: bool,
    pub max_results: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            depth: SearchDepth::Basic,
            topic: "news".to_string(),
            include_answer: true,
            include_raw_content: true,
            max_results: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_round_trips_through_strings() {
        assert_eq!(SearchDepth::Basic.to_string(), "basic");
        assert_eq!("advanced".parse::<SearchDepth>(), Ok(SearchDepth::Advanced));
        assert!("deep".parse::<SearchDepth>().is_err());
    }
}
