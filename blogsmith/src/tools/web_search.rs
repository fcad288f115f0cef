//! Web search tool backed by the Serper API.
//!
//! The research agent uses this to gather verified information from web
//! sources. Serper returns structured JSON, which is reformatted as a
//! markdown block the model can cite from.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ToolError;
use crate::tool::Tool;

/// Serper search endpoint.
const SEARCH_URL: &str = "https://google.serper.dev/search";

/// Default number of results to return.
const DEFAULT_MAX_RESULTS: usize = 10;

/// Web search tool bound to a Serper API key.
#[derive(Clone)]
pub struct SerperSearch {
    api_key: String,
    max_results: usize,
    client: reqwest::Client,
}

impl std::fmt::Debug for SerperSearch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerperSearch")
            .field("api_key", &"***")
            .field("max_results", &self.max_results)
            .finish_non_exhaustive()
    }
}

/// Arguments for web search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebSearchArgs {
    /// The search query to perform.
    pub query: String,
}

/// A single search result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// Title of the result.
    pub title: String,
    /// URL of the result.
    pub link: String,
    /// Snippet of the result.
    pub snippet: String,
}

impl SerperSearch {
    /// Create a new search tool bound to the given API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            max_results: DEFAULT_MAX_RESULTS,
            client: reqwest::Client::new(),
        }
    }

    /// Set maximum results.
    #[must_use]
    pub fn with_max_results(mut self, max: usize) -> Self {
        self.max_results = max;
        self
    }

    /// Parse results into markdown format.
    fn format_results(results: &[SearchResult]) -> String {
        if results.is_empty() {
            return "No results found.".to_string();
        }

        let mut output = String::from("## Search Results\n\n");
        for result in results {
            output.push_str(&format!(
                "[{}]({})\n{}\n\n",
                result.title, result.link, result.snippet
            ));
        }
        output
    }

    /// Extract organic results from a Serper response body.
    fn parse_results(body: &Value, max_results: usize) -> Vec<SearchResult> {
        let Some(organic) = body.get("organic").and_then(Value::as_array) else {
            return Vec::new();
        };

        organic
            .iter()
            .filter_map(|entry| {
                let title = entry.get("title")?.as_str()?;
                let link = entry.get("link")?.as_str()?;
                let snippet = entry
                    .get("snippet")
                    .and_then(Value::as_str)
                    .unwrap_or_default();
                Some(SearchResult {
                    title: title.to_string(),
                    link: link.to_string(),
                    snippet: snippet.to_string(),
                })
            })
            .take(max_results)
            .collect()
    }

    /// Perform a search against the Serper API.
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, ToolError> {
        let payload = serde_json::json!({
            "q": query,
            "num": self.max_results,
        });

        let response = self
            .client
            .post(SEARCH_URL)
            .header("X-API-KEY", &self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| ToolError::execution(format!("Request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ToolError::execution(format!(
                "Serper returned HTTP {}: {body}",
                status.as_u16()
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ToolError::execution(format!("Failed to read response: {e}")))?;

        Ok(Self::parse_results(&body, self.max_results))
    }
}

#[async_trait]
impl Tool for SerperSearch {
    const NAME: &'static str = "serper_search";
    type Args = WebSearchArgs;
    type Output = String;
    type Error = ToolError;

    fn description(&self) -> String {
        "Performs a web search for a query and returns the top search results formatted as markdown.".to_string()
    }

    fn parameters_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The search query to perform"
                }
            },
            "required": ["query"]
        })
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        let results = self.search(&args.query).await?;

        if results.is_empty() {
            return Err(ToolError::execution(
                "No results found! Try a less restrictive/shorter query.",
            ));
        }

        Ok(Self::format_results(&results))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_body() -> Value {
        json!({
            "searchParameters": {"q": "quantum computing in healthcare"},
            "organic": [
                {
                    "title": "Quantum Computing in Healthcare: A Review",
                    "link": "https://example.org/review",
                    "snippet": "Recent advances in quantum algorithms for drug discovery.",
                    "position": 1
                },
                {
                    "title": "Hospitals explore quantum optimization",
                    "link": "https://example.org/hospitals",
                    "snippet": "Pilot programs in imaging and scheduling.",
                    "position": 2
                },
                {
                    "title": "No snippet entry",
                    "link": "https://example.org/bare",
                    "position": 3
                }
            ]
        })
    }

    #[test]
    fn parse_results_extracts_organic_entries() {
        let results = SerperSearch::parse_results(&sample_body(), 10);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].title, "Quantum Computing in Healthcare: A Review");
        assert_eq!(results[0].link, "https://example.org/review");
        assert!(results[0].snippet.contains("drug discovery"));
    }

    #[test]
    fn parse_results_tolerates_missing_snippet() {
        let results = SerperSearch::parse_results(&sample_body(), 10);
        assert_eq!(results[2].title, "No snippet entry");
        assert!(results[2].snippet.is_empty());
    }

    #[test]
    fn parse_results_respects_max() {
        let results = SerperSearch::parse_results(&sample_body(), 1);
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn parse_results_handles_missing_organic() {
        let results = SerperSearch::parse_results(&json!({"answerBox": {}}), 10);
        assert!(results.is_empty());
    }

    #[test]
    fn format_results_builds_markdown() {
        let results = SerperSearch::parse_results(&sample_body(), 2);
        let formatted = SerperSearch::format_results(&results);
        assert!(formatted.starts_with("## Search Results"));
        assert!(formatted.contains("[Quantum Computing in Healthcare: A Review](https://example.org/review)"));
        assert!(formatted.contains("Pilot programs"));
    }

    #[test]
    fn format_results_empty() {
        assert_eq!(SerperSearch::format_results(&[]), "No results found.");
    }

    #[test]
    fn definition_has_query_parameter() {
        let tool = SerperSearch::new("test-key");
        let def = tool.definition();
        assert_eq!(def.name, "serper_search");
        assert_eq!(def.parameters["required"][0], "query");
    }

    #[test]
    fn debug_masks_api_key() {
        let tool = SerperSearch::new("super-secret");
        let dump = format!("{tool:?}");
        assert!(!dump.contains("super-secret"));
        assert!(dump.contains("***"));
    }

    #[test]
    fn max_results_builder() {
        let tool = SerperSearch::new("k").with_max_results(3);
        assert_eq!(tool.max_results, 3);
    }
}
