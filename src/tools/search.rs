//! Web search backed by the Serper Google search API.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::arguments::ToolArguments;
use super::tool::{Tool, ToolExecutionContext};
use super::types::AgentToolParameters;
use crate::error::{JournalistError, Result};
use crate::provider::http::{api_key_headers, shared_client, status_to_error};

pub const SEARCH_TOOL_NAME: &str = "search_google";
pub const DEFAULT_SEARCH_BASE_URL: &str = "https://google.serper.dev";
pub const DEFAULT_NUM_RESULTS: usize = 5;

/// One organic search hit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchResult {
    pub title: String,
    pub link: String,
    #[serde(default)]
    pub snippet: String,
}

#[derive(Deserialize)]
struct SerperResponse {
    #[serde(default)]
    organic: Vec<serde_json::Value>,
}

impl SearchResult {
    /// Decode one `organic` entry. Entries without a title or link are unusable.
    fn from_organic(entry: &serde_json::Value) -> Option<Self> {
        let field = |key: &str| entry.get(key).and_then(serde_json::Value::as_str);
        Some(Self {
            title: field("title")?.to_string(),
            link: field("link")?.to_string(),
            snippet: field("snippet").unwrap_or_default().to_string(),
        })
    }
}

/// Search tool. Never fails: any request problem yields an empty result list.
pub struct SearchTool {
    api_key: String,
    base_url: String,
    default_num_results: usize,
    parameters: AgentToolParameters,
}

impl SearchTool {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_SEARCH_BASE_URL.to_string(),
            default_num_results: DEFAULT_NUM_RESULTS,
            parameters: AgentToolParameters::object()
                .string("query", "The search query", true)
                .integer(
                    "num_results",
                    "Maximum number of results to return (default 5)",
                    false,
                )
                .build(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_default_num_results(mut self, num_results: usize) -> Self {
        self.default_num_results = num_results;
        self
    }

    pub fn default_num_results(&self) -> usize {
        self.default_num_results
    }

    /// Run a search, returning at most `num_results` hits in API order.
    pub async fn search(&self, query: &str, num_results: usize) -> Vec<SearchResult> {
        match self.try_search(query, num_results).await {
            Ok(results) => {
                debug!(query, count = results.len(), "search completed");
                results
            }
            Err(e) => {
                warn!(query, error = %e, "search failed, returning no results");
                Vec::new()
            }
        }
    }

    async fn try_search(&self, query: &str, num_results: usize) -> Result<Vec<SearchResult>> {
        let url = format!("{}/search", self.base_url);
        let resp = shared_client()
            .post(&url)
            .headers(api_key_headers("x-api-key", &self.api_key))
            .json(&serde_json::json!({ "q": query, "num": num_results }))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body_text = resp.text().await.unwrap_or_default();
            return Err(status_to_error(status.as_u16(), &body_text));
        }

        let data: SerperResponse = resp.json().await?;
        Ok(data
            .organic
            .iter()
            .take(num_results)
            .filter_map(|entry| {
                let result = SearchResult::from_organic(entry);
                if result.is_none() {
                    debug!(%entry, "skipping search result without title or link");
                }
                result
            })
            .collect())
    }
}

impl std::fmt::Debug for SearchTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchTool")
            .field("base_url", &self.base_url)
            .field("default_num_results", &self.default_num_results)
            .finish()
    }
}

#[async_trait]
impl Tool for SearchTool {
    fn name(&self) -> &str {
        SEARCH_TOOL_NAME
    }

    fn description(&self) -> &str {
        "Search Google for information."
    }

    fn parameters(&self) -> &AgentToolParameters {
        &self.parameters
    }

    async fn execute(
        &self,
        args: &ToolArguments,
        _ctx: &ToolExecutionContext,
    ) -> std::result::Result<serde_json::Value, JournalistError> {
        let query = args.get_str("query")?;
        let num_results = args
            .get_usize_opt("num_results")
            .unwrap_or(self.default_num_results);
        let results = self.search(query, num_results).await;
        Ok(serde_json::to_value(results)?)
    }
}
