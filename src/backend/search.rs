//! Web search capability and the search-augmenting backend decorator

use crate::backend::{BackendError, StageBackend};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

const SERPER_ENDPOINT: &str = "https://google.serper.dev/search";
const MAX_SNIPPETS: usize = 6;

/// One organic search result.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchSnippet {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub snippet: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    organic: Vec<SearchSnippet>,
}

/// Serper.dev web search client.
pub struct SerperClient {
    http: reqwest::Client,
    api_key: String,
}

impl SerperClient {
    pub fn new(api_key: String) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self { http, api_key })
    }

    pub async fn search(&self, query: &str) -> Result<Vec<SearchSnippet>, BackendError> {
        debug!("Serper search: {query}");

        let response = self
            .http
            .post(SERPER_ENDPOINT)
            .header("X-API-KEY", &self.api_key)
            .json(&serde_json::json!({ "q": query }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Api(format!("{status}: {body}")));
        }

        let parsed: SearchResponse = response.json().await?;
        Ok(parsed.organic.into_iter().take(MAX_SNIPPETS).collect())
    }
}

/// Decorator that augments one role's instructions with web search results.
///
/// The pipeline never sees this: it invokes the backend with the same
/// contract, and the decorator consults the retrieval capability only when
/// the role matches (the research stage). A failed search degrades to the
/// unaugmented instruction rather than failing the stage.
pub struct SearchAugmented<B> {
    inner: B,
    search: SerperClient,
    augmented_role: String,
}

impl<B: StageBackend> SearchAugmented<B> {
    pub fn new(inner: B, search: SerperClient, augmented_role: impl Into<String>) -> Self {
        Self {
            inner,
            search,
            augmented_role: augmented_role.into(),
        }
    }
}

#[async_trait]
impl<B: StageBackend> StageBackend for SearchAugmented<B> {
    async fn invoke(
        &self,
        role: &str,
        instruction: &str,
        reference: Option<&str>,
    ) -> Result<String, BackendError> {
        if role != self.augmented_role {
            return self.inner.invoke(role, instruction, reference).await;
        }

        let query = search_query(instruction);
        match self.search.search(query).await {
            Ok(snippets) if !snippets.is_empty() => {
                let augmented = format!(
                    "{instruction}\n\nWeb search findings:\n{}",
                    render_snippets(&snippets)
                );
                self.inner.invoke(role, &augmented, reference).await
            }
            Ok(_) => self.inner.invoke(role, instruction, reference).await,
            Err(err) => {
                warn!("Search failed, continuing without augmentation: {err}");
                self.inner.invoke(role, instruction, reference).await
            }
        }
    }
}

/// Derive the search query from an instruction. Every stage instruction
/// opens with a one-line statement of the task, which doubles as the query.
fn search_query(instruction: &str) -> &str {
    instruction
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or(instruction)
}

fn render_snippets(snippets: &[SearchSnippet]) -> String {
    snippets
        .iter()
        .map(|s| format!("- {}: {} ({})\n", s.title, s.snippet, s.link))
        .collect()
}
