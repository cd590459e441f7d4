//! Gemini generateContent client

use crate::backend::{BackendError, StageBackend};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Configuration for the Gemini backend
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// Model identifier, e.g. "gemini-2.0-flash"
    pub model: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Timeout for a single generation request in seconds
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.0-flash".to_string(),
            temperature: 0.7,
            timeout_secs: 120,
        }
    }
}

impl GeminiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// Stage backend backed by the Gemini REST API.
///
/// The stage role is sent as the system instruction; the stage instruction
/// and the optional reference document form the user content.
pub struct GeminiBackend {
    http: reqwest::Client,
    config: GeminiConfig,
    api_key: String,
}

impl GeminiBackend {
    pub fn new(config: GeminiConfig, api_key: String) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            config,
            api_key,
        })
    }

    fn endpoint(&self) -> String {
        format!("{API_BASE}/{}:generateContent", self.config.model)
    }
}

#[async_trait]
impl StageBackend for GeminiBackend {
    async fn invoke(
        &self,
        role: &str,
        instruction: &str,
        reference: Option<&str>,
    ) -> Result<String, BackendError> {
        let request = build_request(role, instruction, reference, self.config.temperature);

        debug!("Gemini request to {} as '{}'", self.config.model, role);

        let response = self
            .http
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Api(format!("{status}: {body}")));
        }

        let parsed: GenerateResponse = response.json().await?;
        extract_text(parsed)
    }
}

/// Assemble the generateContent request body.
fn build_request(
    role: &str,
    instruction: &str,
    reference: Option<&str>,
    temperature: f32,
) -> GenerateRequest {
    let mut parts = vec![Part {
        text: instruction.to_string(),
    }];
    if let Some(reference) = reference {
        parts.push(Part {
            text: format!("Reference document:\n\n{reference}"),
        });
    }

    GenerateRequest {
        system_instruction: Content {
            role: None,
            parts: vec![Part {
                text: format!("You are a {role}."),
            }],
        },
        contents: vec![Content {
            role: Some("user".to_string()),
            parts,
        }],
        generation_config: GenerationConfig { temperature },
    }
}

/// Pull the generated text out of a response, joining all parts of the
/// first candidate.
fn extract_text(response: GenerateResponse) -> Result<String, BackendError> {
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .map(|candidate| {
            candidate
                .content
                .parts
                .into_iter()
                .map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(BackendError::EmptyResponse);
    }
    Ok(text)
}

// ── Wire types ──────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GenerateRequest {
    #[serde(rename = "systemInstruction")]
    system_instruction: Content,
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    role: Option<String>,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}
