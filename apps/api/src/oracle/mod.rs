//! Similarity oracle: the single point of entry for remote semantic similarity
//! and coarse entity extraction.
//!
//! Callers never see an `OracleError` surface past the core: the extractor and
//! the matching engine turn every failure into their documented fallbacks.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

#[cfg(test)]
pub mod stub;

const BACKOFF_BASE_MS: u64 = 250;

#[derive(Debug, Error)]
pub enum OracleError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Oracle returned no similarity scores")]
    EmptyScores,
}

/// Remote capabilities the matching core depends on.
#[async_trait]
pub trait SimilarityOracle: Send + Sync {
    /// Semantic similarity of two texts, nominally in [0, 1].
    async fn similarity(&self, source: &str, other: &str) -> Result<f64, OracleError>;

    /// Entity surface forms grouped by category, each group in returned order.
    async fn entities(&self, text: &str) -> Result<HashMap<String, Vec<String>>, OracleError>;
}

#[derive(Debug, Clone)]
pub struct OracleConfig {
    pub api_url: String,
    pub api_token: String,
    pub similarity_model: String,
    pub ner_model: String,
    pub timeout: Duration,
    pub max_attempts: u32,
}

#[derive(Debug, Serialize)]
struct SimilarityRequest<'a> {
    inputs: SimilarityInputs<'a>,
}

#[derive(Debug, Serialize)]
struct SimilarityInputs<'a> {
    source_sentence: &'a str,
    sentences: [&'a str; 1],
}

#[derive(Debug, Serialize)]
struct EntityRequest<'a> {
    inputs: &'a str,
}

#[derive(Debug, Deserialize)]
struct EntitySpan {
    word: String,
    entity_group: String,
}

/// Hugging Face inference API client: sentence similarity + token classification.
#[derive(Clone)]
pub struct HuggingFaceOracle {
    client: Client,
    config: OracleConfig,
}

impl HuggingFaceOracle {
    pub fn new(config: OracleConfig) -> Result<Self, OracleError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    fn model_url(&self, model: &str) -> String {
        format!("{}/{}", self.config.api_url.trim_end_matches('/'), model)
    }

    /// POSTs a JSON body and returns the raw success body.
    /// Retries on 429, 5xx and transport errors with exponential backoff.
    async fn post<B: Serialize + ?Sized>(&self, url: &str, body: &B) -> Result<String, OracleError> {
        let attempts = self.config.max_attempts.max(1);
        let mut last_error: Option<OracleError> = None;

        for attempt in 0..attempts {
            if attempt > 0 {
                let delay = Duration::from_millis(BACKOFF_BASE_MS * (1 << (attempt - 1)));
                warn!(
                    "Oracle call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(url)
                .bearer_auth(&self.config.api_token)
                .header("accept", "application/json")
                .json(body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(OracleError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
                let message = response.text().await.unwrap_or_default();
                last_error = Some(OracleError::Api {
                    status: status.as_u16(),
                    message,
                });
                continue;
            }

            if !status.is_success() {
                let message = response.text().await.unwrap_or_default();
                return Err(OracleError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            return Ok(response.text().await?);
        }

        Err(last_error.unwrap_or(OracleError::Api {
            status: 0,
            message: "no attempt made".to_string(),
        }))
    }
}

#[async_trait]
impl SimilarityOracle for HuggingFaceOracle {
    async fn similarity(&self, source: &str, other: &str) -> Result<f64, OracleError> {
        let request = SimilarityRequest {
            inputs: SimilarityInputs {
                source_sentence: source,
                sentences: [other],
            },
        };
        let body = self
            .post(&self.model_url(&self.config.similarity_model), &request)
            .await?;
        let score = parse_similarity(&body)?;
        debug!("Oracle similarity: {score:.4}");
        Ok(score)
    }

    async fn entities(&self, text: &str) -> Result<HashMap<String, Vec<String>>, OracleError> {
        let body = self
            .post(
                &self.model_url(&self.config.ner_model),
                &EntityRequest { inputs: text },
            )
            .await?;
        let entities = parse_entities(&body)?;
        debug!("Oracle entities: {} categories", entities.len());
        Ok(entities)
    }
}

/// Parses a numeric-array similarity payload; the first element is the score.
fn parse_similarity(body: &str) -> Result<f64, OracleError> {
    let scores: Vec<f64> = serde_json::from_str(body)?;
    scores.first().copied().ok_or(OracleError::EmptyScores)
}

/// Groups `{word, entity_group}` spans by category, preserving span order.
fn parse_entities(body: &str) -> Result<HashMap<String, Vec<String>>, OracleError> {
    let spans: Vec<EntitySpan> = serde_json::from_str(body)?;
    let mut grouped: HashMap<String, Vec<String>> = HashMap::new();
    for span in spans {
        grouped.entry(span.entity_group).or_default().push(span.word);
    }
    Ok(grouped)
}
