//! Scriptable in-process oracle for exercising fallback paths.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::{OracleError, SimilarityOracle};

#[derive(Default)]
pub struct StubOracle {
    /// `None` simulates a failed similarity call.
    pub similarity: Option<f64>,
    /// `None` simulates a failed entity call.
    pub entities: Option<HashMap<String, Vec<String>>>,
    pub similarity_calls: AtomicUsize,
    /// Texts received by the last similarity call.
    pub last_inputs: std::sync::Mutex<Option<(String, String)>>,
}

impl StubOracle {
    pub fn failing() -> Self {
        Self::default()
    }

    pub fn with_similarity(score: f64) -> Self {
        Self {
            similarity: Some(score),
            entities: Some(HashMap::new()),
            ..Default::default()
        }
    }

    pub fn with_skills(skills: &[&str]) -> Self {
        let mut entities = HashMap::new();
        entities.insert(
            "SKILL".to_string(),
            skills.iter().map(|s| s.to_string()).collect(),
        );
        Self {
            entities: Some(entities),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.similarity_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SimilarityOracle for StubOracle {
    async fn similarity(&self, source: &str, other: &str) -> Result<f64, OracleError> {
        self.similarity_calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_inputs.lock() {
            *last = Some((source.to_string(), other.to_string()));
        }
        self.similarity.ok_or(OracleError::Api {
            status: 503,
            message: "stub oracle unavailable".to_string(),
        })
    }

    async fn entities(&self, _text: &str) -> Result<HashMap<String, Vec<String>>, OracleError> {
        self.entities.clone().ok_or(OracleError::Api {
            status: 503,
            message: "stub oracle unavailable".to_string(),
        })
    }
}
