//! Text feature extraction. Turns raw resume / job text into an `ExtractedProfile`.
//!
//! Skills come from the oracle's `SKILL` entities when it returns any, else from
//! the dictionary patterns. Experience and education are always pattern-based.
//! Every operation is total: empty or malformed input yields empty vectors.

pub mod patterns;

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::extraction::patterns::{scan, EDUCATION_PATTERNS, EXPERIENCE_PATTERNS, SKILL_PATTERNS};
use crate::models::profile::ExtractedProfile;
use crate::oracle::SimilarityOracle;

const SKILL_CATEGORY: &str = "SKILL";

#[derive(Clone)]
pub struct TextFeatureExtractor {
    oracle: Arc<dyn SimilarityOracle>,
}

impl TextFeatureExtractor {
    pub fn new(oracle: Arc<dyn SimilarityOracle>) -> Self {
        Self { oracle }
    }

    pub async fn extract_profile(&self, text: &str) -> ExtractedProfile {
        ExtractedProfile {
            skills: self.extract_skills(text).await,
            experience_statements: extract_experience(text),
            education_statements: extract_education(text),
            raw_text: text.to_string(),
        }
    }

    /// Oracle `SKILL` entities if non-empty, otherwise the dictionary fallback.
    pub async fn extract_skills(&self, text: &str) -> Vec<String> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let entity_skills = match self.oracle.entities(text).await {
            Ok(mut entities) => entities.remove(SKILL_CATEGORY).unwrap_or_default(),
            Err(e) => {
                warn!("Entity extraction failed, using dictionary skills: {e}");
                Vec::new()
            }
        };

        let skills = dedup_case_insensitive(entity_skills.iter().map(String::as_str));
        if !skills.is_empty() {
            debug!("Extracted {} skills from oracle entities", skills.len());
            return skills;
        }

        extract_skills_from_dictionary(text)
    }
}

pub fn extract_skills_from_dictionary(text: &str) -> Vec<String> {
    dedup_case_insensitive(scan(&SKILL_PATTERNS, text).into_iter())
}

pub fn extract_experience(text: &str) -> Vec<String> {
    dedup_exact(scan(&EXPERIENCE_PATTERNS, text))
}

pub fn extract_education(text: &str) -> Vec<String> {
    dedup_exact(scan(&EDUCATION_PATTERNS, text))
}

/// Keeps the first surface form of each lowercase form, in discovery order.
fn dedup_case_insensitive<'a>(items: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .filter(|item| seen.insert(item.to_lowercase()))
        .map(String::from)
        .collect()
}

fn dedup_exact(items: Vec<&str>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(*item))
        .map(String::from)
        .collect()
}
