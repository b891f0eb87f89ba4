use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// Which path produced `MatchResult::semantic_similarity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SemanticSource {
    /// Score returned by the similarity oracle.
    Oracle,
    /// Oracle enabled but failed; word-level Jaccard of the raw texts.
    LexicalFallback,
    /// Oracle disabled (or raw text missing); mean of the three component scores.
    ComponentMean,
}

impl SemanticSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            SemanticSource::Oracle => "oracle",
            SemanticSource::LexicalFallback => "lexical_fallback",
            SemanticSource::ComponentMean => "component_mean",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "oracle" => Some(SemanticSource::Oracle),
            "lexical_fallback" => Some(SemanticSource::LexicalFallback),
            "component_mean" => Some(SemanticSource::ComponentMean),
            _ => None,
        }
    }
}

/// Explainable compatibility score for one (resume, job) pair.
/// At most one exists per pair; recomputation overwrites it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub resume_id: Uuid,
    pub job_id: Uuid,
    pub overall_score: f64,
    pub skills_score: f64,
    pub experience_score: f64,
    pub education_score: f64,
    pub semantic_similarity: f64,
    pub semantic_source: SemanticSource,
    /// Required skills the resume lacks, in required-list order and casing.
    pub missing_skills: Vec<String>,
    /// 1.0 / 0.0 per required skill, keyed by its original casing.
    pub per_skill_score: BTreeMap<String, f64>,
    pub suggestions: Vec<String>,
    pub learning_resources: Vec<String>,
    pub computed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct MatchResultRow {
    pub resume_id: Uuid,
    pub job_id: Uuid,
    pub overall_score: f64,
    pub skills_score: f64,
    pub experience_score: f64,
    pub education_score: f64,
    pub semantic_similarity: f64,
    pub semantic_source: String,
    pub missing_skills: Vec<String>,
    pub per_skill_score: Json<BTreeMap<String, f64>>,
    pub suggestions: Vec<String>,
    pub learning_resources: Vec<String>,
    pub computed_at: DateTime<Utc>,
}

impl From<MatchResultRow> for MatchResult {
    fn from(row: MatchResultRow) -> Self {
        MatchResult {
            resume_id: row.resume_id,
            job_id: row.job_id,
            overall_score: row.overall_score,
            skills_score: row.skills_score,
            experience_score: row.experience_score,
            education_score: row.education_score,
            semantic_similarity: row.semantic_similarity,
            semantic_source: SemanticSource::parse(&row.semantic_source)
                .unwrap_or(SemanticSource::ComponentMean),
            missing_skills: row.missing_skills,
            per_skill_score: row.per_skill_score.0,
            suggestions: row.suggestions,
            learning_resources: row.learning_resources,
            computed_at: row.computed_at,
        }
    }
}
