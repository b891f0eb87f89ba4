//! Component scores: skills Jaccard, token coverage for experience / education,
//! per-skill presence, missing skills, and the weighted overall score.
//!
//! Every ratio has an explicit zero-denominator guard: 1.0 when the required
//! side is empty, 0.0 when the resume side is empty but the required side is not.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

/// Minimum length (exclusive) for a required token to count toward coverage.
const MIN_TOKEN_LEN: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub semantic: f64,
    pub skills: f64,
    pub experience: f64,
    pub education: f64,
}

/// Weights when semantic similarity is enabled.
pub const SEMANTIC_WEIGHTS: ScoringWeights = ScoringWeights {
    semantic: 0.4,
    skills: 0.3,
    experience: 0.2,
    education: 0.1,
};

/// Weights when semantic similarity is disabled.
pub const TRADITIONAL_WEIGHTS: ScoringWeights = ScoringWeights {
    semantic: 0.0,
    skills: 0.5,
    experience: 0.3,
    education: 0.2,
};

impl ScoringWeights {
    pub fn for_policy(semantic_enabled: bool) -> Self {
        if semantic_enabled {
            SEMANTIC_WEIGHTS
        } else {
            TRADITIONAL_WEIGHTS
        }
    }
}

/// The three profile-derived scores, before semantic similarity is resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComponentScores {
    pub skills: f64,
    pub experience: f64,
    pub education: f64,
}

impl ComponentScores {
    pub fn mean(&self) -> f64 {
        (self.skills + self.experience + self.education) / 3.0
    }
}

fn case_folded(items: &[String]) -> HashSet<String> {
    items.iter().map(|s| s.to_lowercase()).collect()
}

/// Jaccard similarity over case-folded skill sets.
pub fn skills_score(resume_skills: &[String], required_skills: &[String]) -> f64 {
    if required_skills.is_empty() {
        return 1.0;
    }
    if resume_skills.is_empty() {
        return 0.0;
    }

    let have = case_folded(resume_skills);
    let need = case_folded(required_skills);
    let intersection = have.intersection(&need).count();
    let union = have.union(&need).count();

    if union == 0 {
        0.0
    } else {
        intersection as f64 / union as f64
    }
}

/// Asymmetric token coverage: share of qualifying required tokens found as
/// substrings of the resume side. Used for experience and education.
pub fn coverage_score(resume_statements: &[String], required_statements: &[String]) -> f64 {
    if required_statements.is_empty() {
        return 1.0;
    }
    if resume_statements.is_empty() {
        return 0.0;
    }

    let have = resume_statements.join(" ").to_lowercase();
    let need = required_statements.join(" ").to_lowercase();

    let qualifying: Vec<&str> = need
        .split_whitespace()
        .filter(|token| token.chars().count() > MIN_TOKEN_LEN)
        .collect();
    if qualifying.is_empty() {
        return 0.0;
    }

    let matched = qualifying
        .iter()
        .filter(|token| have.contains(*token))
        .count();
    matched as f64 / qualifying.len() as f64
}

/// 1.0 / 0.0 for every required skill, keyed by its original casing.
pub fn per_skill_scores(resume_skills: &[String], required_skills: &[String]) -> BTreeMap<String, f64> {
    let have = case_folded(resume_skills);
    required_skills
        .iter()
        .map(|skill| {
            let score = if have.contains(&skill.to_lowercase()) {
                1.0
            } else {
                0.0
            };
            (skill.clone(), score)
        })
        .collect()
}

/// Required skills absent from the resume, in required order and casing.
pub fn missing_skills(resume_skills: &[String], required_skills: &[String]) -> Vec<String> {
    let have = case_folded(resume_skills);
    required_skills
        .iter()
        .filter(|skill| !have.contains(&skill.to_lowercase()))
        .cloned()
        .collect()
}

/// Fixed weighted sum under the given policy, clamped to [0, 1].
pub fn overall_score(semantic: f64, components: &ComponentScores, weights: &ScoringWeights) -> f64 {
    (weights.semantic * semantic
        + weights.skills * components.skills
        + weights.experience * components.experience
        + weights.education * components.education)
        .clamp(0.0, 1.0)
}
