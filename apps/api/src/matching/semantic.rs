//! Semantic similarity resolution and its two fallbacks.
//!
//! - Flag disabled, or a raw text missing → `ComponentMean` (mean of the three
//!   component scores).
//! - Flag enabled, oracle call fails in any way → `LexicalFallback` (word-level
//!   Jaccard over the truncated raw texts).
//!
//! The two paths fire under different conditions and stay separate.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::matching::scoring::ComponentScores;
use crate::models::match_result::SemanticSource;
use crate::oracle::SimilarityOracle;

/// Characters of each raw text sent to the oracle.
pub const MAX_ORACLE_CHARS: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SemanticScore {
    pub value: f64,
    pub source: SemanticSource,
}

pub async fn resolve_semantic_similarity(
    oracle: &dyn SimilarityOracle,
    enabled: bool,
    resume_text: Option<&str>,
    job_text: Option<&str>,
    components: &ComponentScores,
) -> SemanticScore {
    match (enabled, resume_text, job_text) {
        (true, Some(resume_text), Some(job_text)) => {
            oracle_similarity(oracle, resume_text, job_text).await
        }
        _ => component_mean(components),
    }
}

async fn oracle_similarity(
    oracle: &dyn SimilarityOracle,
    resume_text: &str,
    job_text: &str,
) -> SemanticScore {
    let resume_text = truncate_chars(resume_text, MAX_ORACLE_CHARS);
    let job_text = truncate_chars(job_text, MAX_ORACLE_CHARS);

    match oracle.similarity(resume_text, job_text).await {
        Ok(score) if score.is_finite() => {
            debug!("Semantic similarity from oracle: {score:.4}");
            SemanticScore {
                value: score.clamp(0.0, 1.0),
                source: SemanticSource::Oracle,
            }
        }
        Ok(score) => {
            warn!("Oracle returned non-finite similarity {score}, using lexical fallback");
            lexical_fallback(resume_text, job_text)
        }
        Err(e) => {
            warn!("Oracle similarity failed, using lexical fallback: {e}");
            lexical_fallback(resume_text, job_text)
        }
    }
}

fn lexical_fallback(resume_text: &str, job_text: &str) -> SemanticScore {
    SemanticScore {
        value: lexical_jaccard(resume_text, job_text),
        source: SemanticSource::LexicalFallback,
    }
}

fn component_mean(components: &ComponentScores) -> SemanticScore {
    SemanticScore {
        value: components.mean().clamp(0.0, 1.0),
        source: SemanticSource::ComponentMean,
    }
}

/// Jaccard similarity over lowercased whitespace-separated words.
pub fn lexical_jaccard(a: &str, b: &str) -> f64 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    let words_a: HashSet<&str> = a.split_whitespace().collect();
    let words_b: HashSet<&str> = b.split_whitespace().collect();

    let union = words_a.union(&words_b).count();
    if union == 0 {
        return 0.0;
    }
    words_a.intersection(&words_b).count() as f64 / union as f64
}

/// First `max_chars` characters of `text`, never splitting a code point.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}
