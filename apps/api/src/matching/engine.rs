//! Similarity engine: combines the component scores, the resolved semantic
//! similarity and the suggestions into a `MatchResult`, then upserts it.
//!
//! Composition is explicit: the engine is handed its extractor, oracle and
//! store. Matching different pairs shares nothing but the pair-lock table.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::TextFeatureExtractor;
use crate::matching::scoring::{
    coverage_score, missing_skills, overall_score, per_skill_scores, skills_score,
    ComponentScores, ScoringWeights,
};
use crate::matching::semantic::resolve_semantic_similarity;
use crate::matching::suggestions::{generate_learning_resources, generate_suggestions};
use crate::models::match_result::MatchResult;
use crate::models::profile::ExtractedProfile;
use crate::oracle::SimilarityOracle;
use crate::store::MatchStore;

type PairKey = (Uuid, Uuid);

pub struct SimilarityEngine {
    extractor: TextFeatureExtractor,
    oracle: Arc<dyn SimilarityOracle>,
    store: Arc<dyn MatchStore>,
    semantic_enabled: bool,
    locks: PairLocks,
}

impl SimilarityEngine {
    pub fn new(
        extractor: TextFeatureExtractor,
        oracle: Arc<dyn SimilarityOracle>,
        store: Arc<dyn MatchStore>,
        semantic_enabled: bool,
    ) -> Self {
        Self {
            extractor,
            oracle,
            store,
            semantic_enabled,
            locks: PairLocks::default(),
        }
    }

    pub fn extractor(&self) -> &TextFeatureExtractor {
        &self.extractor
    }

    /// Scores one pair without touching the store. Never fails: oracle
    /// problems resolve to the lexical fallback.
    pub async fn compute(
        &self,
        resume_id: Uuid,
        job_id: Uuid,
        resume: &ExtractedProfile,
        job: &ExtractedProfile,
    ) -> MatchResult {
        let components = ComponentScores {
            skills: skills_score(&resume.skills, &job.skills),
            experience: coverage_score(&resume.experience_statements, &job.experience_statements),
            education: coverage_score(&resume.education_statements, &job.education_statements),
        };

        let semantic = resolve_semantic_similarity(
            self.oracle.as_ref(),
            self.semantic_enabled,
            resume.text(),
            job.text(),
            &components,
        )
        .await;

        let weights = ScoringWeights::for_policy(self.semantic_enabled);
        let overall = overall_score(semantic.value, &components, &weights);
        let missing = missing_skills(&resume.skills, &job.skills);

        debug!(
            "Scores for resume {resume_id} / job {job_id}: skills={:.3} experience={:.3} education={:.3} semantic={:.3} ({}) overall={:.3}",
            components.skills,
            components.experience,
            components.education,
            semantic.value,
            semantic.source.as_str(),
            overall
        );

        MatchResult {
            resume_id,
            job_id,
            overall_score: overall,
            skills_score: components.skills,
            experience_score: components.experience,
            education_score: components.education,
            semantic_similarity: semantic.value,
            semantic_source: semantic.source,
            per_skill_score: per_skill_scores(&resume.skills, &job.skills),
            suggestions: generate_suggestions(overall, components.skills, &missing),
            learning_resources: generate_learning_resources(&missing),
            missing_skills: missing,
            computed_at: Utc::now(),
        }
    }

    /// Scores the pair and stores the result, overwriting any earlier one.
    pub async fn match_profiles(
        &self,
        resume_id: Uuid,
        job_id: Uuid,
        resume: &ExtractedProfile,
        job: &ExtractedProfile,
    ) -> Result<MatchResult, AppError> {
        let fresh = self.compute(resume_id, job_id, resume, job).await;

        let _pair = self.locks.acquire((resume_id, job_id)).await;
        let result = match self.store.find(resume_id, job_id).await? {
            Some(mut existing) => {
                existing.overwrite_with(fresh);
                info!(
                    "Updated match result for resume {resume_id} / job {job_id} (overall {:.2})",
                    existing.overall_score
                );
                existing
            }
            None => {
                info!(
                    "Created match result for resume {resume_id} / job {job_id} (overall {:.2})",
                    fresh.overall_score
                );
                fresh
            }
        };
        self.store.save(&result).await?;

        Ok(result)
    }

    /// Extracts both profiles from raw text, then matches them.
    pub async fn match_texts(
        &self,
        resume_id: Uuid,
        job_id: Uuid,
        resume_text: &str,
        job_text: &str,
    ) -> Result<MatchResult, AppError> {
        let resume = self.extractor.extract_profile(resume_text).await;
        let job = self.extractor.extract_profile(job_text).await;
        self.match_profiles(resume_id, job_id, &resume, &job).await
    }

    pub async fn get_match(
        &self,
        resume_id: Uuid,
        job_id: Uuid,
    ) -> Result<Option<MatchResult>, AppError> {
        self.store.find(resume_id, job_id).await
    }

    pub async fn forget_resume(&self, resume_id: Uuid) -> Result<u64, AppError> {
        let deleted = self.store.delete_for_resume(resume_id).await?;
        info!("Deleted {deleted} match results for resume {resume_id}");
        Ok(deleted)
    }

    pub async fn forget_job(&self, job_id: Uuid) -> Result<u64, AppError> {
        let deleted = self.store.delete_for_job(job_id).await?;
        info!("Deleted {deleted} match results for job {job_id}");
        Ok(deleted)
    }
}

impl MatchResult {
    /// Replaces every computed field in place, keeping the pair key.
    fn overwrite_with(&mut self, fresh: MatchResult) {
        *self = MatchResult {
            resume_id: self.resume_id,
            job_id: self.job_id,
            ..fresh
        };
    }
}

/// Per-pair async locks serializing the find-then-save upsert.
/// Entries are removed once no task holds or waits on them.
#[derive(Default)]
struct PairLocks {
    inner: Mutex<HashMap<PairKey, Arc<AsyncMutex<()>>>>,
}

impl PairLocks {
    fn table(&self) -> MutexGuard<'_, HashMap<PairKey, Arc<AsyncMutex<()>>>> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    async fn acquire(&self, key: PairKey) -> PairGuard<'_> {
        let lock = self.table().entry(key).or_default().clone();
        let guard = lock.lock_owned().await;
        PairGuard {
            locks: self,
            key,
            guard: Some(guard),
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.table().len()
    }
}

struct PairGuard<'a> {
    locks: &'a PairLocks,
    key: PairKey,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for PairGuard<'_> {
    fn drop(&mut self) {
        self.guard.take();
        let mut table = self.locks.table();
        if table
            .get(&self.key)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            table.remove(&self.key);
        }
    }
}
