use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::match_result::{MatchResult, MatchResultRow};
use crate::store::MatchStore;

/// `match_results` table store. The `(resume_id, job_id)` unique constraint
/// keeps at most one row per pair; `save` upserts on it.
#[derive(Clone)]
pub struct PgMatchStore {
    pool: PgPool,
}

impl PgMatchStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MatchStore for PgMatchStore {
    async fn find(&self, resume_id: Uuid, job_id: Uuid) -> Result<Option<MatchResult>, AppError> {
        let row = sqlx::query_as::<_, MatchResultRow>(
            r#"
            SELECT resume_id, job_id, overall_score, skills_score, experience_score,
                   education_score, semantic_similarity, semantic_source, missing_skills,
                   per_skill_score, suggestions, learning_resources, computed_at
            FROM match_results
            WHERE resume_id = $1 AND job_id = $2
            "#,
        )
        .bind(resume_id)
        .bind(job_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(MatchResult::from))
    }

    async fn save(&self, result: &MatchResult) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO match_results
                (resume_id, job_id, overall_score, skills_score, experience_score,
                 education_score, semantic_similarity, semantic_source, missing_skills,
                 per_skill_score, suggestions, learning_resources, computed_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            ON CONFLICT (resume_id, job_id) DO UPDATE SET
                overall_score = EXCLUDED.overall_score,
                skills_score = EXCLUDED.skills_score,
                experience_score = EXCLUDED.experience_score,
                education_score = EXCLUDED.education_score,
                semantic_similarity = EXCLUDED.semantic_similarity,
                semantic_source = EXCLUDED.semantic_source,
                missing_skills = EXCLUDED.missing_skills,
                per_skill_score = EXCLUDED.per_skill_score,
                suggestions = EXCLUDED.suggestions,
                learning_resources = EXCLUDED.learning_resources,
                computed_at = EXCLUDED.computed_at
            "#,
        )
        .bind(result.resume_id)
        .bind(result.job_id)
        .bind(result.overall_score)
        .bind(result.skills_score)
        .bind(result.experience_score)
        .bind(result.education_score)
        .bind(result.semantic_similarity)
        .bind(result.semantic_source.as_str())
        .bind(&result.missing_skills)
        .bind(Json(&result.per_skill_score))
        .bind(&result.suggestions)
        .bind(&result.learning_resources)
        .bind(result.computed_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_for_resume(&self, resume_id: Uuid) -> Result<u64, AppError> {
        let done = sqlx::query("DELETE FROM match_results WHERE resume_id = $1")
            .bind(resume_id)
            .execute(&self.pool)
            .await?;
        Ok(done.rows_affected())
    }

    async fn delete_for_job(&self, job_id: Uuid) -> Result<u64, AppError> {
        let done = sqlx::query("DELETE FROM match_results WHERE job_id = $1")
            .bind(job_id)
            .execute(&self.pool)
            .await?;
        Ok(done.rows_affected())
    }
}
