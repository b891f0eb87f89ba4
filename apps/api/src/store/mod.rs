//! Persistence boundary for match results, keyed by `(resume_id, job_id)`.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::match_result::MatchResult;

#[async_trait]
pub trait MatchStore: Send + Sync {
    async fn find(&self, resume_id: Uuid, job_id: Uuid) -> Result<Option<MatchResult>, AppError>;

    /// Writes `result` as the single stored result for its pair.
    async fn save(&self, result: &MatchResult) -> Result<(), AppError>;

    /// Removes every result for a deleted resume. Returns the number removed.
    async fn delete_for_resume(&self, resume_id: Uuid) -> Result<u64, AppError>;

    /// Removes every result for a deleted job description.
    async fn delete_for_job(&self, job_id: Uuid) -> Result<u64, AppError>;
}
