use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::match_result::MatchResult;
use crate::store::MatchStore;

/// Process-local store used when no database is configured.
#[derive(Default)]
pub struct InMemoryMatchStore {
    results: RwLock<HashMap<(Uuid, Uuid), MatchResult>>,
}

impl InMemoryMatchStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.results.read().await.len()
    }
}

#[async_trait]
impl MatchStore for InMemoryMatchStore {
    async fn find(&self, resume_id: Uuid, job_id: Uuid) -> Result<Option<MatchResult>, AppError> {
        Ok(self.results.read().await.get(&(resume_id, job_id)).cloned())
    }

    async fn save(&self, result: &MatchResult) -> Result<(), AppError> {
        self.results
            .write()
            .await
            .insert((result.resume_id, result.job_id), result.clone());
        Ok(())
    }

    async fn delete_for_resume(&self, resume_id: Uuid) -> Result<u64, AppError> {
        let mut results = self.results.write().await;
        let before = results.len();
        results.retain(|(r, _), _| *r != resume_id);
        Ok((before - results.len()) as u64)
    }

    async fn delete_for_job(&self, job_id: Uuid) -> Result<u64, AppError> {
        let mut results = self.results.write().await;
        let before = results.len();
        results.retain(|(_, j), _| *j != job_id);
        Ok((before - results.len()) as u64)
    }
}
