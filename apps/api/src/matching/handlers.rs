//! Axum route handlers for the Matching API.
//!
//! Identity and ownership are resolved by the caller; requests carry plain ids
//! and texts (or already-extracted profiles).

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::match_result::MatchResult;
use crate::models::profile::ExtractedProfile;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub text: String,
}

/// One side of a match: a stored profile, or raw text to extract now.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ProfileInput {
    Extracted(ExtractedProfile),
    Raw { text: String },
}

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub resume_id: Uuid,
    pub job_id: Uuid,
    pub resume: ProfileInput,
    pub job: ProfileInput,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub deleted: u64,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/profiles/extract
pub async fn handle_extract_profile(
    State(state): State<AppState>,
    Json(request): Json<ExtractRequest>,
) -> Result<Json<ExtractedProfile>, AppError> {
    if request.text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }

    let profile = state
        .engine
        .extractor()
        .extract_profile(&request.text)
        .await;
    Ok(Json(profile))
}

/// POST /api/v1/matches
///
/// Scores the pair and upserts the single stored result for it.
pub async fn handle_match(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<MatchResult>, AppError> {
    let resume = resolve_profile(&state, request.resume, "resume").await?;
    let job = resolve_profile(&state, request.job, "job").await?;

    let result = state
        .engine
        .match_profiles(request.resume_id, request.job_id, &resume, &job)
        .await?;
    Ok(Json(result))
}

/// GET /api/v1/matches/:resume_id/:job_id
pub async fn handle_get_match(
    State(state): State<AppState>,
    Path((resume_id, job_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<MatchResult>, AppError> {
    state
        .engine
        .get_match(resume_id, job_id)
        .await?
        .map(Json)
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "No match result for resume {resume_id} and job {job_id}"
            ))
        })
}

/// DELETE /api/v1/resumes/:id/matches
pub async fn handle_forget_resume(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
) -> Result<Json<DeleteResponse>, AppError> {
    let deleted = state.engine.forget_resume(resume_id).await?;
    Ok(Json(DeleteResponse { deleted }))
}

/// DELETE /api/v1/jobs/:id/matches
pub async fn handle_forget_job(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<Json<DeleteResponse>, AppError> {
    let deleted = state.engine.forget_job(job_id).await?;
    Ok(Json(DeleteResponse { deleted }))
}

async fn resolve_profile(
    state: &AppState,
    input: ProfileInput,
    side: &str,
) -> Result<ExtractedProfile, AppError> {
    match input {
        ProfileInput::Extracted(profile) => Ok(profile),
        ProfileInput::Raw { text } if text.trim().is_empty() => Err(AppError::Validation(
            format!("{side} text cannot be empty"),
        )),
        ProfileInput::Raw { text } => Ok(state.engine.extractor().extract_profile(&text).await),
    }
}
