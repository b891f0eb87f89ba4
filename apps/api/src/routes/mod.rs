pub mod health;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::matching::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/profiles/extract",
            post(handlers::handle_extract_profile),
        )
        .route("/api/v1/matches", post(handlers::handle_match))
        .route(
            "/api/v1/matches/:resume_id/:job_id",
            get(handlers::handle_get_match),
        )
        .route(
            "/api/v1/resumes/:id/matches",
            delete(handlers::handle_forget_resume),
        )
        .route(
            "/api/v1/jobs/:id/matches",
            delete(handlers::handle_forget_job),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use uuid::Uuid;

    use super::*;
    use crate::config::Config;
    use crate::extraction::TextFeatureExtractor;
    use crate::matching::engine::SimilarityEngine;
    use crate::oracle::stub::StubOracle;
    use crate::oracle::SimilarityOracle;
    use crate::store::memory::InMemoryMatchStore;

    fn test_config() -> Config {
        Config {
            database_url: None,
            hf_api_url: "http://localhost:0".to_string(),
            hf_api_token: "test".to_string(),
            hf_similarity_model: "sim".to_string(),
            hf_ner_model: "ner".to_string(),
            semantic_similarity_enabled: true,
            oracle_timeout_secs: 1,
            oracle_max_attempts: 1,
            port: 0,
            rust_log: "info".to_string(),
        }
    }

    fn test_router(oracle: StubOracle) -> Router {
        let config = test_config();
        let oracle: Arc<dyn SimilarityOracle> = Arc::new(oracle);
        let engine = SimilarityEngine::new(
            TextFeatureExtractor::new(oracle.clone()),
            oracle,
            Arc::new(InMemoryMatchStore::new()),
            config.semantic_similarity_enabled,
        );
        build_router(AppState {
            engine: Arc::new(engine),
            config,
        })
    }

    async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header("content-type", "application/json")
                .body(Body::from(body.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        let response = tokio::time::timeout(Duration::from_secs(5), router.clone().oneshot(request))
            .await
            .unwrap()
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_health_reports_policy() {
        let router = test_router(StubOracle::failing());
        let (status, body) = send(&router, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["scoring_policy"], "semantic");
    }

    #[tokio::test]
    async fn test_extract_profile_rejects_blank_text() {
        let router = test_router(StubOracle::failing());
        let (status, body) = send(
            &router,
            "POST",
            "/api/v1/profiles/extract",
            Some(json!({"text": "   "})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_extract_profile_returns_dictionary_skills() {
        let router = test_router(StubOracle::failing());
        let (status, body) = send(
            &router,
            "POST",
            "/api/v1/profiles/extract",
            Some(json!({"text": "Experienced in Java and React\nBachelor of Engineering"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["skills"], json!(["Java", "React"]));
        assert_eq!(body["education_statements"], json!(["Bachelor", "Engineering"]));
    }

    #[tokio::test]
    async fn test_match_then_fetch_same_pair() {
        let router = test_router(StubOracle::failing());
        let (resume_id, job_id) = (Uuid::new_v4(), Uuid::new_v4());
        let request = json!({
            "resume_id": resume_id,
            "job_id": job_id,
            "resume": {"text": "Java developer"},
            "job": {
                "skills": ["Java", "Python"],
                "experience_statements": [],
                "education_statements": [],
                "raw_text": "Java and Python developer"
            }
        });

        let (status, created) = send(&router, "POST", "/api/v1/matches", Some(request.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(created["missing_skills"], json!(["Python"]));
        assert_eq!(created["semantic_source"], "lexical_fallback");

        let (_, again) = send(&router, "POST", "/api/v1/matches", Some(request)).await;
        let uri = format!("/api/v1/matches/{resume_id}/{job_id}");
        let (status, fetched) = send(&router, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["computed_at"], again["computed_at"]);
    }

    #[tokio::test]
    async fn test_unknown_pair_is_404() {
        let router = test_router(StubOracle::failing());
        let uri = format!("/api/v1/matches/{}/{}", Uuid::new_v4(), Uuid::new_v4());
        let (status, body) = send(&router, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_delete_resume_matches() {
        let router = test_router(StubOracle::failing());
        let resume_id = Uuid::new_v4();
        let request = json!({
            "resume_id": resume_id,
            "job_id": Uuid::new_v4(),
            "resume": {"text": "SQL"},
            "job": {"text": "SQL"}
        });
        send(&router, "POST", "/api/v1/matches", Some(request)).await;

        let uri = format!("/api/v1/resumes/{resume_id}/matches");
        let (status, body) = send(&router, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["deleted"], 1);
    }
}
