use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

const MATCH_RESULTS_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS match_results (
    id                  BIGSERIAL PRIMARY KEY,
    resume_id           UUID NOT NULL,
    job_id              UUID NOT NULL,
    overall_score       DOUBLE PRECISION NOT NULL,
    skills_score        DOUBLE PRECISION NOT NULL,
    experience_score    DOUBLE PRECISION NOT NULL,
    education_score     DOUBLE PRECISION NOT NULL,
    semantic_similarity DOUBLE PRECISION NOT NULL,
    semantic_source     TEXT NOT NULL DEFAULT 'component_mean',
    missing_skills      TEXT[] NOT NULL DEFAULT '{}',
    per_skill_score     JSONB NOT NULL DEFAULT '{}'::jsonb,
    suggestions         TEXT[] NOT NULL DEFAULT '{}',
    learning_resources  TEXT[] NOT NULL DEFAULT '{}',
    computed_at         TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT match_results_pair_unique UNIQUE (resume_id, job_id)
)
"#;

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
        .context("Failed to connect to PostgreSQL")?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Creates the `match_results` table and its pair constraint if missing.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    sqlx::query(MATCH_RESULTS_SCHEMA)
        .execute(pool)
        .await
        .context("Failed to create match_results table")?;
    info!("match_results schema ready");
    Ok(())
}
