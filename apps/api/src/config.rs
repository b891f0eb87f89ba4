use anyhow::{Context, Result};

const DEFAULT_HF_API_URL: &str = "https://api-inference.huggingface.co/models";
const DEFAULT_SIMILARITY_MODEL: &str = "sentence-transformers/all-MiniLM-L6-v2";
const DEFAULT_NER_MODEL: &str = "dslim/bert-base-NER";

/// Application configuration loaded from environment variables.
/// Startup fails if a required variable is missing or a value does not parse.
#[derive(Debug, Clone)]
pub struct Config {
    /// Postgres URL for the match-result store. Unset → in-memory store.
    pub database_url: Option<String>,
    pub hf_api_url: String,
    pub hf_api_token: String,
    pub hf_similarity_model: String,
    pub hf_ner_model: String,
    /// Selects the semantic weighting policy and enables the oracle similarity call.
    pub semantic_similarity_enabled: bool,
    pub oracle_timeout_secs: u64,
    pub oracle_max_attempts: u32,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: optional_env("DATABASE_URL"),
            hf_api_url: env_or("HF_API_URL", DEFAULT_HF_API_URL),
            hf_api_token: require_env("HF_API_TOKEN")?,
            hf_similarity_model: env_or("HF_SIMILARITY_MODEL", DEFAULT_SIMILARITY_MODEL),
            hf_ner_model: env_or("HF_NER_MODEL", DEFAULT_NER_MODEL),
            semantic_similarity_enabled: parse_bool(&env_or(
                "SEMANTIC_SIMILARITY_ENABLED",
                "true",
            ))
            .context("SEMANTIC_SIMILARITY_ENABLED must be true or false")?,
            oracle_timeout_secs: env_or("ORACLE_TIMEOUT_SECS", "10")
                .parse::<u64>()
                .context("ORACLE_TIMEOUT_SECS must be a whole number of seconds")?,
            oracle_max_attempts: env_or("ORACLE_MAX_ATTEMPTS", "2")
                .parse::<u32>()
                .context("ORACLE_MAX_ATTEMPTS must be a positive integer")?
                .max(1),
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("unrecognised boolean '{other}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool_accepts_common_spellings() {
        assert!(parse_bool("true").unwrap());
        assert!(parse_bool(" ON ").unwrap());
        assert!(!parse_bool("0").unwrap());
        assert!(!parse_bool("False").unwrap());
    }

    #[test]
    fn test_parse_bool_rejects_garbage() {
        assert!(parse_bool("maybe").is_err());
    }
}
