use std::sync::Arc;

use crate::config::Config;
use crate::matching::engine::SimilarityEngine;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Owns the extractor, oracle client and result store.
    pub engine: Arc<SimilarityEngine>,
    pub config: Config,
}
