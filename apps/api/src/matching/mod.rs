// Matching core: component scoring, semantic similarity with fallbacks,
// suggestions, and the upserting engine that ties them together.

pub mod engine;
pub mod handlers;
pub mod scoring;
pub mod semantic;
pub mod suggestions;
