use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::dictionaries::EngineDictionaries;
use crate::interpreter::document::DocumentFetcher;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Pluggable resume document fetcher. Default: HTTP + PDF extraction.
    /// Tests substitute an in-memory fetcher.
    pub fetcher: Arc<dyn DocumentFetcher>,
    /// Skill and role lookup tables used by the interpreter and recommender.
    /// Injected at startup so tests can swap in small fixtures.
    pub dictionaries: Arc<EngineDictionaries>,
    /// Runtime settings. Currently only consumed at startup.
    #[allow(dead_code)]
    pub config: Config,
}
