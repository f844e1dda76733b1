use std::sync::Arc;

use crate::config::Config;
use crate::documents::fetch::DocumentFetcher;
use crate::skills::Vocabulary;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Built once at startup and only ever read.
    pub vocabulary: Arc<Vocabulary>,
    /// Resolves `pdf_url` references. Default: ReferenceFetcher.
    pub fetcher: Arc<dyn DocumentFetcher>,
}
