use std::sync::Arc;

use crate::config::Config;
use crate::extraction::validation::ProfileValidator;
use crate::text_source::TextExtractor;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Document-to-text backend. Default: PdfTextExtractor.
    pub text_extractor: Arc<dyn TextExtractor>,
    /// Profile checker run on every extraction. Default: StructuralValidator.
    pub validator: Arc<dyn ProfileValidator>,
}
