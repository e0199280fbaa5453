use std::sync::Arc;

use crate::config::Config;
use crate::screening::extractor::SkillExtractor;
use crate::screening::vocabulary::SkillVocabulary;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable skill source. Default: VocabularySkillExtractor.
    pub extractor: Arc<dyn SkillExtractor>,
    /// Terms recognised by the extractor and the JD keyword endpoint.
    pub vocabulary: Arc<SkillVocabulary>,
}
