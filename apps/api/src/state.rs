use std::sync::Arc;

use crate::config::StatementSettings;
use crate::statement::generator::StatementGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
/// Immutable after startup; requests share nothing mutable.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable generator. Default: GeminiStatementGenerator. Tests inject a mock.
    pub generator: Arc<dyn StatementGenerator>,
    pub statement: StatementSettings,
}
