use std::sync::Arc;

use crate::randomuser::client::PersonSource;

/// Shared application state injected into all route handlers via Axum extractors.
/// Immutable after startup; requests share nothing mutable.
#[derive(Clone)]
pub struct AppState {
    /// Upstream person generator. Production uses `RandomUserClient`.
    pub people: Arc<dyn PersonSource>,
}
