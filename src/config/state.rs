// Application state module
// Shared per-request state: configuration plus the injected event dispatcher

use std::sync::Arc;

use super::types::Config;
use crate::events::Dispatcher;

/// Application state shared by every connection task.
///
/// The dispatcher is injected here instead of living behind a global so
/// handlers can be exercised against a substitute in tests.
pub struct AppState {
    pub config: Config,
    pub dispatcher: Arc<dyn Dispatcher>,
}

impl AppState {
    pub fn new(config: Config, dispatcher: Arc<dyn Dispatcher>) -> Self {
        Self { config, dispatcher }
    }
}
