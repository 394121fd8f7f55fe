use std::sync::Arc;

use service::storage::DateStorage;
use service::DateService;

/// Shared handler state. Cloned per request; the service itself is shared.
#[derive(Clone)]
pub struct AppState {
    pub dates: Arc<DateService>,
}

impl AppState {
    pub fn new(storage: Arc<dyn DateStorage>) -> Self {
        Self { dates: Arc::new(DateService::new(storage)) }
    }
}
