use std::sync::Arc;

use crate::service::ProjectService;
use crate::storage::ProjectStore;

#[derive(Clone)]
pub struct AppState {
    pub service: ProjectService,
}

impl AppState {
    pub fn new(store: Arc<dyn ProjectStore>) -> Self {
        Self {
            service: ProjectService::new(store),
        }
    }
}
