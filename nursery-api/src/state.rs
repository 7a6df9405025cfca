use std::sync::Arc;

use nursery_core::DocumentStore;
use nursery_store::app_config::Config;

use crate::middleware::AllowedOrigins;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub origins: AllowedOrigins,
    pub body_limit_bytes: usize,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, config: &Config) -> Self {
        Self {
            store,
            origins: AllowedOrigins::new(config.cors.allowed_origins.iter().cloned()),
            body_limit_bytes: config.server.body_limit_bytes,
        }
    }
}
