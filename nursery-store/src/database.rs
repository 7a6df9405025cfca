use std::sync::Arc;

use nursery_core::DocumentStore;
use tracing::info;

use crate::app_config::{StoreBackend, StoreConfig};
use crate::{FirestoreStore, MemoryStore, StoreConfigError};

/// Builds the configured document store backend.
pub async fn connect(config: &StoreConfig) -> Result<Arc<dyn DocumentStore>, StoreConfigError> {
    match config.backend {
        StoreBackend::Memory => {
            let store = match &config.seed_path {
                Some(path) => MemoryStore::from_seed_file(path).await?,
                None => MemoryStore::new(),
            };
            info!("Using in-memory document store");
            Ok(Arc::new(store))
        }
        StoreBackend::Firestore => {
            let firestore = config.firestore.as_ref().ok_or(StoreConfigError::MissingFirestore)?;
            info!(
                "Using Firestore project {} (database {})",
                firestore.project_id, firestore.database
            );
            Ok(Arc::new(FirestoreStore::new(firestore)?))
        }
    }
}
