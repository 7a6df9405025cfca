pub mod app_config;
pub mod database;
pub mod firestore_repo;
pub mod memory_repo;

pub use database::connect;
pub use firestore_repo::FirestoreStore;
pub use memory_repo::MemoryStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreConfigError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid seed data: {0}")]
    Seed(String),
    #[error("store.backend is firestore but no [store.firestore] section is configured")]
    MissingFirestore,
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}
