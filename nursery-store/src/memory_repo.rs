use async_trait::async_trait;
use nursery_core::{Document, DocumentStore, StoreResult};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;
use uuid::Uuid;

use crate::StoreConfigError;

/// Store held entirely in memory, for local development and tests.
///
/// Contents are fixed once built; scans return documents in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    collections: HashMap<String, Vec<Document>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, collection: &str, document: Document) -> Self {
        self.collections
            .entry(collection.to_string())
            .or_default()
            .push(document);
        self
    }

    /// Builds a store from `{"<collection>": [{"id": "...", ...fields}, ...], ...}`.
    /// Records without an `id` get a generated one, as the database console does.
    pub fn from_seed(seed: Value) -> Result<Self, StoreConfigError> {
        let Value::Object(collections) = seed else {
            return Err(StoreConfigError::Seed("top level must be an object of collections".into()));
        };

        let mut store = Self::new();
        for (collection, records) in collections {
            let Value::Array(records) = records else {
                return Err(StoreConfigError::Seed(format!("collection `{collection}` must be an array")));
            };
            for record in records {
                let Value::Object(mut data) = record else {
                    return Err(StoreConfigError::Seed(format!("records in `{collection}` must be objects")));
                };
                let id = match data.remove("id") {
                    Some(Value::String(id)) => id,
                    Some(Value::Number(id)) => id.to_string(),
                    _ => Uuid::new_v4().to_string(),
                };
                store = store.with_document(&collection, Document::new(id, data));
            }
        }
        Ok(store)
    }

    pub async fn from_seed_file(path: impl AsRef<Path>) -> Result<Self, StoreConfigError> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path).await?;
        let store = Self::from_seed(serde_json::from_str(&raw)?)?;
        info!(
            "Seeded memory store from {} ({} documents)",
            path.display(),
            store.collections.values().map(Vec::len).sum::<usize>()
        );
        Ok(store)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn scan(&self, collection: &str) -> StoreResult<Vec<Document>> {
        Ok(self.collections.get(collection).cloned().unwrap_or_default())
    }

    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Document>> {
        Ok(self
            .collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|doc| doc.id == id))
            .cloned())
    }
}
