use std::fmt;

use async_trait::async_trait;
use nursery_shared::locale;

use crate::{Document, StoreResult};

/// Read-only access to an external document database.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Full read of every document in `collection`, in the backend's natural order.
    async fn scan(&self, collection: &str) -> StoreResult<Vec<Document>>;

    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Document>>;
}

/// Logical collections served by the listing API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Nurseries,
    Offers,
    Categories,
    Sponsors,
    Settings,
}

impl Collection {
    pub fn as_str(self) -> &'static str {
        match self {
            Collection::Nurseries => "nurseries",
            Collection::Offers => "offers",
            Collection::Categories => "categories",
            Collection::Sponsors => "sponsors",
            Collection::Settings => "settings",
        }
    }

    /// Localized message shown to visitors when this collection cannot be loaded.
    pub fn failure_message(self) -> &'static str {
        match self {
            Collection::Nurseries => locale::NURSERIES_LOAD_FAILED,
            Collection::Offers => locale::OFFERS_LOAD_FAILED,
            Collection::Categories => locale::CATEGORIES_LOAD_FAILED,
            Collection::Sponsors => locale::SPONSORS_LOAD_FAILED,
            Collection::Settings => locale::SETTINGS_LOAD_FAILED,
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
