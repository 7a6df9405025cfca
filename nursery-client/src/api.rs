use std::fmt;

use nursery_shared::{locale, Category, Nursery, Offer, Sponsor};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

pub const DEFAULT_API_BASE: &str = "https://react-firebase-plant-nursery-production.up.railway.app";

/// Remote resources the home page reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Settings,
    Nurseries,
    Offers,
    Categories,
    Sponsors,
}

impl Resource {
    pub fn path(self) -> &'static str {
        match self {
            Resource::Settings => "/api/settings/site",
            Resource::Nurseries => "/api/nurseries",
            Resource::Offers => "/api/offers",
            Resource::Categories => "/api/categories",
            Resource::Sponsors => "/api/sponsors",
        }
    }

    pub fn failure_message(self) -> &'static str {
        match self {
            Resource::Settings => locale::SETTINGS_LOAD_FAILED,
            Resource::Nurseries => locale::NURSERIES_LOAD_FAILED,
            Resource::Offers => locale::OFFERS_LOAD_FAILED,
            Resource::Categories => locale::CATEGORIES_LOAD_FAILED,
            Resource::Sponsors => locale::SPONSORS_LOAD_FAILED,
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{} ({status} from {resource})", .resource.failure_message())]
    Status { resource: Resource, status: StatusCode },
}

/// Thin JSON client for the listing API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: String,
}

impl ApiClient {
    pub fn new(base: impl Into<String>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            base: base.into().trim_end_matches('/').to_string(),
        })
    }

    /// Client for the hosted production API.
    pub fn production() -> Result<Self, ClientError> {
        Self::new(DEFAULT_API_BASE)
    }

    async fn fetch(&self, resource: Resource) -> Result<Value, ClientError> {
        let response = self
            .http
            .get(format!("{}{}", self.base, resource.path()))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status { resource, status });
        }
        Ok(response.json().await?)
    }

    /// Raw settings object, to be overlaid on the built-in defaults.
    pub async fn settings(&self) -> Result<Value, ClientError> {
        self.fetch(Resource::Settings).await
    }

    pub async fn nurseries(&self) -> Result<Vec<Nursery>, ClientError> {
        Ok(records(Resource::Nurseries, self.fetch(Resource::Nurseries).await?))
    }

    pub async fn offers(&self) -> Result<Vec<Offer>, ClientError> {
        Ok(records(Resource::Offers, self.fetch(Resource::Offers).await?))
    }

    pub async fn categories(&self) -> Result<Vec<Category>, ClientError> {
        Ok(records(Resource::Categories, self.fetch(Resource::Categories).await?))
    }

    pub async fn sponsors(&self) -> Result<Vec<Sponsor>, ClientError> {
        Ok(records(Resource::Sponsors, self.fetch(Resource::Sponsors).await?))
    }
}

/// A body that is not an array counts as an empty list; individual records
/// that cannot be read are skipped.
fn records<T: DeserializeOwned>(resource: Resource, body: Value) -> Vec<T> {
    let Value::Array(items) = body else {
        warn!("Expected an array from {}, got {}", resource, kind(&body));
        return Vec::new();
    };

    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!("Skipping unreadable record from {}: {}", resource, err);
                None
            }
        })
        .collect()
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
