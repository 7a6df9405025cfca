use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::lenient;
use crate::published::Published;

/// A nursery listed in the directory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Nursery {
    #[serde(deserialize_with = "lenient::text")]
    pub id: String,
    #[serde(deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(deserialize_with = "lenient::text")]
    pub location: String,
    #[serde(deserialize_with = "lenient::text_list")]
    pub categories: Vec<String>,
    #[serde(deserialize_with = "lenient::text_list")]
    pub services: Vec<String>,
    #[serde(deserialize_with = "lenient::truthy")]
    pub featured: bool,
    #[serde(skip_serializing_if = "Published::is_unset")]
    pub published: Published,
    /// Display fields (images, phone numbers, ...) passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A time-limited promotion, optionally tied to a nursery.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Offer {
    #[serde(deserialize_with = "lenient::text")]
    pub id: String,
    #[serde(deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(deserialize_with = "lenient::text")]
    pub description: String,
    #[serde(deserialize_with = "lenient::optional_text_list", skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient::optional_text", skip_serializing_if = "Option::is_none")]
    pub nursery_name: Option<String>,
    /// Raw end date as stored; the server decides activity before sending it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<Value>,
    #[serde(skip_serializing_if = "Published::is_unset")]
    pub published: Published,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Category {
    #[serde(deserialize_with = "lenient::text")]
    pub id: String,
    #[serde(deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(deserialize_with = "lenient::optional_text", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub order: Option<f64>,
    #[serde(skip_serializing_if = "Published::is_unset")]
    pub published: Published,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Sponsor display data is opaque here; only identity and visibility matter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sponsor {
    #[serde(deserialize_with = "lenient::text")]
    pub id: String,
    #[serde(skip_serializing_if = "Published::is_unset")]
    pub published: Published,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
