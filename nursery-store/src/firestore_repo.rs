use async_trait::async_trait;
use nursery_core::{Document, DocumentStore, StoreError, StoreResult};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::{Map, Number, Value};
use tracing::debug;

use crate::app_config::FirestoreConfig;

/// Reads collections through the Firestore REST API (v1).
#[derive(Clone)]
pub struct FirestoreStore {
    http: reqwest::Client,
    documents_url: String,
    access_token: Option<String>,
    page_size: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListDocumentsResponse {
    #[serde(default)]
    documents: Vec<FirestoreDocument>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FirestoreDocument {
    name: String,
    #[serde(default)]
    fields: Map<String, Value>,
}

impl FirestoreDocument {
    fn into_document(self) -> Document {
        // name: projects/{p}/databases/{d}/documents/{collection}/{id}
        let id = self.name.rsplit('/').next().unwrap_or_default().to_string();
        Document::new(id, decode_fields(&self.fields))
    }
}

impl FirestoreStore {
    pub fn new(config: &FirestoreConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().build()?;
        let documents_url = format!(
            "{}/v1/projects/{}/databases/{}/documents",
            config.base_url.trim_end_matches('/'),
            config.project_id,
            config.database
        );

        Ok(Self {
            http,
            documents_url,
            access_token: config.access_token.clone(),
            page_size: config.page_size,
        })
    }

    async fn send(&self, request: RequestBuilder) -> StoreResult<Response> {
        let request = match &self.access_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        request.send().await.map_err(transport_error)
    }
}

#[async_trait]
impl DocumentStore for FirestoreStore {
    async fn scan(&self, collection: &str) -> StoreResult<Vec<Document>> {
        let url = format!("{}/{}", self.documents_url, collection);
        let mut documents = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self.http.get(&url).query(&[("pageSize", self.page_size)]);
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token)]);
            }

            let response = self.send(request).await?;
            let status = response.status();
            if !status.is_success() {
                return Err(status_error(status, collection));
            }

            let page: ListDocumentsResponse = response.json().await.map_err(transport_error)?;
            debug!("Scanned {} documents from {}", page.documents.len(), collection);
            documents.extend(page.documents.into_iter().map(FirestoreDocument::into_document));

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        Ok(documents)
    }

    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Document>> {
        let url = format!("{}/{}/{}", self.documents_url, collection, id);
        let response = self.send(self.http.get(&url)).await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let doc: FirestoreDocument = response.json().await.map_err(transport_error)?;
                Ok(Some(doc.into_document()))
            }
            status => Err(status_error(status, &format!("{collection}/{id}"))),
        }
    }
}

fn status_error(status: StatusCode, target: &str) -> StoreError {
    let detail = format!("{status} while reading {target}");
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => StoreError::PermissionDenied(detail),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => StoreError::Timeout(detail),
        StatusCode::TOO_MANY_REQUESTS => StoreError::Unavailable(detail),
        s if s.is_server_error() => StoreError::Unavailable(detail),
        _ => StoreError::Backend(detail),
    }
}

fn transport_error(err: reqwest::Error) -> StoreError {
    if err.is_timeout() {
        StoreError::Timeout(err.to_string())
    } else if err.is_connect() {
        StoreError::Unavailable(err.to_string())
    } else if err.is_decode() {
        StoreError::Decode(err.to_string())
    } else {
        StoreError::Backend(err.to_string())
    }
}

// ============================================================================
// Typed value decoding
// ============================================================================

pub fn decode_fields(fields: &Map<String, Value>) -> Map<String, Value> {
    fields
        .iter()
        .map(|(key, value)| (key.clone(), decode_value(value)))
        .collect()
}

/// Converts a Firestore typed value (`{"stringValue": "x"}`, ...) to plain JSON.
///
/// Timestamps, references and bytes stay strings; doubles that JSON cannot
/// represent (NaN, infinities) become `null`.
pub fn decode_value(value: &Value) -> Value {
    let Some((kind, inner)) = value.as_object().and_then(|typed| typed.iter().next()) else {
        return Value::Null;
    };

    match kind.as_str() {
        "booleanValue" => Value::Bool(inner.as_bool().unwrap_or(false)),
        "integerValue" => match inner {
            // int64 is sent as a decimal string
            Value::String(s) => s.parse::<i64>().map(Value::from).unwrap_or(Value::Null),
            Value::Number(n) => Value::Number(n.clone()),
            _ => Value::Null,
        },
        "doubleValue" => inner
            .as_f64()
            .and_then(Number::from_f64)
            .map_or(Value::Null, Value::Number),
        "stringValue" | "timestampValue" | "referenceValue" | "bytesValue" => inner.clone(),
        "geoPointValue" => inner.clone(),
        "arrayValue" => Value::Array(
            inner
                .get("values")
                .and_then(Value::as_array)
                .map(|values| values.iter().map(decode_value).collect())
                .unwrap_or_default(),
        ),
        "mapValue" => Value::Object(
            inner
                .get("fields")
                .and_then(Value::as_object)
                .map(decode_fields)
                .unwrap_or_default(),
        ),
        _ => Value::Null,
    }
}
