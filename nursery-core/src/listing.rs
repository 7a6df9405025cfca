//! Read-side rules for the public listing endpoints.
//!
//! Every listing is a full collection scan followed by an in-memory filter;
//! nothing is pushed down to the store.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;
use tracing::warn;

use crate::{Collection, Document, DocumentStore, StoreError};

/// Document id of the singleton settings record.
pub const SITE_SETTINGS_ID: &str = "site";

#[derive(Debug, thiserror::Error)]
#[error("Failed to load {collection}: {source}")]
pub struct ListingError {
    pub collection: Collection,
    #[source]
    pub source: StoreError,
}

pub type ListingResult<T> = Result<T, ListingError>;

/// Scans `collection` and keeps the documents accepted by `keep`, in scan order.
pub async fn scan_and_filter<F>(
    store: &dyn DocumentStore,
    collection: Collection,
    mut keep: F,
) -> ListingResult<Vec<Document>>
where
    F: FnMut(&Document) -> bool,
{
    let documents = store
        .scan(collection.as_str())
        .await
        .map_err(|source| ListingError { collection, source })?;

    Ok(documents.into_iter().filter(|doc| keep(doc)).collect())
}

pub async fn list_nurseries(store: &dyn DocumentStore) -> ListingResult<Vec<Value>> {
    let docs = scan_and_filter(store, Collection::Nurseries, Document::is_visible).await?;
    Ok(docs.into_iter().map(Document::into_json).collect())
}

pub async fn list_sponsors(store: &dyn DocumentStore) -> ListingResult<Vec<Value>> {
    let docs = scan_and_filter(store, Collection::Sponsors, Document::is_visible).await?;
    Ok(docs.into_iter().map(Document::into_json).collect())
}

/// Published offers that have not ended as of `now`.
pub async fn list_offers(store: &dyn DocumentStore, now: DateTime<Utc>) -> ListingResult<Vec<Value>> {
    let docs = scan_and_filter(store, Collection::Offers, |doc| {
        match classify_offer(doc, now) {
            OfferActivity::Active => true,
            OfferActivity::InvalidEndDate(raw) => {
                warn!(offer_id = %doc.id, end_date = %raw, "Invalid endDate for offer");
                false
            }
            OfferActivity::Hidden | OfferActivity::Expired => false,
        }
    })
    .await?;

    Ok(docs.into_iter().map(Document::into_json).collect())
}

/// Published categories, ascending by `order`.
pub async fn list_categories(store: &dyn DocumentStore) -> ListingResult<Vec<Value>> {
    let mut docs = scan_and_filter(store, Collection::Categories, Document::is_visible).await?;
    sort_by_order(&mut docs);
    Ok(docs.into_iter().map(Document::into_json).collect())
}

/// The singleton settings record, if one has been stored.
pub async fn site_settings(store: &dyn DocumentStore) -> ListingResult<Option<Value>> {
    let collection = Collection::Settings;
    let doc = store
        .get(collection.as_str(), SITE_SETTINGS_ID)
        .await
        .map_err(|source| ListingError { collection, source })?;

    Ok(doc.map(Document::into_json))
}

// ============================================================================
// Offers
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum OfferActivity {
    Hidden,
    Active,
    Expired,
    /// Carries the raw stored value for logging.
    InvalidEndDate(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndDate {
    /// No end date: the offer never expires.
    Open,
    At(DateTime<Utc>),
    Invalid,
}

pub fn classify_offer(doc: &Document, now: DateTime<Utc>) -> OfferActivity {
    if !doc.is_visible() {
        return OfferActivity::Hidden;
    }

    let raw = doc.field("endDate");
    match raw.map_or(EndDate::Open, parse_end_date) {
        EndDate::Open => OfferActivity::Active,
        EndDate::At(end) if end >= now => OfferActivity::Active,
        EndDate::At(_) => OfferActivity::Expired,
        EndDate::Invalid => OfferActivity::InvalidEndDate(match raw {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        }),
    }
}

/// Interprets a stored `endDate`.
///
/// Falsy values (`null`, `false`, `0`, `""`) mean "no end date". Numbers are
/// epoch milliseconds. Strings may be RFC 3339, RFC 2822, an ISO 8601
/// date-time down to minute precision, a bare date, `YYYY-MM` or `YYYY`;
/// values without an offset are taken as UTC.
pub fn parse_end_date(raw: &Value) -> EndDate {
    match raw {
        Value::Null | Value::Bool(false) => EndDate::Open,
        Value::Number(n) => match n.as_f64() {
            Some(ms) if ms == 0.0 || ms.is_nan() => EndDate::Open,
            Some(ms) => DateTime::from_timestamp_millis(ms.trunc() as i64).map_or(EndDate::Invalid, EndDate::At),
            None => EndDate::Invalid,
        },
        Value::String(s) if s.is_empty() => EndDate::Open,
        Value::String(s) => parse_date_str(s.trim()).map_or(EndDate::Invalid, EndDate::At),
        Value::Bool(true) | Value::Array(_) | Value::Object(_) => EndDate::Invalid,
    }
}

/// Minute precision with an offset; `%#z` also accepts `Z`.
const OFFSET_DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M%#z", "%Y-%m-%d %H:%M%#z"];

const NAIVE_DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

fn parse_date_str(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in OFFSET_DATE_TIME_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    // A trailing `Z` on an otherwise naive value is UTC as well.
    let naive = s.strip_suffix('Z').or_else(|| s.strip_suffix('z')).unwrap_or(s);
    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(naive, format) {
            return Some(dt.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(naive, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    parse_partial_date(s)
}

/// `YYYY-MM` and `YYYY`, read as midnight UTC on the first day.
fn parse_partial_date(s: &str) -> Option<DateTime<Utc>> {
    let digits = |part: &str, len: usize| part.len() == len && part.bytes().all(|b| b.is_ascii_digit());
    let (year, month) = match s.split_once('-') {
        Some((year, month)) if digits(year, 4) && digits(month, 2) => (year, month),
        None if digits(s, 4) => (s, "01"),
        _ => return None,
    };

    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)?
        .and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc())
}

// ============================================================================
// Categories
// ============================================================================

fn order_of(doc: &Document) -> Option<f64> {
    let order = match doc.field("order")? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    order.filter(|o| !o.is_nan())
}

/// Stable ascending sort on `order`; documents without a numeric order go last.
pub fn sort_by_order(docs: &mut [Document]) {
    docs.sort_by(|a, b| match (order_of(a), order_of(b)) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{Duration, TimeZone};
    use serde_json::json;
    use std::collections::HashMap;
    use std::io;
    use std::sync::{Arc, Mutex};

    use crate::StoreResult;

    /// Formatted log lines, shared with a thread-local subscriber.
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl LogBuffer {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    #[derive(Default)]
    struct FakeStore {
        collections: HashMap<String, Vec<Document>>,
        broken: Vec<String>,
    }

    impl FakeStore {
        fn with(mut self, collection: &str, docs: Vec<Document>) -> Self {
            self.collections.insert(collection.to_string(), docs);
            self
        }

        fn broken(mut self, collection: &str) -> Self {
            self.broken.push(collection.to_string());
            self
        }
    }

    #[async_trait]
    impl DocumentStore for FakeStore {
        async fn scan(&self, collection: &str) -> StoreResult<Vec<Document>> {
            if self.broken.iter().any(|c| c == collection) {
                return Err(StoreError::Unavailable("connection reset".into()));
            }
            Ok(self.collections.get(collection).cloned().unwrap_or_default())
        }

        async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Document>> {
            let docs = self.scan(collection).await?;
            Ok(docs.into_iter().find(|d| d.id == id))
        }
    }

    fn doc(id: &str, data: Value) -> Document {
        match data {
            Value::Object(map) => Document::new(id, map),
            _ => panic!("test data must be an object"),
        }
    }

    fn ids(values: &[Value]) -> Vec<&str> {
        values.iter().map(|v| v["id"].as_str().unwrap()).collect()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_nurseries_hide_unpublished() {
        let store = FakeStore::default().with(
            "nurseries",
            vec![
                doc("a", json!({"name": "A"})),
                doc("b", json!({"name": "B", "published": false})),
                doc("c", json!({"name": "C", "published": true})),
            ],
        );

        let list = list_nurseries(&store).await.unwrap();
        assert_eq!(ids(&list), vec!["a", "c"]);
        assert_eq!(list[0]["name"], "A");
    }

    #[tokio::test]
    async fn test_store_failure_names_collection() {
        let store = FakeStore::default().broken("categories");
        let err = list_categories(&store).await.unwrap_err();
        assert_eq!(err.collection, Collection::Categories);
        assert!(matches!(err.source, StoreError::Unavailable(_)));
    }

    #[test]
    fn offer_without_end_date_is_always_active() {
        let far_future = Utc.with_ymd_and_hms(2999, 1, 1, 0, 0, 0).unwrap();
        for data in [json!({}), json!({"endDate": null}), json!({"endDate": ""})] {
            let offer = doc("o", data);
            assert_eq!(classify_offer(&offer, now()), OfferActivity::Active);
            assert_eq!(classify_offer(&offer, far_future), OfferActivity::Active);
        }
    }

    #[test]
    fn end_date_boundary_is_inclusive() {
        let offer = doc("o", json!({"endDate": "2025-03-10T12:00:00Z"}));
        assert_eq!(classify_offer(&offer, now()), OfferActivity::Active);
        assert_eq!(
            classify_offer(&offer, now() + Duration::milliseconds(1)),
            OfferActivity::Expired
        );
    }

    #[test]
    fn unparsable_end_date_is_reported() {
        let offer = doc("o", json!({"endDate": "not-a-date"}));
        assert_eq!(
            classify_offer(&offer, now()),
            OfferActivity::InvalidEndDate("not-a-date".to_string())
        );
    }

    #[test]
    fn unpublished_offer_is_hidden_before_date_checks() {
        let offer = doc("o", json!({"published": false, "endDate": "not-a-date"}));
        assert_eq!(classify_offer(&offer, now()), OfferActivity::Hidden);
    }

    #[test]
    fn test_parse_end_date_formats() {
        let midnight = Utc.with_ymd_and_hms(2025, 5, 1, 0, 0, 0).unwrap();
        assert_eq!(parse_end_date(&json!("2025-05-01")), EndDate::At(midnight));
        assert_eq!(parse_end_date(&json!("2025-05-01T00:00:00")), EndDate::At(midnight));
        assert_eq!(parse_end_date(&json!("2025-05-01T03:00:00+03:00")), EndDate::At(midnight));
        assert_eq!(parse_end_date(&json!(midnight.timestamp_millis())), EndDate::At(midnight));
        assert_eq!(parse_end_date(&json!(0)), EndDate::Open);
        assert_eq!(parse_end_date(&json!({"seconds": 1})), EndDate::Invalid);

        let ten_utc = Utc.with_ymd_and_hms(2030, 5, 1, 10, 0, 0).unwrap();
        assert_eq!(parse_end_date(&json!("2030-05-01T10:00Z")), EndDate::At(ten_utc));
        assert_eq!(parse_end_date(&json!("2030-05-01T10:00:00z")), EndDate::At(ten_utc));
        assert_eq!(parse_end_date(&json!("2030-05-01T13:00+03:00")), EndDate::At(ten_utc));
        assert_eq!(parse_end_date(&json!("2030-05-01T10:00+03:00")), EndDate::At(ten_utc - Duration::hours(3)));
        assert_eq!(
            parse_end_date(&json!("2030-05")),
            EndDate::At(Utc.with_ymd_and_hms(2030, 5, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(
            parse_end_date(&json!("2030")),
            EndDate::At(Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_end_date(&json!("2030-13")), EndDate::Invalid);
        assert_eq!(parse_end_date(&json!("203")), EndDate::Invalid);
    }

    #[tokio::test]
    async fn test_list_offers_filters() {
        let store = FakeStore::default().with(
            "offers",
            vec![
                doc("open", json!({"title": "Always"})),
                doc("future", json!({"endDate": "2025-04-01"})),
                doc("past", json!({"endDate": "2025-01-01"})),
                doc("bad", json!({"endDate": "not-a-date"})),
                doc("hidden", json!({"published": false})),
            ],
        );

        let list = list_offers(&store, now()).await.unwrap();
        assert_eq!(ids(&list), vec!["open", "future"]);
    }

    #[tokio::test]
    async fn invalid_end_date_is_logged() {
        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let store = FakeStore::default().with(
            "offers",
            vec![
                doc("fine", json!({"endDate": "2025-04-01"})),
                doc("bad-offer", json!({"endDate": "not-a-date"})),
            ],
        );
        let list = list_offers(&store, now()).await.unwrap();
        assert_eq!(ids(&list), vec!["fine"]);

        let output = logs.contents();
        assert!(output.contains("WARN"), "{output}");
        assert!(output.contains("offer_id=bad-offer"), "{output}");
        assert!(output.contains("end_date=not-a-date"), "{output}");
        assert!(!output.contains("offer_id=fine"), "{output}");
    }

    #[tokio::test]
    async fn test_categories_sorted_by_order() {
        let store = FakeStore::default().with(
            "categories",
            vec![
                doc("c3", json!({"order": 3})),
                doc("none", json!({})),
                doc("c1", json!({"order": 1})),
                doc("c2a", json!({"order": 2})),
                doc("hidden", json!({"order": 0, "published": false})),
                doc("c2b", json!({"order": "2"})),
            ],
        );

        let list = list_categories(&store).await.unwrap();
        assert_eq!(ids(&list), vec!["c1", "c2a", "c2b", "c3", "none"]);
    }

    #[test]
    fn sort_is_non_decreasing_for_every_permutation() {
        let orders = [5, 1, 4, 1, 3];
        let base: Vec<Document> = orders
            .iter()
            .enumerate()
            .map(|(i, o)| doc(&format!("c{i}"), json!({"order": o})))
            .collect();

        for rotation in 0..base.len() {
            let mut docs = base.clone();
            docs.rotate_left(rotation);
            docs.reverse();
            sort_by_order(&mut docs);
            let sorted: Vec<f64> = docs.iter().filter_map(order_of).collect();
            assert!(sorted.windows(2).all(|w| w[0] <= w[1]), "{sorted:?}");
        }
    }

    #[tokio::test]
    async fn test_site_settings_lookup() {
        let store = FakeStore::default();
        assert!(site_settings(&store).await.unwrap().is_none());

        let store = store.with("settings", vec![doc("site", json!({"title": "Hub"}))]);
        let settings = site_settings(&store).await.unwrap().unwrap();
        assert_eq!(settings["title"], "Hub");
    }
}
