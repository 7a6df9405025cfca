use nursery_shared::Published;
use serde_json::{Map, Value};

/// A raw document as returned by a collection scan.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub data: Map<String, Value>,
}

impl Document {
    pub fn new(id: impl Into<String>, data: Map<String, Value>) -> Self {
        Self { id: id.into(), data }
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.data.get(name)
    }

    pub fn published(&self) -> Published {
        Published::from_value(self.field("published"))
    }

    pub fn is_visible(&self) -> bool {
        self.published().is_visible()
    }

    /// `{"id": <document id>, ...data}`. A stored `id` field wins over the document id.
    pub fn into_json(self) -> Value {
        let mut out = Map::with_capacity(self.data.len() + 1);
        out.insert("id".to_string(), Value::String(self.id));
        out.extend(self.data);
        Value::Object(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(id: &str, data: Value) -> Document {
        match data {
            Value::Object(map) => Document::new(id, map),
            _ => panic!("test data must be an object"),
        }
    }

    #[test]
    fn test_into_json_spreads_fields() {
        let out = doc("n1", json!({"name": "Green Oasis"})).into_json();
        assert_eq!(out, json!({"id": "n1", "name": "Green Oasis"}));
    }

    #[test]
    fn stored_id_overrides_document_id() {
        let out = doc("n1", json!({"id": "legacy-7"})).into_json();
        assert_eq!(out["id"], "legacy-7");
    }

    #[test]
    fn visibility_follows_published_field() {
        assert!(doc("a", json!({})).is_visible());
        assert!(doc("b", json!({"published": true})).is_visible());
        assert!(!doc("c", json!({"published": false})).is_visible());
    }
}
