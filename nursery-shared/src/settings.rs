use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Site-wide hero and contact configuration.
///
/// `SiteSettings::default()` is what visitors see until the remote record has
/// been fetched; the remote record is layered on top with [`SiteSettings::merged_with`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettings {
    pub title: String,
    pub subtitle: String,
    pub hero_image: String,
    pub benefits: Vec<String>,
    pub contacts: Contacts,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contacts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whatsapp: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            title: "أكبر منصة للمشاتل في المملكة 🌿".to_string(),
            subtitle: "اكتشف أكثر من 500 مشتل ومتجر لأدوات الزراعة في مكان واحد".to_string(),
            hero_image: "https://placehold.co/1200x600/10b981/ffffff?text=Hero+Image".to_string(),
            benefits: vec![
                "توصيل سريع".to_string(),
                "أفضل الأسعار".to_string(),
                "استشارات مجانية".to_string(),
                "دعم فني متاح".to_string(),
            ],
            contacts: Contacts {
                whatsapp: Some("966551234567".to_string()),
                extra: Map::new(),
            },
            extra: Map::new(),
        }
    }
}

impl SiteSettings {
    /// Shallow overlay: every top-level key present in `remote` replaces ours.
    /// Nested objects such as `contacts` are replaced whole, not merged.
    ///
    /// A key whose value has the wrong shape is skipped and the current value kept.
    pub fn merged_with(&self, remote: &Value) -> SiteSettings {
        let Value::Object(remote) = remote else {
            return self.clone();
        };

        let mut merged = self.clone();
        for (key, value) in remote {
            let Ok(Value::Object(mut candidate)) = serde_json::to_value(&merged) else {
                break;
            };
            candidate.insert(key.clone(), value.clone());
            if let Ok(next) = serde_json::from_value(Value::Object(candidate)) {
                merged = next;
            }
        }
        merged
    }
}
