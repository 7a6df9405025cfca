use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Per-record visibility toggle as stored in the document database.
///
/// Records are visible unless they are explicitly unpublished, so a missing
/// field is kept distinct from an explicit `true` instead of being folded into it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Published {
    Yes,
    No,
    #[default]
    Unset,
}

impl Published {
    /// Reads the raw `published` field of a document. Only the JSON literal
    /// `false` hides a record.
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            Some(Value::Bool(false)) => Published::No,
            Some(Value::Bool(true)) => Published::Yes,
            _ => Published::Unset,
        }
    }

    pub fn is_visible(self) -> bool {
        self != Published::No
    }

    pub fn is_unset(&self) -> bool {
        *self == Published::Unset
    }
}

impl Serialize for Published {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Published::Yes => serializer.serialize_bool(true),
            Published::No => serializer.serialize_bool(false),
            Published::Unset => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for Published {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Published::from_value(Some(&value)))
    }
}
