use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Entry of a company's people listing.
///
/// Only the fields used for ranking are typed; everything else is carried
/// through untouched in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonSummary {
    #[serde(
        default,
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub person_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PersonSummary {
    pub fn new(person_id: impl Into<String>, full_name: &str, title: &str) -> Self {
        Self {
            person_id: Some(person_id.into()),
            full_name: Some(full_name.to_string()),
            title: Some(title.to_string()),
            ..Default::default()
        }
    }
}

/// Specter ids show up both as strings and as bare numbers.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
