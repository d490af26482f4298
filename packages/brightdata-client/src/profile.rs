//! Normalization of scraped LinkedIn profile records.
//!
//! Bright Data's LinkedIn dataset names things differently from what callers
//! want (`position` for the headline, `subtitle` for the employer, `title`
//! for the school). Records also arrive partially filled when a scrape fails.
//! [`normalize_profiles`] maps raw records into [`EnrichedProfile`] with an
//! explicit `"N/A"` wherever a value is missing.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Marker used in place of any missing field.
pub const NOT_AVAILABLE: &str = "N/A";

const NO_DESCRIPTION: &str = "No description provided.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedProfile {
    pub input_url: String,
    pub name: String,
    pub title: String,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub job_title: String,
    pub company: String,
    pub duration: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    pub degree: String,
    pub school: String,
    pub field: String,
}

/// Normalize raw records, dropping any without a name. Order is preserved.
///
/// The normalized field names are accepted as fallbacks, so feeding the
/// serialized output back in yields the same profiles.
pub fn normalize_profiles(records: &[Value]) -> Vec<EnrichedProfile> {
    records.iter().filter_map(normalize_profile).collect()
}

fn normalize_profile(record: &Value) -> Option<EnrichedProfile> {
    let record = record.as_object()?;
    let name = text(record, &["name"])?;

    Some(EnrichedProfile {
        input_url: text_or(record, &["input_url", "url"], NOT_AVAILABLE),
        name,
        title: text_or(record, &["position", "title"], NOT_AVAILABLE),
        experience: entries(record, "experience")
            .map(|exp| Experience {
                job_title: text_or(exp, &["title", "job_title"], NOT_AVAILABLE),
                company: text_or(exp, &["subtitle", "company"], NOT_AVAILABLE),
                duration: text_or(exp, &["duration"], NOT_AVAILABLE),
                description: text_or(exp, &["description"], NO_DESCRIPTION),
            })
            .collect(),
        education: entries(record, "education")
            .map(|edu| Education {
                degree: text_or(edu, &["degree"], NOT_AVAILABLE),
                school: text_or(edu, &["title", "school"], NOT_AVAILABLE),
                field: text_or(edu, &["field"], NOT_AVAILABLE),
            })
            .collect(),
    })
}

/// First non-blank string among `keys`.
fn text(record: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| record.get(*key))
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

fn text_or(record: &Map<String, Value>, keys: &[&str], fallback: &str) -> String {
    text(record, keys).unwrap_or_else(|| fallback.to_string())
}

fn entries<'a>(
    record: &'a Map<String, Value>,
    key: &str,
) -> impl Iterator<Item = &'a Map<String, Value>> + 'a {
    record
        .get(key)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_object)
}
