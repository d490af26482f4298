use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Body of a note generation request.
///
/// Company and founder data are free-form: every field is read leniently and
/// a value of an unexpected shape counts as absent. Only a missing or falsy
/// `initials`, `companyData` or `founderData` fails validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NoteRequest {
    #[serde(deserialize_with = "lenient_text")]
    pub initials: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub growth_metrics: Option<String>,
    #[serde(deserialize_with = "required_object")]
    pub company_data: Option<CompanyData>,
    #[serde(deserialize_with = "required_list")]
    pub founder_data: Option<Vec<FounderData>>,
}

/// Company record, as returned by the people directory.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CompanyData {
    #[serde(deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient_object")]
    pub website: Option<Link>,
    #[serde(deserialize_with = "lenient_object")]
    pub socials: Option<Socials>,
    #[serde(deserialize_with = "lenient_object")]
    pub funding: Option<Funding>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Link {
    #[serde(deserialize_with = "lenient_text")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Socials {
    #[serde(deserialize_with = "lenient_object")]
    pub linkedin: Option<Link>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Funding {
    #[serde(deserialize_with = "lenient_list")]
    pub round_details: Vec<FundingRound>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FundingRound {
    #[serde(deserialize_with = "lenient_text")]
    pub date: Option<String>,
    #[serde(deserialize_with = "lenient_amount")]
    pub raised: Option<f64>,
    #[serde(deserialize_with = "lenient_strings")]
    pub investors: Vec<String>,
    #[serde(rename = "type", deserialize_with = "lenient_text")]
    pub round_type: Option<String>,
}

/// Person record, as returned by the people directory.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FounderData {
    #[serde(deserialize_with = "lenient_text")]
    pub full_name: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub linkedin_url: Option<String>,
    #[serde(deserialize_with = "lenient_list")]
    pub experience: Vec<WorkExperience>,
    #[serde(deserialize_with = "lenient_list")]
    pub education: Vec<EducationEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WorkExperience {
    #[serde(deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub company_name: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub start_date: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub end_date: Option<String>,
    #[serde(deserialize_with = "lenient_bool")]
    pub is_current: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EducationEntry {
    #[serde(deserialize_with = "lenient_text")]
    pub degree_title: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub start_date: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub end_date: Option<String>,
}

/// `null`, `false`, `0` and `""` count as not provided.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Objects only; every record type here accepts any object.
fn from_object<T: DeserializeOwned>(value: Value) -> Option<T> {
    match value {
        Value::Object(_) => T::deserialize(value).ok(),
        _ => None,
    }
}

/// Scalars are rendered as text; arrays and objects are dropped.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

fn lenient_object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(from_object(Value::deserialize(deserializer)?))
}

/// Non-array values become an empty list; non-object entries are skipped.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items.into_iter().filter_map(from_object).collect(),
        _ => Vec::new(),
    })
}

/// Provided company data of any shape; a non-object renders as all `N/A`.
fn required_object<'de, D>(deserializer: D) -> Result<Option<CompanyData>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if is_falsy(&value) {
        return Ok(None);
    }
    Ok(Some(from_object(value).unwrap_or_default()))
}

/// Provided founder data of any shape; a non-array renders as no founders.
fn required_list<'de, D>(deserializer: D) -> Result<Option<Vec<FounderData>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if is_falsy(&value) {
        return Ok(None);
    }
    Ok(Some(match value {
        Value::Array(items) => items.into_iter().filter_map(from_object).collect(),
        _ => Vec::new(),
    }))
}

/// Amounts arrive as numbers or numeric strings depending on the source.
fn lenient_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', "").parse().ok(),
        _ => None,
    })
}

/// Investor lists: strings are kept, anything else is skipped.
fn lenient_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) if !s.trim().is_empty() => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(matches!(Value::deserialize(deserializer)?, Value::Bool(true)))
}
