//! Core domain types for the voyage journal.
//!
//! Chapter records come from a hand-edited JSON file, so deserialization is
//! best-effort: missing or oddly-typed fields are coerced, never rejected.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// ChapterRecord
// ---------------------------------------------------------------------------

/// One entry of the journal data source: a single voyage segment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterRecord {
    /// Identifier, conventionally `"v" + integer` (e.g. `"v1"`).
    #[serde(default, deserialize_with = "lenient_text")]
    pub id: String,
    /// Chapter number in its string-coerced form.
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub number: Option<String>,
    /// Display title.
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: String,
    /// Free-text date label.
    #[serde(default, deserialize_with = "lenient_text")]
    pub date: String,
    /// Body text; blank lines separate paragraphs.
    #[serde(default, deserialize_with = "lenient_text")]
    pub content: String,
    /// Commentary shown beside the media grid.
    #[serde(default, deserialize_with = "lenient_text")]
    pub analysis: String,
    /// Image URLs, same-indexed against the paragraphs of `content`.
    ///
    /// Unusable entries (null, non-string, empty) keep their slot as an empty
    /// string so later images stay aligned with their paragraphs.
    #[serde(
        default,
        deserialize_with = "lenient_images",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub images: Vec<String>,
}

impl ChapterRecord {
    /// Minimal record with just an id and title, handy for tests and fixtures.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    /// Set the chapter number.
    pub fn with_number(mut self, number: impl ToString) -> Self {
        self.number = Some(number.to_string());
        self
    }
}

// ---------------------------------------------------------------------------
// Lenient field coercion
// ---------------------------------------------------------------------------

/// Render a JSON number the way a browser would print it: integral values
/// without a fractional part.
fn number_to_string(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 => (f as i64).to_string(),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

fn lenient_text<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => number_to_string(&n),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    })
}

fn lenient_number<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => Some(number_to_string(&n)),
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        _ => None,
    })
}

fn lenient_images<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => s,
                _ => String::new(),
            })
            .collect(),
        _ => Vec::new(),
    })
}
