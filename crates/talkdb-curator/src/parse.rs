//! Parsing of the model's JSON-array answer.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use talkdb_core::{AgeGroup, Category, Situation};

static FENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"```(?:json)?\s*([\s\S]*?)\s*```").expect("valid fence regex")
});

/// One topic proposed by the model for a headline.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CandidateTopic {
    #[serde(default, deserialize_with = "null_as_default")]
    pub original_title: String,
    pub is_safe: bool,
    pub talk_topic: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default)]
    pub conversation_tip: Option<String>,
    pub category: Category,
    #[serde(rename = "situation", default, deserialize_with = "null_as_default")]
    pub situations: Vec<Situation>,
    pub age_group: AgeGroup,
}

// Models write `null` as often as they omit a key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    /// Well-formed entries; entries that failed to deserialize were dropped.
    Parsed(Vec<CandidateTopic>),
    /// Blank answer or an empty array.
    Empty,
    Malformed(String),
}

/// Parse a model answer that should contain a JSON array of topics.
///
/// Markdown code fences are unwrapped and the first `[` that starts a
/// well-formed JSON array is used, so prose around the array (brackets
/// included) is tolerated.
#[must_use]
pub fn parse_ai_response(text: &str) -> ParseOutcome {
    let text = text.trim();
    if text.is_empty() {
        return ParseOutcome::Empty;
    }

    let unfenced = FENCE_RE
        .captures(text)
        .and_then(|c| c.get(1))
        .map_or(text, |m| m.as_str());

    let entries = match first_json_array(unfenced) {
        Ok(entries) => entries,
        Err(reason) => return ParseOutcome::Malformed(reason),
    };
    if entries.is_empty() {
        return ParseOutcome::Empty;
    }

    let total = entries.len();
    let topics: Vec<CandidateTopic> = entries
        .into_iter()
        .filter_map(|v| serde_json::from_value::<CandidateTopic>(v).ok())
        .filter(|t| !t.talk_topic.trim().is_empty())
        .collect();

    if topics.is_empty() {
        return ParseOutcome::Malformed(format!("none of {total} entries were valid topics"));
    }
    if topics.len() < total {
        tracing::debug!(
            dropped = total - topics.len(),
            kept = topics.len(),
            "dropped invalid topic entries"
        );
    }
    ParseOutcome::Parsed(topics)
}

/// Deserialize from each `[` in turn and keep the first array that parses.
/// Trailing text after the array is ignored.
fn first_json_array(text: &str) -> Result<Vec<Value>, String> {
    let mut first_error = None;
    for (start, _) in text.match_indices('[') {
        match serde_json::Deserializer::from_str(&text[start..])
            .into_iter::<Vec<Value>>()
            .next()
        {
            Some(Ok(entries)) => return Ok(entries),
            Some(Err(e)) => {
                first_error.get_or_insert_with(|| e.to_string());
            }
            None => {}
        }
    }
    Err(first_error.unwrap_or_else(|| "no JSON array in response".to_string()))
}
