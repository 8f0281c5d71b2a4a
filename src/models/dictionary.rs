use serde::{Deserialize, Serialize};
use sonic_rs::Value;

use super::record;

/// A dictionary entry as returned by the backend.
///
/// The term string may arrive as `termName` or `term`; see
/// [`DictionaryTerm::term_name`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DictionaryTerm {
    raw: Value,
}

impl DictionaryTerm {
    pub fn from_value(raw: Value) -> Self {
        Self { raw }
    }

    pub fn as_value(&self) -> &Value {
        &self.raw
    }

    pub fn id(&self) -> Option<String> {
        record::id(&self.raw)
    }

    /// The term string. A non-empty `termName` wins, then `term`, then `""`.
    pub fn term_name(&self) -> &str {
        record::text(&self.raw, "termName")
            .or_else(|| record::text(&self.raw, "term"))
            .unwrap_or("")
    }

    /// Uppercased first character of the term name, if any.
    pub fn initial(&self) -> Option<char> {
        self.term_name()
            .chars()
            .next()
            .and_then(|c| c.to_uppercase().next())
    }

    pub fn definition(&self) -> &str {
        record::text_or_empty(&self.raw, "definition")
    }

    pub fn category(&self) -> Option<&str> {
        record::text(&self.raw, "category")
    }

    pub fn example(&self) -> Option<&str> {
        record::text(&self.raw, "example")
    }

    pub fn related_terms(&self) -> Option<&str> {
        record::text(&self.raw, "relatedTerms")
    }
}

/// Payload for creating a dictionary entry. Uses the backend's `term` name.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TermDraft {
    pub term: String,
    pub definition: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_terms: Option<String>,
}
