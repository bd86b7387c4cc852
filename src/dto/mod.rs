use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A note as stored by the notes backend.
///
/// Timestamps are kept exactly as the server sent them, the client never
/// computes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Server-assigned identifier
    pub id: String,
    /// Note title
    pub title: String,
    /// Note content
    pub content: String,
    /// ISO-8601 creation time
    pub created_at: String,
    /// ISO-8601 last update time
    pub updated_at: String,
    /// Fields the backend returned that this client does not know about
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of a create request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteDraft {
    /// Note title
    pub title: String,
    /// Note content
    pub content: String,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}
