//! Core note types for jotter.
//!
//! A note is a free-form text record. Its first line doubles as the title,
//! and the sidebar shows a short preview of what follows.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Content given to notes created without explicit text.
pub const NEW_NOTE_TEMPLATE: &str = "# New Note\n\n";

/// Title shown for notes whose first line is blank.
pub const UNTITLED: &str = "Untitled Note";

/// Number of characters kept in a list preview.
pub const PREVIEW_CHARS: usize = 40;

/// A single note.
///
/// Serialized with camelCase keys and `createdAt` as epoch milliseconds, e.g.
/// `{"id":"…","content":"…","createdAt":1718000000000}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// The note text.
    pub content: String,

    /// When the note was created.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

impl Note {
    /// Create a note with a fresh identifier, timestamped now.
    ///
    /// The timestamp is truncated to milliseconds so it survives persistence
    /// unchanged.
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content: content.into(),
            created_at: Utc::now().trunc_subsecs(3),
        }
    }

    /// Create a note holding [`NEW_NOTE_TEMPLATE`].
    #[must_use]
    pub fn from_template() -> Self {
        Self::new(NEW_NOTE_TEMPLATE)
    }

    /// The title: first line with `#` markers stripped, or [`UNTITLED`].
    #[must_use]
    pub fn title(&self) -> String {
        let first = self.content.lines().next().unwrap_or_default();
        let title = first.replace('#', "");
        let title = title.trim();
        if title.is_empty() {
            UNTITLED.to_string()
        } else {
            title.to_string()
        }
    }

    /// The body preview: text after the first line, trimmed and cut to
    /// [`PREVIEW_CHARS`] characters, followed by an ellipsis.
    #[must_use]
    pub fn preview(&self) -> String {
        let body = self
            .content
            .split_once('\n')
            .map_or("", |(_, rest)| rest)
            .trim();
        let mut preview: String = body.chars().take(PREVIEW_CHARS).collect();
        preview.push_str("...");
        preview
    }

    /// Number of characters in the content once surrounding whitespace is
    /// removed.
    #[must_use]
    pub fn trimmed_len(&self) -> usize {
        self.content.trim().chars().count()
    }
}
