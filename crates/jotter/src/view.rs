//! View data derived from application state, and its terminal rendering.

use std::fmt::Write as _;

use serde::Serialize;

use crate::theme::Palette;

/// Label of the summary action when idle.
pub const SUMMARIZE_LABEL: &str = "Summarize with AI";

/// Label of the summary action while a request runs.
pub const SUMMARIZING_LABEL: &str = "Summarizing...";

/// One row of the note list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteListItem {
    /// Note id.
    pub id: String,
    /// Derived title.
    pub title: String,
    /// Derived body preview.
    pub preview: String,
    /// Whether this is the active note.
    pub active: bool,
}

/// What the editor pane shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorView {
    /// No active note.
    Empty,
    /// The active note.
    Note {
        /// Note id.
        id: String,
        /// Full content.
        content: String,
        /// Whether a summary request is running.
        busy: bool,
        /// Displayed summary, if any.
        summary: Option<String>,
    },
}

impl EditorView {
    /// Label for the summary action, or `None` when no note is shown.
    #[must_use]
    pub fn action_label(&self) -> Option<&'static str> {
        match self {
            Self::Empty => None,
            Self::Note { busy: true, .. } => Some(SUMMARIZING_LABEL),
            Self::Note { busy: false, .. } => Some(SUMMARIZE_LABEL),
        }
    }
}

/// Render the note list. Rows are numbered from 1.
#[must_use]
pub fn render_sidebar(items: &[NoteListItem], palette: &Palette) -> String {
    if items.is_empty() {
        return format!(
            "{}\n{}\n",
            palette.muted.apply_to("No notes yet."),
            palette.muted.apply_to("Create one to get started!")
        );
    }

    let mut out = String::new();
    for (index, item) in items.iter().enumerate() {
        let marker = if item.active { '>' } else { ' ' };
        let style = if item.active {
            &palette.active
        } else {
            &palette.title
        };
        let _ = writeln!(
            out,
            "{marker} {:>2}. {}  {}",
            index + 1,
            style.apply_to(&item.title),
            palette.muted.apply_to(short_id(&item.id))
        );
        let _ = writeln!(out, "       {}", palette.muted.apply_to(&item.preview));
    }
    out
}

/// Render the editor pane.
#[must_use]
pub fn render_editor(view: &EditorView, palette: &Palette) -> String {
    match view {
        EditorView::Empty => format!(
            "{}\n{}\n",
            palette.title.apply_to("Select a note"),
            palette.muted.apply_to("Or create a new one to get started.")
        ),
        EditorView::Note {
            id,
            content,
            summary,
            ..
        } => {
            let mut out = String::new();
            let _ = writeln!(
                out,
                "{}  [{}]",
                palette.muted.apply_to(id),
                view.action_label().unwrap_or_default()
            );
            let _ = writeln!(out, "{}", palette.muted.apply_to("-".repeat(40)));
            out.push_str(content);
            if !content.ends_with('\n') {
                out.push('\n');
            }
            if let Some(summary) = summary {
                out.push('\n');
                out.push_str(&render_summary(summary, palette));
            }
            out
        }
    }
}

/// Render a summary (or summary failure) box.
#[must_use]
pub fn render_summary(summary: &str, palette: &Palette) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", palette.title.apply_to("AI Summary"));
    for line in summary.lines() {
        let _ = writeln!(out, "  {}", palette.accent.apply_to(line));
    }
    out
}

/// First block of a UUID, enough to pick a note by eye.
#[must_use]
pub fn short_id(id: &str) -> &str {
    id.split('-').next().unwrap_or(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Theme;

    fn palette() -> Palette {
        Theme::Dark.palette()
    }

    fn item(title: &str, active: bool) -> NoteListItem {
        NoteListItem {
            id: "0f8fad5b-d9cb-469f-a165-70867728950e".to_string(),
            title: title.to_string(),
            preview: "body...".to_string(),
            active,
        }
    }

    #[test]
    fn test_action_label() {
        assert_eq!(EditorView::Empty.action_label(), None);

        let mut view = EditorView::Note {
            id: "x".to_string(),
            content: String::new(),
            busy: false,
            summary: None,
        };
        assert_eq!(view.action_label(), Some(SUMMARIZE_LABEL));

        if let EditorView::Note { busy, .. } = &mut view {
            *busy = true;
        }
        assert_eq!(view.action_label(), Some(SUMMARIZING_LABEL));
    }

    #[test]
    fn test_render_empty_sidebar() {
        let out = render_sidebar(&[], &palette());
        assert!(out.contains("No notes yet."));
    }

    #[test]
    fn test_render_sidebar_rows() {
        let out = render_sidebar(&[item("First", true), item("Second", false)], &palette());
        assert!(out.contains("First"));
        assert!(out.contains("Second"));
        assert!(out.contains(" 1."));
        assert!(out.contains(" 2."));
        assert!(out.contains("0f8fad5b"));
        assert!(out.starts_with('>'));
    }

    #[test]
    fn test_render_empty_editor() {
        let out = render_editor(&EditorView::Empty, &palette());
        assert!(out.contains("Select a note"));
    }

    #[test]
    fn test_render_editor_with_summary() {
        let view = EditorView::Note {
            id: "n1".to_string(),
            content: "# Title\nbody".to_string(),
            busy: false,
            summary: Some("- one\n- two".to_string()),
        };
        let out = render_editor(&view, &palette());
        assert!(out.contains("# Title\nbody\n"));
        assert!(out.contains("AI Summary"));
        assert!(out.contains("- two"));
    }

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("0f8fad5b-d9cb-469f"), "0f8fad5b");
        assert_eq!(short_id("plain"), "plain");
    }
}
