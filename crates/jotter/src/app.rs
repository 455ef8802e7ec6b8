//! Application controller.
//!
//! [`App`] owns the notebook, the theme and the summary session. Front ends
//! send it [`Intent`]s and re-render from [`App::sidebar`] and
//! [`App::editor`] afterwards. Whenever the active note changes the summary
//! session is told, which closes any displayed summary.

use tracing::info;

use crate::error::{Error, Result};
use crate::notebook::Notebook;
use crate::session::{SummaryOutcome, SummarySession};
use crate::store::Store;
use crate::summarize::TextGenerator;
use crate::theme::Theme;
use crate::view::{EditorView, NoteListItem};

/// A user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Create a note from the template.
    AddNote,
    /// Create a note with the given content.
    AddNoteWithContent(String),
    /// Delete a note.
    DeleteNote(String),
    /// Make a note active.
    SelectNote(String),
    /// Replace a note's content.
    UpdateContent {
        /// Target note.
        id: String,
        /// New content.
        content: String,
    },
    /// Switch between light and dark.
    ToggleTheme,
    /// Set a specific theme.
    SetTheme(Theme),
    /// Close the displayed summary.
    DismissSummary,
}

/// Result of applying an [`Intent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A note was created with this id.
    Added(String),
    /// Whether a note was actually deleted.
    Deleted(bool),
    /// The active note changed.
    Selected,
    /// A note's content changed.
    Updated,
    /// The theme is now this value.
    ThemeChanged(Theme),
    /// The summary was closed.
    Dismissed,
}

/// The application state.
#[derive(Debug)]
pub struct App {
    notebook: Notebook,
    theme: Theme,
    session: SummarySession,
}

impl App {
    /// Load notes and theme from `store`.
    ///
    /// `min_summary_chars` is the trimmed length a note needs before a
    /// summary is requested.
    #[must_use]
    pub fn load(store: Store, min_summary_chars: usize) -> Self {
        let theme = Theme::load(&store);
        let notebook = Notebook::load(store);
        info!("Loaded {} notes, theme {}", notebook.len(), theme);
        Self {
            notebook,
            theme,
            session: SummarySession::new(min_summary_chars),
        }
    }

    /// The note collection.
    #[must_use]
    pub fn notebook(&self) -> &Notebook {
        &self.notebook
    }

    /// The current theme.
    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// The summary session.
    #[must_use]
    pub fn session(&self) -> &SummarySession {
        &self.session
    }

    /// Give back the underlying store.
    #[must_use]
    pub fn into_store(self) -> Store {
        self.notebook.into_store()
    }

    /// Apply a user action.
    ///
    /// The summary session is told about the active note afterwards, whether
    /// or not the action succeeded.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown note ids or when persisting fails.
    pub fn apply(&mut self, intent: Intent) -> Result<Outcome> {
        let outcome = self.dispatch(intent);
        self.session.active_note_changed(self.notebook.active_id());
        outcome
    }

    fn dispatch(&mut self, intent: Intent) -> Result<Outcome> {
        let outcome = match intent {
            Intent::AddNote => Outcome::Added(self.notebook.add()?.id.clone()),
            Intent::AddNoteWithContent(content) => {
                Outcome::Added(self.notebook.add_with_content(content)?.id.clone())
            }
            Intent::DeleteNote(id) => Outcome::Deleted(self.notebook.delete(&id)?),
            Intent::SelectNote(id) => {
                self.notebook.select(&id)?;
                Outcome::Selected
            }
            Intent::UpdateContent { id, content } => {
                self.notebook.update_content(&id, content)?;
                Outcome::Updated
            }
            Intent::ToggleTheme => self.set_theme(self.theme.toggled())?,
            Intent::SetTheme(theme) => self.set_theme(theme)?,
            Intent::DismissSummary => {
                self.session.dismiss();
                Outcome::Dismissed
            }
        };
        Ok(outcome)
    }

    fn set_theme(&mut self, theme: Theme) -> Result<Outcome> {
        theme.save(self.notebook.store())?;
        self.theme = theme;
        Ok(Outcome::ThemeChanged(theme))
    }

    /// Summarize the active note.
    pub async fn summarize(&mut self, generator: &dyn TextGenerator) -> SummaryOutcome {
        self.session
            .summarize(self.notebook.active(), generator)
            .await
    }

    /// Resolve a user-supplied note reference.
    ///
    /// Accepts a full id, a 1-based position in the list, or an unambiguous
    /// id prefix.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoteNotFound`] when nothing (or more than one note)
    /// matches.
    pub fn resolve(&self, reference: &str) -> Result<String> {
        let reference = reference.trim();
        let notes = self.notebook.notes();

        if let Some(note) = self.notebook.get(reference) {
            return Ok(note.id.clone());
        }

        if let Ok(position) = reference.parse::<usize>() {
            if let Some(note) = position.checked_sub(1).and_then(|i| notes.get(i)) {
                return Ok(note.id.clone());
            }
        }

        if !reference.is_empty() {
            let mut matches = notes.iter().filter(|n| n.id.starts_with(reference));
            if let (Some(note), None) = (matches.next(), matches.next()) {
                return Ok(note.id.clone());
            }
        }

        Err(Error::note_not_found(reference))
    }

    /// Rows for the note list.
    #[must_use]
    pub fn sidebar(&self) -> Vec<NoteListItem> {
        let active = self.notebook.active_id();
        self.notebook
            .notes()
            .iter()
            .map(|note| NoteListItem {
                id: note.id.clone(),
                title: note.title(),
                preview: note.preview(),
                active: active == Some(note.id.as_str()),
            })
            .collect()
    }

    /// The editor pane for the active note.
    #[must_use]
    pub fn editor(&self) -> EditorView {
        match self.notebook.active() {
            None => EditorView::Empty,
            Some(note) => EditorView::Note {
                id: note.id.clone(),
                content: note.content.clone(),
                busy: self.session.is_busy(),
                summary: self.session.summary().map(str::to_string),
            },
        }
    }
}
