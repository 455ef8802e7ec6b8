//! Summary state for the editor.
//!
//! ```text
//! Idle --begin--> InFlight --complete--> Showing --dismiss / note change--> Idle
//!                    |
//!                    +--complete (note changed meanwhile)--> Idle
//! ```
//!
//! While a request is in flight the session is busy and further requests
//! are rejected.

use tracing::debug;

use crate::note::Note;
use crate::summarize::{summarize_text, too_short_notice, TextGenerator};

/// Where the summary flow currently is.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SummaryState {
    /// No request running and nothing displayed.
    #[default]
    Idle,
    /// A request for `note_id` is running.
    InFlight {
        /// Note being summarized.
        note_id: String,
    },
    /// A result for `note_id` is displayed.
    Showing {
        /// Note the summary belongs to.
        note_id: String,
        /// Summary text or failure message.
        summary: String,
    },
}

/// Why a summary request was refused before any network call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// No note is active.
    NoActiveNote,
    /// The note is below the minimum length.
    TooShort {
        /// Message to show the user.
        notice: String,
    },
    /// A request is already running.
    Busy,
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoActiveNote => write!(f, "Select a note to summarize."),
            Self::TooShort { notice } => write!(f, "{notice}"),
            Self::Busy => write!(f, "A summary is already being generated."),
        }
    }
}

/// Proof that a request was started; hand it back to [`SummarySession::complete`].
#[derive(Debug)]
#[must_use = "an in-flight summary must be completed"]
pub struct SummaryTicket {
    note_id: String,
    content: String,
}

impl SummaryTicket {
    /// Note the request is for.
    #[must_use]
    pub fn note_id(&self) -> &str {
        &self.note_id
    }

    /// Content captured when the request started.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }
}

/// What happened to a summary request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryOutcome {
    /// The result is now displayed.
    Displayed(String),
    /// The active note changed before the result arrived; it was dropped.
    Discarded,
    /// Refused locally; no request was made.
    Rejected(Rejection),
}

/// Summary state machine tied to the active note.
#[derive(Debug, Clone)]
pub struct SummarySession {
    state: SummaryState,
    min_chars: usize,
    active_note: Option<String>,
}

impl SummarySession {
    /// Create an idle session requiring `min_chars` trimmed characters.
    #[must_use]
    pub fn new(min_chars: usize) -> Self {
        Self {
            state: SummaryState::Idle,
            min_chars,
            active_note: None,
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &SummaryState {
        &self.state
    }

    /// Whether a request is running.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        matches!(self.state, SummaryState::InFlight { .. })
    }

    /// The displayed summary, if any.
    #[must_use]
    pub fn summary(&self) -> Option<&str> {
        match &self.state {
            SummaryState::Showing { summary, .. } => Some(summary),
            _ => None,
        }
    }

    /// Start a request for `note`.
    ///
    /// Any displayed summary is cleared. On rejection the state is left
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns a [`Rejection`] when there is no note, the note is too short,
    /// or a request is already running.
    pub fn begin(&mut self, note: Option<&Note>) -> Result<SummaryTicket, Rejection> {
        if self.is_busy() {
            return Err(Rejection::Busy);
        }
        let note = note.ok_or(Rejection::NoActiveNote)?;
        if note.trimmed_len() < self.min_chars {
            return Err(Rejection::TooShort {
                notice: too_short_notice(self.min_chars),
            });
        }

        debug!("Summary requested for note {}", note.id);
        self.active_note = Some(note.id.clone());
        self.state = SummaryState::InFlight {
            note_id: note.id.clone(),
        };
        Ok(SummaryTicket {
            note_id: note.id.clone(),
            content: note.content.clone(),
        })
    }

    /// Finish a request.
    ///
    /// The result is displayed only if its note is still the active one;
    /// otherwise it is dropped. Either way the session stops being busy.
    pub fn complete(&mut self, ticket: SummaryTicket, summary: String) -> SummaryOutcome {
        if self.active_note.as_deref() == Some(ticket.note_id.as_str()) {
            self.state = SummaryState::Showing {
                note_id: ticket.note_id,
                summary: summary.clone(),
            };
            SummaryOutcome::Displayed(summary)
        } else {
            debug!("Dropping summary for inactive note {}", ticket.note_id);
            self.state = SummaryState::Idle;
            SummaryOutcome::Discarded
        }
    }

    /// Run a full request against `generator`.
    ///
    /// Failures of the backend are displayed as text; the session is never
    /// left busy.
    pub async fn summarize(
        &mut self,
        note: Option<&Note>,
        generator: &dyn TextGenerator,
    ) -> SummaryOutcome {
        let ticket = match self.begin(note) {
            Ok(ticket) => ticket,
            Err(rejection) => return SummaryOutcome::Rejected(rejection),
        };
        let summary = summarize_text(generator, ticket.content()).await;
        self.complete(ticket, summary)
    }

    /// Tell the session which note is now active.
    ///
    /// Switching to a different note closes any displayed summary. A running
    /// request keeps the session busy until it completes, and its result will
    /// be dropped.
    pub fn active_note_changed(&mut self, note_id: Option<&str>) {
        if self.active_note.as_deref() == note_id {
            return;
        }
        self.active_note = note_id.map(str::to_string);
        if matches!(self.state, SummaryState::Showing { .. }) {
            self.state = SummaryState::Idle;
        }
    }

    /// Close the displayed summary.
    pub fn dismiss(&mut self) {
        if matches!(self.state, SummaryState::Showing { .. }) {
            self.state = SummaryState::Idle;
        }
    }
}
