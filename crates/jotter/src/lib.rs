//! `jotter` - local notes with optional AI summaries
//!
//! Notes live in a small `SQLite` key-value store and are managed through
//! [`App`], which also drives the summary flow against a text-generation
//! backend.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod note;
pub mod notebook;
pub mod session;
pub mod store;
pub mod summarize;
pub mod theme;
pub mod view;

pub use app::{App, Intent, Outcome};
pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use note::Note;
pub use notebook::Notebook;
pub use session::{SummaryOutcome, SummarySession};
pub use store::{Store, StoreStats};
pub use summarize::{GeminiClient, TextGenerator};
pub use theme::Theme;
