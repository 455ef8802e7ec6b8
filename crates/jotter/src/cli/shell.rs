//! Interactive session.
//!
//! The shell keeps one [`App`] alive so the active note and the displayed
//! summary carry over between commands, the way they would in a window.

use std::fmt::Write as _;

use dialoguer::{theme::ColorfulTheme, Input};
use tracing::debug;

use crate::app::{App, Intent, Outcome};
use crate::error::{Error, Result};
use crate::session::SummaryOutcome;
use crate::summarize::TextGenerator;
use crate::view::{render_editor, render_sidebar, render_summary};

/// Help text printed by `help`.
pub const HELP: &str = "\
Commands:
  list                 Show all notes
  new [text]           Create a note (from the template without text)
  select <note>        Make a note active (id, id prefix, or list position)
  show                 Show the active note
  edit <text>          Replace the active note's content (\\n starts a new line)
  append <text>        Add a line to the active note
  delete [note]        Delete a note (the active one by default)
  summarize            Summarize the active note with AI
  close                Close the displayed summary
  theme                Toggle between light and dark
  help                 Show this help
  quit                 Leave the shell";

/// A parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// Blank line.
    Nothing,
    /// Print the note list.
    List,
    /// Create a note, optionally with content.
    New(Option<String>),
    /// Select a note by reference.
    Select(String),
    /// Print the editor pane.
    Show,
    /// Replace the active note's content.
    Edit(String),
    /// Append a line to the active note.
    Append(String),
    /// Delete a note, or the active one.
    Delete(Option<String>),
    /// Summarize the active note.
    Summarize,
    /// Close the displayed summary.
    Close,
    /// Toggle the theme.
    Theme,
    /// Print help.
    Help,
    /// Leave.
    Quit,
}

/// Parse one input line.
///
/// # Errors
///
/// Returns a message for unknown commands or missing arguments.
pub fn parse_line(line: &str) -> std::result::Result<ShellCommand, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let arg = (!rest.is_empty()).then(|| rest.to_string());

    let command = match word.to_ascii_lowercase().as_str() {
        "" => ShellCommand::Nothing,
        "list" | "ls" => ShellCommand::List,
        "new" => ShellCommand::New(arg.map(|text| unescape(&text))),
        "select" | "open" => ShellCommand::Select(arg.ok_or("select needs a note")?),
        "show" => ShellCommand::Show,
        "edit" => ShellCommand::Edit(unescape(rest)),
        "append" => ShellCommand::Append(unescape(rest)),
        "delete" | "rm" => ShellCommand::Delete(arg),
        "summarize" | "sum" => ShellCommand::Summarize,
        "close" => ShellCommand::Close,
        "theme" => ShellCommand::Theme,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        other => return Err(format!("Unknown command '{other}'. Type 'help' for a list.")),
    };
    Ok(command)
}

fn unescape(text: &str) -> String {
    text.replace("\\n", "\n")
}

/// Result of executing one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Print this and keep going.
    Continue(String),
    /// Leave the shell.
    Quit,
}

/// Executes shell commands against an [`App`].
pub struct Shell {
    app: App,
    generator: Box<dyn TextGenerator>,
}

impl std::fmt::Debug for Shell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shell")
            .field("app", &self.app)
            .field("generator", &self.generator.name())
            .finish()
    }
}

impl Shell {
    /// Create a shell over `app`, summarizing with `generator`.
    #[must_use]
    pub fn new(app: App, generator: Box<dyn TextGenerator>) -> Self {
        Self { app, generator }
    }

    /// The application state.
    #[must_use]
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Run one command.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown note references or storage failures.
    pub async fn execute(&mut self, command: ShellCommand) -> Result<Step> {
        let palette = self.app.theme().palette();
        let output = match command {
            ShellCommand::Nothing => String::new(),
            ShellCommand::Quit => return Ok(Step::Quit),
            ShellCommand::Help => HELP.to_string(),
            ShellCommand::List => render_sidebar(&self.app.sidebar(), &palette),
            ShellCommand::Show => render_editor(&self.app.editor(), &palette),
            ShellCommand::New(content) => {
                let intent = content.map_or(Intent::AddNote, Intent::AddNoteWithContent);
                self.app.apply(intent)?;
                render_editor(&self.app.editor(), &palette)
            }
            ShellCommand::Select(reference) => {
                let id = self.app.resolve(&reference)?;
                self.app.apply(Intent::SelectNote(id))?;
                render_editor(&self.app.editor(), &palette)
            }
            ShellCommand::Edit(content) => {
                let id = self.active_id()?;
                self.app.apply(Intent::UpdateContent { id, content })?;
                render_editor(&self.app.editor(), &palette)
            }
            ShellCommand::Append(line) => {
                let id = self.active_id()?;
                let mut content = self
                    .app
                    .notebook()
                    .get(&id)
                    .map(|note| note.content.clone())
                    .unwrap_or_default();
                if !content.is_empty() && !content.ends_with('\n') {
                    content.push('\n');
                }
                content.push_str(&line);
                self.app.apply(Intent::UpdateContent { id, content })?;
                render_editor(&self.app.editor(), &palette)
            }
            ShellCommand::Delete(reference) => {
                let id = match reference {
                    Some(reference) => self.app.resolve(&reference)?,
                    None => self.active_id()?,
                };
                let mut out = String::new();
                if self.app.apply(Intent::DeleteNote(id))? == Outcome::Deleted(true) {
                    let _ = writeln!(out, "Note deleted.");
                }
                out.push_str(&render_sidebar(&self.app.sidebar(), &palette));
                out
            }
            ShellCommand::Summarize => match self.app.summarize(self.generator.as_ref()).await {
                SummaryOutcome::Displayed(summary) => render_summary(&summary, &palette),
                SummaryOutcome::Discarded => String::new(),
                SummaryOutcome::Rejected(reason) => reason.to_string(),
            },
            ShellCommand::Close => {
                self.app.apply(Intent::DismissSummary)?;
                String::new()
            }
            ShellCommand::Theme => {
                self.app.apply(Intent::ToggleTheme)?;
                format!("Theme: {}", self.app.theme())
            }
        };
        Ok(Step::Continue(output))
    }

    fn active_id(&self) -> Result<String> {
        self.app
            .notebook()
            .active_id()
            .map(str::to_string)
            .ok_or(Error::NoActiveNote)
    }

    /// Read and run commands until `quit`.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read.
    pub async fn run(mut self) -> Result<App> {
        let theme = ColorfulTheme::default();
        println!("jot shell. Type 'help' for commands.");
        print!(
            "{}",
            render_sidebar(&self.app.sidebar(), &self.app.theme().palette())
        );

        loop {
            let line: String = Input::with_theme(&theme)
                .with_prompt("jot")
                .allow_empty(true)
                .interact_text()?;

            let command = match parse_line(&line) {
                Ok(command) => command,
                Err(message) => {
                    eprintln!("{message}");
                    continue;
                }
            };
            debug!("Shell command: {:?}", command);

            match self.execute(command).await {
                Ok(Step::Quit) => break,
                Ok(Step::Continue(output)) if output.is_empty() => {}
                Ok(Step::Continue(output)) => println!("{}", output.trim_end()),
                Err(e) if e.is_no_active_note() => {
                    eprintln!("Error: {e}; use 'select' or 'new' first");
                }
                Err(e) => eprintln!("Error: {e}"),
            }
        }

        Ok(self.app)
    }
}
