//! Light/dark theme preference and the terminal palette it selects.

use console::Style;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::store::Store;

/// Store key holding the theme.
pub const THEME_KEY: &str = "theme";

/// Color theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Dark text on a light background.
    Light,
    /// Light text on a dark background.
    #[default]
    Dark,
}

impl Theme {
    /// The other theme.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Load the persisted theme, falling back to [`Theme::default`].
    #[must_use]
    pub fn load(store: &Store) -> Self {
        store.read(THEME_KEY, Self::default())
    }

    /// Persist this theme.
    ///
    /// # Errors
    ///
    /// Returns an error if the store write fails.
    pub fn save(self, store: &Store) -> Result<()> {
        store.write(THEME_KEY, &self)
    }

    /// Terminal styles for this theme.
    #[must_use]
    pub fn palette(self) -> Palette {
        match self {
            Self::Dark => Palette {
                title: Style::new().bold().white(),
                active: Style::new().bold().cyan(),
                muted: Style::new().dim(),
                accent: Style::new().magenta(),
                error: Style::new().red().bright(),
            },
            Self::Light => Palette {
                title: Style::new().bold().black(),
                active: Style::new().bold().blue(),
                muted: Style::new().black().bright(),
                accent: Style::new().magenta(),
                error: Style::new().red(),
            },
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Light => write!(f, "light"),
            Self::Dark => write!(f, "dark"),
        }
    }
}

/// Styles used when rendering views to the terminal.
#[derive(Debug, Clone)]
pub struct Palette {
    /// Note titles.
    pub title: Style,
    /// The active note in lists.
    pub active: Style,
    /// Previews, hints and empty states.
    pub muted: Style,
    /// Summary output.
    pub accent: Style,
    /// Errors and notices.
    pub error: Style,
}
