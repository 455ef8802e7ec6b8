//! Error types for jotter.
//!
//! This module defines all error types used throughout the jotter crate,
//! providing detailed context for debugging and user-friendly error messages.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for jotter operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Failed to run database migrations.
    #[error("database migration failed: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Note Errors ===
    /// No note with the given identifier exists.
    #[error("note not found: {id}")]
    NoteNotFound {
        /// The identifier that was looked up.
        id: String,
    },

    /// The operation needs an active note and none is selected.
    #[error("no note is selected")]
    NoActiveNote,

    // === Summarizer Errors ===
    /// The API credential is not available.
    #[error("{var} environment variable not set")]
    MissingCredential {
        /// Name of the environment variable that should hold the key.
        var: String,
    },

    /// The HTTP request to the generation endpoint failed.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The generation endpoint answered with an error status.
    #[error("API returned {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message reported by the API.
        message: String,
    },

    /// The generation endpoint answered without any text.
    #[error("response contained no text")]
    EmptyResponse,

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for jotter operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        match err {
            dialoguer::Error::IO(io) => Self::Io(io),
        }
    }
}

impl Error {
    /// Create a note-not-found error.
    #[must_use]
    pub fn note_not_found(id: impl Into<String>) -> Self {
        Self::NoteNotFound { id: id.into() }
    }

    /// Create a missing credential error for the given variable.
    #[must_use]
    pub fn missing_credential(var: impl Into<String>) -> Self {
        Self::MissingCredential { var: var.into() }
    }

    /// Create an API error from a status code and message.
    #[must_use]
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Check if this error means a note lookup failed.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NoteNotFound { .. })
    }

    /// Check if this error means no note is selected.
    #[must_use]
    pub fn is_no_active_note(&self) -> bool {
        matches!(self, Self::NoActiveNote)
    }

    /// Check if this error is a missing API credential.
    #[must_use]
    pub fn is_missing_credential(&self) -> bool {
        matches!(self, Self::MissingCredential { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::note_not_found("abc");
        assert_eq!(err.to_string(), "note not found: abc");

        let err = Error::NoActiveNote;
        assert_eq!(err.to_string(), "no note is selected");
    }

    #[test]
    fn test_error_is_not_found() {
        assert!(Error::note_not_found("x").is_not_found());
        assert!(!Error::EmptyResponse.is_not_found());
    }

    #[test]
    fn test_no_active_note() {
        let err = Error::NoActiveNote;
        assert_eq!(err.to_string(), "no note is selected");
        assert!(err.is_no_active_note());
        assert!(!err.is_not_found());
        assert!(!Error::note_not_found("x").is_no_active_note());
    }

    #[test]
    fn test_from_prompt_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "stdin closed");
        let err: Error = dialoguer::Error::IO(io_err).into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("stdin closed"));
    }

    #[test]
    fn test_missing_credential_display() {
        let err = Error::missing_credential("API_KEY");
        assert_eq!(err.to_string(), "API_KEY environment variable not set");
        assert!(err.is_missing_credential());
        assert!(!Error::EmptyResponse.is_missing_credential());
    }

    #[test]
    fn test_api_error_display() {
        let err = Error::api(429, "quota exceeded");
        let msg = err.to_string();
        assert!(msg.contains("429"));
        assert!(msg.contains("quota exceeded"));
    }

    #[test]
    fn test_empty_response_display() {
        assert_eq!(Error::EmptyResponse.to_string(), "response contained no text");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_rusqlite_error() {
        let result = rusqlite::Connection::open_with_flags(
            "/nonexistent/path/db.sqlite",
            rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY,
        );
        if let Err(sqlite_err) = result {
            let err: Error = sqlite_err.into();
            assert!(matches!(err, Error::DatabaseQuery(_)));
        }
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
        }
    }

    #[test]
    fn test_database_migration_error_display() {
        let err = Error::DatabaseMigration {
            message: "version mismatch".to_string(),
        };
        assert!(err.to_string().contains("version mismatch"));
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::ConfigValidation {
            message: "top_k must be greater than 0".to_string(),
        };
        assert!(err.to_string().contains("top_k"));
    }

    #[test]
    fn test_directory_create_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = Error::DirectoryCreate {
            path: PathBuf::from("/root/forbidden"),
            source: io_err,
        };
        assert!(err.to_string().contains("/root/forbidden"));
    }
}
