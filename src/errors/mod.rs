//! Error handling utilities for the diary application.
//!
//! This module provides the central error type `AppError`, which represents all
//! failure conditions of the application, and the convenience alias `AppResult`.
//! Configuration and editor failures get their own enums so callers can match
//! on the precise cause.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Represents the ways the configuration can be unusable.
///
/// All of these are detected once, at startup, before any entry is touched.
///
/// # Examples
///
/// ```
/// use diary::errors::ConfigError;
///
/// let error = ConfigError::MissingGroup {
///     setting: "todo_pattern",
///     group: "state",
/// };
/// assert!(format!("{}", error).contains("todo_pattern"));
/// assert!(format!("{}", error).contains("\"state\""));
/// ```
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file does not exist.
    #[error("Can't find {path} (set DIARY_CONFIG to point at your diary.toml)")]
    NotFound {
        /// The path that was looked up
        path: PathBuf,
    },

    /// The configuration path could not be expanded.
    #[error("Failed to expand config path: {0}")]
    PathExpansion(String),

    /// The configuration file exists but could not be read.
    #[error("Failed to read {path}: {source}")]
    Unreadable {
        /// The path of the configuration file
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The configuration file is not valid TOML or has wrongly typed values.
    #[error("Failed to parse {path}: {source}")]
    Parse {
        /// The path of the configuration file
        path: PathBuf,
        /// The underlying TOML error
        #[source]
        source: toml::de::Error,
    },

    /// The configuration file has no `[diary]` table.
    #[error("diary section missing in config")]
    MissingSection,

    /// A required setting is empty.
    #[error("{0} missing in config")]
    MissingSetting(&'static str),

    /// The file name format is not a usable date format.
    #[error("file_format {format:?} can't render a date: {reason}")]
    InvalidFileFormat {
        /// The offending format string
        format: String,
        /// Why it was rejected
        reason: String,
    },

    /// A markup pattern failed to compile.
    #[error("{setting} is not a valid regular expression: {source}")]
    InvalidPattern {
        /// The setting holding the pattern
        setting: &'static str,
        /// The underlying regex error
        #[source]
        source: regex::Error,
    },

    /// A markup pattern lacks a named group it must provide.
    #[error("{setting} needs a \"{group}\" group")]
    MissingGroup {
        /// The setting holding the pattern
        setting: &'static str,
        /// The missing group name
        group: &'static str,
    },

    /// The todo replacement template is malformed.
    #[error("todo_replacement {template:?} is invalid: {reason}")]
    InvalidTemplate {
        /// The offending template
        template: String,
        /// Why it was rejected
        reason: String,
    },

    /// The directory permission bits are not an octal number.
    #[error("file_mode {0:?} is not an octal permission value")]
    InvalidFileMode(String),

    /// The locale is not known to the date formatter.
    #[error("unknown locale {0:?}")]
    UnknownLocale(String),
}

/// Represents specific error cases that can occur when interacting with external editors.
///
/// # Examples
///
/// ```
/// use diary::errors::EditorError;
/// use std::io::{self, ErrorKind};
///
/// let io_error = io::Error::new(ErrorKind::NotFound, "command not found");
/// let error = EditorError::CommandNotFound {
///     command: "nano".to_string(),
///     source: io_error,
/// };
///
/// assert!(format!("{}", error).contains("not found"));
/// assert!(format!("{}", error).contains("nano"));
/// ```
#[derive(Debug, Error)]
pub enum EditorError {
    /// Error when the specified editor command cannot be found.
    #[error("Editor command '{command}' not found: {source}. Please check that the editor is installed and available in your PATH.")]
    CommandNotFound {
        /// The editor command that was not found
        command: String,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Error when permission is denied to execute the editor command.
    #[error("Permission denied when trying to execute editor '{command}': {source}.")]
    PermissionDenied {
        /// The editor command that had permission denied
        command: String,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Error when the editor command fails to execute due to other I/O errors.
    #[error("Failed to execute editor '{command}': {source}.")]
    ExecutionFailed {
        /// The editor command that failed to execute
        command: String,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Error when the editor exits with a non-zero status code.
    #[error("Editor '{command}' exited with non-zero status code: {status_code}.")]
    NonZeroExit {
        /// The editor command that exited with a non-zero status
        command: String,
        /// The exit status code
        status_code: i32,
    },

    /// The editor command from the environment is not a plain program name or path.
    #[error("Invalid editor command {command:?}: {reason}. Use a wrapper script or shell alias instead.")]
    InvalidCommand {
        /// The rejected command
        command: String,
        /// Why it was rejected
        reason: String,
    },
}

/// Represents all possible errors that can occur in the diary application.
///
/// # Examples
///
/// Converting from an IO error:
/// ```
/// use diary::errors::AppError;
/// use std::io::{self, ErrorKind};
///
/// let io_error = io::Error::new(ErrorKind::NotFound, "file not found");
/// let app_error: AppError = io_error.into();
///
/// match app_error {
///     AppError::Io(inner) => assert_eq!(inner.kind(), ErrorKind::NotFound),
///     _ => panic!("Expected Io variant"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Errors related to configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Input/output errors from filesystem operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Errors when interacting with the text editor.
    #[error("Editor error: {0}")]
    Editor(#[from] EditorError),
}

/// A type alias for `Result<T, AppError>` to simplify function signatures.
pub type AppResult<T> = Result<T, AppError>;
