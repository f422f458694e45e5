//! Configuration management for the diary application.
//!
//! Settings live in a TOML file with a single `[diary]` table. The file is
//! looked up through the `DIARY_CONFIG` environment variable and defaults to
//! `diary.toml` in the working directory. Relative entry file names are
//! resolved against the directory holding the configuration file.
//!
//! ```toml
//! [diary]
//! locale = "en_US"
//! file_mode = "755"
//! file_format = "%Y/%m/%d.md"
//! section_pattern = '^#+\s*(?P<name>.+)$'
//! todo_pattern = '\[(?P<state>.)\]\s*(?P<name>.*)$'
//! todo_replacement = "[{state}] {name}"
//! todo_empty = " "
//! todo_checked = "x"
//! ```
//!
//! Everything is validated in [`Config::from_settings`]; once a `Config`
//! exists no setting is checked again.

use crate::constants::{
    DEFAULT_CONFIG_FILE, DEFAULT_DIR_MODE, ENV_VAR_DIARY_CONFIG, REDACTED_PLACEHOLDER,
};
use crate::errors::ConfigError;
use crate::journal_core::{EntryNaming, PatternConfig, TodoMarkers};
use chrono::Locale;
use serde::Deserialize;
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// The raw `[diary]` table as written in the configuration file.
#[derive(Debug, Clone, Deserialize)]
pub struct DiarySettings {
    /// Locale for month and weekday names in file names, e.g. `de_DE.UTF-8`.
    #[serde(default)]
    pub locale: Option<String>,

    /// Permission bits for created entry directories, octal.
    #[serde(default)]
    pub file_mode: Option<FileMode>,

    /// strftime-style format mapping a date to an entry file name.
    pub file_format: String,

    /// Regex recognizing section lines; needs a `name` group.
    pub section_pattern: String,

    /// Regex recognizing todo lines; needs `name` and `state` groups.
    pub todo_pattern: String,

    /// Template a carried-forward todo match is replaced with.
    pub todo_replacement: String,

    /// State marker of an unchecked todo; empty means a single space.
    #[serde(default)]
    pub todo_empty: String,

    /// State marker of a checked todo.
    pub todo_checked: String,
}

/// Directory permission bits, either as an octal string (`"755"`, `"0o755"`)
/// or as a TOML integer (`0o755`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum FileMode {
    Bits(u32),
    Octal(String),
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    diary: Option<DiarySettings>,
}

/// Validated configuration, immutable for the lifetime of the process.
pub struct Config {
    /// Directory relative entry file names are resolved against.
    pub entries_root: PathBuf,

    /// Date to file name mapping.
    pub naming: EntryNaming,

    /// Section and todo markup.
    pub patterns: PatternConfig,

    /// Permission bits for created entry directories.
    pub dir_mode: u32,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("entries_root", &REDACTED_PLACEHOLDER)
            .field("file_format", &self.naming.format())
            .field("dir_mode", &format_args!("{:o}", self.dir_mode))
            .finish()
    }
}

impl Config {
    /// Loads the configuration file named by `DIARY_CONFIG`, or `diary.toml`.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the path can't be expanded, the file is
    /// missing or unreadable, or any setting fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let raw_path =
            env::var(ENV_VAR_DIARY_CONFIG).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());

        // Handles ~ and environment variable references
        let expanded = shellexpand::full(&raw_path)
            .map_err(|e| ConfigError::PathExpansion(e.to_string()))?;

        Self::load_from(Path::new(expanded.as_ref()))
    }

    /// Loads a specific configuration file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let text = fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Read configuration from {}", path.display());

        Self::from_toml_str(&text, path)
    }

    /// Parses configuration text that was read from `path`.
    pub fn from_toml_str(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = file.diary.ok_or(ConfigError::MissingSection)?;

        let entries_root = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        Self::from_settings(settings, entries_root)
    }

    /// Validates raw settings into a `Config`.
    pub fn from_settings(
        settings: DiarySettings,
        entries_root: PathBuf,
    ) -> Result<Self, ConfigError> {
        let dir_mode = match &settings.file_mode {
            Some(mode) => parse_file_mode(mode)?,
            None => DEFAULT_DIR_MODE,
        };

        let file_format = shellexpand::tilde(&settings.file_format);
        let mut naming = EntryNaming::new(&file_format)?;
        if let Some(locale) = parse_locale(settings.locale.as_deref())? {
            naming = naming.with_locale(locale);
        }
        if !naming.round_trips() {
            warn!(
                "file_format {:?} does not identify a single date; entry names may repeat",
                naming.format()
            );
        }

        let patterns = PatternConfig::new(
            &settings.section_pattern,
            &settings.todo_pattern,
            &settings.todo_replacement,
            TodoMarkers::new(settings.todo_checked, settings.todo_empty),
        )?;

        Ok(Config {
            entries_root,
            naming,
            patterns,
            dir_mode,
        })
    }
}

fn parse_file_mode(mode: &FileMode) -> Result<u32, ConfigError> {
    let bits = match mode {
        FileMode::Bits(bits) => *bits,
        FileMode::Octal(text) => {
            let digits = text.trim();
            if digits.is_empty() {
                return Ok(DEFAULT_DIR_MODE);
            }
            let digits = digits.strip_prefix("0o").unwrap_or(digits);
            u32::from_str_radix(digits, 8)
                .map_err(|_| ConfigError::InvalidFileMode(text.clone()))?
        }
    };

    if bits > 0o7777 {
        return Err(ConfigError::InvalidFileMode(format!("{bits:o}")));
    }
    Ok(bits)
}

// "C" and "POSIX" keep chrono's built-in English names.
fn parse_locale(name: Option<&str>) -> Result<Option<Locale>, ConfigError> {
    let Some(name) = name.map(str::trim).filter(|name| !name.is_empty()) else {
        return Ok(None);
    };
    let base = name.split(['.', '@']).next().unwrap_or(name);
    if base == "C" || base == "POSIX" {
        return Ok(None);
    }

    Locale::try_from(base)
        .map(Some)
        .map_err(|_| ConfigError::UnknownLocale(name.to_string()))
}
