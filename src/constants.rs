//! Constants used throughout the application.
//!
//! Centralizes names, defaults and fixed policies so they can be found and
//! referenced consistently.

// Application Metadata
/// The name of the application.
pub const APP_NAME: &str = "diary";
/// The description of the application used in CLI help text.
pub const APP_DESCRIPTION: &str = "A plain-text daily journal seeded from the previous entry";

// Editor
/// Default command for the editor if not specified otherwise.
pub const DEFAULT_EDITOR_COMMAND: &str = "nano";
/// Characters forbidden in editor commands.
pub const EDITOR_FORBIDDEN_CHARS: &[char] =
    &['|', '&', ';', '$', '(', ')', '`', '\\', '<', '>', '\'', '"'];

// Logging
/// Log format identifier for plain text.
pub const LOG_FORMAT_TEXT: &str = "text";
/// Log format identifier for JSON.
pub const LOG_FORMAT_JSON: &str = "json";
/// Default log level when `RUST_LOG` is unset.
pub const DEFAULT_LOG_LEVEL: &str = "warn";
/// Log level used with `--verbose`.
pub const VERBOSE_LOG_LEVEL: &str = "debug";

// Environment Variables
/// Environment variable pointing at the configuration file.
pub const ENV_VAR_DIARY_CONFIG: &str = "DIARY_CONFIG";
/// Environment variable for the preferred diary editor.
pub const ENV_VAR_DIARY_EDITOR: &str = "DIARY_EDITOR";
/// Standard environment variable for the default editor.
pub const ENV_VAR_EDITOR: &str = "EDITOR";
/// Environment variable selecting the log format.
pub const ENV_VAR_LOG_FORMAT: &str = "DIARY_LOG_FORMAT";

// Configuration
/// Configuration file used when `DIARY_CONFIG` is not set.
pub const DEFAULT_CONFIG_FILE: &str = "diary.toml";
/// Default POSIX permissions for newly created entry directories.
pub const DEFAULT_DIR_MODE: u32 = 0o755;
/// Placeholder string for redacted information in debug output.
pub const REDACTED_PLACEHOLDER: &str = "[REDACTED]";
/// Marker written for an unchecked todo when `todo_empty` is configured empty.
pub const FALLBACK_EMPTY_MARKER: &str = " ";

// Markup
/// Capture group holding a section's or todo's name.
pub const GROUP_NAME: &str = "name";
/// Capture group holding a todo's state marker.
pub const GROUP_STATE: &str = "state";

// Date/Time Logic
/// How many days before today the previous-entry search looks.
pub const LOOKBACK_DAYS: u64 = 14;
/// Date used to probe a file name format at load time.
pub const FORMAT_PROBE_DATE: (i32, u32, u32) = (2001, 12, 31);
