//! Editor abstraction for opening diary entries.
//!
//! The `write` command hands today's entry to an external editor and waits for
//! it to exit. The trait lets tests substitute a recording editor.

use crate::constants::{
    DEFAULT_EDITOR_COMMAND, EDITOR_FORBIDDEN_CHARS, ENV_VAR_DIARY_EDITOR, ENV_VAR_EDITOR,
};
use crate::errors::{AppResult, EditorError};
use std::env;
use std::io;
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Something that can open an entry for editing.
///
/// # Examples
///
/// ```
/// use diary::editor::Editor;
/// use diary::errors::AppResult;
/// use std::path::Path;
///
/// struct DummyEditor;
///
/// impl Editor for DummyEditor {
///     fn open(&self, path: &Path) -> AppResult<()> {
///         println!("Would open {}", path.display());
///         Ok(())
///     }
/// }
///
/// DummyEditor.open(Path::new("2024-01-15.md")).unwrap();
/// ```
pub trait Editor {
    /// Opens `path` and returns once editing is finished.
    fn open(&self, path: &Path) -> AppResult<()>;
}

/// Launches an external editor process and blocks until it exits.
#[derive(Debug, Clone)]
pub struct SystemEditor {
    /// The command to launch (e.g. "nano", "vim", "/usr/bin/code").
    pub editor_cmd: String,
}

impl SystemEditor {
    /// Picks the editor from `DIARY_EDITOR`, then `EDITOR`, then "nano".
    ///
    /// # Errors
    ///
    /// Returns `EditorError::InvalidCommand` if the command is empty, has
    /// spaces or contains shell metacharacters.
    pub fn from_env() -> AppResult<Self> {
        let editor_cmd = env::var(ENV_VAR_DIARY_EDITOR)
            .or_else(|_| env::var(ENV_VAR_EDITOR))
            .unwrap_or_else(|_| DEFAULT_EDITOR_COMMAND.to_string());

        validate_editor_command(&editor_cmd)?;
        Ok(Self { editor_cmd })
    }
}

impl Editor for SystemEditor {
    fn open(&self, path: &Path) -> AppResult<()> {
        debug!("Launching editor: {}", self.editor_cmd);

        let status = Command::new(&self.editor_cmd)
            .arg(path)
            .status()
            .map_err(|e| launch_error(&self.editor_cmd, e))?;

        if status.success() {
            Ok(())
        } else {
            Err(EditorError::NonZeroExit {
                command: self.editor_cmd.clone(),
                status_code: status.code().unwrap_or(-1),
            }
            .into())
        }
    }
}

fn launch_error(editor_cmd: &str, e: io::Error) -> EditorError {
    let command = editor_cmd.to_string();
    match e.kind() {
        io::ErrorKind::NotFound => EditorError::CommandNotFound { command, source: e },
        io::ErrorKind::PermissionDenied => EditorError::PermissionDenied { command, source: e },
        _ => EditorError::ExecutionFailed { command, source: e },
    }
}

/// Checks that an editor command is a plain program name or path.
fn validate_editor_command(editor_cmd: &str) -> Result<(), EditorError> {
    let invalid = |reason: String| EditorError::InvalidCommand {
        command: editor_cmd.to_string(),
        reason,
    };

    if editor_cmd.is_empty() {
        return Err(invalid("cannot be empty".to_string()));
    }

    if editor_cmd.contains(' ') {
        return Err(invalid("cannot contain spaces".to_string()));
    }

    if let Some(ch) = editor_cmd.chars().find(|c| EDITOR_FORBIDDEN_CHARS.contains(c)) {
        return Err(invalid(format!("cannot contain shell metacharacter '{}'", ch)));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use serial_test::serial;
    use std::cell::RefCell;
    use std::path::PathBuf;

    struct MockEditor {
        opened: RefCell<Vec<PathBuf>>,
    }

    impl Editor for MockEditor {
        fn open(&self, path: &Path) -> AppResult<()> {
            self.opened.borrow_mut().push(path.to_path_buf());
            Ok(())
        }
    }

    #[test]
    fn test_mock_editor_records_paths() {
        let editor = MockEditor {
            opened: RefCell::new(Vec::new()),
        };
        editor.open(Path::new("a.md")).unwrap();
        assert_eq!(editor.opened.borrow().as_slice(), &[PathBuf::from("a.md")]);
    }

    #[test]
    fn test_validate_editor_command_valid() {
        for cmd in ["nano", "vim", "/usr/bin/code", "./my-editor"] {
            assert!(validate_editor_command(cmd).is_ok(), "{} should be valid", cmd);
        }
    }

    #[test]
    fn test_validate_editor_command_rejections() {
        let cases = [
            ("", "empty"),
            ("vim --clean", "spaces"),
            ("vim;rm", "';'"),
            ("$(echo)", "'$'"),
            ("ed>out", "'>'"),
        ];
        for (cmd, expected) in cases {
            match validate_editor_command(cmd) {
                Err(EditorError::InvalidCommand { reason, .. }) => {
                    assert!(reason.contains(expected), "{:?}: {}", cmd, reason)
                }
                other => panic!("Expected InvalidCommand for {:?}, got {:?}", cmd, other),
            }
        }
    }

    #[test]
    #[serial]
    fn test_from_env_precedence() {
        let orig_diary = env::var(ENV_VAR_DIARY_EDITOR).ok();
        let orig_editor = env::var(ENV_VAR_EDITOR).ok();

        env::remove_var(ENV_VAR_DIARY_EDITOR);
        env::remove_var(ENV_VAR_EDITOR);
        let fallback = SystemEditor::from_env().unwrap();

        env::set_var(ENV_VAR_EDITOR, "vi");
        let from_editor = SystemEditor::from_env().unwrap();

        env::set_var(ENV_VAR_DIARY_EDITOR, "ed");
        let from_diary = SystemEditor::from_env().unwrap();

        env::set_var(ENV_VAR_DIARY_EDITOR, "vim --clean");
        let invalid = SystemEditor::from_env();

        match orig_diary {
            Some(val) => env::set_var(ENV_VAR_DIARY_EDITOR, val),
            None => env::remove_var(ENV_VAR_DIARY_EDITOR),
        }
        match orig_editor {
            Some(val) => env::set_var(ENV_VAR_EDITOR, val),
            None => env::remove_var(ENV_VAR_EDITOR),
        }

        assert_eq!(fallback.editor_cmd, DEFAULT_EDITOR_COMMAND);
        assert_eq!(from_editor.editor_cmd, "vi");
        assert_eq!(from_diary.editor_cmd, "ed");
        assert!(matches!(
            invalid,
            Err(AppError::Editor(EditorError::InvalidCommand { .. }))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_system_editor_exit_status() {
        let ok = SystemEditor {
            editor_cmd: "true".to_string(),
        };
        assert!(ok.open(Path::new("ignored.md")).is_ok());

        let failing = SystemEditor {
            editor_cmd: "false".to_string(),
        };
        match failing.open(Path::new("ignored.md")) {
            Err(AppError::Editor(EditorError::NonZeroExit { status_code, .. })) => {
                assert_eq!(status_code, 1)
            }
            other => panic!("Expected NonZeroExit, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_editor_is_command_not_found() {
        let editor = SystemEditor {
            editor_cmd: "definitely-not-an-editor-4f2a".to_string(),
        };
        assert!(matches!(
            editor.open(Path::new("ignored.md")),
            Err(AppError::Editor(EditorError::CommandNotFound { .. }))
        ));
    }
}
