//! Create today's entry, seeded from the closest previous one.

use crate::config::Config;
use crate::errors::AppResult;
use crate::journal_core::{carry_forward, CarryForwardSummary, EntryTokenizer};
use crate::journal_io::EntryStore;
use chrono::NaiveDate;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// How today's entry came to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryStatus {
    /// Something already existed under today's name; nothing was touched.
    Existing,
    /// Seeded from the entry of `from`.
    CarriedForward {
        from: NaiveDate,
        summary: CarryForwardSummary,
    },
    /// No previous entry within the lookback window; created empty.
    Fresh,
}

/// The result of creating today's entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryOutcome {
    /// The entry's file name as rendered from the configured format.
    pub file_name: String,
    /// Where the entry lives.
    pub path: PathBuf,
    pub status: EntryStatus,
}

/// Creates the entry for `today` unless one already exists.
///
/// # Flow
///
/// 1. Render today's file name; if anything exists there, return it as is
/// 2. Ensure the entry's directory exists
/// 3. Look back up to 14 days for the closest existing entry
/// 4. Carry that entry forward into today's file, or create it empty
///
/// # Errors
///
/// Any I/O failure while creating directories, reading the previous entry or
/// writing the new one is returned. Read failures name the previous entry. If
/// carrying forward fails, the partly written entry for today is removed.
pub fn create_todays_entry<S: EntryStore>(
    config: &Config,
    store: &S,
    today: NaiveDate,
) -> AppResult<EntryOutcome> {
    let file_name = config.naming.date_to_file_name(today);
    let path = store.path_for(&file_name);

    if store.exists(&file_name) {
        debug!("Entry for {} already exists", today);
        return Ok(EntryOutcome {
            file_name,
            path,
            status: EntryStatus::Existing,
        });
    }

    store.ensure_parent_dir(&file_name)?;

    let previous = config
        .naming
        .find_previous_entry_date(today, |name| store.is_entry(name));

    let status = match previous {
        Some(from) => {
            let previous_name = config.naming.date_to_file_name(from);
            let reader = store.open_entry(&previous_name)?;
            let mut writer = store.create_entry(&file_name)?;

            let copied = carry_into(config, store.path_for(&previous_name), reader, &mut writer);
            let summary = match copied {
                Ok(summary) => summary,
                Err(e) => {
                    // Today's entry must not survive half-written
                    drop(writer);
                    if let Err(cleanup) = store.remove_entry(&file_name) {
                        warn!("Could not remove incomplete entry: {}", cleanup);
                    }
                    return Err(e);
                }
            };

            info!(
                "Carried {} forward: {} sections, {} todos, {} lines dropped",
                from, summary.sections, summary.todos, summary.dropped
            );
            EntryStatus::CarriedForward { from, summary }
        }
        None => {
            let mut writer = store.create_entry(&file_name)?;
            writer.flush()?;
            info!("No previous entry found, created an empty entry");
            EntryStatus::Fresh
        }
    };

    Ok(EntryOutcome {
        file_name,
        path,
        status,
    })
}

/// Streams the previous entry through carry-forward into `writer` and flushes.
fn carry_into<R: BufRead, W: Write>(
    config: &Config,
    previous_path: PathBuf,
    reader: R,
    writer: &mut W,
) -> AppResult<CarryForwardSummary> {
    let tokens = EntryTokenizer::from_reader(&config.patterns, reader).map(|token| {
        token.map_err(|e| {
            io::Error::new(
                e.kind(),
                format!("Failed to read entry {}: {}", previous_path.display(), e),
            )
        })
    });
    let summary = carry_forward(&config.patterns, tokens, writer)?;
    writer.flush()?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::errors::AppError;
    use crate::journal_io::FileSystemStore;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::fs;
    use std::io::Cursor;
    use std::path::Path;
    use tempfile::tempdir;

    const CONFIG: &str = r#"
[diary]
file_format = "%Y-%m-%d.txt"
section_pattern = '^#+\s*(?P<name>.+)$'
todo_pattern = '\[(?P<state>.)\]\s*(?P<name>.*)$'
todo_replacement = "[{state}] {name}"
todo_empty = " "
todo_checked = "x"
"#;

    fn config() -> Config {
        Config::from_toml_str(CONFIG, Path::new("diary.toml")).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Entries held in memory; written entries land in `entries` on flush.
    #[derive(Default)]
    struct MemoryStore {
        entries: RefCell<HashMap<String, String>>,
    }

    struct MemoryWriter<'a> {
        name: String,
        buffer: Vec<u8>,
        store: &'a MemoryStore,
    }

    impl Write for MemoryWriter<'_> {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.buffer.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            let text = String::from_utf8_lossy(&self.buffer).into_owned();
            self.store.entries.borrow_mut().insert(self.name.clone(), text);
            Ok(())
        }
    }

    impl<'a> EntryStore for &'a MemoryStore {
        type Reader = Cursor<Vec<u8>>;
        type Writer = MemoryWriter<'a>;

        fn path_for(&self, name: &str) -> PathBuf {
            PathBuf::from(name)
        }

        fn exists(&self, name: &str) -> bool {
            self.entries.borrow().contains_key(name)
        }

        fn is_entry(&self, name: &str) -> bool {
            self.exists(name)
        }

        fn ensure_parent_dir(&self, _name: &str) -> AppResult<()> {
            Ok(())
        }

        fn open_entry(&self, name: &str) -> AppResult<Self::Reader> {
            let entries = self.entries.borrow();
            let text = entries
                .get(name)
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, name.to_string()))?;
            Ok(Cursor::new(text.clone().into_bytes()))
        }

        fn create_entry(&self, name: &str) -> AppResult<Self::Writer> {
            if self.exists(name) {
                return Err(io::Error::new(io::ErrorKind::AlreadyExists, name.to_string()).into());
            }
            Ok(MemoryWriter {
                name: name.to_string(),
                buffer: Vec::new(),
                store: *self,
            })
        }

        fn remove_entry(&self, name: &str) -> AppResult<()> {
            self.entries.borrow_mut().remove(name);
            Ok(())
        }
    }

    #[test]
    fn test_carries_yesterday_forward() {
        let store = MemoryStore::default();
        store.entries.borrow_mut().insert(
            "2024-01-14.txt".to_string(),
            "## Sunday\nlazy day\n- [x] buy milk\n".to_string(),
        );

        let outcome = create_todays_entry(&config(), &&store, date(2024, 1, 15)).unwrap();

        assert_eq!(outcome.file_name, "2024-01-15.txt");
        assert_eq!(
            outcome.status,
            EntryStatus::CarriedForward {
                from: date(2024, 1, 14),
                summary: CarryForwardSummary {
                    sections: 1,
                    todos: 1,
                    dropped: 1,
                },
            }
        );
        assert_eq!(
            store.entries.borrow()["2024-01-15.txt"],
            "## Sunday\n- [ ] buy milk\n"
        );
    }

    #[test]
    fn test_uses_closest_entry_in_window() {
        let store = MemoryStore::default();
        {
            let mut entries = store.entries.borrow_mut();
            entries.insert("2024-01-05.txt".to_string(), "# old\n".to_string());
            entries.insert("2024-01-12.txt".to_string(), "# newer\n".to_string());
        }

        let outcome = create_todays_entry(&config(), &&store, date(2024, 1, 15)).unwrap();

        assert!(matches!(
            outcome.status,
            EntryStatus::CarriedForward { from, .. } if from == date(2024, 1, 12)
        ));
        assert_eq!(store.entries.borrow()["2024-01-15.txt"], "# newer\n");
    }

    #[test]
    fn test_existing_entry_is_untouched() {
        let store = MemoryStore::default();
        {
            let mut entries = store.entries.borrow_mut();
            entries.insert("2024-01-14.txt".to_string(), "# yesterday\n".to_string());
            entries.insert("2024-01-15.txt".to_string(), "already writing".to_string());
        }

        let outcome = create_todays_entry(&config(), &&store, date(2024, 1, 15)).unwrap();

        assert_eq!(outcome.status, EntryStatus::Existing);
        assert_eq!(store.entries.borrow()["2024-01-15.txt"], "already writing");
    }

    #[test]
    fn test_nothing_in_window_creates_empty_entry() {
        let store = MemoryStore::default();
        store
            .entries
            .borrow_mut()
            .insert("2023-12-31.txt".to_string(), "# too old\n".to_string());

        let outcome = create_todays_entry(&config(), &&store, date(2024, 1, 15)).unwrap();

        assert_eq!(outcome.status, EntryStatus::Fresh);
        assert_eq!(store.entries.borrow()["2024-01-15.txt"], "");
    }

    #[test]
    fn test_filesystem_flow_is_idempotent() {
        let temp_dir = tempdir().expect("Failed to create temporary directory");
        let config = Config::from_toml_str(
            &CONFIG.replace("%Y-%m-%d.txt", "%Y/%m/%d.md"),
            &temp_dir.path().join("diary.toml"),
        )
        .unwrap();
        let store = FileSystemStore::from_config(&config);

        fs::create_dir_all(temp_dir.path().join("2023/12")).unwrap();
        fs::write(
            temp_dir.path().join("2023/12/31.md"),
            "# Year end\nparty!\n- [x] fireworks\n",
        )
        .unwrap();

        let first = create_todays_entry(&config, &store, date(2024, 1, 2)).unwrap();
        let path = temp_dir.path().join("2024/01/02.md");
        assert_eq!(first.path, path);
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "# Year end\n- [ ] fireworks\n");

        fs::write(&path, "edited by hand\n").unwrap();
        let second = create_todays_entry(&config, &store, date(2024, 1, 2)).unwrap();

        assert_eq!(second.file_name, first.file_name);
        assert_eq!(second.status, EntryStatus::Existing);
        assert_eq!(fs::read_to_string(&path).unwrap(), "edited by hand\n");
    }

    #[test]
    fn test_directory_named_like_previous_entry_is_skipped() {
        let temp_dir = tempdir().expect("Failed to create temporary directory");
        let config = Config::from_toml_str(CONFIG, &temp_dir.path().join("diary.toml")).unwrap();
        let store = FileSystemStore::from_config(&config);
        fs::create_dir(temp_dir.path().join("2024-01-14.txt")).unwrap();
        fs::write(temp_dir.path().join("2024-01-13.txt"), "# Saturday\n").unwrap();

        let outcome = create_todays_entry(&config, &store, date(2024, 1, 15)).unwrap();

        assert!(matches!(
            outcome.status,
            EntryStatus::CarriedForward { from, .. } if from == date(2024, 1, 13)
        ));
    }

    #[test]
    fn test_unreadable_previous_entry_is_fatal() {
        let temp_dir = tempdir().expect("Failed to create temporary directory");
        let config = Config::from_toml_str(CONFIG, &temp_dir.path().join("diary.toml")).unwrap();
        let store = FileSystemStore::from_config(&config);
        // Invalid UTF-8 makes reading the previous entry fail
        fs::write(temp_dir.path().join("2024-01-14.txt"), b"# ok\n\xff\xfe\n").unwrap();

        let result = create_todays_entry(&config, &store, date(2024, 1, 15));

        match result {
            Err(AppError::Io(e)) => {
                assert_eq!(e.kind(), io::ErrorKind::InvalidData);
                assert!(e.to_string().contains("2024-01-14.txt"));
            }
            other => panic!("Expected I/O error, got {:?}", other),
        }
    }

    #[test]
    fn test_failed_carry_leaves_no_partial_entry() {
        let temp_dir = tempdir().expect("Failed to create temporary directory");
        let config = Config::from_toml_str(CONFIG, &temp_dir.path().join("diary.toml")).unwrap();
        let store = FileSystemStore::from_config(&config);
        // The first lines carry fine before the read breaks down
        fs::write(
            temp_dir.path().join("2024-01-14.txt"),
            b"# ok\n- [x] a\n\xff\n- [x] b\n",
        )
        .unwrap();
        let today = temp_dir.path().join("2024-01-15.txt");

        for _ in 0..2 {
            let result = create_todays_entry(&config, &store, date(2024, 1, 15));
            assert!(matches!(result, Err(AppError::Io(_))));
            assert!(!today.exists());
        }
    }
}
