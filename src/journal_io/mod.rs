//! Entry storage on the filesystem.
//!
//! The `EntryStore` trait is everything entry creation needs from storage:
//! existence checks, directory creation, and line-oriented reading and
//! writing. `FileSystemStore` implements it on top of a root directory.

use crate::config::Config;
use crate::errors::AppResult;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Storage operations used when creating an entry.
pub trait EntryStore {
    type Reader: io::BufRead;
    type Writer: Write;

    /// The full path an entry file name refers to.
    fn path_for(&self, name: &str) -> PathBuf;

    /// Whether anything at all exists under `name`.
    fn exists(&self, name: &str) -> bool;

    /// Whether `name` is an existing regular file.
    fn is_entry(&self, name: &str) -> bool;

    /// Creates the directory that will hold `name`, if missing.
    fn ensure_parent_dir(&self, name: &str) -> AppResult<()>;

    /// Opens an existing entry for reading.
    fn open_entry(&self, name: &str) -> AppResult<Self::Reader>;

    /// Creates a new entry for writing; fails if it already exists.
    fn create_entry(&self, name: &str) -> AppResult<Self::Writer>;

    /// Deletes an entry this process created but could not finish.
    fn remove_entry(&self, name: &str) -> AppResult<()>;
}

/// Entries stored as files below a root directory.
#[derive(Debug, Clone)]
pub struct FileSystemStore {
    root: PathBuf,
    dir_mode: u32,
}

impl FileSystemStore {
    pub fn new(root: impl Into<PathBuf>, dir_mode: u32) -> Self {
        Self {
            root: root.into(),
            dir_mode,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.entries_root.clone(), config.dir_mode)
    }
}

impl EntryStore for FileSystemStore {
    type Reader = BufReader<File>;
    type Writer = BufWriter<File>;

    fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    fn exists(&self, name: &str) -> bool {
        self.path_for(name).exists()
    }

    fn is_entry(&self, name: &str) -> bool {
        self.path_for(name).is_file()
    }

    fn ensure_parent_dir(&self, name: &str) -> AppResult<()> {
        let path = self.path_for(name);
        let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) else {
            return Ok(());
        };
        if parent.is_dir() {
            return Ok(());
        }

        create_dir_with_mode(parent, self.dir_mode).map_err(|e| {
            io::Error::new(
                e.kind(),
                format!("Failed to create entry directory {}: {}", parent.display(), e),
            )
        })?;
        debug!("Created entry directory with mode {:o}", self.dir_mode);
        Ok(())
    }

    fn open_entry(&self, name: &str) -> AppResult<Self::Reader> {
        let path = self.path_for(name);
        let file = File::open(&path).map_err(|e| {
            io::Error::new(
                e.kind(),
                format!("Failed to open entry {}: {}", path.display(), e),
            )
        })?;
        Ok(BufReader::new(file))
    }

    fn create_entry(&self, name: &str) -> AppResult<Self::Writer> {
        let path = self.path_for(name);
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|e| {
                io::Error::new(
                    e.kind(),
                    format!("Failed to create entry {}: {}", path.display(), e),
                )
            })?;
        Ok(BufWriter::new(file))
    }

    fn remove_entry(&self, name: &str) -> AppResult<()> {
        let path = self.path_for(name);
        fs::remove_file(&path).map_err(|e| {
            io::Error::new(
                e.kind(),
                format!("Failed to remove entry {}: {}", path.display(), e),
            )
        })?;
        Ok(())
    }
}

#[cfg(unix)]
fn create_dir_with_mode(dir: &Path, mode: u32) -> io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;

    fs::DirBuilder::new().recursive(true).mode(mode).create(dir)
}

#[cfg(not(unix))]
fn create_dir_with_mode(dir: &Path, _mode: u32) -> io::Result<()> {
    fs::DirBuilder::new().recursive(true).create(dir)
}
