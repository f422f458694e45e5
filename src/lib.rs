/*!
# diary

A plain-text daily journal. Every day has one entry file whose name is
rendered from the date by a strftime-style format. Creating today's entry
seeds it from the closest earlier entry within the last 14 days:

- section lines are copied verbatim
- todo lines are copied with their state reset to "not done"
- all other lines are dropped

## Architecture

- `cli`: Command-line interface handling using clap
- `config`: Loading and validating the TOML configuration
- `errors`: Error handling infrastructure
- `journal_core`: Pure logic: file naming, line classification, carry-forward
- `journal_io`: Entry storage on the filesystem
- `editor`: Launching the external editor
- `ops`: The `create` and `write` operations
- `logging`: Diagnostic logging setup

## Usage Example

```rust,no_run
use chrono::Local;
use diary::journal_io::FileSystemStore;
use diary::{ops, Config};

fn main() -> diary::AppResult<()> {
    let config = Config::load()?;
    let store = FileSystemStore::from_config(&config);

    let outcome = ops::create_todays_entry(&config, &store, Local::now().date_naive())?;
    println!("{}", outcome.path.display());
    Ok(())
}
```
*/

/// Command-line interface for parsing and handling user arguments
pub mod cli;
/// Configuration loading and management
pub mod config;
/// Application-wide names and defaults
pub mod constants;
/// Editor abstraction and the process-launching implementation
pub mod editor;
/// Error types and utilities for error handling
pub mod errors;
/// Date naming, markup recognition and carry-forward
pub mod journal_core;
/// Filesystem storage for entries
pub mod journal_io;
/// Diagnostic logging setup on stderr
pub mod logging;
/// High-level operations
pub mod ops;

// Re-export important types for convenience
pub use cli::CliArgs;
pub use config::Config;
pub use errors::{AppError, AppResult};
pub use ops::{create_todays_entry, write_todays_entry, EntryOutcome, EntryStatus};
