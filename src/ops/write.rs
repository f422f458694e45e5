//! Create today's entry and open it in an editor.

use crate::config::Config;
use crate::editor::Editor;
use crate::errors::AppResult;
use crate::journal_io::EntryStore;
use crate::ops::create::{create_todays_entry, EntryOutcome};
use chrono::NaiveDate;
use tracing::info;

/// Creates today's entry if needed, then hands it to `editor`.
///
/// The entry exists on disk before the editor starts, so an editor failure
/// leaves the carried-forward content in place.
///
/// # Errors
///
/// Returns whatever [`create_todays_entry`] or the editor returns.
pub fn write_todays_entry<S: EntryStore, E: Editor + ?Sized>(
    config: &Config,
    store: &S,
    editor: &E,
    today: NaiveDate,
) -> AppResult<EntryOutcome> {
    let outcome = create_todays_entry(config, store, today)?;

    info!("Opening {} for editing", outcome.file_name);
    editor.open(&outcome.path)?;

    Ok(outcome)
}
