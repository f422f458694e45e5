//! User-facing operations.
//!
//! These orchestrate configuration, storage and the carry-forward core into
//! the two things the command line can do: create today's entry, and create
//! it then open it for writing.

pub mod create;
pub mod write;

pub use create::{create_todays_entry, EntryOutcome, EntryStatus};
pub use write::write_todays_entry;
