//! Core diary functionality without I/O operations.
//!
//! This module contains the pure pieces of entry handling: recognizing
//! section and todo markup, carrying an entry forward into a new day, and
//! mapping dates to entry file names. Nothing here touches the filesystem;
//! readers, writers and existence checks are handed in by the caller.

mod carry_forward;
mod naming;
mod patterns;
mod template;
mod tokenizer;

pub use carry_forward::{carry_forward, carry_token, CarryForwardSummary};
pub use naming::EntryNaming;
pub use patterns::{PatternConfig, TodoMarkers};
pub use template::ReplacementTemplate;
pub use tokenizer::{EntryTokenizer, TodoState, Token};
