//! Persistence of scan results.
//!
//! Records are keyed by search term with replace-on-rescan semantics: a new
//! scan of a term discards everything previously stored for it.

mod sqlite;
mod types;

pub use sqlite::SqliteResultStore;
pub use types::*;
