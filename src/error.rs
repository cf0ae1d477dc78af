//! Crate-wide error type

use crate::sim::ObjectTypeId;

/// Errors raised while registering types or moving snapshots in and out
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Two registrations claimed the same type id. Fatal at start-up.
    #[error("type id {id} registered twice ({existing} and {duplicate})")]
    DuplicateTypeRegistration {
        id: ObjectTypeId,
        existing: &'static str,
        duplicate: &'static str,
    },

    /// A type id this build never registered; `index` is the snapshot entry
    /// when the id came from a load
    #[error("unknown type id {id}{}", entry_suffix(.index))]
    UnknownTypeId {
        id: ObjectTypeId,
        index: Option<u64>,
    },

    /// The byte stream ended before all declared entries were read
    #[error("snapshot truncated: declared {declared} entries, {complete} fully read")]
    TruncatedSnapshot { declared: u64, complete: u64 },

    #[error("snapshot i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings file is not valid JSON: {0}")]
    Settings(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

fn entry_suffix(index: &Option<u64>) -> String {
    index.map_or_else(String::new, |i| format!(" at snapshot entry {i}"))
}
