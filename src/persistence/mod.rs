//! Snapshot persistence for the object store
//!
//! Features:
//! - Fixed little-endian binary layout (count, then type id + payload)
//! - Registry-driven reconstruction of unknown-at-compile-time types
//! - Atomic file writes (tmp → save) with optional backup of the old save
//! - All-or-nothing loads: a failed load leaves the store empty

pub mod snapshot;
pub mod stream;

pub use snapshot::{backup_path, from_bytes, load, load_from_file, save, save_to_file, to_bytes};
pub use stream::{StateReader, StateWriter};
