//! Snapshot save/load
//!
//! Layout, little-endian:
//!
//! ```text
//! count    u64
//! count × {
//!     type_id  u64
//!     payload  written by the object itself, no length prefix
//! }
//! ```
//!
//! There is no header or version. A reader can only skip an entry by
//! decoding it, so an unknown type id aborts the whole load.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use super::stream::{StateReader, StateWriter};
use crate::error::{Error, Result};
use crate::sim::{ObjectStore, ObjectTypeId, TypeRegistry};

/// Upper bound on the up-front reservation driven by the declared count
const MAX_PREALLOCATE: u64 = 4096;

/// Write every object in `store`, in order. Returns bytes written.
pub fn save(store: &ObjectStore, destination: &mut dyn Write) -> Result<u64> {
    let mut sink = StateWriter::new(destination);
    sink.write_u64(store.len() as u64)?;
    for object in store.iter() {
        sink.write_u64(object.identity().0)?;
        object.write_state(&mut sink)?;
    }
    Ok(sink.bytes_written())
}

/// Replace the contents of `store` with the snapshot read from `source`.
///
/// The store is cleared first. On any error it is left empty, never
/// partially populated. Returns the number of objects loaded.
pub fn load(
    store: &mut ObjectStore,
    source: &mut dyn Read,
    registry: &TypeRegistry,
) -> Result<usize> {
    store.clear();
    let result = read_entries(store, source, registry);
    if let Err(err) = &result {
        store.clear();
        log::warn!("Snapshot load aborted: {}", err);
    }
    result
}

fn read_entries(
    store: &mut ObjectStore,
    source: &mut dyn Read,
    registry: &TypeRegistry,
) -> Result<usize> {
    let mut reader = StateReader::new(source);
    let declared = reader
        .read_u64()
        .map_err(|err| truncation(err, 0, 0))?;
    store.reserve(declared.min(MAX_PREALLOCATE) as usize);

    for index in 0..declared {
        let id = ObjectTypeId(
            reader
                .read_u64()
                .map_err(|err| truncation(err, declared, index))?,
        );
        let mut object = registry
            .create_by_id(id)
            .map_err(|err| match err {
                Error::UnknownTypeId { id, .. } => Error::UnknownTypeId {
                    id,
                    index: Some(index),
                },
                other => other,
            })?;
        object
            .read_state(&mut reader)
            .map_err(|err| truncation(err, declared, index))?;
        store.push(object);
    }

    log::debug!("Decoded {} objects from {} bytes", declared, reader.bytes_read());
    Ok(store.len())
}

/// Running dry mid-snapshot is a truncation; anything else stays an I/O error
fn truncation(err: io::Error, declared: u64, complete: u64) -> Error {
    if err.kind() == io::ErrorKind::UnexpectedEof {
        Error::TruncatedSnapshot { declared, complete }
    } else {
        Error::Io(err)
    }
}

/// Snapshot of `store` as an in-memory blob
pub fn to_bytes(store: &ObjectStore) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    save(store, &mut bytes)?;
    Ok(bytes)
}

/// [`load`] from an in-memory blob
pub fn from_bytes(store: &mut ObjectStore, bytes: &[u8], registry: &TypeRegistry) -> Result<usize> {
    let mut source = bytes;
    load(store, &mut source, registry)
}

/// Path of the previous snapshot kept by [`save_to_file`]
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".bak");
    PathBuf::from(name)
}

/// Save to `path` atomically.
///
/// The snapshot is written to a temporary file beside `path` and renamed
/// over it, so a failed save leaves any existing snapshot intact. With
/// `keep_backup` the previous snapshot is first copied to
/// [`backup_path`].
pub fn save_to_file(store: &ObjectStore, path: impl AsRef<Path>, keep_backup: bool) -> Result<u64> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    let bytes = {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        let bytes = save(store, &mut writer)?;
        writer.flush()?;
        bytes
    };
    tmp.as_file().sync_all()?;

    if keep_backup && path.exists() {
        fs::copy(path, backup_path(path))?;
    }
    tmp.persist(path).map_err(|err| err.error)?;

    log::info!(
        "Saved {} objects ({} bytes) to {}",
        store.len(),
        bytes,
        path.display()
    );
    Ok(bytes)
}

/// Load from `path`, replacing the contents of `store`.
///
/// The store is emptied even when the file cannot be opened.
pub fn load_from_file(
    store: &mut ObjectStore,
    path: impl AsRef<Path>,
    registry: &TypeRegistry,
) -> Result<usize> {
    let path = path.as_ref();
    store.clear();

    let file = File::open(path).inspect_err(|err| {
        log::warn!("Cannot open snapshot {}: {}", path.display(), err);
    })?;
    let mut reader = BufReader::new(file);
    let count = load(store, &mut reader, registry)?;

    log::info!("Loaded {} objects from {}", count, path.display());
    Ok(count)
}
