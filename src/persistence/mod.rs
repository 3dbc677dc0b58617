use serde_json::Error as SerdeJsonError;
use std::fmt;
use std::io;

#[derive(Debug)]
pub enum PersistenceError {
    Serialization(SerdeJsonError),
    Io(io::Error),
    #[cfg(feature = "sqlite")]
    Sqlite(rusqlite::Error),
    InvalidKey(String),
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceError::Serialization(err) => write!(f, "serialization error: {err}"),
            PersistenceError::Io(err) => write!(f, "io error: {err}"),
            #[cfg(feature = "sqlite")]
            PersistenceError::Sqlite(err) => write!(f, "sqlite error: {err}"),
            PersistenceError::InvalidKey(key) => write!(f, "invalid storage key '{key}'"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<SerdeJsonError> for PersistenceError {
    fn from(value: SerdeJsonError) -> Self {
        Self::Serialization(value)
    }
}

impl From<io::Error> for PersistenceError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for PersistenceError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// String blobs under fixed keys, the way a browser exposes local storage.
pub trait BlobStore: Send + Sync {
    fn read_blob(&self, key: &str) -> PersistenceResult<Option<String>>;
    fn write_blob(&self, key: &str, value: &str) -> PersistenceResult<()>;
    fn remove_blob(&self, key: &str) -> PersistenceResult<()>;
}

impl<T: BlobStore + ?Sized> BlobStore for std::sync::Arc<T> {
    fn read_blob(&self, key: &str) -> PersistenceResult<Option<String>> {
        (**self).read_blob(key)
    }

    fn write_blob(&self, key: &str, value: &str) -> PersistenceResult<()> {
        (**self).write_blob(key, value)
    }

    fn remove_blob(&self, key: &str) -> PersistenceResult<()> {
        (**self).remove_blob(key)
    }
}

/// Keys become file names and table keys; keep them to a safe alphabet.
pub(crate) fn validate_key(key: &str) -> PersistenceResult<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
        && !key.starts_with('.');
    if valid {
        Ok(())
    } else {
        Err(PersistenceError::InvalidKey(key.to_string()))
    }
}

pub mod file;
pub mod memory;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use file::FileBlobStore;
pub use memory::MemoryBlobStore;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteBlobStore;
