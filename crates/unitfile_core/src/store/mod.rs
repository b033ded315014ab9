//! File-backed stores and their shared error taxonomy.
//!
//! # Responsibility
//! - Define the store-layer error type used by `Collection` and `LineStore`.
//! - Own the scoped read-or-create bootstrap both stores open with.
//!
//! # Invariants
//! - Errors surface to the immediate caller untouched; the store layer
//!   never retries, recovers, or degrades internally.
//! - Every successful mutation leaves the backing file byte-for-byte equal
//!   to the in-memory state.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub mod collection;
pub mod format;
pub mod line_store;

pub use collection::Collection;
pub use line_store::LineStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-layer error for open, parse, and mutation operations.
#[derive(Debug)]
pub enum StoreError {
    /// Backing file could not be created, opened, read, or written.
    Io(io::Error),
    /// A line outside any unit body that is neither a start nor an end
    /// marker. Aborts the whole parse; no partial collection is returned.
    Format { line_number: usize, path: PathBuf },
    /// A label-targeted operation matched no unit.
    LabelNotFound { label: String, path: PathBuf },
    /// `labels()` was called while the store holds no parsable content.
    EmptyCollection { path: PathBuf },
    /// Positional line removal past the end of a line store.
    IndexOutOfBounds { index: usize, len: usize },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Format { line_number, path } => write!(
                f,
                "formatting error in line {line_number} of collection `{}`",
                path.display()
            ),
            Self::LabelNotFound { label, path } => write!(
                f,
                "no unit labeled `{label}` in collection `{}`",
                path.display()
            ),
            Self::EmptyCollection { path } => {
                write!(f, "collection `{}` is empty", path.display())
            }
            Self::IndexOutOfBounds { index, len } => write!(
                f,
                "line index {index} is out of bounds for a store of {len} lines"
            ),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

/// Reads the whole file at `path`, creating it empty when absent.
///
/// The file handle is acquired and released inside this call.
pub(crate) fn read_or_create(path: &Path) -> StoreResult<String> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            fs::write(path, "")?;
            Ok(String::new())
        }
        Err(err) => Err(err.into()),
    }
}
