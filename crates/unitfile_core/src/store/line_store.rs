//! Flat line-per-entry file store.
//!
//! # Responsibility
//! - Persist an ordered list of uninterpreted text lines in one file.
//! - Share the open/extract/full-rewrite lifecycle of `Collection` without
//!   any record structure on top.
//!
//! # Invariants
//! - Lines are stored verbatim; the store never interprets them.
//! - Every non-empty file image ends with a newline.
//! - `is_empty` is derived state, recomputed after every mutation.

use crate::store::{read_or_create, StoreError, StoreResult};
use log::{error, info};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Ordered list of text lines persisted in one file.
///
/// The simpler sibling of [`crate::store::Collection`]: the to-do style of
/// caller keeps one entry per line and needs no labels or bodies.
#[derive(Debug)]
pub struct LineStore {
    path: PathBuf,
    lines: Vec<String>,
    is_empty: bool,
}

impl LineStore {
    /// Opens the store at `path`, creating the file when absent and reading
    /// every existing line verbatim.
    ///
    /// # Errors
    /// [`StoreError::Io`] when the file cannot be created or read.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let started_at = Instant::now();
        info!("event=store_open module=store status=start kind=lines");

        match Self::open_inner(path.as_ref()) {
            Ok(store) => {
                info!(
                    "event=store_open module=store status=ok kind=lines lines={} duration_ms={}",
                    store.size(),
                    started_at.elapsed().as_millis()
                );
                Ok(store)
            }
            Err(err) => {
                error!(
                    "event=store_open module=store status=error kind=lines duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    fn open_inner(path: &Path) -> StoreResult<Self> {
        let text = read_or_create(path)?;
        let lines: Vec<String> = text.lines().map(str::to_string).collect();
        let is_empty = lines.is_empty();

        Ok(Self {
            path: path.to_path_buf(),
            lines,
            is_empty,
        })
    }

    /// Appends one line and rewrites the file.
    pub fn add(&mut self, line: &str) -> StoreResult<()> {
        self.lines.push(line.to_string());
        self.rewrite()
    }

    /// Removes the first line equal to `line`; an absent line is ignored.
    /// The file is rewritten either way.
    pub fn remove_line(&mut self, line: &str) -> StoreResult<()> {
        if let Some(index) = self.lines.iter().position(|existing| existing == line) {
            self.lines.remove(index);
        }
        self.rewrite()
    }

    /// Removes the line at `index` (0-based).
    ///
    /// # Errors
    /// [`StoreError::IndexOutOfBounds`] when `index` is past the end; the
    /// store is left untouched.
    pub fn remove_at(&mut self, index: usize) -> StoreResult<()> {
        if index >= self.lines.len() {
            return Err(StoreError::IndexOutOfBounds {
                index,
                len: self.lines.len(),
            });
        }
        self.lines.remove(index);
        self.rewrite()
    }

    /// Drops every line and truncates the backing file.
    pub fn clear(&mut self) -> StoreResult<()> {
        self.lines.clear();
        self.rewrite()
    }

    /// Returns an owned copy of all lines in file order.
    pub fn lines(&self) -> Vec<String> {
        self.lines.clone()
    }

    /// Returns the number of lines.
    pub fn size(&self) -> usize {
        self.lines.len()
    }

    /// Returns whether the backing file currently holds no text.
    pub fn is_empty(&self) -> bool {
        self.is_empty
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes every line followed by a newline, overwriting the whole file,
    /// then recomputes the emptiness cache.
    fn rewrite(&mut self) -> StoreResult<()> {
        let mut image = String::new();
        for line in &self.lines {
            image.push_str(line);
            image.push('\n');
        }
        fs::write(&self.path, image)?;
        self.is_empty = self.lines.is_empty();
        Ok(())
    }
}
