//! Label-addressed record collection backed by one text file.
//!
//! # Responsibility
//! - Own the ordered unit list and the exclusive handle to its backing file.
//! - Keep memory and disk consistent after every successful mutation via a
//!   full-file rewrite.
//! - Resolve label-targeted reads to the first match and label-targeted
//!   writes to every match.
//!
//! # Invariants
//! - Unit order is insertion order; label uniqueness is never enforced.
//! - `is_empty` is derived state, recomputed after every mutation.
//! - Queries never touch the file; parsing happens once, at open time.

use crate::model::unit::Unit;
use crate::store::format::{parse_units, render_units};
use crate::store::{read_or_create, StoreError, StoreResult};
use log::{error, info};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Ordered set of units persisted in one human-readable text file.
///
/// Every mutating call rewrites the whole backing file before returning;
/// there is no incremental write path and no write-ahead log. Acceptable at
/// this scale; a crash mid-write can leave a truncated file.
#[derive(Debug)]
pub struct Collection {
    path: PathBuf,
    units: Vec<Unit>,
    is_empty: bool,
}

impl Collection {
    /// Opens the collection at `path`, creating the file when absent and
    /// parsing its units when it already has content.
    ///
    /// # Errors
    /// [`StoreError::Io`] when the file cannot be created or read;
    /// [`StoreError::Format`] when existing content is malformed.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let started_at = Instant::now();
        info!("event=store_open module=store status=start kind=collection");

        match Self::open_inner(path.as_ref()) {
            Ok(collection) => {
                info!(
                    "event=store_open module=store status=ok kind=collection units={} duration_ms={}",
                    collection.size(),
                    started_at.elapsed().as_millis()
                );
                Ok(collection)
            }
            Err(err) => {
                error!(
                    "event=store_open module=store status=error kind=collection duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    fn open_inner(path: &Path) -> StoreResult<Self> {
        let text = read_or_create(path)?;
        // Any line at all counts as content; whether it parses is decided
        // next. "No parsable text" is what `is_empty` reports afterwards.
        let is_empty = text.lines().next().is_none();
        let units = if is_empty {
            Vec::new()
        } else {
            parse_units(&text, path)?
        };

        Ok(Self {
            path: path.to_path_buf(),
            units,
            is_empty,
        })
    }

    /// Appends a new unit built from `label` and zero or more fragments,
    /// then rewrites the backing file.
    pub fn add<I, S>(&mut self, label: &str, fragments: I) -> StoreResult<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.units.push(Unit::new(label, fragments));
        self.rewrite()
    }

    /// Appends a new unit with an empty body.
    pub fn add_empty(&mut self, label: &str) -> StoreResult<()> {
        self.add(label, Vec::<String>::new())
    }

    /// Appends a new unit holding a single fragment.
    pub fn add_one(&mut self, label: &str, fragment: &str) -> StoreResult<()> {
        self.add(label, [fragment])
    }

    /// Removes every unit labeled `label`.
    ///
    /// # Errors
    /// [`StoreError::LabelNotFound`] when no unit matches; the collection
    /// is left untouched.
    pub fn remove(&mut self, label: &str) -> StoreResult<()> {
        if !self.contains(label) {
            return Err(self.label_not_found(label));
        }
        self.units.retain(|unit| unit.label() != label);
        self.rewrite()
    }

    /// Returns whether any unit carries `label`.
    ///
    /// Pure in-memory predicate; false on an empty collection.
    pub fn contains(&self, label: &str) -> bool {
        self.units.iter().any(|unit| unit.label() == label)
    }

    /// Returns an owned copy of the fragments of the first unit labeled
    /// `label`, in insertion order.
    ///
    /// # Errors
    /// [`StoreError::LabelNotFound`] when no unit matches.
    pub fn get(&self, label: &str) -> StoreResult<Vec<String>> {
        self.units
            .iter()
            .find(|unit| unit.label() == label)
            .map(Unit::fragments)
            .ok_or_else(|| self.label_not_found(label))
    }

    /// Appends `fragment` to every unit labeled `label`, not just the
    /// first; label-targeted writes always apply to all matches while
    /// `get` reads only the first.
    ///
    /// # Errors
    /// [`StoreError::LabelNotFound`] when no unit matches.
    pub fn add_to(&mut self, label: &str, fragment: &str) -> StoreResult<()> {
        if !self.contains(label) {
            return Err(self.label_not_found(label));
        }
        for unit in self.units.iter_mut().filter(|unit| unit.label() == label) {
            unit.append_fragment(fragment);
        }
        self.rewrite()
    }

    /// Clears the fragments of every unit labeled `label`, keeping the
    /// units themselves.
    ///
    /// # Errors
    /// [`StoreError::LabelNotFound`] when no unit matches.
    pub fn clear_unit(&mut self, label: &str) -> StoreResult<()> {
        if !self.contains(label) {
            return Err(self.label_not_found(label));
        }
        for unit in self.units.iter_mut().filter(|unit| unit.label() == label) {
            unit.clear();
        }
        self.rewrite()
    }

    /// Drops every unit and truncates the backing file.
    pub fn clear(&mut self) -> StoreResult<()> {
        self.units.clear();
        self.rewrite()
    }

    /// Appends every unit of `other` verbatim; duplicate labels are kept,
    /// nothing is deduplicated. No-op when `other` is empty.
    pub fn merge_from(&mut self, other: &Collection) -> StoreResult<()> {
        if other.is_empty() {
            return Ok(());
        }
        self.units.extend(other.units.iter().cloned());
        self.rewrite()
    }

    /// Returns all labels in insertion order.
    ///
    /// # Errors
    /// [`StoreError::EmptyCollection`] when the store holds no parsable
    /// content. A store whose file has content but zero units returns an
    /// empty list instead.
    pub fn labels(&self) -> StoreResult<Vec<String>> {
        if self.is_empty {
            return Err(StoreError::EmptyCollection {
                path: self.path.clone(),
            });
        }
        Ok(self
            .units
            .iter()
            .map(|unit| unit.label().to_string())
            .collect())
    }

    /// Returns the number of units.
    pub fn size(&self) -> usize {
        self.units.len()
    }

    /// Returns whether the backing file currently holds no parsable text.
    pub fn is_empty(&self) -> bool {
        self.is_empty
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the exact file image the next rewrite would produce.
    pub fn render(&self) -> String {
        render_units(&self.units)
    }

    /// Serializes every unit, overwrites the whole backing file, then
    /// recomputes the emptiness cache. On failure the in-memory list may be
    /// ahead of the file until the next successful mutation.
    fn rewrite(&mut self) -> StoreResult<()> {
        fs::write(&self.path, render_units(&self.units))?;
        self.is_empty = self.units.is_empty();
        Ok(())
    }

    fn label_not_found(&self, label: &str) -> StoreError {
        StoreError::LabelNotFound {
            label: label.to_string(),
            path: self.path.clone(),
        }
    }
}

impl PartialEq for Collection {
    /// Structural equality over the unit lists; backing paths are not
    /// compared.
    fn eq(&self, other: &Self) -> bool {
        self.units == other.units
    }
}

impl Eq for Collection {}
