//! Unit domain model.
//!
//! # Responsibility
//! - Define the canonical record held by a collection: a label plus an
//!   ordered list of text fragments.
//! - Apply label/fragment normalization when a record is built or extended.
//! - Render one record in the on-disk body format.
//!
//! # Invariants
//! - `label` never contains a space or `{` after construction.
//! - Fragment order is append order and survives a serialize/parse cycle.
//! - A unit with zero fragments is valid and renders an empty body.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Indentation prefix given to every fragment line in the on-disk format.
pub(crate) const FRAGMENT_INDENT: &str = "    ";

/// Error for fragment-targeted unit operations.
#[derive(Debug)]
pub enum UnitError {
    /// No fragment equal to the requested text exists in the unit.
    FragmentNotFound { fragment: String, label: String },
}

impl Display for UnitError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FragmentNotFound { fragment, label } => {
                write!(f, "no fragment `{fragment}` in unit `{label}`")
            }
        }
    }
}

impl Error for UnitError {}

/// Removes every space and every `{` wherever they occur in `label`.
///
/// The stripping is deliberately whole-string, not a trim: callers must not
/// rely on interior whitespace surviving in a label.
pub fn normalize_label(label: &str) -> String {
    label
        .chars()
        .filter(|ch| *ch != ' ' && *ch != '{')
        .collect()
}

/// Removes every literal four-space run wherever it occurs in `text`.
///
/// This is the inverse of the indent the renderer adds to fragment lines.
/// Like the label rule it applies anywhere in the string, so fragment text
/// containing interior four-space runs does not survive an append unchanged.
pub fn normalize_fragment(text: &str) -> String {
    text.replace(FRAGMENT_INDENT, "")
}

/// One named record: a label plus an ordered list of text fragments.
///
/// Fragments are opaque single-line payloads; the unit never interprets
/// them. Two units are equal when labels and fragment sequences match
/// element-wise and in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    label: String,
    fragments: Vec<String>,
}

impl Unit {
    /// Creates a unit from a raw label and zero or more fragments.
    ///
    /// The label is normalized via [`normalize_label`]; fragment content is
    /// stored as given. Only the append path normalizes fragment text.
    pub fn new<I, S>(label: &str, fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            label: normalize_label(label),
            fragments: fragments.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the normalized label naming this unit.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns an owned copy of the fragment list.
    ///
    /// The internal list is never handed out mutably; callers cannot change
    /// unit state through the returned value.
    pub fn fragments(&self) -> Vec<String> {
        self.fragments.clone()
    }

    /// Normalizes `text` via [`normalize_fragment`] and appends it.
    pub fn append_fragment(&mut self, text: &str) {
        self.fragments.push(normalize_fragment(text));
    }

    /// Removes the first fragment equal to `text`.
    ///
    /// # Errors
    /// Returns [`UnitError::FragmentNotFound`] when no fragment matches.
    pub fn remove_fragment(&mut self, text: &str) -> Result<(), UnitError> {
        match self.fragments.iter().position(|fragment| fragment == text) {
            Some(index) => {
                self.fragments.remove(index);
                Ok(())
            }
            None => Err(UnitError::FragmentNotFound {
                fragment: text.to_string(),
                label: self.label.clone(),
            }),
        }
    }

    /// Returns whether any fragment equals `text`.
    pub fn contains_fragment(&self, text: &str) -> bool {
        self.fragments.iter().any(|fragment| fragment == text)
    }

    /// Returns the number of fragments.
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Returns whether the unit holds no fragments.
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Drops every fragment. Irreversible; the label is kept.
    pub fn clear(&mut self) {
        self.fragments.clear();
    }
}

impl Display for Unit {
    /// Renders the on-disk body form:
    /// label, space, open brace, one indented line per fragment, then a
    /// blank line and the closing brace.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} {{", self.label)?;
        for fragment in &self.fragments {
            writeln!(f, "{FRAGMENT_INDENT}{fragment}")?;
        }
        write!(f, "\n}}")
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize_fragment, normalize_label, Unit, UnitError};

    #[test]
    fn label_normalization_strips_everywhere() {
        assert_eq!(normalize_label("leg day {"), "legday");
        assert_eq!(normalize_label("  2024-01-01  "), "2024-01-01");
        assert_eq!(normalize_label("a{b{c"), "abc");
    }

    #[test]
    fn label_normalization_is_idempotent() {
        let once = normalize_label("push day {");
        assert_eq!(normalize_label(&once), once);
    }

    #[test]
    fn append_fragment_strips_four_space_runs() {
        let mut unit = Unit::new("day", Vec::<String>::new());
        unit.append_fragment("    squat_3_5_80kg");
        unit.append_fragment("a    b");
        unit.append_fragment("        ");
        assert_eq!(unit.fragments(), vec!["squat_3_5_80kg", "ab", ""]);
    }

    #[test]
    fn factory_stores_fragment_content_as_given() {
        let unit = Unit::new("day", ["    indented", "plain"]);
        assert_eq!(unit.fragments(), vec!["    indented", "plain"]);
    }

    #[test]
    fn remove_fragment_takes_first_match_only() {
        let mut unit = Unit::new("day", ["a", "b", "a"]);
        unit.remove_fragment("a").unwrap();
        assert_eq!(unit.fragments(), vec!["b", "a"]);
    }

    #[test]
    fn remove_missing_fragment_is_an_error() {
        let mut unit = Unit::new("day", ["a"]);
        let err = unit.remove_fragment("b").unwrap_err();
        assert!(matches!(
            err,
            UnitError::FragmentNotFound { fragment, label }
                if fragment == "b" && label == "day"
        ));
        assert_eq!(unit.len(), 1);
    }

    #[test]
    fn contains_fragment_is_an_exact_match_predicate() {
        let unit = Unit::new("day", ["squat_3_5_80kg"]);
        assert!(unit.contains_fragment("squat_3_5_80kg"));
        assert!(!unit.contains_fragment("squat"));
    }

    #[test]
    fn clear_empties_fragments_and_keeps_label() {
        let mut unit = Unit::new("day", ["a", "b"]);
        unit.clear();
        assert!(unit.is_empty());
        assert_eq!(unit.label(), "day");
    }

    #[test]
    fn fragments_returns_a_detached_copy() {
        let unit = Unit::new("day", ["a"]);
        let mut copy = unit.fragments();
        copy.push("b".to_string());
        assert_eq!(unit.fragments(), vec!["a"]);
    }

    #[test]
    fn equality_is_structural_and_order_sensitive() {
        assert_eq!(Unit::new("x", ["a", "b"]), Unit::new("x", ["a", "b"]));
        assert_ne!(Unit::new("x", ["a", "b"]), Unit::new("x", ["b", "a"]));
        assert_ne!(Unit::new("x", ["a"]), Unit::new("y", ["a"]));
    }

    #[test]
    fn display_renders_body_format() {
        let unit = Unit::new("day", ["squat", "bench"]);
        assert_eq!(unit.to_string(), "day {\n    squat\n    bench\n\n}");
    }

    #[test]
    fn display_renders_empty_body() {
        let unit = Unit::new("day", Vec::<String>::new());
        assert_eq!(unit.to_string(), "day {\n\n}");
    }
}
