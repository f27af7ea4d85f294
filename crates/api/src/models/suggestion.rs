use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A ranked completion result.
///
/// Constructed fresh per query and immutable afterwards; only the metadata
/// engines behind it are cached. The total order (and therefore equality) is
/// defined by the dot-joined ancestor path, then key-before-value, then the
/// display text — all case-sensitive. Returning results through an ordered
/// set both ranks them and enforces that duplicates cannot occur.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Suggestion {
    /// Original (unsanitized) names of the resolved nodes, root first.
    pub ancestor_names: Vec<String>,
    /// How many leading nodes are already committed in the document; the
    /// display text starts after them.
    pub num_of_ancestors: usize,
    /// Non-qualified type shown next to the suggestion
    pub short_type: Option<String>,
    /// Host-rendered documentation, opaque markup
    pub description: Option<String>,
    /// True for value-position suggestions, false for key suggestions
    pub for_value: bool,
    /// True when this value matches the property's declared default
    pub representing_default_value: bool,
    /// Text offered to the editor
    pub display_text: String,
}

impl Suggestion {
    /// Key suggestion: displays the dot-joined originals after the committed
    /// ancestors.
    pub fn new_key(ancestor_names: Vec<String>, num_of_ancestors: usize) -> Self {
        let display_text = ancestor_names
            .get(num_of_ancestors..)
            .unwrap_or(&[])
            .join(".");
        Self {
            ancestor_names,
            num_of_ancestors,
            short_type: None,
            description: None,
            for_value: false,
            representing_default_value: false,
            display_text,
        }
    }

    /// Value suggestion: displays raw text (e.g. an enum constant name), never
    /// a dot-joined path.
    pub fn new_value(ancestor_names: Vec<String>, display_text: impl Into<String>) -> Self {
        let num_of_ancestors = ancestor_names.len();
        Self {
            ancestor_names,
            num_of_ancestors,
            short_type: None,
            description: None,
            for_value: true,
            representing_default_value: false,
            display_text: display_text.into(),
        }
    }

    pub fn with_short_type(mut self, short_type: impl Into<String>) -> Self {
        self.short_type = Some(short_type.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn mark_default_value(mut self) -> Self {
        self.representing_default_value = true;
        self
    }

    /// Ranking key: the ancestor path joined with dots.
    pub fn path_dot_delimited(&self) -> String {
        self.ancestor_names.join(".")
    }
}

impl Ord for Suggestion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.path_dot_delimited()
            .cmp(&other.path_dot_delimited())
            .then_with(|| self.for_value.cmp(&other.for_value))
            .then_with(|| self.display_text.cmp(&other.display_text))
    }
}

impl PartialOrd for Suggestion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Suggestion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Suggestion {}
