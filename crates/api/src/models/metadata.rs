//! Externally-declared configuration metadata records.
//!
//! Some configuration keys and legal values are declared out-of-band in a
//! metadata file rather than derived from the type graph. Parsing that file
//! is a collaborator concern; these DTOs are the hand-off shape in which the
//! declarations reach the suggestion layer, already Suggestion-compatible.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ApiError, ApiResult};
use crate::models::suggestion::Suggestion;
use crate::models::types::TypeRef;

/// A declared logical group of properties (no backing field of its own).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PropertyGroupRecord {
    pub name: String,
    /// Class backing the group, when one exists
    #[serde(rename = "type")]
    pub class_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Type that contributed the group
    #[serde(default)]
    pub source_type: Option<String>,
    #[serde(default)]
    pub source_method: Option<String>,
}

impl PropertyGroupRecord {
    pub fn documentation(&self, path_dot_delimited: &str) -> String {
        let mut out = format!("<b>{path_dot_delimited}</b>");
        if let Some(class_name) = &self.class_name {
            out.push_str(&format!(" ({class_name})"));
        }
        if let Some(description) = &self.description {
            out.push_str(&format!("<p>{description}</p>"));
        }
        if let Some(source_type) = &self.source_type {
            let mut declared_at = strip_generics(source_type).to_string();
            if let Some(method) = &self.source_method {
                declared_at.push('.');
                declared_at.push_str(method);
            }
            // only worth showing when it differs from the backing class
            if self.class_name.as_deref().map(strip_generics) != Some(declared_at.as_str()) {
                out.push_str(&format!("<p>Declared at {declared_at}</p>"));
            }
        }
        out
    }

    pub fn to_suggestion(&self, ancestor_names: Vec<String>, num_of_ancestors: usize) -> Suggestion {
        let mut suggestion = Suggestion::new_key(ancestor_names, num_of_ancestors);
        if let Some(class_name) = &self.class_name {
            suggestion = suggestion.with_short_type(shortened_type(class_name));
        }
        if let Some(description) = &self.description {
            suggestion = suggestion.with_description(description.clone());
        }
        suggestion
    }
}

/// A declared legal value for a property (a "hint").
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ValueHintRecord {
    /// The value itself; scalar, or an array when the property is array-typed
    pub value: Value,
    #[serde(default)]
    pub description: Option<String>,
}

impl ValueHintRecord {
    /// The `value` attribute is mandatory in the metadata format.
    pub fn try_new(value: Value, description: Option<String>) -> ApiResult<Self> {
        if value.is_null() {
            return Err(ApiError::InvalidRecord(
                "hint value attribute is mandatory".to_string(),
            ));
        }
        Ok(Self { value, description })
    }

    pub fn represents_single_value(&self) -> bool {
        !self.value.is_array()
    }

    /// Editor-facing rendering of the hinted value.
    pub fn display(&self) -> String {
        match &self.value {
            Value::Array(items) => {
                let rendered = items
                    .iter()
                    .map(render_scalar)
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("[ {rendered} ]")
            }
            other => render_scalar(other),
        }
    }

    pub fn suggestion_for_value(
        &self,
        ancestor_names: Vec<String>,
        default_value: Option<&str>,
        value_type: Option<&TypeRef>,
    ) -> Suggestion {
        let display = self.display();
        let mut suggestion = Suggestion::new_value(ancestor_names, display.clone());
        if let Some(ty) = value_type {
            suggestion = suggestion.with_short_type(ty.short_name());
        }
        if let Some(description) = &self.description {
            suggestion = suggestion.with_description(description.clone());
        }
        if default_value == Some(display.as_str()) {
            suggestion = suggestion.mark_default_value();
        }
        suggestion
    }

    pub fn documentation_for_value(
        &self,
        path_dot_delimited: &str,
        value_type: Option<&TypeRef>,
    ) -> String {
        let mut out = format!("<b>{path_dot_delimited}</b> = <b>{}</b>", self.display());
        if let Some(ty) = value_type {
            out.push_str(&format!(" ({})", ty.canonical_name()));
        }
        if let Some(description) = &self.description {
            out.push_str(&format!("<p>{description}</p>"));
        }
        out
    }
}

fn render_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn strip_generics(name: &str) -> &str {
    match name.find('<') {
        Some(idx) => &name[..idx],
        None => name,
    }
}

fn shortened_type(name: &str) -> String {
    let stripped = strip_generics(name);
    stripped
        .rsplit('.')
        .next()
        .unwrap_or(stripped)
        .to_string()
}
