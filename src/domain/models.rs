use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use serde::Deserialize;

use super::errors::{DomainError, DomainResult};

/// The kind of input a field accepts.
///
/// Only dropdowns carry extra data; every other kind is a free-form input.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Number,
    Date,
    Password,
    Dropdown { options: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub label: String,
    #[serde(default)]
    pub required: bool,
    #[serde(flatten)]
    pub kind: FieldKind,
}

impl FieldDescriptor {
    pub fn new(name: &str, label: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            required: false,
            kind,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn required_message(&self) -> String {
        format!("{} is required", self.label)
    }
}

/// A named, ordered set of field descriptors describing one form.
///
/// Field names are unique within a schema and every dropdown has at least
/// one option; [`Schema::new`] rejects anything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    pub key: String,
    pub title: String,
    pub fields: Vec<FieldDescriptor>,
}

impl Schema {
    pub fn new(key: &str, title: &str, fields: Vec<FieldDescriptor>) -> DomainResult<Self> {
        let mut seen = HashSet::new();
        for field in &fields {
            if !seen.insert(field.name.as_str()) {
                return Err(DomainError::DuplicateField {
                    form_type: key.to_string(),
                    field: field.name.clone(),
                });
            }
            if let FieldKind::Dropdown { options } = &field.kind {
                if options.is_empty() {
                    return Err(DomainError::MissingOptions(field.name.clone()));
                }
            }
        }

        Ok(Self {
            key: key.to_string(),
            title: title.to_string(),
            fields,
        })
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn contains_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|field| field.required)
    }
}

/// A single scalar value entered into a field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
}

impl FieldValue {
    /// Whether this value counts as present.
    ///
    /// Validation and progress both use this predicate, so a field is never
    /// reported missing while also counted as filled.
    pub fn is_filled(&self) -> bool {
        match self {
            FieldValue::Text(text) => !text.trim().is_empty(),
            FieldValue::Number(number) => number.is_finite(),
        }
    }

    /// Converts raw text typed into a field of the given kind.
    ///
    /// Number fields store a parsed finite number and keep the raw text
    /// otherwise, so `NaN` or `inf` typed by hand stay as typed.
    pub fn from_input(kind: &FieldKind, raw: &str) -> Self {
        match kind {
            FieldKind::Number => match raw.trim().parse::<f64>() {
                Ok(number) if number.is_finite() => FieldValue::Number(number),
                _ => FieldValue::Text(raw.to_string()),
            },
            FieldKind::Text | FieldKind::Date | FieldKind::Password | FieldKind::Dropdown { .. } => {
                FieldValue::Text(raw.to_string())
            }
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            FieldValue::Number(_) => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(text) => write!(f, "{}", text),
            FieldValue::Number(number) => write!(f, "{}", number),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(text: &str) -> Self {
        FieldValue::Text(text.to_string())
    }
}

/// In-progress values of the active form, keyed by field name.
pub type FormValues = HashMap<String, FieldValue>;

/// Validation messages keyed by field name, ordered for stable display.
pub type ErrorMap = BTreeMap<String, String>;
