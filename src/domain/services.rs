//! Validation and progress services for dynamic forms.
//!
//! Both functions are pure scans over the schema's required fields and share
//! [`FieldValue::is_filled`] as the single notion of "present".

use super::models::{ErrorMap, FieldValue, FormValues, Schema};

/// Progress reported for a schema with no required fields.
pub const VACUOUS_PROGRESS: f64 = 100.0;

fn is_present(values: &FormValues, name: &str) -> bool {
    values.get(name).is_some_and(FieldValue::is_filled)
}

/// Returns one `"{label} is required"` message per required field that is
/// absent or empty.
///
/// Optional fields are never checked, and no format checks are made for any
/// field kind.
///
/// # Examples
///
/// ```
/// use dynform::domain::{compute_errors, FormValues, SchemaRegistry};
///
/// let registry = SchemaRegistry::builtin();
/// let schema = registry.lookup("userInfo").unwrap();
/// let mut values = FormValues::new();
/// values.insert("firstName".to_string(), "A".into());
///
/// let errors = compute_errors(schema, &values);
/// assert_eq!(errors.len(), 1);
/// assert_eq!(errors["lastName"], "Last Name is required");
/// ```
pub fn compute_errors(schema: &Schema, values: &FormValues) -> ErrorMap {
    schema
        .required_fields()
        .filter(|field| !is_present(values, &field.name))
        .map(|field| (field.name.clone(), field.required_message()))
        .collect()
}

/// Percentage in `[0, 100]` of required fields that currently hold a value.
///
/// A schema without required fields is vacuously complete and reports
/// [`VACUOUS_PROGRESS`].
pub fn compute_progress(schema: &Schema, values: &FormValues) -> f64 {
    let required = schema.required_fields().count();
    if required == 0 {
        return VACUOUS_PROGRESS;
    }

    let filled = schema
        .required_fields()
        .filter(|field| is_present(values, &field.name))
        .count();
    100.0 * filled as f64 / required as f64
}

/// Progress rounded to the nearest whole percent for display.
pub fn rounded_progress(progress: f64) -> u16 {
    progress.round().clamp(0.0, 100.0) as u16
}
