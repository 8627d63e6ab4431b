//! Schema registry mapping form-type keys to their schemas.
//!
//! The registry is built once at start-up, either from the built-in forms or
//! from a schema file, and is read-only afterwards.

use super::errors::{DomainError, DomainResult};
use super::models::{FieldDescriptor, FieldKind, Schema};

/// Read-only lookup of schemas by form-type key.
///
/// Keys keep the order they were registered in, which is also the order the
/// form-type selector offers them.
///
/// # Examples
///
/// ```
/// use dynform::domain::SchemaRegistry;
///
/// let registry = SchemaRegistry::builtin();
/// assert_eq!(registry.lookup("userInfo").unwrap().fields.len(), 3);
/// assert!(registry.lookup("nope").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    schemas: Vec<Schema>,
}

impl SchemaRegistry {
    pub fn new(schemas: Vec<Schema>) -> DomainResult<Self> {
        if schemas.is_empty() {
            return Err(DomainError::EmptyRegistry);
        }
        for (index, schema) in schemas.iter().enumerate() {
            if schemas[..index].iter().any(|other| other.key == schema.key) {
                return Err(DomainError::DuplicateFormType(schema.key.clone()));
            }
        }
        Ok(Self { schemas })
    }

    /// The three forms available when no schema file is given.
    pub fn builtin() -> Self {
        Self {
            schemas: vec![user_info(), address_info(), payment_info()],
        }
    }

    /// Looks up the schema registered under `form_type`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::UnknownFormType`] when no schema has that key.
    pub fn lookup(&self, form_type: &str) -> DomainResult<&Schema> {
        self.schemas
            .iter()
            .find(|schema| schema.key == form_type)
            .ok_or_else(|| DomainError::UnknownFormType(form_type.to_string()))
    }

    pub fn schemas(&self) -> &[Schema] {
        &self.schemas
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.schemas.iter().map(|schema| schema.key.as_str())
    }

    pub fn position(&self, form_type: &str) -> Option<usize> {
        self.schemas.iter().position(|schema| schema.key == form_type)
    }

    pub fn first(&self) -> &Schema {
        &self.schemas[0]
    }

    /// Key following (or preceding) `form_type`, wrapping around.
    pub fn cycle_key(&self, form_type: &str, forward: bool) -> &str {
        let len = self.schemas.len();
        let next = match self.position(form_type) {
            Some(index) if forward => (index + 1) % len,
            Some(index) => (index + len - 1) % len,
            None => 0,
        };
        &self.schemas[next].key
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

fn user_info() -> Schema {
    Schema {
        key: "userInfo".to_string(),
        title: "User Information".to_string(),
        fields: vec![
            FieldDescriptor::new("firstName", "First Name", FieldKind::Text).required(),
            FieldDescriptor::new("lastName", "Last Name", FieldKind::Text).required(),
            FieldDescriptor::new("age", "Age", FieldKind::Number),
        ],
    }
}

fn address_info() -> Schema {
    Schema {
        key: "addressInfo".to_string(),
        title: "Address Information".to_string(),
        fields: vec![
            FieldDescriptor::new("street", "Street", FieldKind::Text).required(),
            FieldDescriptor::new("city", "City", FieldKind::Text).required(),
            FieldDescriptor::new(
                "state",
                "State",
                FieldKind::Dropdown {
                    options: vec![
                        "California".to_string(),
                        "Texas".to_string(),
                        "New York".to_string(),
                    ],
                },
            )
            .required(),
            FieldDescriptor::new("zipCode", "Zip Code", FieldKind::Text),
        ],
    }
}

fn payment_info() -> Schema {
    Schema {
        key: "paymentInfo".to_string(),
        title: "Payment Information".to_string(),
        fields: vec![
            FieldDescriptor::new("cardNumber", "Card Number", FieldKind::Text).required(),
            FieldDescriptor::new("expiryDate", "Expiry Date", FieldKind::Date).required(),
            FieldDescriptor::new("cvv", "CVV", FieldKind::Password).required(),
            FieldDescriptor::new("cardholderName", "Cardholder Name", FieldKind::Text).required(),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_keys_in_order() {
        let registry = SchemaRegistry::builtin();
        let keys: Vec<&str> = registry.keys().collect();
        assert_eq!(keys, vec!["userInfo", "addressInfo", "paymentInfo"]);
    }

    #[test]
    fn test_builtin_schemas_are_valid() {
        for schema in SchemaRegistry::builtin().schemas() {
            let rebuilt = Schema::new(&schema.key, &schema.title, schema.fields.clone());
            assert_eq!(rebuilt.as_ref(), Ok(schema));
        }
    }

    #[test]
    fn test_lookup_unknown_form_type() {
        let registry = SchemaRegistry::builtin();
        assert_eq!(
            registry.lookup("shippingInfo"),
            Err(DomainError::UnknownFormType("shippingInfo".to_string()))
        );
    }

    #[test]
    fn test_lookup_address_dropdown() {
        let registry = SchemaRegistry::builtin();
        let schema = registry.lookup("addressInfo").unwrap();
        let state = schema.field("state").unwrap();
        assert!(matches!(&state.kind, FieldKind::Dropdown { options } if options.len() == 3));
        assert!(state.required);
    }

    #[test]
    fn test_cycle_key_wraps() {
        let registry = SchemaRegistry::builtin();
        assert_eq!(registry.cycle_key("userInfo", true), "addressInfo");
        assert_eq!(registry.cycle_key("paymentInfo", true), "userInfo");
        assert_eq!(registry.cycle_key("userInfo", false), "paymentInfo");
        assert_eq!(registry.cycle_key("missing", true), "userInfo");
    }

    #[test]
    fn test_new_rejects_duplicates_and_empty() {
        assert_eq!(SchemaRegistry::new(vec![]).unwrap_err(), DomainError::EmptyRegistry);

        let schema = Schema::new("a", "A", vec![]).unwrap();
        let err = SchemaRegistry::new(vec![schema.clone(), schema]).unwrap_err();
        assert_eq!(err, DomainError::DuplicateFormType("a".to_string()));
    }
}
