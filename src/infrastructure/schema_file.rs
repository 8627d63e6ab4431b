use crate::domain::{FieldDescriptor, Schema, SchemaRegistry};
use super::errors::InfrastructureResult;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct SchemaDefinition {
    #[serde(default)]
    title: Option<String>,
    fields: Vec<FieldDescriptor>,
}

/// Form definitions in file order.
///
/// A JSON object would normally deserialize into a sorted map, which loses
/// the order the selector should offer the forms in.
struct OrderedDefinitions(Vec<(String, SchemaDefinition)>);

impl<'de> Deserialize<'de> for OrderedDefinitions {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{MapAccess, Visitor};
        use std::fmt;

        struct DefinitionsVisitor;

        impl<'de> Visitor<'de> for DefinitionsVisitor {
            type Value = OrderedDefinitions;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of form type to schema definition")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut definitions = Vec::new();
                while let Some((key, definition)) = map.next_entry::<String, SchemaDefinition>()? {
                    definitions.push((key, definition));
                }
                Ok(OrderedDefinitions(definitions))
            }
        }

        deserializer.deserialize_map(DefinitionsVisitor)
    }
}

pub struct SchemaRepository;

impl SchemaRepository {
    /// Parses a registry from JSON text.
    ///
    /// Every schema goes through [`Schema::new`], so duplicate field names and
    /// option-less dropdowns are rejected here rather than at render time.
    pub fn parse_registry(json: &str) -> InfrastructureResult<SchemaRegistry> {
        let OrderedDefinitions(definitions) = serde_json::from_str(json)?;
        let schemas = definitions
            .into_iter()
            .map(|(key, definition)| {
                let title = definition.title.unwrap_or_else(|| key.clone());
                Schema::new(&key, &title, definition.fields)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(SchemaRegistry::new(schemas)?)
    }

    pub fn load_registry(path: &Path) -> InfrastructureResult<SchemaRegistry> {
        let content = fs::read_to_string(path)?;
        let registry = Self::parse_registry(&content)?;
        log::info!("loaded {} form type(s) from {}", registry.len(), path.display());
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DomainError, FieldKind};
    use crate::infrastructure::InfrastructureError;
    use std::io::Write;

    const SURVEY: &str = r#"{
        "survey": {
            "title": "Survey",
            "fields": [
                {"name": "email", "type": "text", "label": "Email", "required": true},
                {"name": "rating", "type": "dropdown", "label": "Rating", "options": ["1", "2", "3"]},
                {"name": "visited", "type": "date", "label": "Visited"}
            ]
        },
        "feedback": {
            "fields": [
                {"name": "comment", "type": "text", "label": "Comment"}
            ]
        }
    }"#;

    #[test]
    fn test_parse_registry_keeps_file_order() {
        let registry = SchemaRepository::parse_registry(SURVEY).unwrap();
        let keys: Vec<&str> = registry.keys().collect();
        assert_eq!(keys, vec!["survey", "feedback"]);

        let survey = registry.lookup("survey").unwrap();
        assert_eq!(survey.title, "Survey");
        assert!(matches!(&survey.fields[1].kind, FieldKind::Dropdown { options } if options.len() == 3));
        assert_eq!(registry.lookup("feedback").unwrap().title, "feedback");
    }

    #[test]
    fn test_parse_registry_rejects_unknown_type() {
        let json = r#"{"bad": {"fields": [{"name": "x", "type": "color", "label": "X"}]}}"#;
        let result = SchemaRepository::parse_registry(json);
        assert!(matches!(result, Err(InfrastructureError::Json(_))));
    }

    #[test]
    fn test_parse_registry_rejects_duplicate_fields() {
        let json = r#"{"dup": {"fields": [
            {"name": "x", "type": "text", "label": "X"},
            {"name": "x", "type": "number", "label": "X again"}
        ]}}"#;
        let result = SchemaRepository::parse_registry(json);
        assert!(matches!(
            result,
            Err(InfrastructureError::Domain(DomainError::DuplicateField { .. }))
        ));
    }

    #[test]
    fn test_parse_registry_rejects_empty_file() {
        let result = SchemaRepository::parse_registry("{}");
        assert!(matches!(result, Err(InfrastructureError::Domain(DomainError::EmptyRegistry))));
    }

    #[test]
    fn test_load_registry_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SURVEY.as_bytes()).unwrap();

        let registry = SchemaRepository::load_registry(file.path()).unwrap();
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_load_registry_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = SchemaRepository::load_registry(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(InfrastructureError::Io(_))));
    }
}
