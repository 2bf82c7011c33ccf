use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::SchemaError;

/// Input kinds the form schema can declare. Unknown kinds degrade to a
/// plain text input rather than failing the whole schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Number,
    Checkbox,
    #[serde(other)]
    Other,
}

/// One field descriptor from the external form schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSchema {
    /// Field name, also the key in the submission payload.
    pub name: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// For checkboxes "required" means the box must be checked.
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub min_length: Option<usize>,
    /// Lower bound for number fields.
    #[serde(default)]
    pub min: Option<f64>,
}

impl FieldSchema {
    /// Human label for prompts and error messages; falls back to the
    /// field name.
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }
}

/// Load the form schema from a JSON file.
pub fn load_schema(path: &Path) -> Result<Vec<FieldSchema>, SchemaError> {
    let raw = fs::read_to_string(path).map_err(|source| SchemaError::Read {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| SchemaError::Parse {
        path: path.display().to_string(),
        source,
    })
}

/// A raw value as the form holds and submits it: text and number inputs
/// stay strings, checkboxes are booleans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Text(String),
}

impl FieldValue {
    /// The blank value a field of this type starts from.
    pub fn default_for(field_type: FieldType) -> Self {
        match field_type {
            FieldType::Checkbox => FieldValue::Bool(false),
            _ => FieldValue::Text(String::new()),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            FieldValue::Bool(_) => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(checked) => Some(*checked),
            FieldValue::Text(_) => None,
        }
    }
}

/// Submission payload: field name to entered value, exactly the JSON
/// body the create and update endpoints expect.
pub type FormValues = BTreeMap<String, FieldValue>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_schema_with_optional_keys_missing() {
        let fields: Vec<FieldSchema> = serde_json::from_str(
            r#"[
                {"name": "name", "label": "Product Name", "type": "text",
                 "required": true, "min_length": 3},
                {"name": "price", "type": "number", "required": true, "min": 0},
                {"name": "inStock", "type": "checkbox"}
            ]"#,
        )
        .unwrap();
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[0].display_label(), "Product Name");
        assert_eq!(fields[0].min_length, Some(3));
        assert_eq!(fields[1].field_type, FieldType::Number);
        assert_eq!(fields[1].min, Some(0.0));
        assert!(!fields[2].required);
        assert_eq!(fields[2].display_label(), "inStock");
    }

    #[test]
    fn unknown_field_type_degrades_to_other() {
        let field: FieldSchema =
            serde_json::from_str(r#"{"name": "color", "type": "radio"}"#).unwrap();
        assert_eq!(field.field_type, FieldType::Other);
    }

    #[test]
    fn field_values_serialize_untagged() {
        let mut values = FormValues::new();
        values.insert("name".to_string(), FieldValue::Text("Desk".to_string()));
        values.insert("price".to_string(), FieldValue::Text("25".to_string()));
        values.insert("inStock".to_string(), FieldValue::Bool(true));
        assert_eq!(
            serde_json::to_value(&values).unwrap(),
            serde_json::json!({"inStock": true, "name": "Desk", "price": "25"})
        );
    }

    #[test]
    fn default_values_match_field_types() {
        assert_eq!(
            FieldValue::default_for(FieldType::Checkbox),
            FieldValue::Bool(false)
        );
        assert_eq!(
            FieldValue::default_for(FieldType::Number),
            FieldValue::Text(String::new())
        );
    }
}
