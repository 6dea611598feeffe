//! # Schema
//!
//! Describes the tags of a [`ParsedTemplate`] as a form: one [`FieldSchema`] per tag, in tag
//! order. [`FormSchema::to_json_schema`] gives the JSON Schema object that form builders expect.

use crate::config::EngineConfig;
use crate::template::{FieldKind, ParsedTemplate, TagSpec};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    String,
    Number,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatHint {
    Textarea,
    Email,
    Uri,
    Date,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    pub name: String,
    pub title: String,
    pub description: String,
    pub value_type: ValueType,
    pub format: Option<FormatHint>,
    pub max_length: Option<usize>,
    /// Allowed values of a select field. Labels are the values themselves.
    pub choices: Option<Vec<String>>,
    pub default_value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSchema {
    pub title: String,
    pub description: String,
    pub fields: Vec<FieldSchema>,
    pub required: Vec<String>,
}

fn describe(tag: &TagSpec) -> String {
    let description = tag.description.clone().unwrap_or_default();
    match &tag.example {
        Some(example) if description.is_empty() => format!("e.g., {}", example),
        Some(example) => format!("{} (e.g., {})", description, example),
        None => description,
    }
}

fn field_schema(tag: &TagSpec, config: &EngineConfig) -> FieldSchema {
    let (value_type, format, max_length) = match tag.kind {
        FieldKind::Text => (ValueType::String, None, Some(config.text_max_length)),
        FieldKind::Multiline => (
            ValueType::String,
            Some(FormatHint::Textarea),
            Some(config.multiline_max_length),
        ),
        FieldKind::Number => (ValueType::Number, None, None),
        FieldKind::Email => (ValueType::String, Some(FormatHint::Email), None),
        FieldKind::Url => (ValueType::String, Some(FormatHint::Uri), None),
        FieldKind::Date => (ValueType::String, Some(FormatHint::Date), None),
        FieldKind::Select => (ValueType::String, None, None),
    };

    FieldSchema {
        name: tag.name.clone(),
        title: tag.description.clone().unwrap_or_else(|| tag.name.clone()),
        description: describe(tag),
        value_type,
        format,
        max_length,
        choices: tag.choices.clone(),
        default_value: tag.default_value.clone(),
    }
}

/// Builds the form schema of a template.
///
/// Meant for templates with parameters; for a literal template the result simply has no fields.
pub fn generate_schema(
    template: &ParsedTemplate,
    title: Option<&str>,
    config: &EngineConfig,
) -> FormSchema {
    let count = template.tags.len();
    let plural = if count == 1 { "" } else { "s" };

    FormSchema {
        title: title
            .map(str::to_string)
            .unwrap_or_else(|| config.default_schema_title.clone()),
        description: format!("Fill in the {} parameter{} of this template", count, plural),
        fields: template
            .tags
            .iter()
            .map(|tag| field_schema(tag, config))
            .collect(),
        required: template
            .tags
            .iter()
            .filter(|tag| tag.required)
            .map(|tag| tag.name.clone())
            .collect(),
    }
}

impl FieldSchema {
    pub fn to_json_schema(&self) -> Value {
        let mut property = Map::new();
        property.insert("type".to_string(), json!(self.value_type));
        property.insert("title".to_string(), json!(self.title));
        property.insert("description".to_string(), json!(self.description));
        if let Some(format) = self.format {
            property.insert("format".to_string(), json!(format));
        }
        if let Some(max_length) = self.max_length {
            property.insert("maxLength".to_string(), json!(max_length));
        }
        if let Some(choices) = &self.choices {
            property.insert("enum".to_string(), json!(choices));
            property.insert("enumNames".to_string(), json!(choices));
        }
        if let Some(default_value) = &self.default_value {
            property.insert("default".to_string(), json!(default_value));
        }
        Value::Object(property)
    }
}

impl FormSchema {
    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn to_json_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .fields
            .iter()
            .map(|field| (field.name.clone(), field.to_json_schema()))
            .collect();

        json!({
            "type": "object",
            "title": self.title,
            "description": self.description,
            "properties": properties,
            "required": self.required,
        })
    }
}
