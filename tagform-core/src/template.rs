//! # Template
//!
//! Core data structures produced by the [`parser`](crate::parser) and consumed by every
//! other stage of the engine.
//!
//! - [`FieldKind`] - The inferred type of a tag
//! - [`TagSpec`] - One fillable parameter, as declared by its first occurrence
//! - [`ParsedTemplate`] - The original content plus its ordered, deduplicated tags

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Multiline,
    Number,
    Email,
    Url,
    Date,
    Select,
}

impl FieldKind {
    /// Maps the optional type token of a field tag to its kind.
    ///
    /// Matching is case-insensitive. Unknown or missing tokens fall back to [`FieldKind::Text`].
    /// `select` is never produced here: only the selector dialect creates select tags.
    pub fn from_token(token: Option<&str>) -> FieldKind {
        let Some(token) = token else {
            return FieldKind::Text;
        };

        match token.trim().to_lowercase().as_str() {
            "multiline" | "textarea" => FieldKind::Multiline,
            "number" | "num" => FieldKind::Number,
            "email" | "mail" => FieldKind::Email,
            "url" | "link" => FieldKind::Url,
            "date" => FieldKind::Date,
            _ => FieldKind::Text,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Multiline => "multiline",
            FieldKind::Number => "number",
            FieldKind::Email => "email",
            FieldKind::Url => "url",
            FieldKind::Date => "date",
            FieldKind::Select => "select",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single fillable parameter of a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagSpec {
    /// The full bracketed text of the first occurrence, e.g. `{{site:Homepage:https://x.com:url}}`.
    pub raw: String,
    pub name: String,
    pub description: Option<String>,
    pub example: Option<String>,
    pub kind: FieldKind,
    /// Only present for [`FieldKind::Select`], and then never empty.
    pub choices: Option<Vec<String>>,
    pub required: bool,
    pub default_value: Option<String>,
}

impl TagSpec {
    pub fn field(
        raw: String,
        name: String,
        description: Option<String>,
        example: Option<String>,
        kind: FieldKind,
    ) -> TagSpec {
        TagSpec {
            raw,
            name,
            description,
            example,
            kind,
            choices: None,
            required: true,
            default_value: None,
        }
    }

    /// Builds a select tag. Returns `None` when `choices` is empty.
    pub fn select(
        raw: String,
        name: String,
        description: Option<String>,
        choices: Vec<String>,
    ) -> Option<TagSpec> {
        let default_value = choices.first()?.clone();
        Some(TagSpec {
            raw,
            name,
            description,
            example: None,
            kind: FieldKind::Select,
            choices: Some(choices),
            required: true,
            default_value: Some(default_value),
        })
    }

    pub fn choices(&self) -> &[String] {
        self.choices.as_deref().unwrap_or_default()
    }
}

/// Where an accepted tag appears in the content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagOccurrence {
    pub name: String,
    /// Byte range of the bracketed text inside [`ParsedTemplate::content`].
    pub span: Range<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedTemplate {
    pub content: String,
    pub tags: Vec<TagSpec>,
    pub has_parameters: bool,
    /// Every accepted occurrence in content order, including repeats of an already known name.
    /// When empty, rendering substitutes each tag's `raw` text wherever it appears.
    #[serde(default)]
    pub occurrences: Vec<TagOccurrence>,
}

impl ParsedTemplate {
    /// A template without any tags. Its content is treated as literal text everywhere.
    pub fn literal(content: String) -> ParsedTemplate {
        ParsedTemplate {
            content,
            tags: vec![],
            has_parameters: false,
            occurrences: vec![],
        }
    }

    pub fn tag(&self, name: &str) -> Option<&TagSpec> {
        self.tags.iter().find(|tag| tag.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.tags.iter().map(|tag| tag.name.as_str()).collect()
    }

    pub fn has_kind(&self, kind: FieldKind) -> bool {
        self.tags.iter().any(|tag| tag.kind == kind)
    }
}
