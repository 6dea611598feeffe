//! # Validation
//!
//! Checks submitted values against the tags of a template. Every tag is checked, in tag
//! order, and every violation is reported, so a form can show all problems at once.
//!
//! Text, multiline, email and select values are checked exactly as submitted. Number and URL
//! values are coerced first, and coercion ignores surrounding whitespace.

use crate::config::EngineConfig;
use crate::template::{FieldKind, ParsedTemplate, TagSpec};
use crate::value::{filled, parse_number, with_scheme};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;
use url::Url;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

fn check_value(tag: &TagSpec, value: &str, config: &EngineConfig) -> Option<String> {
    let name = &tag.name;
    match tag.kind {
        FieldKind::Email if !EMAIL_RE.is_match(value) => {
            Some(format!("{} must be a valid email address", name))
        }
        FieldKind::Url if Url::parse(&with_scheme(value)).is_err() => {
            Some(format!("{} must be a valid URL", name))
        }
        FieldKind::Number if parse_number(value).is_none() => {
            Some(format!("{} must be a valid number", name))
        }
        FieldKind::Select if !tag.choices().iter().any(|choice| choice == value) => {
            Some(format!("{} must be one of the preset options", name))
        }
        FieldKind::Text if value.chars().count() > config.text_max_length => {
            Some(format!("{} content is too long", name))
        }
        FieldKind::Multiline if value.chars().count() > config.multiline_max_length => {
            Some(format!("{} content is too long", name))
        }
        _ => None,
    }
}

pub fn validate(
    template: &ParsedTemplate,
    values: &HashMap<String, String>,
    config: &EngineConfig,
) -> ValidationResult {
    let mut errors = Vec::new();

    for tag in &template.tags {
        match filled(values, &tag.name) {
            None if tag.required => errors.push(format!("{} is a required field", tag.name)),
            None => {}
            Some(value) => errors.extend(check_value(tag, value, config)),
        }
    }

    tracing::debug!(errors = errors.len(), "validated parameters");

    ValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}
