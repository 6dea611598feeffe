//! # tagform Core
//!
//! A parameterized template engine. Free-form text may contain typed placeholders such as
//! `{{name}}`, `{{site:Homepage:https://x.com:url}}` or `{{level:Priority|High,Medium,Low}}`;
//! this crate turns such text into a structured template, describes it as a form, validates
//! submitted values and renders the final text.
//!
//! # Modules
//!
//! - [`parser`] - Tag scanning and interpretation
//! - [`template`] - Parsed template data structures
//! - [`schema`] - Form schema generation
//! - [`validate`] - Parameter validation
//! - [`render`] - Preview and safe rendering
//! - [`complexity`] - Authoring complexity estimate
//! - [`example`] - Example value synthesis
//! - [`diagnostics`] - Reporting of skipped tags
//! - [`config`] - Engine limits and markers
//!
//! # Examples
//!
//! ```rust
//! use std::collections::HashMap;
//!
//! let template = tagform_core::parse("Hello {{name}}, visit {{site:Homepage:https://x.com:url}}");
//! assert_eq!(2, template.tags.len());
//!
//! let mut values = HashMap::new();
//! values.insert("name".to_string(), "Amy".to_string());
//! values.insert("site".to_string(), "foo.com".to_string());
//!
//! assert!(tagform_core::validate(&template, &values).is_valid);
//! let rendered = tagform_core::render_safe(&template, &values);
//! assert_eq!("Hello Amy, visit https://foo.com", rendered.content);
//! ```

pub mod complexity;
pub mod config;
pub mod diagnostics;
pub mod engine;
pub mod example;
pub mod parser;
pub mod render;
pub mod schema;
pub mod template;
pub mod validate;
mod value;

use std::collections::HashMap;

pub use complexity::{ComplexityLevel, ComplexityResult};
pub use config::{ConfigError, EngineConfig};
pub use diagnostics::{DiagnosticSink, TagDiagnostic, TagRejection, TracingSink};
pub use engine::{TemplateEngine, TemplateForm};
pub use render::{RenderMode, RenderResult};
pub use schema::{FieldSchema, FormSchema};
pub use template::{FieldKind, ParsedTemplate, TagSpec};
pub use validate::ValidationResult;

pub fn parse(content: &str) -> ParsedTemplate {
    TemplateEngine::default().parse(content)
}

pub fn generate_schema(template: &ParsedTemplate, title: Option<&str>) -> FormSchema {
    TemplateEngine::default().generate_schema(template, title)
}

pub fn validate(template: &ParsedTemplate, values: &HashMap<String, String>) -> ValidationResult {
    TemplateEngine::default().validate(template, values)
}

pub fn render_preview(template: &ParsedTemplate, values: &HashMap<String, String>) -> RenderResult {
    TemplateEngine::default().render_preview(template, values)
}

pub fn render_safe(template: &ParsedTemplate, values: &HashMap<String, String>) -> RenderResult {
    TemplateEngine::default().render_safe(template, values)
}

pub fn estimate_complexity(template: &ParsedTemplate) -> ComplexityResult {
    complexity::estimate_complexity(template)
}

pub fn synthesize_example(template: &ParsedTemplate) -> HashMap<String, String> {
    example::synthesize_example(template)
}

pub fn parse_and_generate_schema(content: &str, title: Option<&str>) -> TemplateForm {
    TemplateEngine::default().parse_and_generate_schema(content, title)
}
