//! # Engine
//!
//! [`TemplateEngine`] bundles every stage of the pipeline behind one [`EngineConfig`].
//! The free functions at the crate root use an engine with the default configuration.

use crate::complexity::{ComplexityResult, estimate_complexity};
use crate::config::EngineConfig;
use crate::diagnostics::{DiagnosticSink, TracingSink};
use crate::example::synthesize_example;
use crate::parser::parse_template_with;
use crate::render::{RenderResult, render_preview, render_safe};
use crate::schema::{FormSchema, generate_schema};
use crate::template::ParsedTemplate;
use crate::validate::{ValidationResult, validate};
use serde::Serialize;
use std::collections::HashMap;

/// A parsed template together with its form schema.
///
/// `schema` is `None` when the template has no parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateForm {
    pub template: ParsedTemplate,
    pub schema: Option<FormSchema>,
}

#[derive(Debug, Clone, Default)]
pub struct TemplateEngine {
    config: EngineConfig,
}

impl TemplateEngine {
    pub fn new(config: EngineConfig) -> TemplateEngine {
        TemplateEngine { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Parses `content`, logging skipped tags as warnings.
    pub fn parse(&self, content: &str) -> ParsedTemplate {
        self.parse_with(content, &mut TracingSink)
    }

    pub fn parse_with<S: DiagnosticSink + ?Sized>(
        &self,
        content: &str,
        sink: &mut S,
    ) -> ParsedTemplate {
        parse_template_with(content, &self.config, sink)
    }

    pub fn generate_schema(&self, template: &ParsedTemplate, title: Option<&str>) -> FormSchema {
        generate_schema(template, title, &self.config)
    }

    pub fn validate(
        &self,
        template: &ParsedTemplate,
        values: &HashMap<String, String>,
    ) -> ValidationResult {
        validate(template, values, &self.config)
    }

    pub fn render_preview(
        &self,
        template: &ParsedTemplate,
        values: &HashMap<String, String>,
    ) -> RenderResult {
        render_preview(template, values, &self.config)
    }

    pub fn render_safe(
        &self,
        template: &ParsedTemplate,
        values: &HashMap<String, String>,
    ) -> RenderResult {
        render_safe(template, values, &self.config)
    }

    pub fn estimate_complexity(&self, template: &ParsedTemplate) -> ComplexityResult {
        estimate_complexity(template)
    }

    pub fn synthesize_example(&self, template: &ParsedTemplate) -> HashMap<String, String> {
        synthesize_example(template)
    }

    pub fn parse_and_generate_schema(&self, content: &str, title: Option<&str>) -> TemplateForm {
        let template = self.parse(content);
        let schema = template
            .has_parameters
            .then(|| self.generate_schema(&template, title));
        TemplateForm { template, schema }
    }
}
