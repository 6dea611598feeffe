//! # Rendering
//!
//! Fills the tags of a template with values. Rendering never fails: tags without a value are
//! replaced by a marker and listed in [`RenderResult::unfilled`].
//!
//! - [`RenderMode::Preview`] - unfilled tags become a short placeholder, nothing is escaped
//! - [`RenderMode::Safe`] - unfilled tags become an explicit marker and the output is HTML-escaped
//!
//! Neither mode validates its input.

use crate::config::EngineConfig;
use crate::template::{FieldKind, ParsedTemplate, TagOccurrence};
use crate::value::{filled, normalize_number, with_scheme};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    Preview,
    Safe,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderResult {
    pub content: String,
    /// Names of the tags that had no value, in tag order.
    pub unfilled: Vec<String>,
    pub is_complete: bool,
    pub rendered_at: DateTime<Utc>,
}

/// Formats a supplied value for substitution according to the tag kind.
pub fn format_value(kind: FieldKind, value: &str) -> String {
    match kind {
        FieldKind::Url => with_scheme(value),
        FieldKind::Number => normalize_number(value),
        FieldKind::Multiline
        | FieldKind::Text
        | FieldKind::Email
        | FieldKind::Date
        | FieldKind::Select => value.to_string(),
    }
}

pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// The spans to substitute, in content order.
///
/// A template assembled without occurrence data falls back to every literal match of each
/// tag's bracketed text.
fn substitution_spans(template: &ParsedTemplate) -> Cow<'_, [TagOccurrence]> {
    if !template.occurrences.is_empty() || template.tags.is_empty() {
        return Cow::Borrowed(&template.occurrences);
    }

    let mut spans: Vec<TagOccurrence> = template
        .tags
        .iter()
        .filter(|tag| !tag.raw.is_empty())
        .flat_map(|tag| {
            template
                .content
                .match_indices(tag.raw.as_str())
                .map(move |(start, raw)| TagOccurrence {
                    name: tag.name.clone(),
                    span: start..start + raw.len(),
                })
        })
        .collect();
    spans.sort_by_key(|occurrence| occurrence.span.start);
    Cow::Owned(spans)
}

pub fn render(
    template: &ParsedTemplate,
    values: &HashMap<String, String>,
    mode: RenderMode,
    config: &EngineConfig,
) -> RenderResult {
    let mut replacements: HashMap<&str, String> = HashMap::new();
    let mut unfilled = Vec::new();

    for tag in &template.tags {
        let replacement = match filled(values, &tag.name) {
            Some(value) => format_value(tag.kind, value),
            None => {
                tracing::trace!(tag = %tag.name, "tag left unfilled");
                unfilled.push(tag.name.clone());
                match mode {
                    RenderMode::Preview => config.preview_placeholder.clone(),
                    RenderMode::Safe => config.unfilled_marker.clone(),
                }
            }
        };
        replacements.insert(tag.name.as_str(), replacement);
    }

    let content = &template.content;
    let mut output = String::with_capacity(content.len());
    let mut cursor = 0;
    for occurrence in substitution_spans(template).iter() {
        // Spans out of order or off a char boundary are left as literal text.
        let (Some(replacement), Some(before), Some(_)) = (
            replacements.get(occurrence.name.as_str()),
            content.get(cursor..occurrence.span.start),
            content.get(occurrence.span.clone()),
        ) else {
            continue;
        };
        output.push_str(before);
        output.push_str(replacement);
        cursor = occurrence.span.end;
    }
    output.push_str(&content[cursor..]);

    let content = match mode {
        RenderMode::Preview => output,
        RenderMode::Safe => escape_html(&output),
    };

    RenderResult {
        content,
        is_complete: unfilled.is_empty(),
        unfilled,
        rendered_at: Utc::now(),
    }
}

pub fn render_preview(
    template: &ParsedTemplate,
    values: &HashMap<String, String>,
    config: &EngineConfig,
) -> RenderResult {
    render(template, values, RenderMode::Preview, config)
}

pub fn render_safe(
    template: &ParsedTemplate,
    values: &HashMap<String, String>,
    config: &EngineConfig,
) -> RenderResult {
    render(template, values, RenderMode::Safe, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::IgnoreSink;
    use crate::parser::parse_template_with;
    use crate::template::TagSpec;

    fn values(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn run(input: &str, pairs: &[(&str, &str)], mode: RenderMode) -> RenderResult {
        let config = EngineConfig::default();
        let template = parse_template_with(input, &config, &mut IgnoreSink);
        render(&template, &values(pairs), mode, &config)
    }

    #[test]
    fn test_render_fills_every_occurrence() {
        let result = run("{{x}} and {{x}}", &[("x", "Z")], RenderMode::Safe);
        assert_eq!("Z and Z", result.content);
        assert!(result.is_complete);
        assert!(result.unfilled.is_empty());
    }

    #[test]
    fn test_render_fills_variant_occurrences() {
        let result = run("{{x:Label}} then {{x}}", &[("x", "Z")], RenderMode::Preview);
        assert_eq!("Z then Z", result.content);
    }

    #[test]
    fn test_preview_placeholder() {
        let result = run(
            "Hello {{name}}, you are {{age:::number}}",
            &[("age", "30")],
            RenderMode::Preview,
        );
        assert_eq!("Hello ___, you are 30", result.content);
        assert!(!result.is_complete);
        assert_eq!(vec!["name".to_string()], result.unfilled);
    }

    #[test]
    fn test_safe_marker() {
        let result = run("Hello {{name}}", &[("name", " ")], RenderMode::Safe);
        assert_eq!("Hello [unfilled]", result.content);
        assert_eq!(vec!["name".to_string()], result.unfilled);
    }

    #[test]
    fn test_safe_escapes_output() {
        let result = run(
            "<p>{{body}}</p>",
            &[("body", "Tom & \"Jerry\" <b>'s</b>")],
            RenderMode::Safe,
        );
        assert_eq!(
            "&lt;p&gt;Tom &amp; &quot;Jerry&quot; &lt;b&gt;&#x27;s&lt;/b&gt;&lt;/p&gt;",
            result.content
        );
    }

    #[test]
    fn test_preview_does_not_escape() {
        let result = run("<p>{{body}}</p>", &[("body", "a & b")], RenderMode::Preview);
        assert_eq!("<p>a & b</p>", result.content);
    }

    #[test]
    fn test_url_gets_scheme() {
        let result = run(
            "{{a:::url}} {{b:::link}}",
            &[("a", "foo.com"), ("b", "http://bar.com")],
            RenderMode::Preview,
        );
        assert_eq!("https://foo.com http://bar.com", result.content);
    }

    #[test]
    fn test_number_is_normalized() {
        let result = run(
            "{{a:::number}} {{b:::num}} {{c:::number}}",
            &[("a", "007"), ("b", "1.50"), ("c", "lots")],
            RenderMode::Preview,
        );
        assert_eq!("7 1.5 lots", result.content);
    }

    #[test]
    fn test_multiline_keeps_line_breaks() {
        let result = run(
            "Notes:\n{{notes:::multiline}}",
            &[("notes", "one\ntwo\r\nthree")],
            RenderMode::Safe,
        );
        assert_eq!("Notes:\none\ntwo\r\nthree", result.content);
    }

    #[test]
    fn test_invalid_tags_stay_literal() {
        let result = run("{{1bad}} {{good}}", &[("good", "ok")], RenderMode::Preview);
        assert_eq!("{{1bad}} ok", result.content);
    }

    #[test]
    fn test_literal_template() {
        let result = run("Nothing to fill", &[], RenderMode::Safe);
        assert_eq!("Nothing to fill", result.content);
        assert!(result.is_complete);
    }

    #[test]
    fn test_values_are_not_rescanned() {
        let result = run("{{a}} {{b}}", &[("a", "{{b}}"), ("b", "B")], RenderMode::Preview);
        assert_eq!("{{b}} B", result.content);
    }

    #[test]
    fn test_out_of_order_spans_are_ignored() {
        let config = EngineConfig::default();
        let mut template = parse_template_with("{{a}} {{a}}", &config, &mut IgnoreSink);
        template.occurrences.push(TagOccurrence {
            name: "a".to_string(),
            span: 0..5,
        });
        template.occurrences.push(TagOccurrence {
            name: "a".to_string(),
            span: 40..45,
        });

        let result = render(&template, &values(&[("a", "A")]), RenderMode::Preview, &config);
        assert_eq!("A A", result.content);
    }

    #[test]
    fn test_render_template_built_without_occurrences() {
        let config = EngineConfig::default();
        let template = ParsedTemplate {
            content: "Hello {{name}}, bye {{name}} from {{site:::url}}".to_string(),
            tags: vec![
                TagSpec::field(
                    "{{name}}".to_string(),
                    "name".to_string(),
                    None,
                    None,
                    FieldKind::Text,
                ),
                TagSpec::field(
                    "{{site:::url}}".to_string(),
                    "site".to_string(),
                    None,
                    None,
                    FieldKind::Url,
                ),
            ],
            has_parameters: true,
            occurrences: vec![],
        };

        let result = render(&template, &values(&[("name", "Amy")]), RenderMode::Safe, &config);
        assert_eq!("Hello Amy, bye Amy from [unfilled]", result.content);
        assert!(!result.is_complete);
        assert_eq!(vec!["site".to_string()], result.unfilled);
    }

    #[test]
    fn test_render_deserialized_template_without_occurrences() {
        let config = EngineConfig::default();
        let template: ParsedTemplate = serde_json::from_str(
            r#"{
                "content": "Hello {{name}}",
                "tags": [{
                    "raw": "{{name}}",
                    "name": "name",
                    "description": null,
                    "example": null,
                    "kind": "text",
                    "choices": null,
                    "required": true,
                    "default_value": null
                }],
                "has_parameters": true
            }"#,
        )
        .expect("Failed to deserialize template");

        assert!(template.occurrences.is_empty());
        let result = render(&template, &values(&[("name", "Amy")]), RenderMode::Safe, &config);
        assert_eq!("Hello Amy", result.content);
        assert!(result.is_complete);
    }

    #[test]
    fn test_escape_html() {
        assert_eq!("&lt;script&gt;", escape_html("<script>"));
        assert_eq!("a &amp; b", escape_html("a & b"));
        assert_eq!("https://x.com/a", escape_html("https://x.com/a"));
    }
}
