//! Synthesizes a complete, plausible set of values for a template.

use crate::template::{FieldKind, ParsedTemplate, TagSpec};
use chrono::Utc;
use std::collections::HashMap;

fn sample_for(tag: &TagSpec) -> String {
    if let Some(value) = tag.example.as_ref().or(tag.default_value.as_ref()) {
        return value.clone();
    }

    match tag.kind {
        FieldKind::Text => format!("example{}", tag.name),
        FieldKind::Multiline => String::from("First line\nSecond line"),
        FieldKind::Number => String::from("42"),
        FieldKind::Email => String::from("user@example.com"),
        FieldKind::Url => String::from("https://example.com"),
        FieldKind::Date => Utc::now().date_naive().format("%Y-%m-%d").to_string(),
        FieldKind::Select => tag.choices().first().cloned().unwrap_or_default(),
    }
}

pub fn synthesize_example(template: &ParsedTemplate) -> HashMap<String, String> {
    template
        .tags
        .iter()
        .map(|tag| (tag.name.clone(), sample_for(tag)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::diagnostics::IgnoreSink;
    use crate::parser::parse_template_with;
    use crate::validate::validate;
    use chrono::NaiveDate;

    fn example_of(input: &str) -> HashMap<String, String> {
        let template = parse_template_with(input, &EngineConfig::default(), &mut IgnoreSink);
        synthesize_example(&template)
    }

    #[test]
    fn test_declared_example_wins() {
        let values = example_of("{{site:Homepage:https://x.com:url}}");
        assert_eq!("https://x.com", values["site"]);
    }

    #[test]
    fn test_select_uses_default() {
        let values = example_of("{{level|High,Medium,Low}}");
        assert_eq!("High", values["level"]);
    }

    #[test]
    fn test_kind_samples() {
        let values = example_of(
            "{{name}} {{notes:::multiline}} {{n:::number}} {{e:::email}} {{u:::url}} {{d:::date}}",
        );
        assert_eq!(6, values.len());
        assert_eq!("examplename", values["name"]);
        assert!(values["notes"].contains('\n'));
        assert_eq!("42", values["n"]);
        assert_eq!("user@example.com", values["e"]);
        assert_eq!("https://example.com", values["u"]);
        assert!(NaiveDate::parse_from_str(&values["d"], "%Y-%m-%d").is_ok());
    }

    #[test]
    fn test_literal_template_has_no_values() {
        assert!(example_of("no tags").is_empty());
    }

    #[test]
    fn test_synthesized_values_validate() {
        let config = EngineConfig::default();
        let template = parse_template_with(
            "{{name}} {{n:::number}} {{e:::email}} {{u:::url}} {{l|a,b}} {{m:::textarea}}",
            &config,
            &mut IgnoreSink,
        );
        let result = validate(&template, &synthesize_example(&template), &config);
        assert!(result.is_valid, "{:?}", result.errors);
    }
}
