//! # Parser
//!
//! Scans free-form text for `{{…}}` tags and turns the valid ones into a [`ParsedTemplate`].
//!
//! Two tag dialects are understood:
//!
//! - Field tags, `{{name:description:example:type}}`, where everything after the name is
//!   optional. When the example itself contains colons (a URL, a time of day), the first
//!   segment is the name, the second the description, the last the type and everything in
//!   between is glued back together as the example.
//! - Selector tags, `{{name:description|first,second,third}}`, which become a select field
//!   whose default is the first option.
//!
//! Tags with an invalid name, and selectors without options, are skipped and reported to a
//! [`DiagnosticSink`]. They stay in the content as literal text.

use crate::config::EngineConfig;
use crate::diagnostics::{DiagnosticSink, TagDiagnostic, TagRejection};
use crate::template::{FieldKind, ParsedTemplate, TagOccurrence, TagSpec};
use nom::bytes::complete::{tag, take_till1, take_until, take_while};
use nom::character::complete::satisfy;
use nom::combinator::{all_consuming, recognize};
use nom::sequence::{delimited, pair};
use nom::{IResult, Parser};
use std::collections::HashSet;
use std::ops::Range;

/// A bracketed span found by [`scan_tags`], before its body is interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagMatch<'a> {
    pub span: Range<usize>,
    pub raw: &'a str,
    pub body: &'a str,
}

pub fn skip_to_opening(input: &str) -> IResult<&str, &str> {
    take_until("{{").parse(input)
}

/// `{{`, at least one character other than `}`, then `}}`.
pub fn parse_tag(input: &str) -> IResult<&str, &str> {
    delimited(tag("{{"), take_till1(|c: char| c == '}'), tag("}}")).parse(input)
}

/// Returns every tag span in `input`, left to right, without overlaps.
///
/// After a match, scanning resumes right after its closing braces. When an opening `{{`
/// does not start a tag, scanning resumes one character later.
pub fn scan_tags(input: &str) -> Vec<TagMatch<'_>> {
    let mut matches = Vec::new();
    let mut offset = 0;

    while let Ok((_, skipped)) = skip_to_opening(&input[offset..]) {
        let start = offset + skipped.len();
        match parse_tag(&input[start..]) {
            Ok((remaining, body)) => {
                let end = input.len() - remaining.len();
                matches.push(TagMatch {
                    span: start..end,
                    raw: &input[start..end],
                    body,
                });
                offset = end;
            }
            // `{` is a single byte, so this stays on a char boundary
            Err(_) => offset = start + 1,
        }
    }

    matches
}

fn is_cjk(c: char) -> bool {
    ('\u{4e00}'..='\u{9fa5}').contains(&c)
}

fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || is_cjk(c)
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || is_cjk(c)
}

fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(satisfy(is_name_start), take_while(is_name_char))).parse(input)
}

/// Checks a tag name against the identifier grammar and the length limit (in characters).
pub fn is_valid_name(name: &str, max_length: usize) -> bool {
    all_consuming(identifier).parse(name).is_ok() && name.chars().count() <= max_length
}

fn non_blank(segment: &str) -> Option<String> {
    let trimmed = segment.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn checked_name(name: &str, config: &EngineConfig) -> Result<String, TagRejection> {
    let name = name.trim();
    if is_valid_name(name, config.max_name_length) {
        Ok(name.to_string())
    } else {
        Err(TagRejection::InvalidName(name.to_string()))
    }
}

fn interpret_selector(
    raw: &str,
    head: &str,
    options: &str,
    config: &EngineConfig,
) -> Result<TagSpec, TagRejection> {
    let (name, description) = match head.split_once(':') {
        Some((name, description)) => (name, non_blank(description)),
        None => (head, None),
    };
    let name = checked_name(name, config)?;

    let choices: Vec<String> = options.split(',').filter_map(non_blank).collect();

    TagSpec::select(raw.to_string(), name.clone(), description, choices)
        .ok_or(TagRejection::EmptyChoices(name))
}

fn interpret_field(raw: &str, body: &str, config: &EngineConfig) -> Result<TagSpec, TagRejection> {
    let segments: Vec<&str> = body.split(':').collect();

    let (name, description, example, token) = if segments.len() > 4 {
        let last = segments.len() - 1;
        (
            segments[0],
            non_blank(segments[1]),
            non_blank(&segments[2..last].join(":")),
            non_blank(segments[last]),
        )
    } else {
        (
            segments[0],
            segments.get(1).and_then(|s| non_blank(s)),
            segments.get(2).and_then(|s| non_blank(s)),
            segments.get(3).and_then(|s| non_blank(s)),
        )
    };

    let name = checked_name(name, config)?;
    let kind = FieldKind::from_token(token.as_deref());

    Ok(TagSpec::field(raw.to_string(), name, description, example, kind))
}

/// Interprets the body of a single tag.
pub fn interpret_tag(found: &TagMatch<'_>, config: &EngineConfig) -> Result<TagSpec, TagRejection> {
    match found.body.split_once('|') {
        Some((head, options)) => interpret_selector(found.raw, head, options, config),
        None => interpret_field(found.raw, found.body, config),
    }
}

/// Parses `input`, reporting skipped tags to `sink`.
pub fn parse_template_with<S: DiagnosticSink + ?Sized>(
    input: &str,
    config: &EngineConfig,
    sink: &mut S,
) -> ParsedTemplate {
    let mut tags: Vec<TagSpec> = Vec::new();
    let mut occurrences = Vec::new();
    let mut seen = HashSet::new();

    for found in scan_tags(input) {
        match interpret_tag(&found, config) {
            Ok(spec) => {
                occurrences.push(TagOccurrence {
                    name: spec.name.clone(),
                    span: found.span.clone(),
                });
                if seen.insert(spec.name.clone()) {
                    tags.push(spec);
                }
            }
            Err(reason) => sink.report(TagDiagnostic {
                raw: found.raw.to_string(),
                span: found.span,
                reason,
            }),
        }
    }

    tracing::debug!(
        tags = tags.len(),
        occurrences = occurrences.len(),
        "parsed template"
    );

    let has_parameters = !tags.is_empty();
    ParsedTemplate {
        content: input.to_string(),
        tags,
        has_parameters,
        occurrences,
    }
}
