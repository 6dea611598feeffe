//! # Diagnostics
//!
//! Malformed tags never abort a parse. They are skipped, and a [`TagDiagnostic`] is handed to
//! a [`DiagnosticSink`] so that the embedding system decides whether to surface it.

use std::ops::Range;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagRejection {
    #[error("invalid tag name `{0}`")]
    InvalidName(String),
    #[error("select tag `{0}` has no options")]
    EmptyChoices(String),
}

/// A tag that was found in the content but left out of the parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagDiagnostic {
    pub raw: String,
    pub span: Range<usize>,
    pub reason: TagRejection,
}

pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: TagDiagnostic);
}

impl DiagnosticSink for Vec<TagDiagnostic> {
    fn report(&mut self, diagnostic: TagDiagnostic) {
        self.push(diagnostic);
    }
}

/// Emits every diagnostic as a `tracing` warning.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&mut self, diagnostic: TagDiagnostic) {
        tracing::warn!(
            raw = %diagnostic.raw,
            start = diagnostic.span.start,
            end = diagnostic.span.end,
            "skipping tag: {}",
            diagnostic.reason
        );
    }
}

/// Drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct IgnoreSink;

impl DiagnosticSink for IgnoreSink {
    fn report(&mut self, _diagnostic: TagDiagnostic) {}
}
