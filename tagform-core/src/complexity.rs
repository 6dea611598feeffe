//! Heuristic score for how much work a template is to fill in.

use crate::template::{FieldKind, ParsedTemplate};
use serde::{Deserialize, Serialize};

const PER_PARAMETER: u32 = 10;
const SELECT_BONUS: u32 = 5;
const MULTILINE_BONUS: u32 = 8;
const TYPED_BONUS: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplexityLevel {
    Simple,
    Medium,
    Complex,
}

impl ComplexityLevel {
    pub fn from_score(score: u32) -> ComplexityLevel {
        match score {
            0..=20 => ComplexityLevel::Simple,
            21..=50 => ComplexityLevel::Medium,
            _ => ComplexityLevel::Complex,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplexityBreakdown {
    pub parameter_count: usize,
    pub has_select: bool,
    pub has_multiline: bool,
    /// Any email, url, date or number tag.
    pub has_typed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplexityResult {
    pub score: u32,
    pub level: ComplexityLevel,
    pub breakdown: ComplexityBreakdown,
}

pub fn estimate_complexity(template: &ParsedTemplate) -> ComplexityResult {
    let breakdown = ComplexityBreakdown {
        parameter_count: template.tags.len(),
        has_select: template.has_kind(FieldKind::Select),
        has_multiline: template.has_kind(FieldKind::Multiline),
        has_typed: template.tags.iter().any(|tag| {
            matches!(
                tag.kind,
                FieldKind::Email | FieldKind::Url | FieldKind::Date | FieldKind::Number
            )
        }),
    };

    let count = u32::try_from(breakdown.parameter_count).unwrap_or(u32::MAX);
    let score = count
        .saturating_mul(PER_PARAMETER)
        .saturating_add(if breakdown.has_select { SELECT_BONUS } else { 0 })
        .saturating_add(if breakdown.has_multiline { MULTILINE_BONUS } else { 0 })
        .saturating_add(if breakdown.has_typed { TYPED_BONUS } else { 0 });

    ComplexityResult {
        score,
        level: ComplexityLevel::from_score(score),
        breakdown,
    }
}
