//! Skill Matcher: case-insensitive comparison of required skills against the
//! skills attributed to one candidate document.
//!
//! Pure and total: no I/O, no randomness, no failure modes. Empty inputs are
//! valid and an absent sequence is treated as empty.
//!
//! Score policy:
//! - empty `required` → 0
//! - otherwise `round(100 * matched / required)`, rounding half up

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Outcome of matching one candidate against the required skills.
/// Recomputed on every call; never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    /// Required skills found in the extracted set, in required order and casing.
    pub matched_skills: Vec<String>,
    /// Required skills not found, in required order and casing.
    pub missing_skills: Vec<String>,
    /// Integer percentage in `[0, 100]`.
    pub match_score: u32,
}

impl MatchResult {
    pub fn empty() -> Self {
        Self {
            matched_skills: vec![],
            missing_skills: vec![],
            match_score: 0,
        }
    }
}

/// Matches `required` against `extracted`.
///
/// `extracted` is only a membership source: duplicates in it and skills
/// absent from `required` have no effect on the result.
pub fn match_skills<R, E>(required: &[R], extracted: &[E]) -> MatchResult
where
    R: AsRef<str>,
    E: AsRef<str>,
{
    if required.is_empty() {
        return MatchResult::empty();
    }

    let extracted_lower: HashSet<String> = extracted
        .iter()
        .map(|s| s.as_ref().to_lowercase())
        .collect();

    let (matched_skills, missing_skills): (Vec<String>, Vec<String>) = required
        .iter()
        .map(|s| s.as_ref().to_string())
        .partition(|s| extracted_lower.contains(&s.to_lowercase()));

    let match_score = percentage(matched_skills.len(), required.len());

    MatchResult {
        matched_skills,
        missing_skills,
        match_score,
    }
}

/// Variant of [`match_skills`] for callers holding optional sequences
/// (e.g. JSON `null`). `None` behaves exactly like an empty slice.
pub fn match_optional<R, E>(required: Option<&[R]>, extracted: Option<&[E]>) -> MatchResult
where
    R: AsRef<str>,
    E: AsRef<str>,
{
    match_skills(required.unwrap_or(&[]), extracted.unwrap_or(&[]))
}

/// Integer percentage with round-half-up; 0 when `total` is 0.
pub fn percentage(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let part = part.min(total) as u64;
    let total = total as u64;
    ((200 * part + total) / (2 * total)) as u32
}
