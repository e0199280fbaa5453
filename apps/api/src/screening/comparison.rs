//! Cross-candidate comparison: one row per candidate plus a ranking summary.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::screening::candidate::CandidateReport;

const STRONG_THRESHOLD: u32 = 80;
const MODERATE_THRESHOLD: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Strong,
    Moderate,
    Weak,
}

impl ScoreBand {
    pub fn from_score(score: u32) -> Self {
        if score >= STRONG_THRESHOLD {
            ScoreBand::Strong
        } else if score >= MODERATE_THRESHOLD {
            ScoreBand::Moderate
        } else {
            ScoreBand::Weak
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonRow {
    pub id: Uuid,
    pub candidate_name: String,
    pub match_score: u32,
    pub total_skills: usize,
    pub matched_count: usize,
    pub missing_count: usize,
    pub band: ScoreBand,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonSummary {
    /// Sorted by score descending; ties keep upload order.
    pub candidates: Vec<ComparisonRow>,
    pub best_candidate_id: Option<Uuid>,
    /// Mean match score rounded to one decimal.
    pub average_score: f64,
}

pub fn compare_candidates(reports: &[CandidateReport]) -> ComparisonSummary {
    let mut candidates: Vec<ComparisonRow> = reports
        .iter()
        .map(|r| ComparisonRow {
            id: r.id,
            candidate_name: r.candidate_name.clone(),
            match_score: r.result.match_score,
            total_skills: r.skills.len(),
            matched_count: r.result.matched_skills.len(),
            missing_count: r.result.missing_skills.len(),
            band: ScoreBand::from_score(r.result.match_score),
        })
        .collect();

    candidates.sort_by(|a, b| b.match_score.cmp(&a.match_score));

    let average_score = if reports.is_empty() {
        0.0
    } else {
        let total: u32 = reports.iter().map(|r| r.result.match_score).sum();
        (total as f64 / reports.len() as f64 * 10.0).round() / 10.0
    };

    ComparisonSummary {
        best_candidate_id: candidates.first().map(|c| c.id),
        candidates,
        average_score,
    }
}
