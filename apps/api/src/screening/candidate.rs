//! Candidate identity derived from the uploaded file, and the per-candidate report.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::screening::matcher::MatchResult;

lazy_static! {
    static ref PDF_SUFFIX: Regex = Regex::new(r"(?i)\.pdf$").unwrap();
    static ref RESUME_SUFFIX: Regex = Regex::new(r"(?i)[_-]resume").unwrap();
    static ref SEPARATORS: Regex = Regex::new(r"[_-]").unwrap();
}

/// Per-candidate screening result returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateReport {
    pub id: Uuid,
    pub file_name: String,
    pub file_size: String,
    pub candidate_name: String,
    /// Extracted skills, case-insensitively deduplicated.
    pub skills: Vec<String>,
    pub email: Option<String>,
    pub contact: Option<String>,
    #[serde(flatten)]
    pub result: MatchResult,
}

/// Derives a display name from a resume file name.
///
/// `john_doe-resume.pdf` → `John Doe`. Falls back to `Candidate {index + 1}`
/// when nothing is left after stripping.
pub fn candidate_name_from_filename(file_name: &str, index: usize) -> String {
    let name = PDF_SUFFIX.replace(file_name, "");
    let name = RESUME_SUFFIX.replace(&name, "");
    let name = SEPARATORS.replace_all(&name, " ");

    let name = name
        .split(' ')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ");

    let name = name.trim();
    if name.is_empty() {
        format!("Candidate {}", index + 1)
    } else {
        name.to_string()
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// `12345` → `"12.1 KB"`
pub fn format_file_size(bytes: usize) -> String {
    format!("{:.1} KB", bytes as f64 / 1024.0)
}

pub fn is_pdf(file_name: &str, content_type: Option<&str>) -> bool {
    content_type.is_some_and(|ct| ct.eq_ignore_ascii_case("application/pdf"))
        || file_name.to_lowercase().ends_with(".pdf")
}
