//! Axum route handlers for the Screening API.

use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartError, rejection::JsonRejection, Multipart, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::screening::analysis::analyze_resumes;
use crate::screening::candidate::{is_pdf, CandidateReport};
use crate::screening::comparison::{compare_candidates, ComparisonSummary};
use crate::screening::extractor::ResumeDocument;
use crate::screening::matcher::{match_optional, MatchResult};
use crate::screening::skills::parse_required_skills;
use crate::screening::vocabulary::extract_keywords;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub results: Vec<CandidateReport>,
    pub comparison: ComparisonSummary,
    pub analyzed_at: DateTime<Utc>,
}

/// Both lists are optional; `null` or absent means empty.
#[derive(Debug, Default, Deserialize)]
pub struct MatchRequest {
    #[serde(default)]
    pub required: Option<Vec<String>>,
    #[serde(default)]
    pub extracted: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct KeywordsRequest {
    #[serde(default)]
    pub jd: String,
}

#[derive(Debug, Serialize)]
pub struct KeywordsResponse {
    pub filtered_keywords: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analyze
///
/// Multipart form: repeated `resumes` file parts plus a `required_skills`
/// field (JSON array or comma-separated). Returns one report per resume in
/// upload order, and a comparison summary.
pub async fn handle_analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let mut saw_resumes_part = false;
    let mut documents = Vec::new();
    let mut raw_skills: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resumes" => {
                saw_resumes_part = true;
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await.map_err(malformed)?;

                // browsers send an empty part for an untouched file input
                if file_name.is_empty() && bytes.is_empty() {
                    continue;
                }
                if !is_pdf(&file_name, content_type.as_deref()) {
                    return Err(AppError::Validation(
                        "Only PDF files are allowed".to_string(),
                    ));
                }
                if documents.len() >= state.config.max_resumes {
                    return Err(AppError::Validation(format!(
                        "Too many resumes: at most {} per request",
                        state.config.max_resumes
                    )));
                }
                documents.push(ResumeDocument { file_name, bytes });
            }
            "required_skills" => {
                raw_skills = Some(field.text().await.map_err(malformed)?);
            }
            _ => {}
        }
    }

    if !saw_resumes_part {
        return Err(AppError::Validation(
            "No resumes part in request".to_string(),
        ));
    }
    let raw_skills = raw_skills
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| AppError::Validation("No required skills provided".to_string()))?;
    let required = parse_required_skills(&raw_skills)?;
    if documents.is_empty() {
        return Err(AppError::Validation("No files provided".to_string()));
    }

    info!(
        "Analyzing {} resume(s) for skills: {:?}",
        documents.len(),
        required.as_slice()
    );

    let results = analyze_resumes(documents, &required, Arc::clone(&state.extractor)).await?;
    let comparison = compare_candidates(&results);

    Ok(Json(AnalyzeResponse {
        results,
        comparison,
        analyzed_at: Utc::now(),
    }))
}

/// POST /api/v1/match
///
/// Runs the matcher directly on caller-supplied skill lists. Any well-formed
/// body yields a result; only unparseable JSON is rejected.
pub async fn handle_match(
    payload: Result<Json<MatchRequest>, JsonRejection>,
) -> Result<Json<MatchResult>, AppError> {
    let Json(request) = payload.map_err(rejected)?;
    Ok(Json(match_optional(
        request.required.as_deref(),
        request.extracted.as_deref(),
    )))
}

/// POST /api/v1/keywords
///
/// Returns the vocabulary terms mentioned in a job description.
pub async fn handle_keywords(
    State(state): State<AppState>,
    payload: Result<Json<KeywordsRequest>, JsonRejection>,
) -> Result<Json<KeywordsResponse>, AppError> {
    let Json(request) = payload.map_err(rejected)?;
    if request.jd.trim().is_empty() {
        return Err(AppError::Validation("No JD provided".to_string()));
    }

    let filtered_keywords = extract_keywords(&request.jd, &state.vocabulary);
    Ok(Json(KeywordsResponse { filtered_keywords }))
}

fn malformed(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::PayloadTooLarge("Upload exceeds the request size limit".to_string());
    }
    AppError::Validation(format!("Malformed multipart body: {}", e.body_text()))
}

fn rejected(e: JsonRejection) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::PayloadTooLarge("Request body exceeds the size limit".to_string());
    }
    AppError::Validation(format!("Invalid JSON body: {}", e.body_text()))
}
