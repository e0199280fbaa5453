//! Skill extraction: pluggable, trait-based source of the skills attributed
//! to one resume.
//!
//! Default: `VocabularySkillExtractor` (PDF text + vocabulary scan, deterministic).
//! Tests inject `StaticSkillExtractor` with canned skills per file.
//!
//! `AppState` holds an `Arc<dyn SkillExtractor>`, chosen at startup.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::AppError;
use crate::screening::vocabulary::SkillVocabulary;

lazy_static! {
    static ref EMAIL: Regex =
        Regex::new(r"[a-zA-Z0-9+_.-]+@[a-zA-Z0-9-]+(?:\.[a-zA-Z0-9-]+)+").unwrap();
    static ref PHONE: Regex =
        Regex::new(r"\+?\d{1,4}[-.\s]?\d{3}[-.\s]?\d{3,4}[-.\s]?\d{4}").unwrap();
}

/// One uploaded resume.
#[derive(Debug, Clone)]
pub struct ResumeDocument {
    pub file_name: String,
    pub bytes: Bytes,
}

/// What an extractor attributes to one resume.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedProfile {
    pub skills: Vec<String>,
    pub email: Option<String>,
    pub contact: Option<String>,
}

/// Implement this to swap the extraction backend without touching the
/// pipeline or handlers.
#[async_trait]
pub trait SkillExtractor: Send + Sync {
    async fn extract(&self, document: &ResumeDocument) -> Result<ExtractedProfile, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// VocabularySkillExtractor: default implementation
// ────────────────────────────────────────────────────────────────────────────

/// Extracts PDF text with `pdf-extract`, then scans it for vocabulary terms.
pub struct VocabularySkillExtractor {
    vocabulary: Arc<SkillVocabulary>,
}

impl VocabularySkillExtractor {
    pub fn new(vocabulary: Arc<SkillVocabulary>) -> Self {
        Self { vocabulary }
    }
}

#[async_trait]
impl SkillExtractor for VocabularySkillExtractor {
    async fn extract(&self, document: &ResumeDocument) -> Result<ExtractedProfile, AppError> {
        let bytes = document.bytes.clone();
        let file_name = document.file_name.clone();

        // pdf-extract is CPU-bound and may panic on malformed input.
        let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
            .await
            .map_err(|e| {
                AppError::UnprocessableEntity(format!(
                    "Could not read PDF '{file_name}': {e}"
                ))
            })?
            .map_err(|e| {
                AppError::UnprocessableEntity(format!(
                    "Failed to extract text from PDF '{}': {e}",
                    document.file_name
                ))
            })?;

        debug!(
            "Extracted {} chars of text from {}",
            text.len(),
            document.file_name
        );

        Ok(profile_from_text(&text, &self.vocabulary))
    }
}

/// Builds a profile from already-extracted resume text.
pub fn profile_from_text(text: &str, vocabulary: &SkillVocabulary) -> ExtractedProfile {
    ExtractedProfile {
        skills: vocabulary.scan(text),
        email: EMAIL.find(text).map(|m| m.as_str().to_string()),
        contact: PHONE.find(text).map(|m| m.as_str().trim().to_string()),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// StaticSkillExtractor: deterministic fake
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
pub use fake::StaticSkillExtractor;

#[cfg(test)]
mod fake {
    use std::collections::{HashMap, HashSet};
    use std::time::Duration;

    use super::*;

    /// Returns canned skills per file name, or `default` for unknown files.
    /// Files registered with `failing` produce an extraction error; files
    /// registered with `delayed` sleep before answering.
    #[derive(Default)]
    pub struct StaticSkillExtractor {
        default: Vec<String>,
        by_file: HashMap<String, Vec<String>>,
        failing: HashSet<String>,
        delays: HashMap<String, Duration>,
    }

    impl StaticSkillExtractor {
        pub fn new<S: AsRef<str>>(default: &[S]) -> Self {
            Self {
                default: default.iter().map(|s| s.as_ref().to_string()).collect(),
                ..Self::default()
            }
        }

        pub fn with_file<S: AsRef<str>>(mut self, file_name: &str, skills: &[S]) -> Self {
            self.by_file.insert(
                file_name.to_string(),
                skills.iter().map(|s| s.as_ref().to_string()).collect(),
            );
            self
        }

        pub fn failing(mut self, file_name: &str) -> Self {
            self.failing.insert(file_name.to_string());
            self
        }

        pub fn delayed(mut self, file_name: &str, delay: Duration) -> Self {
            self.delays.insert(file_name.to_string(), delay);
            self
        }
    }

    #[async_trait]
    impl SkillExtractor for StaticSkillExtractor {
        async fn extract(&self, document: &ResumeDocument) -> Result<ExtractedProfile, AppError> {
            if let Some(delay) = self.delays.get(&document.file_name) {
                tokio::time::sleep(*delay).await;
            }
            if self.failing.contains(&document.file_name) {
                return Err(AppError::UnprocessableEntity(format!(
                    "Failed to extract text from PDF '{}'",
                    document.file_name
                )));
            }
            let skills = self
                .by_file
                .get(&document.file_name)
                .unwrap_or(&self.default)
                .clone();
            Ok(ExtractedProfile {
                skills,
                ..ExtractedProfile::default()
            })
        }
    }
}
