//! Skill vocabulary (the terms the extractor recognises) and
//! vocabulary-filtered keyword extraction from job descriptions.

use std::collections::HashSet;
use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

const DEFAULT_TERMS: &[&str] = &[
    "javascript",
    "react",
    "node.js",
    "typescript",
    "python",
    "java",
    "c++",
    "aws",
    "docker",
    "kubernetes",
    "mongodb",
    "sql",
    "nosql",
    "redux",
    "graphql",
    "rest api",
    "html",
    "css",
    "git",
    "agile",
    "scrum",
    "machine learning",
    "data analysis",
    "angular",
];

#[derive(Debug, Error)]
pub enum VocabularyError {
    #[error("Failed to read vocabulary file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse vocabulary file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Vocabulary file contains no keywords")]
    Empty,
}

/// On-disk format: `{"keywords": ["python", "sql", ...]}`
#[derive(Debug, Deserialize)]
struct VocabularyFile {
    keywords: Vec<String>,
}

/// Ordered, unique, lowercase skill terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillVocabulary {
    terms: Vec<String>,
}

impl Default for SkillVocabulary {
    fn default() -> Self {
        Self::from_terms(DEFAULT_TERMS.iter().copied())
    }
}

impl SkillVocabulary {
    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let terms = terms
            .into_iter()
            .map(|t| normalize_whitespace(&t.as_ref().to_lowercase()))
            .filter(|t| !t.is_empty())
            .filter(|t| seen.insert(t.clone()))
            .collect();
        Self { terms }
    }

    pub fn load(path: &Path) -> Result<Self, VocabularyError> {
        let raw = std::fs::read_to_string(path)?;
        let file: VocabularyFile = serde_json::from_str(&raw)?;
        let vocabulary = Self::from_terms(file.keywords);
        if vocabulary.is_empty() {
            return Err(VocabularyError::Empty);
        }
        info!(
            "Loaded {} vocabulary terms from {}",
            vocabulary.len(),
            path.display()
        );
        Ok(vocabulary)
    }

    #[allow(dead_code)]
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Vocabulary terms occurring in `text`, ordered by first occurrence.
    pub fn scan(&self, text: &str) -> Vec<String> {
        scan_terms(text, &self.terms)
    }
}

/// Finds which `terms` occur in `text` as whole terms, case-insensitively.
///
/// A match must not be flanked by alphanumeric characters, so `java` is not
/// found inside `javascript`. Runs of whitespace in the text count as a
/// single space, letting multi-word terms match across line breaks.
pub fn scan_terms<S: AsRef<str>>(text: &str, terms: &[S]) -> Vec<String> {
    let haystack = normalize_whitespace(&text.to_lowercase());

    let mut found: Vec<(usize, String)> = terms
        .iter()
        .filter_map(|term| {
            let term = term.as_ref();
            first_whole_match(&haystack, &term.to_lowercase()).map(|pos| (pos, term.to_string()))
        })
        .collect();

    // stable: equal positions keep vocabulary order
    found.sort_by_key(|(pos, _)| *pos);
    found.into_iter().map(|(_, term)| term).collect()
}

/// Keywords for a job description: vocabulary terms it mentions.
pub fn extract_keywords(jd_text: &str, vocabulary: &SkillVocabulary) -> Vec<String> {
    vocabulary.scan(jd_text)
}

fn first_whole_match(haystack: &str, term: &str) -> Option<usize> {
    if term.is_empty() {
        return None;
    }
    haystack.match_indices(term).map(|(pos, _)| pos).find(|&pos| {
        let before = haystack[..pos].chars().next_back();
        let after = haystack[pos + term.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

fn normalize_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text.trim(), " ").into_owned()
}
