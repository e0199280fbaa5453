//! Required-skill collection and parsing of the `required_skills` form field.

use std::collections::HashSet;

use thiserror::Error;

use crate::errors::AppError;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SkillsError {
    #[error("Invalid required_skills format: {0}")]
    InvalidFormat(String),

    #[error("Required skills list cannot be empty")]
    Empty,
}

impl From<SkillsError> for AppError {
    fn from(e: SkillsError) -> Self {
        AppError::Validation(e.to_string())
    }
}

/// Ordered, case-insensitively unique list of required skills.
///
/// The first spelling inserted is the one kept for display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequiredSkillSet {
    skills: Vec<String>,
}

impl RequiredSkillSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a skill. Returns false for blank input or a case-insensitive duplicate.
    pub fn insert(&mut self, skill: &str) -> bool {
        let skill = skill.trim();
        if skill.is_empty() || self.contains(skill) {
            return false;
        }
        self.skills.push(skill.to_string());
        true
    }

    #[allow(dead_code)]
    pub fn remove(&mut self, skill: &str) -> bool {
        let needle = skill.trim().to_lowercase();
        let before = self.skills.len();
        self.skills.retain(|s| s.to_lowercase() != needle);
        self.skills.len() != before
    }

    pub fn contains(&self, skill: &str) -> bool {
        let needle = skill.trim().to_lowercase();
        self.skills.iter().any(|s| s.to_lowercase() == needle)
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    #[allow(dead_code)]
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.skills.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.skills
    }
}

impl<S: AsRef<str>> FromIterator<S> for RequiredSkillSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for skill in iter {
            set.insert(skill.as_ref());
        }
        set
    }
}

/// Parses the `required_skills` field.
///
/// Accepts a JSON array of strings, or a comma-separated list when the
/// value does not look like JSON.
pub fn parse_required_skills(raw: &str) -> Result<RequiredSkillSet, SkillsError> {
    let raw = raw.trim();

    let set: RequiredSkillSet = if raw.starts_with('[') {
        let parsed: Vec<String> = serde_json::from_str(raw)
            .map_err(|e| SkillsError::InvalidFormat(e.to_string()))?;
        parsed.into_iter().collect()
    } else {
        raw.split(',').collect()
    };

    if set.is_empty() {
        return Err(SkillsError::Empty);
    }
    Ok(set)
}

/// Drops case-insensitive duplicates from an extracted skill list, keeping
/// the first spelling and the input order. Blank entries are dropped.
pub fn dedup_extracted<S: AsRef<str>>(extracted: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    extracted
        .iter()
        .map(|s| s.as_ref().trim())
        .filter(|s| !s.is_empty())
        .filter(|s| seen.insert(s.to_lowercase()))
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_collapses_case_insensitive_duplicates() {
        let mut set = RequiredSkillSet::new();
        assert!(set.insert("React"));
        assert!(!set.insert("react"));
        assert!(!set.insert("  REACT "));
        assert_eq!(set.as_slice(), &["React".to_string()]);
    }

    #[test]
    fn test_insert_preserves_order_and_casing() {
        let set: RequiredSkillSet = ["Docker", "AWS", "node.js"].into_iter().collect();
        let items: Vec<&str> = set.iter().collect();
        assert_eq!(items, vec!["Docker", "AWS", "node.js"]);
    }

    #[test]
    fn test_insert_rejects_blank() {
        let mut set = RequiredSkillSet::new();
        assert!(!set.insert("   "));
        assert!(set.is_empty());
    }

    #[test]
    fn test_remove_is_case_insensitive() {
        let mut set: RequiredSkillSet = ["Python", "Go"].into_iter().collect();
        assert!(set.remove("python"));
        assert!(!set.remove("python"));
        assert_eq!(set.len(), 1);
        assert!(set.contains("GO"));
    }

    #[test]
    fn test_parse_json_array() {
        let set = parse_required_skills(r#"["React", "react", "SQL"]"#).unwrap();
        assert_eq!(set.as_slice(), &["React".to_string(), "SQL".to_string()]);
    }

    #[test]
    fn test_parse_comma_separated() {
        let set = parse_required_skills("rust, go ,, Kubernetes").unwrap();
        let items: Vec<&str> = set.iter().collect();
        assert_eq!(items, vec!["rust", "go", "Kubernetes"]);
    }

    #[test]
    fn test_parse_invalid_json() {
        let err = parse_required_skills("[\"rust\",").unwrap_err();
        assert!(matches!(err, SkillsError::InvalidFormat(_)));
    }

    #[test]
    fn test_parse_non_string_json_items_rejected() {
        let err = parse_required_skills("[1, 2]").unwrap_err();
        assert!(matches!(err, SkillsError::InvalidFormat(_)));
    }

    #[test]
    fn test_parse_empty_list() {
        assert_eq!(parse_required_skills("[]").unwrap_err(), SkillsError::Empty);
        assert_eq!(parse_required_skills("  ").unwrap_err(), SkillsError::Empty);
        assert_eq!(parse_required_skills(r#"["", " "]"#).unwrap_err(), SkillsError::Empty);
    }

    #[test]
    fn test_dedup_extracted_keeps_first_spelling() {
        let skills = dedup_extracted(&["SQL", "sql", "Docker", "", "Sql"]);
        assert_eq!(skills, vec!["SQL", "Docker"]);
    }
}
