//! Screening pipeline: extract skills from every resume, then score each
//! candidate against the required skills.
//!
//! Extraction runs concurrently, one task per document. Scoring is pure and
//! cheap, so it runs inline once all profiles are back. Output order always
//! equals input order.

use std::sync::Arc;

use anyhow::anyhow;
use tokio::task::JoinSet;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::screening::candidate::{candidate_name_from_filename, format_file_size, CandidateReport};
use crate::screening::extractor::{ExtractedProfile, ResumeDocument, SkillExtractor};
use crate::screening::matcher::match_skills;
use crate::screening::skills::{dedup_extracted, RequiredSkillSet};

/// Screens every document against `required`.
///
/// Fails as a whole if any single document cannot be extracted; the error
/// names the offending file.
pub async fn analyze_resumes(
    documents: Vec<ResumeDocument>,
    required: &RequiredSkillSet,
    extractor: Arc<dyn SkillExtractor>,
) -> Result<Vec<CandidateReport>, AppError> {
    let mut tasks = JoinSet::new();
    for (index, document) in documents.iter().cloned().enumerate() {
        let extractor = Arc::clone(&extractor);
        tasks.spawn(async move { (index, extractor.extract(&document).await) });
    }

    let mut profiles: Vec<Option<ExtractedProfile>> = vec![None; documents.len()];
    while let Some(joined) = tasks.join_next().await {
        let (index, outcome) =
            joined.map_err(|e| AppError::Internal(anyhow!("Extraction task failed: {e}")))?;
        match outcome {
            Ok(profile) => profiles[index] = Some(profile),
            Err(e) => {
                warn!("Extraction failed for {}: {e}", documents[index].file_name);
                // JoinSet aborts the remaining tasks on drop
                return Err(e);
            }
        }
    }

    let reports = documents
        .iter()
        .zip(profiles)
        .enumerate()
        .map(|(index, (document, profile))| {
            build_report(index, document, profile.unwrap_or_default(), required)
        })
        .collect::<Vec<_>>();

    info!(
        "Screened {} resume(s) against {} required skill(s)",
        reports.len(),
        required.len()
    );
    Ok(reports)
}

/// Scores one extracted profile. Pure apart from the generated id.
pub fn build_report(
    index: usize,
    document: &ResumeDocument,
    profile: ExtractedProfile,
    required: &RequiredSkillSet,
) -> CandidateReport {
    let skills = dedup_extracted(&profile.skills);
    let result = match_skills(required.as_slice(), &skills);

    CandidateReport {
        id: Uuid::new_v4(),
        file_name: document.file_name.clone(),
        file_size: format_file_size(document.bytes.len()),
        candidate_name: candidate_name_from_filename(&document.file_name, index),
        skills,
        email: profile.email,
        contact: profile.contact,
        result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screening::extractor::StaticSkillExtractor;
    use bytes::Bytes;
    use std::time::Duration;

    fn doc(name: &str, size: usize) -> ResumeDocument {
        ResumeDocument {
            file_name: name.to_string(),
            bytes: Bytes::from(vec![0u8; size]),
        }
    }

    fn required(skills: &[&str]) -> RequiredSkillSet {
        skills.iter().collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_reports_follow_input_order() {
        // alice finishes last and carol first, so completion order is reversed
        let extractor: Arc<dyn SkillExtractor> = Arc::new(
            StaticSkillExtractor::new(&["react"])
                .with_file("bob_resume.pdf", &["react", "docker", "Docker"])
                .with_file("carol-resume.pdf", &[] as &[&str])
                .delayed("alice_resume.pdf", Duration::from_millis(50))
                .delayed("bob_resume.pdf", Duration::from_millis(20)),
        );
        let documents = vec![
            doc("alice_resume.pdf", 2048),
            doc("bob_resume.pdf", 1024),
            doc("carol-resume.pdf", 512),
        ];

        let reports = analyze_resumes(documents, &required(&["React", "Docker"]), extractor)
            .await
            .unwrap();

        let names: Vec<&str> = reports.iter().map(|r| r.candidate_name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Bob", "Carol"]);

        assert_eq!(reports[0].result.match_score, 50);
        assert_eq!(reports[0].result.missing_skills, vec!["Docker"]);
        assert_eq!(reports[1].result.match_score, 100);
        assert_eq!(reports[1].skills, vec!["react", "docker"]);
        assert_eq!(reports[2].result.match_score, 0);
        assert_eq!(reports[0].file_size, "2.0 KB");
    }

    #[tokio::test]
    async fn test_extraction_failure_fails_request() {
        let extractor: Arc<dyn SkillExtractor> =
            Arc::new(StaticSkillExtractor::new(&["rust"]).failing("bad.pdf"));
        let documents = vec![doc("good.pdf", 10), doc("bad.pdf", 10)];

        let err = analyze_resumes(documents, &required(&["rust"]), extractor)
            .await
            .unwrap_err();
        match err {
            AppError::UnprocessableEntity(msg) => assert!(msg.contains("bad.pdf")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_no_documents_yields_empty() {
        let extractor: Arc<dyn SkillExtractor> = Arc::new(StaticSkillExtractor::new(&["rust"]));
        let reports = analyze_resumes(vec![], &required(&["rust"]), extractor)
            .await
            .unwrap();
        assert!(reports.is_empty());
    }

    #[test]
    fn test_build_report_ids_are_unique() {
        let set = required(&["go"]);
        let a = build_report(0, &doc("x.pdf", 1), ExtractedProfile::default(), &set);
        let b = build_report(0, &doc("x.pdf", 1), ExtractedProfile::default(), &set);
        assert_ne!(a.id, b.id);
    }
}
