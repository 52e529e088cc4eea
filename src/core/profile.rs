use crate::core::classifier::classify;
use crate::core::fields::{extract_email, extract_experience, extract_name, extract_qualification};
use crate::domain::model::CandidateProfile;
use crate::domain::vocabulary::RoleVocabulary;

/// Runs every field extractor and the role classifier over a document's text.
///
/// Never fails: text without recognizable content yields the default values.
pub fn build_profile<S: AsRef<str>>(
    text: &str,
    vocabulary: &RoleVocabulary,
    qualifications: &[S],
) -> CandidateProfile {
    let classification = classify(text, vocabulary);
    tracing::debug!("Role scores: {:?}", classification.scores);

    CandidateProfile {
        name: extract_name(text),
        email: extract_email(text),
        role: classification.role,
        skills: classification.skills,
        experience: extract_experience(text),
        qualification: extract_qualification(text, qualifications),
    }
}
