//! Keyword scoring of a document against the role vocabulary.

use crate::domain::vocabulary::RoleVocabulary;
use std::collections::HashSet;

pub const UNCATEGORIZED: &str = "Uncategorized";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub skills: Vec<String>,
    pub role: String,
    pub scores: Vec<(String, usize)>,
}

/// Keywords from the whole vocabulary that occur in the text, in vocabulary
/// order and without repeats.
pub fn extract_skills(text: &str, vocabulary: &RoleVocabulary) -> Vec<String> {
    let lowered = text.to_lowercase();
    let mut skills: Vec<String> = Vec::new();

    for keyword in vocabulary.keywords() {
        if lowered.contains(keyword) && !skills.iter().any(|s| s == keyword) {
            skills.push(keyword.to_string());
        }
    }

    skills
}

/// Number of each role's keywords present in `skills`, in declaration order.
pub fn role_scores(skills: &[String], vocabulary: &RoleVocabulary) -> Vec<(String, usize)> {
    let present: HashSet<&str> = skills.iter().map(String::as_str).collect();

    vocabulary
        .roles()
        .iter()
        .map(|role| {
            let score = role
                .keywords
                .iter()
                .filter(|keyword| present.contains(keyword.as_str()))
                .count();
            (role.name.clone(), score)
        })
        .collect()
}

/// Highest scoring role; the earliest declared role wins a tie.
pub fn assign_role(skills: &[String], vocabulary: &RoleVocabulary) -> String {
    best_role(&role_scores(skills, vocabulary))
}

fn best_role(scores: &[(String, usize)]) -> String {
    let mut best: Option<&(String, usize)> = None;
    for entry in scores {
        if best.map_or(true, |(_, top)| entry.1 > *top) {
            best = Some(entry);
        }
    }

    match best {
        Some((role, score)) if *score > 0 => role.clone(),
        _ => UNCATEGORIZED.to_string(),
    }
}

pub fn classify(text: &str, vocabulary: &RoleVocabulary) -> Classification {
    let skills = extract_skills(text, vocabulary);
    let scores = role_scores(&skills, vocabulary);
    let role = best_role(&scores);

    Classification {
        skills,
        role,
        scores,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::vocabulary::RoleEntry;

    fn small_vocabulary() -> RoleVocabulary {
        RoleVocabulary::new(vec![
            RoleEntry::new("Web", &["html", "css", "react"]),
            RoleEntry::new("Data", &["pandas", "spark", "sql"]),
            RoleEntry::new("Mobile", &["kotlin", "swift", "react"]),
        ])
    }

    #[test]
    fn test_single_role_keywords_pick_that_role() {
        let vocabulary = small_vocabulary();
        let skills = extract_skills("Built ETL jobs with Spark and SQL", &vocabulary);
        assert_eq!(skills, vec!["spark", "sql"]);
        assert_eq!(assign_role(&skills, &vocabulary), "Data");
    }

    #[test]
    fn test_no_keywords_is_uncategorized() {
        let vocabulary = small_vocabulary();
        let skills = extract_skills("Gardening, cooking and woodwork", &vocabulary);
        assert!(skills.is_empty());
        assert_eq!(assign_role(&skills, &vocabulary), UNCATEGORIZED);
    }

    #[test]
    fn test_shared_keyword_is_listed_once() {
        let vocabulary = small_vocabulary();
        let skills = extract_skills("REACT and Swift", &vocabulary);
        assert_eq!(skills, vec!["react", "swift"]);
    }

    #[test]
    fn test_tie_goes_to_first_declared_role() {
        let vocabulary = small_vocabulary();
        // Web: react, html = 2. Mobile: react, kotlin = 2.
        let skills = extract_skills("react, html, kotlin", &vocabulary);
        assert_eq!(assign_role(&skills, &vocabulary), "Web");
    }

    #[test]
    fn test_highest_score_beats_declaration_order() {
        let vocabulary = small_vocabulary();
        let skills = extract_skills("html, pandas, spark, sql", &vocabulary);
        assert_eq!(assign_role(&skills, &vocabulary), "Data");
    }

    #[test]
    fn test_empty_vocabulary_is_uncategorized() {
        let vocabulary = RoleVocabulary::new(vec![]);
        let result = classify("react", &vocabulary);
        assert!(result.skills.is_empty());
        assert_eq!(result.role, UNCATEGORIZED);
    }

    #[test]
    fn test_default_vocabulary_full_stack_scenario() {
        let vocabulary = RoleVocabulary::default();
        let result = classify(
            "Jane Doe\njane@example.com\nSkilled in react, node, mongodb",
            &vocabulary,
        );

        for skill in ["react", "node", "mongodb"] {
            assert!(result.skills.iter().any(|s| s == skill));
        }
        assert_eq!(result.role, "Full Stack Developer");
        assert_eq!(result.scores[0], ("Full Stack Developer".to_string(), 3));
    }

    #[test]
    fn test_default_vocabulary_ignores_words_containing_keywords() {
        let vocabulary = RoleVocabulary::default();

        let result = classify("Studied at the school of laws and expressed interest", &vocabulary);
        assert!(result.skills.is_empty());
        assert_eq!(result.role, UNCATEGORIZED);

        let result = classify("JavaScript and TypeScript", &vocabulary);
        assert_eq!(result.skills, vec!["javascript", "typescript"]);
        let backend = result
            .scores
            .iter()
            .find(|(role, _)| role == "Backend Developer")
            .unwrap();
        assert_eq!(backend.1, 0);
        assert_eq!(result.role, "Full Stack Developer");
    }
}
