//! Fixed analysis returned when no provider can score a resume.

use crate::models::feedback::{FeedbackItem, FeedbackType, ScoreSet, DEFAULT_SEVERITY};

/// (type, title, section, description, source)
const FALLBACK_FEEDBACK: [(FeedbackType, &str, &str, &str, &str); 10] = [
    (
        FeedbackType::Improvement,
        "Add Quantifiable Achievements",
        "Work Experience",
        "Your work experience section lists job duties but lacks measurable achievements. Add metrics and results to demonstrate your impact.",
        "resumes",
    ),
    (
        FeedbackType::Strength,
        "Clean Formatting",
        "Format",
        "Your resume has a clean, professional layout that makes good use of whitespace and is easy to scan.",
        "Resume",
    ),
    (
        FeedbackType::Warning,
        "Missing Keywords",
        "Skills",
        "Your resume may not pass ATS filters. Include more industry-specific keywords relevant to your target roles.",
        "jobs",
    ),
    (
        FeedbackType::Suggestion,
        "Upgrade Your Summary",
        "Summary",
        "Replace your objective statement with a professional summary that highlights your unique value proposition.",
        "Resume",
    ),
    (
        FeedbackType::Improvement,
        "Use Bullet Points",
        "Work Experience",
        "Convert paragraph descriptions to bullet points to improve readability and make your achievements stand out.",
        "resumes",
    ),
    (
        FeedbackType::Insight,
        "Education Section Placement",
        "Education",
        "If you're an experienced professional, move your education section below your work experience to emphasize your career achievements.",
        "jobs",
    ),
    (
        FeedbackType::Suggestion,
        "Remove References",
        "General",
        "Remove 'References available upon request' to save space. Employers will ask for references if needed.",
        "resumes",
    ),
    (
        FeedbackType::Improvement,
        "Action Verbs",
        "Work Experience",
        "Start each bullet point with strong action verbs in the past tense for previous positions and present tense for current roles.",
        "Resume",
    ),
    (
        FeedbackType::Warning,
        "Too Much Personal Information",
        "Contact",
        "Remove personal details like age, marital status, or photos to avoid potential discrimination issues.",
        "jobs",
    ),
    (
        FeedbackType::Strength,
        "Consistent Formatting",
        "Format",
        "Your resume maintains consistent formatting throughout, which creates a professional appearance.",
        "resumes",
    ),
];

pub fn fallback_feedback(resume_id: &str) -> Vec<FeedbackItem> {
    FALLBACK_FEEDBACK
        .iter()
        .map(|(kind, title, section, description, source)| FeedbackItem {
            resume_id: resume_id.to_string(),
            kind: *kind,
            title: title.to_string(),
            category: kind.as_str().to_string(),
            section: section.to_string(),
            description: description.to_string(),
            severity: DEFAULT_SEVERITY.to_string(),
            suggestion: None,
            source: Some(source.to_string()),
        })
        .collect()
}

pub fn fallback_scores(resume_id: &str) -> ScoreSet {
    ScoreSet {
        resume_id: resume_id.to_string(),
        overall: 0.72,
        content: 0.68,
        formatting: 0.85,
        impact: 0.55,
        ats: 0.65,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_feedback_has_ten_items_for_resume() {
        let items = fallback_feedback("r1");
        assert_eq!(items.len(), 10);
        assert!(items.iter().all(|i| i.resume_id == "r1"));
        assert!(items.iter().all(|i| i.severity == "medium"));
    }

    #[test]
    fn test_fallback_scores_are_fixed() {
        let scores = fallback_scores("r1");
        assert_eq!(scores.fields(), [0.72, 0.68, 0.85, 0.55, 0.65]);
        assert_eq!(scores.grade(), "B");
    }
}
