//! Static insight list used whenever live extraction is unavailable.

use crate::models::insight::{topic_url, InsightRecord, Sentiment};

/// (insight, section, category, sentiment)
const FALLBACK_INSIGHTS: [(&str, &str, &str, Sentiment); 10] = [
    (
        "Use quantifiable achievements in your work experience section rather than just listing job duties",
        "Work Experience",
        "Impact Statements",
        Sentiment::Positive,
    ),
    (
        "Keep your resume to one page if you have less than 10 years of experience",
        "Format",
        "Content Quality",
        Sentiment::Neutral,
    ),
    (
        "Include relevant keywords from the job description to pass ATS filters",
        "General",
        "ATS Optimization",
        Sentiment::Positive,
    ),
    (
        "Remove the objective statement and replace it with a professional summary",
        "Summary",
        "Content Quality",
        Sentiment::Negative,
    ),
    (
        "Use bullet points instead of paragraphs for better readability",
        "Format",
        "Formatting",
        Sentiment::Positive,
    ),
    (
        "Start every bullet with a strong action verb such as Developed, Implemented or Achieved",
        "Work Experience",
        "Impact Statements",
        Sentiment::Positive,
    ),
    (
        "Avoid tables, columns and graphics that confuse applicant tracking systems",
        "Format",
        "ATS Optimization",
        Sentiment::Negative,
    ),
    (
        "Group skills by category so recruiters can scan relevant capabilities quickly",
        "Skills",
        "Formatting",
        Sentiment::Neutral,
    ),
    (
        "Move education below work experience once you have several years of professional experience",
        "Education",
        "Content Quality",
        Sentiment::Neutral,
    ),
    (
        "Leave out personal details like age, marital status or a photo",
        "Contact",
        "Content Quality",
        Sentiment::Negative,
    ),
];

/// The fixed fallback list, stamped with the requesting topic.
/// Content is identical for every topic.
pub fn fallback_insights(topic: &str) -> Vec<InsightRecord> {
    let source_url = topic_url(topic);
    FALLBACK_INSIGHTS
        .iter()
        .map(|(insight, section, category, sentiment)| InsightRecord {
            topic: topic.to_string(),
            insight: insight.to_string(),
            section: section.to_string(),
            category: category.to_string(),
            sentiment: *sentiment,
            source_url: source_url.clone(),
        })
        .collect()
}
