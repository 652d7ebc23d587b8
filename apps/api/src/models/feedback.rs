use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const DEFAULT_SEVERITY: &str = "medium";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum FeedbackType {
    Improvement,
    Strength,
    Insight,
    Warning,
    Suggestion,
}

impl FeedbackType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackType::Improvement => "improvement",
            FeedbackType::Strength => "strength",
            FeedbackType::Insight => "insight",
            FeedbackType::Warning => "warning",
            FeedbackType::Suggestion => "suggestion",
        }
    }
}

impl fmt::Display for FeedbackType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeedbackType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "improvement" => Ok(FeedbackType::Improvement),
            "strength" => Ok(FeedbackType::Strength),
            "insight" => Ok(FeedbackType::Insight),
            "warning" => Ok(FeedbackType::Warning),
            "suggestion" => Ok(FeedbackType::Suggestion),
            other => Err(format!("unknown feedback type '{other}'")),
        }
    }
}

impl TryFrom<String> for FeedbackType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// One feedback card for a resume. A resume owns many; none are mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackItem {
    pub resume_id: String,
    #[serde(rename = "type")]
    pub kind: FeedbackType,
    pub title: String,
    /// Free-form theme; the type name when the model gives none.
    pub category: String,
    pub section: String,
    pub description: String,
    pub severity: String,
    pub suggestion: Option<String>,
    pub source: Option<String>,
}

/// Scores for one analysis run. Every field is within [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSet {
    pub resume_id: String,
    pub overall: f64,
    pub content: f64,
    pub formatting: f64,
    pub impact: f64,
    pub ats: f64,
}

impl ScoreSet {
    pub fn fields(&self) -> [f64; 5] {
        [
            self.overall,
            self.content,
            self.formatting,
            self.impact,
            self.ats,
        ]
    }

    /// Letter grade for the overall score, as shown on the dashboard.
    pub fn grade(&self) -> &'static str {
        match self.overall {
            s if s >= 0.9 => "A+",
            s if s >= 0.8 => "A",
            s if s >= 0.7 => "B",
            s if s >= 0.6 => "C",
            s if s >= 0.5 => "D",
            _ => "F",
        }
    }
}
