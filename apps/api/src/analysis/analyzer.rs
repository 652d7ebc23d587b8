//! Resume Analyzer: scores a resume against the accumulated insight corpus.
//!
//! Same provider chain as insight extraction: primary, then secondary, then the
//! fixed fallback analysis. An empty corpus goes straight to the fallback.

use serde::Deserialize;
use tracing::{info, warn};

use crate::analysis::fallback::{fallback_feedback, fallback_scores};
use crate::analysis::prompts::{ANALYSIS_MAX_TOKENS, ANALYSIS_PROMPT_TEMPLATE, ANALYSIS_SYSTEM};
use crate::llm_client::decode::decode_json;
use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::llm_client::{DecodeError, Origin, ProviderChain};
use crate::models::feedback::{FeedbackItem, FeedbackType, ScoreSet, DEFAULT_SEVERITY};
use crate::models::insight::InsightRecord;

/// Feedback items requested per analysis.
pub const FEEDBACK_TARGET: usize = 10;

#[derive(Debug, Clone)]
pub struct Analysis {
    pub feedback: Vec<FeedbackItem>,
    pub scores: ScoreSet,
    pub origin: Origin,
}

#[derive(Debug, Deserialize)]
struct ProviderFeedback {
    #[serde(rename = "type")]
    kind: FeedbackType,
    title: String,
    #[serde(default)]
    category: Option<String>,
    section: String,
    description: String,
    severity: Option<String>,
    suggestion: Option<String>,
    source: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProviderScores {
    #[serde(alias = "overall_score")]
    overall: f64,
    #[serde(alias = "content_score")]
    content: f64,
    #[serde(alias = "formatting_score")]
    formatting: f64,
    #[serde(alias = "impact_score")]
    impact: f64,
    #[serde(alias = "ats_score")]
    ats: f64,
}

#[derive(Debug, Deserialize)]
struct AnalysisPayload {
    feedback: Vec<ProviderFeedback>,
    scores: ProviderScores,
}

#[derive(Clone)]
pub struct ResumeAnalyzer {
    providers: ProviderChain,
}

impl ResumeAnalyzer {
    pub fn new(providers: ProviderChain) -> Self {
        Self { providers }
    }

    pub async fn analyze(
        &self,
        resume_id: &str,
        resume_text: &str,
        corpus: &[InsightRecord],
    ) -> Analysis {
        if corpus.is_empty() {
            info!("Insight corpus is empty, using fallback analysis for resume {resume_id}");
            return fallback(resume_id);
        }

        let prompt = build_analysis_prompt(resume_text, corpus);
        let system = format!("{ANALYSIS_SYSTEM} {JSON_ONLY_INSTRUCTION}");

        match self
            .providers
            .first_success(&prompt, &system, ANALYSIS_MAX_TOKENS, |text| {
                decode_analysis(text, resume_id)
            })
            .await
        {
            Some(((feedback, scores), provider)) => {
                info!(
                    "Analyzed resume {resume_id} via {}: overall={:.2}, {} feedback items",
                    provider.name(),
                    scores.overall,
                    feedback.len()
                );
                Analysis {
                    feedback,
                    scores,
                    origin: Origin::Provider(provider),
                }
            }
            None => {
                warn!("No provider analyzed resume {resume_id}, using fallback analysis");
                fallback(resume_id)
            }
        }
    }
}

fn fallback(resume_id: &str) -> Analysis {
    Analysis {
        feedback: fallback_feedback(resume_id),
        scores: fallback_scores(resume_id),
        origin: Origin::Fallback,
    }
}

/// One bullet per insight.
pub fn format_insights(corpus: &[InsightRecord]) -> String {
    corpus
        .iter()
        .map(|i| {
            format!(
                "- Section: {}, Category: {}, Insight: \"{}\", Sentiment: {}",
                i.section, i.category, i.insight, i.sentiment
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn build_analysis_prompt(resume_text: &str, corpus: &[InsightRecord]) -> String {
    ANALYSIS_PROMPT_TEMPLATE
        .replace("{count}", &FEEDBACK_TARGET.to_string())
        .replace("{insights}", &format_insights(corpus))
        .replace("{resume_text}", resume_text)
}

/// Decodes model output into feedback and scores for `resume_id`.
///
/// Every score must already be in [0, 1]; a model answering on another scale
/// is treated as unusable output. Feedback beyond `FEEDBACK_TARGET` is dropped;
/// none at all is rejected.
pub fn decode_analysis(
    text: &str,
    resume_id: &str,
) -> Result<(Vec<FeedbackItem>, ScoreSet), DecodeError> {
    let payload: AnalysisPayload = decode_json(text)?;

    if payload.feedback.is_empty() {
        return Err(DecodeError::Empty);
    }

    let s = payload.scores;
    let scores = ScoreSet {
        resume_id: resume_id.to_string(),
        overall: unit_score("overall", s.overall)?,
        content: unit_score("content", s.content)?,
        formatting: unit_score("formatting", s.formatting)?,
        impact: unit_score("impact", s.impact)?,
        ats: unit_score("ats", s.ats)?,
    };

    let feedback = payload
        .feedback
        .into_iter()
        .take(FEEDBACK_TARGET)
        .map(|f| FeedbackItem {
            resume_id: resume_id.to_string(),
            kind: f.kind,
            title: f.title,
            category: f
                .category
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| f.kind.as_str().to_string()),
            section: f.section,
            description: f.description,
            severity: f
                .severity
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_SEVERITY.to_string()),
            suggestion: f.suggestion,
            source: f.source,
        })
        .collect();

    Ok((feedback, scores))
}

fn unit_score(field: &'static str, value: f64) -> Result<f64, DecodeError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(DecodeError::OutOfRange { field, value });
    }
    Ok(value)
}
