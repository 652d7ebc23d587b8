// Resume analysis prompt templates.

pub const ANALYSIS_SYSTEM: &str = "\
You are an expert resume analyst. \
You will compare a resume against common Reddit insights and provide personalized feedback.";

pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"Here is a resume:

{resume_text}

Here are insights from Reddit discussions about resumes:

{insights}

Please provide:
1. {count} specific feedback items for this resume based on the insights. For each item include:
   - "type": "improvement" | "strength" | "insight" | "warning" | "suggestion"
   - "title": short descriptive title
   - "section": which resume section this applies to
   - "category": theme of the feedback, e.g. "ATS Optimization", or null
   - "description": detailed feedback
   - "severity": "low" | "medium" | "high"
   - "suggestion": concrete rewrite or next step, or null
   - "source": relevant subreddit if applicable, or null
2. Scores on a 0-1 scale:
   - "overall_score"
   - "content_score" (quality of content)
   - "formatting_score" (layout and organization)
   - "impact_score" (effectiveness of achievements)
   - "ats_score" (how well it works with ATS systems)

OUTPUT SCHEMA (return exactly this structure):
{
  "feedback": [{"type": "...", "title": "...", "section": "...", "category": null, "description": "...", "severity": "medium", "suggestion": null, "source": null}],
  "scores": {"overall_score": 0.0, "content_score": 0.0, "formatting_score": 0.0, "impact_score": 0.0, "ats_score": 0.0}
}

Return ONLY the JSON object, nothing else, no code fences."#;

pub const ANALYSIS_MAX_TOKENS: u32 = 4096;
