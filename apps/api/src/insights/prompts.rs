// Insight extraction prompt templates.

pub const INSIGHT_SYSTEM: &str = "\
You are an expert in analyzing resume advice from Reddit. \
Extract key insights, categorize them, and determine sentiment.";

pub const INSIGHT_PROMPT_TEMPLATE: &str = r#"Extract exactly {count} key resume insights from the following r/{topic} posts.

POSTS:
{documents}

For each insight provide:
1. "insight": the actionable advice itself
2. "section": the resume section it applies to (Summary, Work Experience, Education, Skills, Format, Contact, General)
3. "category": e.g. ATS Optimization, Content Quality, Formatting, Impact Statements
4. "sentiment": "positive" | "negative" | "neutral"

OUTPUT SCHEMA (return exactly this structure):
[
  {"insight": "string", "section": "string", "category": "string", "sentiment": "positive" | "negative" | "neutral"}
]

Return ONLY the JSON array with exactly {count} objects, nothing else, no code fences."#;

pub const INSIGHT_MAX_TOKENS: u32 = 2048;
