// Shared prompt fragments.
// Each pipeline stage that calls a provider defines its own prompts.rs alongside it.

/// Appended to every system prompt so the reply can be decoded directly.
pub const JSON_ONLY_INSTRUCTION: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON document. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";
