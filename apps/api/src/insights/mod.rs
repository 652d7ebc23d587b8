// Insight extraction: community documents → structured advice records.
// All provider calls go through llm_client; no direct HTTP here.

pub mod extractor;
pub mod fallback;
pub mod handlers;
pub mod prompts;

pub use extractor::{Extraction, InsightExtractor};
