// Resume analysis: resume text + insight corpus → feedback cards and scores.
// All provider calls go through llm_client; no direct HTTP here.

pub mod analyzer;
pub mod fallback;
pub mod handlers;
pub mod prompts;
pub mod text;

pub use analyzer::{Analysis, ResumeAnalyzer};
