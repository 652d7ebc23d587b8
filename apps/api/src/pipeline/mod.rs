// Pipeline orchestration: collection path (fetch → extract → store) and
// analysis path (corpus → analyze → store).

pub mod orchestrator;
pub mod pacer;

pub use orchestrator::{AnalysisOutcome, CollectionOutcome, Pipeline};
