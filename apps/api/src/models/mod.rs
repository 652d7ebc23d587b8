pub mod feedback;
pub mod insight;
pub mod resume;
