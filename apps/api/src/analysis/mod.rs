// Resume analysis: section detection, five-part scoring, and the orchestrator
// that ties extraction to both. Detection and scoring are pure functions.

pub mod handlers;
pub mod pipeline;
pub mod scoring;
pub mod sections;
