//! Background normalization module
//!
//! The orchestrator that validates parameters, runs the gray or RGB
//! sub-pipeline stage by stage, and returns either a fully normalized buffer
//! or an error.

mod normalizer;
mod timing;
pub mod types;

#[cfg(test)]
mod tests;

pub use normalizer::{background_norm, background_norm_simple, BackgroundNormalizer};
pub use timing::{PipelineTimings, StepTiming, Timer};
pub use types::{NormConfig, NormConfigBuilder};
