// Shared types for the querymend correction pipeline.
//
// This crate holds the data model (`Token`, `Candidate`), the pipeline
// configuration, and the error taxonomy. The pipeline itself lives in
// `qmend-pipeline`; this crate has no knowledge of any concrete
// suggestion source.

pub mod config;
pub mod error;
pub mod token;

// Re-export key types for convenient access.
pub use config::{AcceptanceMode, PipelineConfig};
pub use error::{PipelineError, SourceError};
pub use token::{Candidate, Token};
