// querymend pipeline: tokenize -> concurrent per-token lookup ->
// score-based accept/reject -> ordered reassembly.
//
// Architecture:
//   - `tokenizer`: splits raw input into ordered tokens, isolating
//     punctuation into its own tokens
//   - `source`: the `SuggestionSource` seam (an external fuzzy-matching
//     capability) plus an in-memory implementation
//   - `resolver`: per-token eligibility gate, lookup, and acceptance policy
//   - `pipeline`: fan-out/gather coordination and the public entry point
//   - `render`: reassembly of resolved tokens with optional markers
//   - `postgres` (feature `postgres`): pg_trgm-backed suggestion source

pub mod pipeline;
pub mod render;
pub mod resolver;
pub mod source;
pub mod tokenizer;

#[cfg(feature = "postgres")]
pub mod postgres;

// Re-export key types for convenient access.
pub use pipeline::QueryMender;
pub use qmend_core::{AcceptanceMode, Candidate, PipelineConfig, PipelineError, SourceError, Token};
pub use source::{MemorySource, SuggestionSource};
