// Pipeline configuration.
//
// All tunables are carried in an explicit value handed to the pipeline
// constructor; there is no package-level mutable state.

use serde::{Deserialize, Serialize};

/// Characters that the tokenizer isolates into their own tokens.
pub const DEFAULT_SPECIAL_CHARS: &str = "`~!@#$%^&*()-_+=|\\{}[]:;'\"/?.,><";

/// The rule deciding whether a candidate replaces a token's original text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AcceptanceMode {
    /// Take the best-scored candidate unconditionally whenever the source
    /// returned at least one row.
    TopCandidate,

    /// Take the best-scored candidate only if its score meets the
    /// configured threshold (inclusive: `score >= threshold`).
    Threshold,
}

/// Configuration for one pipeline instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Tokens shorter than this (in characters) skip the lookup entirely.
    pub min_token_length: usize,

    /// How candidate scores are turned into an accept/reject decision.
    pub acceptance_mode: AcceptanceMode,

    /// Minimum score for acceptance in `Threshold` mode. Ignored in
    /// `TopCandidate` mode.
    pub threshold: f32,

    /// Maximum number of candidates requested per lookup.
    pub top_k: usize,

    /// Opening and closing marker wrapped around changed tokens when
    /// formatted output is requested.
    pub marker: (String, String),

    /// Characters isolated into their own tokens by `clean`.
    pub special_chars: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            min_token_length: 3,
            acceptance_mode: AcceptanceMode::Threshold,
            threshold: 0.3,
            top_k: 5,
            marker: ("<i>".to_string(), "</i>".to_string()),
            special_chars: DEFAULT_SPECIAL_CHARS.to_string(),
        }
    }
}
