// Token and Candidate data types.

use serde::{Deserialize, Serialize};

/// A possible correction for a token, with a similarity score.
///
/// Produced by a suggestion source and immutable afterwards. Scores are
/// similarity values in the 0.0–1.0 range, higher is better.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// The suggested replacement text.
    pub value: String,

    /// Similarity score between the replacement and the original term.
    pub score: f32,

    /// Edit distance to the original term, when the source reports one.
    pub edit_distance: Option<f32>,
}

impl Candidate {
    /// Create a new candidate without edit-distance information.
    pub fn new(value: impl Into<String>, score: f32) -> Self {
        Self {
            value: value.into(),
            score,
            edit_distance: None,
        }
    }
}

/// One word-or-punctuation unit produced from splitting the cleaned query.
///
/// A token is created by the tokenizer with `candidates` empty and
/// `resolved` unset, then mutated exactly once by its resolver invocation.
/// Each token is exclusively owned by the pipeline invocation that created
/// it and is moved into the concurrent unit that resolves it, so no
/// locking is ever involved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// The original text fragment from the cleaned query.
    pub original: String,

    /// 1-based position within the cleaned query. Reassembly restores
    /// this order regardless of completion order of the lookups.
    pub order: usize,

    /// Candidates returned by the suggestion source, best first.
    pub candidates: Vec<Candidate>,

    /// The accepted replacement text. Equals `original` when no candidate
    /// was accepted.
    pub resolved: String,

    /// Whether `resolved` differs from `original`.
    pub changed: bool,
}

impl Token {
    /// Create an unresolved token at the given 1-based position.
    pub fn new(original: impl Into<String>, order: usize) -> Self {
        Self {
            original: original.into(),
            order,
            candidates: Vec::new(),
            resolved: String::new(),
            changed: false,
        }
    }

    /// Whether this token is long enough to be worth a lookup round-trip.
    /// Very short tokens (articles, punctuation remnants) produce noisy
    /// fuzzy matches and are resolved to themselves without querying.
    pub fn is_eligible(&self, min_token_length: usize) -> bool {
        self.original.chars().count() >= min_token_length
    }

    /// Resolve this token to its own original text.
    pub fn keep_original(&mut self) {
        self.resolved = self.original.clone();
        self.changed = false;
    }

    /// Resolve this token to an accepted replacement. `changed` is
    /// computed from the accepted value, not from whether a lookup
    /// occurred.
    pub fn accept(&mut self, value: impl Into<String>) {
        self.resolved = value.into();
        self.changed = self.resolved != self.original;
    }
}
