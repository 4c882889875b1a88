// The suggestion source seam.
//
// The pipeline never implements similarity scoring itself; it consumes a
// ranked-candidates capability through the `SuggestionSource` trait and
// applies its own acceptance policy on top.

use std::collections::HashMap;

use async_trait::async_trait;
use qmend_core::{Candidate, SourceError};

/// External fuzzy-matching capability: given a term, return candidate
/// corrections ranked by similarity.
///
/// Implementations must be safe for concurrent invocation: one handle is
/// shared read-only across all per-token lookups of a query (e.g. a
/// connection pool, never a single exclusive connection).
#[async_trait]
pub trait SuggestionSource: Send + Sync {
    /// Look up candidate corrections for `term`, ordered by descending
    /// score with ties broken by lexicographic order of the value, with
    /// at most `top_k` rows.
    async fn lookup(&self, term: &str, top_k: usize) -> Result<Vec<Candidate>, SourceError>;

    /// Readiness probe, invoked once before fan-out. A failure here is
    /// setup-fatal for the whole query.
    async fn ready(&self) -> Result<(), SourceError> {
        Ok(())
    }
}

/// In-memory suggestion source backed by an explicit term table.
///
/// Used by tests and the demo binary. Terms without an entry yield no
/// candidates, which the resolver treats as "keep the original".
#[derive(Debug, Default)]
pub struct MemorySource {
    entries: HashMap<String, Vec<Candidate>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the candidates returned for `term`.
    pub fn insert(&mut self, term: impl Into<String>, candidates: Vec<Candidate>) {
        self.entries.insert(term.into(), candidates);
    }

    /// Convenience constructor from `(term, value, score)` triples.
    pub fn from_triples<'a>(triples: impl IntoIterator<Item = (&'a str, &'a str, f32)>) -> Self {
        let mut source = Self::new();
        for (term, value, score) in triples {
            source
                .entries
                .entry(term.to_string())
                .or_default()
                .push(Candidate::new(value, score));
        }
        source
    }
}

#[async_trait]
impl SuggestionSource for MemorySource {
    async fn lookup(&self, term: &str, top_k: usize) -> Result<Vec<Candidate>, SourceError> {
        let mut rows = self.entries.get(term).cloned().unwrap_or_default();
        rows.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.value.cmp(&b.value))
        });
        rows.truncate(top_k);
        Ok(rows)
    }
}
