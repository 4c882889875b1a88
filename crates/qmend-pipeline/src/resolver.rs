// Per-token resolution: eligibility gate, lookup, acceptance policy.

use qmend_core::{AcceptanceMode, PipelineConfig, Token};
use tracing::warn;

use crate::source::SuggestionSource;

/// Resolve a single token against the suggestion source.
///
/// Tokens below the configured minimum length resolve to themselves
/// without any lookup. Otherwise the source is queried for up to `top_k`
/// candidates and the best one is accepted according to the configured
/// acceptance mode.
///
/// Any lookup failure is swallowed here: the token falls back to its
/// original text with `changed == false` and the failure is logged at
/// warn level. A single bad token must not fail the whole query.
pub async fn resolve(
    mut token: Token,
    source: &dyn SuggestionSource,
    config: &PipelineConfig,
) -> Token {
    if !token.is_eligible(config.min_token_length) {
        token.keep_original();
        return token;
    }

    match source.lookup(&token.original, config.top_k).await {
        Ok(candidates) if !candidates.is_empty() => {
            let (best_value, best_score) = {
                let best = &candidates[0];
                (best.value.clone(), best.score)
            };
            token.candidates = candidates;
            let accepted = match config.acceptance_mode {
                AcceptanceMode::TopCandidate => true,
                // Boundary is inclusive: a score exactly at the
                // threshold is accepted.
                AcceptanceMode::Threshold => best_score >= config.threshold,
            };
            if accepted {
                token.accept(best_value);
            } else {
                token.keep_original();
            }
        }
        Ok(_) => token.keep_original(),
        Err(err) => {
            warn!(term = %token.original, %err, "lookup failed, keeping original");
            token.keep_original();
        }
    }

    token
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;
    use async_trait::async_trait;
    use qmend_core::{Candidate, SourceError};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Source that counts lookups and always fails.
    #[derive(Default)]
    struct FailingSource {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl SuggestionSource for FailingSource {
        async fn lookup(&self, term: &str, _top_k: usize) -> Result<Vec<Candidate>, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(SourceError::Lookup {
                term: term.to_string(),
                reason: "synthetic failure".to_string(),
            })
        }
    }

    fn threshold_config(threshold: f32) -> PipelineConfig {
        PipelineConfig {
            acceptance_mode: AcceptanceMode::Threshold,
            threshold,
            ..PipelineConfig::default()
        }
    }

    #[tokio::test]
    async fn short_token_skips_lookup_entirely() {
        let source = FailingSource::default();
        let token = resolve(Token::new("is", 1), &source, &PipelineConfig::default()).await;
        assert_eq!(token.resolved, "is");
        assert!(!token.changed);
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn lookup_failure_degrades_to_original() {
        let source = FailingSource::default();
        let token = resolve(Token::new("ussia", 1), &source, &PipelineConfig::default()).await;
        assert_eq!(token.resolved, "ussia");
        assert!(!token.changed);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn empty_result_degrades_to_original() {
        let source = MemorySource::new();
        let token = resolve(Token::new("president", 1), &source, &PipelineConfig::default()).await;
        assert_eq!(token.resolved, "president");
        assert!(!token.changed);
    }

    #[tokio::test]
    async fn best_candidate_above_threshold_is_accepted() {
        let source = MemorySource::from_triples([("apan", "Japan", 0.8)]);
        let token = resolve(Token::new("apan", 1), &source, &threshold_config(0.3)).await;
        assert_eq!(token.resolved, "Japan");
        assert!(token.changed);
        assert_eq!(token.candidates.len(), 1);
    }

    #[tokio::test]
    async fn score_below_threshold_keeps_original() {
        let source = MemorySource::from_triples([("apan", "Japan", 0.299)]);
        let token = resolve(Token::new("apan", 1), &source, &threshold_config(0.3)).await;
        assert_eq!(token.resolved, "apan");
        assert!(!token.changed);
        // Rejected candidates are still recorded on the token.
        assert_eq!(token.candidates[0].value, "Japan");
    }

    #[tokio::test]
    async fn score_exactly_at_threshold_is_accepted() {
        let source = MemorySource::from_triples([("apan", "Japan", 0.3)]);
        let token = resolve(Token::new("apan", 1), &source, &threshold_config(0.3)).await;
        assert_eq!(token.resolved, "Japan");
        assert!(token.changed);
    }

    #[tokio::test]
    async fn top_candidate_mode_accepts_regardless_of_score() {
        let source = MemorySource::from_triples([("apan", "Japan", 0.01)]);
        let config = PipelineConfig {
            acceptance_mode: AcceptanceMode::TopCandidate,
            ..PipelineConfig::default()
        };
        let token = resolve(Token::new("apan", 1), &source, &config).await;
        assert_eq!(token.resolved, "Japan");
        assert!(token.changed);
    }

    #[tokio::test]
    async fn accepted_self_candidate_is_not_a_change() {
        let source = MemorySource::from_triples([("Japan", "Japan", 1.0)]);
        let token = resolve(Token::new("Japan", 1), &source, &threshold_config(0.3)).await;
        assert_eq!(token.resolved, "Japan");
        assert!(!token.changed);
    }
}
