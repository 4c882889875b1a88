// QueryMender: fan-out/gather coordination and the public entry point.
//
// One short-lived task is spawned per token and joined through a single
// completion barrier. Tasks share the suggestion source handle read-only
// and each owns its token outright, so there is no locking. Output order
// is always restored from the token's `order` field, never taken from
// completion order.

use std::collections::HashSet;
use std::sync::Arc;

use qmend_core::{PipelineConfig, PipelineError, Token};
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::render::render;
use crate::resolver::resolve;
use crate::source::SuggestionSource;
use crate::tokenizer::{clean, tokenize};

/// The query correction pipeline.
///
/// Owns a shared handle to the suggestion source and an explicit
/// configuration value. Cheap to clone.
#[derive(Clone)]
pub struct QueryMender {
    source: Arc<dyn SuggestionSource>,
    config: Arc<PipelineConfig>,
}

impl QueryMender {
    /// Create a pipeline over the given source with an explicit
    /// configuration.
    pub fn new(source: Arc<dyn SuggestionSource>, config: PipelineConfig) -> Self {
        Self {
            source,
            config: Arc::new(config),
        }
    }

    /// Create a pipeline with the default configuration.
    pub fn with_defaults(source: Arc<dyn SuggestionSource>) -> Self {
        Self::new(source, PipelineConfig::default())
    }

    /// Correct a free-text query.
    ///
    /// Returns an error only for setup-fatal conditions (the source not
    /// being ready before fan-out); per-token lookup failures degrade
    /// those tokens to their original text and never surface here.
    pub async fn correct(&self, query: &str, format: bool) -> Result<String, PipelineError> {
        self.source.ready().await?;

        let cleaned = clean(query, &self.config.special_chars);
        let tokens = tokenize(&cleaned);
        debug!(token_count = tokens.len(), "resolving query");

        let resolved = self.resolve_all(tokens).await;
        Ok(render(&resolved, format, &self.config.marker))
    }

    /// Resolve every token concurrently and return them in their
    /// original order.
    ///
    /// All-or-nothing with respect to completion: the barrier waits for
    /// every task, and a task that fails to join degrades its token to
    /// the original text, same as a failed lookup.
    pub async fn resolve_all(&self, tokens: Vec<Token>) -> Vec<Token> {
        // Kept so tokens lost to a failed join can be reconstructed.
        let originals: Vec<(usize, String)> = tokens
            .iter()
            .map(|t| (t.order, t.original.clone()))
            .collect();

        let mut tasks = JoinSet::new();
        for token in tokens {
            let source = Arc::clone(&self.source);
            let config = Arc::clone(&self.config);
            tasks.spawn(async move { resolve(token, source.as_ref(), &config).await });
        }

        let mut resolved = Vec::with_capacity(originals.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(token) => resolved.push(token),
                Err(err) => warn!(%err, "resolver task did not complete"),
            }
        }

        if resolved.len() != originals.len() {
            let present: HashSet<usize> = resolved.iter().map(|t| t.order).collect();
            for (order, original) in originals {
                if !present.contains(&order) {
                    let mut token = Token::new(original, order);
                    token.keep_original();
                    resolved.push(token);
                }
            }
        }

        resolved.sort_by_key(|t| t.order);
        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;

    fn demo_source() -> Arc<MemorySource> {
        Arc::new(MemorySource::from_triples([
            ("apan", "Japan", 0.8),
            ("ussia", "Russia", 0.75),
        ]))
    }

    #[tokio::test]
    async fn correct_formats_changed_tokens() {
        let mender = QueryMender::with_defaults(demo_source());
        let out = mender
            .correct("who is the president of apan?", true)
            .await
            .unwrap();
        assert_eq!(out, "who is the president of <i>Japan</i> ?");
    }

    #[tokio::test]
    async fn correct_without_format_renders_bare() {
        let mender = QueryMender::with_defaults(demo_source());
        let out = mender.correct("how big is ussia?", false).await.unwrap();
        assert_eq!(out, "how big is Russia ?");
    }

    #[tokio::test]
    async fn empty_query_yields_empty_result() {
        let mender = QueryMender::with_defaults(demo_source());
        assert_eq!(mender.correct("", true).await.unwrap(), "");
    }

    #[tokio::test]
    async fn resolve_all_restores_order() {
        let mender = QueryMender::with_defaults(demo_source());
        let tokens = vec![
            Token::new("how", 1),
            Token::new("big", 2),
            Token::new("is", 3),
            Token::new("ussia", 4),
        ];
        let resolved = mender.resolve_all(tokens).await;
        let orders: Vec<usize> = resolved.iter().map(|t| t.order).collect();
        assert_eq!(orders, [1, 2, 3, 4]);
        assert_eq!(resolved[3].resolved, "Russia");
    }
}
