// Error taxonomy.
//
// Two tiers: setup-fatal errors surface from the pipeline entry point,
// while per-token lookup failures are swallowed by the resolver and only
// ever degrade a single token to its original text.

/// Errors produced by a suggestion source.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The source cannot be reached at all. Fatal when raised by the
    /// readiness probe before fan-out.
    #[error("suggestion source unavailable: {0}")]
    Unavailable(String),

    /// A lookup for a single term failed. Recoverable: the token falls
    /// back to its original text.
    #[error("lookup failed for {term:?}: {reason}")]
    Lookup { term: String, reason: String },

    /// The source returned a row that could not be decoded. Recoverable.
    #[error("malformed candidate row: {0}")]
    MalformedRow(String),
}

/// Errors returned by the pipeline entry point. Only setup-fatal
/// conditions appear here; per-token failures never do.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The suggestion source was not ready when the pipeline started.
    #[error("suggestion source is not ready: {0}")]
    SourceUnavailable(#[from] SourceError),
}
