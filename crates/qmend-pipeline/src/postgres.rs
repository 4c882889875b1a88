// Postgres-backed suggestion source.
//
// Runs a pg_trgm similarity query against a single-column dictionary
// table. The pool is safe for concurrent invocation, which makes it a
// valid shared handle for the fan-out. Requires the `pg_trgm` extension
// and a GIN/GiST trigram index on the dictionary column to be fast.

use async_trait::async_trait;
use qmend_core::{Candidate, SourceError};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};

use crate::source::SuggestionSource;

/// Suggestion source backed by a Postgres trigram-similarity search.
#[derive(Clone, Debug)]
pub struct PgSource {
    pool: PgPool,
    table: String,
    column: String,
}

impl PgSource {
    /// Create a source over an existing pool, reading from
    /// `countries.name` by default.
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            table: "countries".to_string(),
            column: "name".to_string(),
        }
    }

    /// Connect a small pool to the given database URL.
    pub async fn connect(url: &str) -> Result<Self, SourceError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(url)
            .await
            .map_err(|e| SourceError::Unavailable(e.to_string()))?;
        Ok(Self::new(pool))
    }

    /// Read from a different dictionary table/column.
    ///
    /// The identifiers are interpolated into the query text, so they
    /// must come from configuration, never from user input.
    pub fn with_dictionary(mut self, table: impl Into<String>, column: impl Into<String>) -> Self {
        self.table = table.into();
        self.column = column.into();
        self
    }
}

#[async_trait]
impl SuggestionSource for PgSource {
    async fn lookup(&self, term: &str, top_k: usize) -> Result<Vec<Candidate>, SourceError> {
        let sql = format!(
            "SELECT {col}, similarity({col}, $1) AS sml \
             FROM {table} WHERE {col} % $1 \
             ORDER BY sml DESC, {col} LIMIT $2",
            col = self.column,
            table = self.table,
        );

        let rows = sqlx::query(&sql)
            .bind(term)
            .bind(top_k as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| SourceError::Lookup {
                term: term.to_string(),
                reason: e.to_string(),
            })?;

        let mut candidates = Vec::with_capacity(rows.len());
        for row in rows {
            let value: String = row
                .try_get(0)
                .map_err(|e| SourceError::MalformedRow(e.to_string()))?;
            let score: f32 = row
                .try_get(1)
                .map_err(|e| SourceError::MalformedRow(e.to_string()))?;
            candidates.push(Candidate::new(value, score));
        }
        Ok(candidates)
    }

    async fn ready(&self) -> Result<(), SourceError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| SourceError::Unavailable(e.to_string()))
    }
}
