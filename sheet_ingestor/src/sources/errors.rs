use thiserror::Error;

/// Errors that can occur while fetching a snapshot from a source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The request itself failed (network failure, bounded timeout).
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend answered with a non-success HTTP status.
    #[error("source returned status {status}: {body}")]
    Status {
        /// HTTP status code of the response.
        status: u16,
        /// Response body, best effort, for the log line.
        body: String,
    },

    /// The payload could not be decoded as CSV.
    #[error("malformed CSV payload")]
    Csv(#[from] csv::Error),

    /// No rows survived filtering; the cycle carries no data.
    #[error("no data after filtering")]
    Empty,
}

/// Errors that can occur while constructing a source.
#[derive(Debug, Error)]
pub enum SourceInitError {
    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    /// The configured sheet id or range is unusable.
    #[error("invalid source configuration: {0}")]
    Config(String),
}
