use thiserror::Error;

/// Failures surfaced to callers of the aggregator and the supply lookup.
///
/// Upstream errors are folded into `UpstreamFailure` at the boundary; the
/// original cause is logged, never returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AggregateError {
    #[error("Unsupported chain: {0}")]
    UnsupportedChain(String),
    #[error("Token not found")]
    TokenNotFound,
    #[error("Error fetching {0}")]
    UpstreamFailure(&'static str),
}

impl AggregateError {
    pub fn status_code(&self) -> u16 {
        match self {
            AggregateError::UnsupportedChain(_) => 400,
            AggregateError::TokenNotFound => 404,
            AggregateError::UpstreamFailure(_) => 500,
        }
    }

    /// Message placed in the `{ "error": ... }` response body.
    pub fn public_message(&self) -> String {
        match self {
            AggregateError::UnsupportedChain(_) => "Unsupported chain".to_string(),
            other => other.to_string(),
        }
    }
}
