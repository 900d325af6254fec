use thiserror::Error;

#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("[TokenApi] Failed to build request url: {0}")]
    UrlError(#[from] url::ParseError),
    #[error("[TokenApi] Request failed: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("[TokenApi] Unexpected status {status}: {body}")]
    StatusError { status: u16, body: String },
    #[error("[TokenApi] Failed to decode response: {0}")]
    DecodeError(String),
}

impl UpstreamError {
    /// Rate limits, timeouts and dropped connections are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            UpstreamError::RequestError(e) => e.is_timeout() || e.is_connect(),
            UpstreamError::StatusError { status, .. } => *status == 429 || *status >= 500,
            UpstreamError::UrlError(_) | UpstreamError::DecodeError(_) => false,
        }
    }
}
