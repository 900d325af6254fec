use serde::Deserialize;
use serde::Serialize;

use crate::constants::TOKEN_API_URL;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenApiConfig {
    pub base_url: String,
    // Usually supplied through TOKEN_API_KEY rather than the file
    pub api_key: Option<String>,
    pub timeout_ms: u64,
    pub max_retries: usize,
    pub base_retry_delay_ms: u64,
    pub max_retry_delay_ms: u64,
}

impl Default for TokenApiConfig {
    fn default() -> Self {
        Self {
            base_url: TOKEN_API_URL.to_string(),
            api_key: None,
            timeout_ms: 10_000,
            max_retries: 2,
            base_retry_delay_ms: 250,
            max_retry_delay_ms: 4_000,
        }
    }
}
