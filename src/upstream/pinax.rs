use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use tracing::error;
use tracing::warn;
use url::Url;

use super::MetadataQuery;
use super::TokenDataSource;
use super::TransferQuery;
use crate::Result;
use crate::config::TokenApiConfig;
use crate::err_with_loc;
use crate::error::UpstreamError;
use crate::model::ChainFamily;
use crate::model::RawTransfer;
use crate::model::TokenMetadata;
use crate::model::transfer::EvmTransfer;
use crate::model::transfer::SvmTransfer;
use crate::utils::calculate_backoff_with_jitter;

#[derive(Debug, Deserialize)]
struct DataEnvelope {
    #[serde(default)]
    data: Vec<Value>,
}

/// Decodes rows one by one. A row that does not fit `T` becomes
/// `T::default()`, which has no value and is dropped by the aggregator, so
/// page lengths still reflect what the upstream sent.
fn decode_rows<T: DeserializeOwned + Default>(
    endpoint: &str,
    rows: Vec<Value>,
) -> Vec<T> {
    rows.into_iter()
        .map(|row| {
            serde_json::from_value::<T>(row).unwrap_or_else(|e| {
                debug!("token_api::dropped_row::{}::{}", endpoint, e);
                T::default()
            })
        })
        .collect()
}

/// HTTP client for the Pinax Token API.
#[derive(Debug, Clone)]
pub struct PinaxClient {
    http_client: Client,
    base_url: Url,
    api_key: Option<String>,
    max_retries: usize,
    base_retry_delay_ms: u64,
    max_retry_delay_ms: u64,
}

impl PinaxClient {
    pub fn new(config: &TokenApiConfig) -> Result<Self> {
        // join() replaces the last path segment unless the base ends with '/'
        let mut raw = config.base_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let base_url = Url::parse(&raw).map_err(|e| err_with_loc!(UpstreamError::UrlError(e)))?;

        let http_client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| err_with_loc!(UpstreamError::RequestError(e)))?;

        Ok(Self {
            http_client,
            base_url,
            api_key: config.api_key.clone().filter(|k| !k.trim().is_empty()),
            max_retries: config.max_retries,
            base_retry_delay_ms: config.base_retry_delay_ms,
            max_retry_delay_ms: config.max_retry_delay_ms,
        })
    }

    pub fn transfers_url(
        &self,
        query: &TransferQuery,
    ) -> std::result::Result<Url, UpstreamError> {
        let family = query.family();
        let mut url = self.base_url.join(&format!("v1/{}/transfers", family))?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("network", query.network.id());
            if let Some(token) = query.token.as_deref().filter(|t| !t.is_empty()) {
                pairs.append_pair(family.filter_param(), token);
            }
            pairs.append_pair("limit", &query.limit.to_string());
            pairs.append_pair("page", &query.page.to_string());
            if let Some(start_block) = query.start_block {
                pairs.append_pair("start_block", &start_block.to_string());
            }
        }
        Ok(url)
    }

    pub fn metadata_url(
        &self,
        query: &MetadataQuery,
    ) -> std::result::Result<Url, UpstreamError> {
        let family = query.family();
        let mut url = self.base_url.join(&format!("v1/{}/tokens", family))?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("network", query.network.id());
            if let Some(token) = query.token.as_deref().filter(|t| !t.is_empty()) {
                pairs.append_pair(family.filter_param(), token);
            }
            pairs.append_pair("limit", &query.limit.to_string());
        }
        Ok(url)
    }

    async fn fetch_once<T: DeserializeOwned>(
        &self,
        url: &Url,
    ) -> std::result::Result<T, UpstreamError> {
        let mut request = self.http_client.get(url.clone());
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read response text>".to_string());
            return Err(UpstreamError::StatusError { status: status.as_u16(), body });
        }

        response.json::<T>().await.map_err(|e| UpstreamError::DecodeError(e.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
    ) -> Result<T> {
        let mut attempt = 0;
        loop {
            match self.fetch_once::<T>(&url).await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() && attempt < self.max_retries => {
                    let delay = calculate_backoff_with_jitter(attempt, self.base_retry_delay_ms, self.max_retry_delay_ms);
                    warn!(
                        "token_api::retrying::{}::attempt::{}::delay_ms::{}::{}",
                        url.path(),
                        attempt + 1,
                        delay.as_millis(),
                        e
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                },
                Err(e) => {
                    error!("token_api::request_failed::{}::{}", url.path(), e);
                    return Err(err_with_loc!(e));
                },
            }
        }
    }
}

#[async_trait]
impl TokenDataSource for PinaxClient {
    async fn get_transfers(
        &self,
        query: &TransferQuery,
    ) -> Result<Vec<RawTransfer>> {
        let url = self.transfers_url(query).map_err(|e| err_with_loc!(e))?;
        debug!("token_api::get_transfers::{}::page::{}", query.network, query.page);

        let rows = self.get_json::<DataEnvelope>(url).await?.data;
        let records = match query.family() {
            ChainFamily::Evm => decode_rows::<EvmTransfer>("transfers", rows).into_iter().map(RawTransfer::Evm).collect(),
            ChainFamily::Tvm => decode_rows::<EvmTransfer>("transfers", rows).into_iter().map(RawTransfer::Tvm).collect(),
            ChainFamily::Svm => decode_rows::<SvmTransfer>("transfers", rows).into_iter().map(RawTransfer::Svm).collect(),
        };
        Ok(records)
    }

    async fn get_token_metadata(
        &self,
        query: &MetadataQuery,
    ) -> Result<Vec<TokenMetadata>> {
        let url = self.metadata_url(query).map_err(|e| err_with_loc!(e))?;
        debug!("token_api::get_token_metadata::{}", query.network);
        let rows = self.get_json::<DataEnvelope>(url).await?.data;
        Ok(decode_rows::<TokenMetadata>("tokens", rows))
    }
}
