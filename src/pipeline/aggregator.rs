use std::collections::HashSet;
use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;
use tracing::debug;
use tracing::error;
use tracing::info;
use tracing::warn;

use crate::config::AggregatorConfig;
use crate::error::AggregateError;
use crate::model::ChainFamily;
use crate::model::Network;
use crate::model::NormalizedTransfer;
use crate::model::RawTransfer;
use crate::upstream::TokenDataSource;
use crate::upstream::TransferQuery;

/// Result of one aggregate call: transfers in upstream order plus the new
/// cursor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aggregation {
    pub transfers: Vec<NormalizedTransfer>,
    pub last_block: u64,
}

/// Pages transfers out of a [`TokenDataSource`] and normalizes them.
/// Holds no state between calls; cursor and seen set belong to the caller.
#[derive(Clone)]
pub struct TransferAggregator {
    source: Arc<dyn TokenDataSource>,
    config: AggregatorConfig,
}

impl TransferAggregator {
    pub fn new(
        source: Arc<dyn TokenDataSource>,
        config: AggregatorConfig,
    ) -> Self {
        Self { source, config }
    }

    /// Resolves `network` and aggregates. Unknown networks fail before any
    /// upstream request is made.
    pub async fn aggregate(
        &self,
        network: &str,
        contract: Option<&str>,
        last_block: Option<u64>,
    ) -> Result<Aggregation, AggregateError> {
        let network: Network = network.parse().inspect_err(|e| warn!("aggregate::rejected::{}", e))?;
        self.aggregate_network(network, contract, last_block).await
    }

    pub async fn aggregate_network(
        &self,
        network: Network,
        contract: Option<&str>,
        last_block: Option<u64>,
    ) -> Result<Aggregation, AggregateError> {
        let token = contract.map(str::trim).filter(|c| !c.is_empty());

        let records = self.fetch_pages(network, token, last_block).await.map_err(|e| {
            error!("aggregate::upstream_failure::{}::{:#}", network, e);
            AggregateError::UpstreamFailure("transfers")
        })?;
        let fetched = records.len();

        let transfers = normalize_records(network.family(), token.is_none(), records);
        let last_block = advance_cursor(last_block, &transfers);

        info!(
            "aggregate::{}::fetched::{}::kept::{}::last_block::{}",
            network,
            fetched,
            transfers.len(),
            last_block
        );
        Ok(Aggregation { transfers, last_block })
    }

    /// Requests pages one after another until a short page, the record cap
    /// or the page cap. Any failed page fails the whole call.
    async fn fetch_pages(
        &self,
        network: Network,
        token: Option<&str>,
        last_block: Option<u64>,
    ) -> crate::Result<Vec<RawTransfer>> {
        let AggregatorConfig { page_size, max_pages, max_records } = self.config;
        let mut records: Vec<RawTransfer> = Vec::new();

        for page in 1..=max_pages {
            let query = TransferQuery {
                network,
                token: token.map(str::to_string),
                limit: page_size,
                start_block: last_block.filter(|b| *b > 0),
                page,
            };
            let batch = self.source.get_transfers(&query).await?;
            let batch_len = batch.len();
            records.extend(batch);
            debug!("aggregate::page::{}::records::{}::total::{}", page, batch_len, records.len());

            if batch_len < page_size || records.len() >= max_records {
                break;
            }
        }

        records.truncate(max_records);
        Ok(records)
    }
}

/// Native filter, value filter, in-call dedup and mapping, in that order.
/// `native_only` keeps just the records moving the family's native token.
pub fn normalize_records(
    family: ChainFamily,
    native_only: bool,
    records: Vec<RawTransfer>,
) -> Vec<NormalizedTransfer> {
    let mut ids = HashSet::new();
    records
        .into_iter()
        .filter(|r| !native_only || r.token().is_some_and(|t| family.is_native(t)))
        .filter_map(|r| {
            let normalized = r.normalize();
            if normalized.is_none() {
                debug!("aggregate::dropped_record::value::{:?}", r.value());
            }
            normalized
        })
        .filter(|t| ids.insert(t.id.clone()))
        .collect()
}

/// Highest block seen, never below the incoming cursor.
pub fn advance_cursor(
    last_block: Option<u64>,
    transfers: &[NormalizedTransfer],
) -> u64 {
    let previous = last_block.unwrap_or(0);
    transfers.iter().map(|t| t.block_number).max().map_or(previous, |max| max.max(previous))
}
