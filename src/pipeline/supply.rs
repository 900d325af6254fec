use std::sync::Arc;

use tracing::error;
use tracing::info;
use tracing::warn;

use crate::constants::METADATA_LIMIT;
use crate::constants::SVM_TOKEN_SUPPLY;
use crate::error::AggregateError;
use crate::model::ChainFamily;
use crate::model::Network;
use crate::upstream::MetadataQuery;
use crate::upstream::TokenDataSource;

/// Total supply for the selected token, the denominator of every tier.
#[derive(Clone)]
pub struct SupplyLookup {
    source: Arc<dyn TokenDataSource>,
}

impl SupplyLookup {
    pub fn new(source: Arc<dyn TokenDataSource>) -> Self {
        Self { source }
    }

    pub async fn lookup(
        &self,
        network: &str,
        contract: Option<&str>,
    ) -> Result<f64, AggregateError> {
        let network: Network = network.parse().inspect_err(|e| warn!("supply::rejected::{}", e))?;
        self.lookup_network(network, contract).await
    }

    pub async fn lookup_network(
        &self,
        network: Network,
        contract: Option<&str>,
    ) -> Result<f64, AggregateError> {
        let Some(token) = contract.map(str::trim).filter(|c| !c.is_empty()) else {
            // Upstream serves no native supply
            return Ok(network.native_supply());
        };

        if network.family() == ChainFamily::Svm {
            return Ok(SVM_TOKEN_SUPPLY);
        }

        let query = MetadataQuery { network, token: Some(token.to_string()), limit: METADATA_LIMIT };
        let rows = self.source.get_token_metadata(&query).await.map_err(|e| {
            error!("supply::upstream_failure::{}::{}::{:#}", network, token, e);
            AggregateError::UpstreamFailure("supply")
        })?;

        let supply = rows.first().and_then(|row| row.total_supply).ok_or_else(|| {
            warn!("supply::token_not_found::{}::{}", network, token);
            AggregateError::TokenNotFound
        })?;

        info!("supply::{}::{}::{}", network, token, supply);
        Ok(supply)
    }
}
