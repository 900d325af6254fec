pub mod pinax;

use async_trait::async_trait;

pub use pinax::PinaxClient;

use crate::Result;
use crate::model::ChainFamily;
use crate::model::Network;
use crate::model::RawTransfer;
use crate::model::TokenMetadata;

/// One page request against the transfers endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferQuery {
    pub network: Network,
    /// Contract (EVM/TVM) or mint (SVM); `None` asks for every token
    pub token: Option<String>,
    pub limit: usize,
    /// Lower bound on block number, omitted on the first poll
    pub start_block: Option<u64>,
    /// 1-based
    pub page: u32,
}

impl TransferQuery {
    pub fn family(&self) -> ChainFamily {
        self.network.family()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataQuery {
    pub network: Network,
    pub token: Option<String>,
    pub limit: usize,
}

impl MetadataQuery {
    pub fn family(&self) -> ChainFamily {
        self.network.family()
    }
}

/// Source of raw token data. The production implementation is
/// [`PinaxClient`]; tests script their own.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenDataSource: Send + Sync {
    /// Records of one page, in upstream order, already shaped for the
    /// query's chain family.
    async fn get_transfers(
        &self,
        query: &TransferQuery,
    ) -> Result<Vec<RawTransfer>>;

    async fn get_token_metadata(
        &self,
        query: &MetadataQuery,
    ) -> Result<Vec<TokenMetadata>>;
}
