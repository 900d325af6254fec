use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use async_trait::async_trait;

use super::fixtures::TestFixtures;
use crate::Result;
use crate::model::RawTransfer;
use crate::model::TokenMetadata;
use crate::upstream::MetadataQuery;
use crate::upstream::TokenDataSource;
use crate::upstream::TransferQuery;

/// Upstream that replays fixed pages and counts requests. Pages
/// past the script come back empty.
#[derive(Clone, Default)]
pub struct ScriptedSource {
    pages: Arc<Vec<Vec<RawTransfer>>>,
    supply: Option<f64>,
    calls: Arc<AtomicUsize>,
    metadata_calls: Arc<AtomicUsize>,
}

impl ScriptedSource {
    pub fn new(pages: Vec<Vec<RawTransfer>>) -> Self {
        Self { pages: Arc::new(pages), ..Default::default() }
    }

    /// Pages of valid EVM records with the given sizes; record `i` overall
    /// sits in block `first_block + i`
    pub fn evm_pages(
        sizes: &[usize],
        first_block: u64,
    ) -> Self {
        let mut start = 0;
        let pages = sizes
            .iter()
            .map(|&size| {
                let page = TestFixtures::evm_page(start, size, first_block);
                start += size;
                page
            })
            .collect();
        Self::new(pages)
    }

    /// Pages of (value, block) pairs, values may be zero or negative
    pub fn from_values(pages: Vec<Vec<(i64, u64)>>) -> Self {
        let mut n = 0;
        let pages = pages
            .into_iter()
            .map(|page| {
                page.into_iter()
                    .map(|(value, block)| {
                        n += 1;
                        TestFixtures::evm_transfer(n, &value.to_string(), block)
                    })
                    .collect()
            })
            .collect();
        Self::new(pages)
    }

    pub fn with_supply(
        mut self,
        supply: f64,
    ) -> Self {
        self.supply = Some(supply);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn metadata_calls(&self) -> usize {
        self.metadata_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenDataSource for ScriptedSource {
    async fn get_transfers(
        &self,
        query: &TransferQuery,
    ) -> Result<Vec<RawTransfer>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let index = query.page.saturating_sub(1) as usize;
        Ok(self.pages.get(index).cloned().unwrap_or_default())
    }

    async fn get_token_metadata(
        &self,
        _query: &MetadataQuery,
    ) -> Result<Vec<TokenMetadata>> {
        self.metadata_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .supply
            .map(|total_supply| vec![TokenMetadata { total_supply: Some(total_supply), ..Default::default() }])
            .unwrap_or_default())
    }
}
