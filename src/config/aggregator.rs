use serde::Deserialize;
use serde::Serialize;

use crate::constants::MAX_TRANSFER_PAGES;
use crate::constants::MAX_TRANSFER_RECORDS;
use crate::constants::TRANSFER_PAGE_SIZE;

/// Bounds on one aggregate call. Either bound stops paging.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AggregatorConfig {
    pub page_size: usize,
    pub max_pages: u32,
    pub max_records: usize,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            page_size: TRANSFER_PAGE_SIZE,
            max_pages: MAX_TRANSFER_PAGES,
            max_records: MAX_TRANSFER_RECORDS,
        }
    }
}
