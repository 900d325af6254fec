use serde::Deserialize;
use serde::Serialize;

use crate::constants::POLL_INTERVAL_SECS;
use crate::model::Network;
use crate::model::token::default_selection;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PollerConfig {
    pub interval_secs: u64,
    pub network: Network,
    // Empty watches the native token
    pub contract: String,
}

impl Default for PollerConfig {
    fn default() -> Self {
        let (network, contract) = default_selection();
        Self {
            interval_secs: POLL_INTERVAL_SECS,
            network,
            contract: contract.to_string(),
        }
    }
}
