use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::constants::EVM_NATIVE_CONTRACT;
use crate::constants::SVM_NATIVE_MINT;
use crate::constants::TVM_NATIVE_CONTRACT;
use crate::error::AggregateError;
use crate::model::token::KnownToken;
use crate::model::token::known_tokens;

/// Virtual machine family of a network. Decides the transfer record shape,
/// the filter parameter name and the id composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainFamily {
    Evm,
    Svm,
    Tvm,
}

impl ChainFamily {
    /// Path segment used by the upstream API
    pub fn as_str(&self) -> &'static str {
        match self {
            ChainFamily::Evm => "evm",
            ChainFamily::Svm => "svm",
            ChainFamily::Tvm => "tvm",
        }
    }

    /// Query parameter carrying the token filter
    pub fn filter_param(&self) -> &'static str {
        match self {
            ChainFamily::Svm => "mint",
            ChainFamily::Evm | ChainFamily::Tvm => "contract",
        }
    }

    pub fn native_sentinel(&self) -> &'static str {
        match self {
            ChainFamily::Evm => EVM_NATIVE_CONTRACT,
            ChainFamily::Svm => SVM_NATIVE_MINT,
            ChainFamily::Tvm => TVM_NATIVE_CONTRACT,
        }
    }

    /// Whether `token` is this family's native-token placeholder.
    /// EVM addresses are hex and compared without case, base58 ones exactly.
    pub fn is_native(
        &self,
        token: &str,
    ) -> bool {
        match self {
            ChainFamily::Evm => token.eq_ignore_ascii_case(EVM_NATIVE_CONTRACT),
            ChainFamily::Svm | ChainFamily::Tvm => token == self.native_sentinel(),
        }
    }
}

impl fmt::Display for ChainFamily {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Networks HydroScan can watch, keyed by their upstream network id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Network {
    #[serde(rename = "mainnet")]
    Ethereum,
    #[serde(rename = "unichain")]
    Unichain,
    #[serde(rename = "bsc")]
    Bsc,
    #[serde(rename = "matic")]
    Polygon,
    #[serde(rename = "base")]
    Base,
    #[serde(rename = "avalanche")]
    Avalanche,
    #[serde(rename = "arbitrum-one")]
    ArbitrumOne,
    #[serde(rename = "optimism")]
    Optimism,
    #[serde(rename = "solana")]
    Solana,
    #[serde(rename = "tron")]
    Tron,
}

impl Network {
    pub const ALL: [Network; 10] = [
        Network::Ethereum,
        Network::Unichain,
        Network::Bsc,
        Network::Polygon,
        Network::Base,
        Network::Avalanche,
        Network::ArbitrumOne,
        Network::Optimism,
        Network::Solana,
        Network::Tron,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Network::Ethereum => "mainnet",
            Network::Unichain => "unichain",
            Network::Bsc => "bsc",
            Network::Polygon => "matic",
            Network::Base => "base",
            Network::Avalanche => "avalanche",
            Network::ArbitrumOne => "arbitrum-one",
            Network::Optimism => "optimism",
            Network::Solana => "solana",
            Network::Tron => "tron",
        }
    }

    pub fn family(&self) -> ChainFamily {
        match self {
            Network::Solana => ChainFamily::Svm,
            Network::Tron => ChainFamily::Tvm,
            _ => ChainFamily::Evm,
        }
    }

    /// Circulating supply of the native token. The upstream has no native
    /// supply endpoint so these are maintained by hand.
    pub fn native_supply(&self) -> f64 {
        match self {
            Network::Ethereum | Network::Unichain => 120_000_000.0,
            Network::Bsc => 137_000_000.0,
            Network::Polygon => 10_540_000_000.0,
            Network::Base => 961_000_000_000.0,
            Network::Avalanche => 460_000_000.0,
            Network::ArbitrumOne => 10_000_000_000.0,
            Network::Optimism => 4_290_000_000.0,
            Network::Solana => 615_340_000.0,
            Network::Tron => 98_670_000_000.0,
        }
    }

    pub fn known_tokens(&self) -> &'static [KnownToken] {
        known_tokens(*self)
    }

    /// Contract for `input`: a known symbol on this network (any case) maps
    /// to its contract, anything else is taken as a contract or mint.
    pub fn resolve_token(
        &self,
        input: &str,
    ) -> String {
        let input = input.trim();
        self.known_tokens()
            .iter()
            .find(|t| t.symbol.eq_ignore_ascii_case(input))
            .map_or_else(|| input.to_string(), |t| t.contract.to_string())
    }
}

impl fmt::Display for Network {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Network {
    type Err = AggregateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Network::ALL
            .iter()
            .find(|n| n.id() == s)
            .copied()
            .ok_or_else(|| AggregateError::UnsupportedChain(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("mainnet", Network::Ethereum, ChainFamily::Evm)]
    #[case("matic", Network::Polygon, ChainFamily::Evm)]
    #[case("arbitrum-one", Network::ArbitrumOne, ChainFamily::Evm)]
    #[case("solana", Network::Solana, ChainFamily::Svm)]
    #[case("tron", Network::Tron, ChainFamily::Tvm)]
    fn parses_network_ids(
        #[case] id: &str,
        #[case] network: Network,
        #[case] family: ChainFamily,
    ) {
        let parsed: Network = id.parse().unwrap();
        assert_eq!(parsed, network);
        assert_eq!(parsed.family(), family);
        assert_eq!(parsed.to_string(), id);
    }

    #[rstest]
    #[case("xyz")]
    #[case("")]
    #[case("Mainnet")]
    fn rejects_unknown_networks(#[case] id: &str) {
        let err = id.parse::<Network>().unwrap_err();
        assert_eq!(err, AggregateError::UnsupportedChain(id.to_string()));
    }

    #[test]
    fn serde_uses_network_ids() {
        let json = serde_json::to_string(&Network::ArbitrumOne).unwrap();
        assert_eq!(json, "\"arbitrum-one\"");
        let back: Network = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Network::ArbitrumOne);
    }

    #[test]
    fn filter_param_depends_on_family() {
        assert_eq!(ChainFamily::Svm.filter_param(), "mint");
        assert_eq!(ChainFamily::Evm.filter_param(), "contract");
        assert_eq!(ChainFamily::Tvm.filter_param(), "contract");
    }

    #[test]
    fn evm_native_match_ignores_case() {
        assert!(ChainFamily::Evm.is_native("0xEEEEEEEEEEEEEEEEEEEEEEEEEEEEEEEEEEEEEEEE"));
        assert!(!ChainFamily::Evm.is_native("0xdAC17F958D2ee523a2206206994597C13D831ec7"));
        assert!(ChainFamily::Svm.is_native(SVM_NATIVE_MINT));
        assert!(!ChainFamily::Svm.is_native(&SVM_NATIVE_MINT.to_lowercase()));
    }

    #[test]
    fn every_network_has_positive_native_supply() {
        for network in Network::ALL {
            assert!(network.native_supply() > 0.0, "{network} has no native supply");
        }
    }
}
