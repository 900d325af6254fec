use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;

use crate::model::chain::Network;

/// A token contract offered in the network menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KnownToken {
    pub symbol: &'static str,
    pub contract: &'static str,
}

const fn token(
    symbol: &'static str,
    contract: &'static str,
) -> KnownToken {
    KnownToken { symbol, contract }
}

const ETHEREUM_TOKENS: &[KnownToken] = &[
    token("USDT", "0xdAC17F958D2ee523a2206206994597C13D831ec7"),
    token("USDC", "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48"),
    token("DAI", "0x6B175474E89094C44Da98b954EedeAC495271d0F"),
];

const BASE_TOKENS: &[KnownToken] = &[
    token("USDT", "0xfde4C96c8593536E31F229EA8f37b2ADa2699bb2"),
    token("USDC", "0x833589fcd6edb6e08f4c7c32d4f71b54bda02913"),
];

const SOLANA_TOKENS: &[KnownToken] = &[token("USDT", "Es9vMFrzaCERmJfrF4H2FYD4KCoNkY11McCe8BenwNYB")];

const TRON_TOKENS: &[KnownToken] = &[token("USDT", "TR7NHqjeKQxGTCi8q8ZY4pL8otSzgjLj6t")];

const ARBITRUM_TOKENS: &[KnownToken] = &[
    token("USD₮0", "0xfd086bc7cd5c481dcc9c85ebe478a1c0b69fcbb9"),
    token("USDC", "0xaf88d065e77c8cc2239327c5edb3a432268e5831"),
    token("USDC.e", "0xff970a61a04b1ca14834a43f5de4533ebddb5cc8"),
];

const POLYGON_TOKENS: &[KnownToken] = &[
    token("USD₮0", "0xc2132d05d31c914a87c6611c10748aeb04b58e8f"),
    token("USDC", "0x3c499c542cEF5E3811e1192ce70d8cC03d5c3359"),
    token("USDC.e", "0x2791bca1f2de4661ed88a30c99a7a9449aa84174"),
];

const AVALANCHE_TOKENS: &[KnownToken] = &[
    token("USDT", "0x9702230A8Ea53601f5cD2dc00fDBc13d4dF4A8c7"),
    token("USDC", "0xB97EF9Ef8734C71904D8002F8b6Bc66Dd9c48a6E"),
    token("USDC.e", "0xA7D7079b0FEaD91F3e65f86E8915Cb59c1a4C664"),
];

const UNICHAIN_TOKENS: &[KnownToken] = &[
    token("USD₮0", "0x9151434b16b9763660705744891fA906F660EcC5"),
    token("USDC", "0x078D782b760474a361dDA0AF3839290b0EF57AD6"),
];

const OPTIMISM_TOKENS: &[KnownToken] = &[
    token("USDT", "0x94b008aa00579c1307b0ef2c499ad98a8ce58e58"),
    token("USDC", "0x0b2c639c533813f4aa9d7837caf62653d097ff85"),
];

const BSC_TOKENS: &[KnownToken] = &[
    token("BSC-USD", "0x55d398326f99059ff775485246999027b3197955"),
    token("USDC", "0x8ac76a51cc950d9822d68b83fe1ad97b32cd580d"),
];

pub fn known_tokens(network: Network) -> &'static [KnownToken] {
    match network {
        Network::Ethereum => ETHEREUM_TOKENS,
        Network::Base => BASE_TOKENS,
        Network::Solana => SOLANA_TOKENS,
        Network::Tron => TRON_TOKENS,
        Network::ArbitrumOne => ARBITRUM_TOKENS,
        Network::Polygon => POLYGON_TOKENS,
        Network::Avalanche => AVALANCHE_TOKENS,
        Network::Unichain => UNICHAIN_TOKENS,
        Network::Optimism => OPTIMISM_TOKENS,
        Network::Bsc => BSC_TOKENS,
    }
}

/// Selection shown when the aquarium first opens.
pub fn default_selection() -> (Network, &'static str) {
    (Network::Ethereum, ETHEREUM_TOKENS[0].contract)
}

/// Row returned by the upstream token metadata endpoint. Only the supply is
/// consumed; the rest is kept for logging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenMetadata {
    #[serde(default)]
    pub contract: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub decimals: Option<u8>,
    #[serde(default, deserialize_with = "deserialize_lenient_number")]
    pub total_supply: Option<f64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

/// Accepts `123.4`, `"123.4"` or null. Unparseable text becomes `None`.
pub(crate) fn deserialize_lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<NumberOrString>::deserialize(deserializer)?;
    Ok(match raw {
        Some(NumberOrString::Number(n)) => Some(n),
        Some(NumberOrString::Text(s)) => s.trim().parse::<f64>().ok(),
        None => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_network_has_tokens() {
        for network in Network::ALL {
            assert!(!network.known_tokens().is_empty(), "{network} has no known tokens");
        }
    }

    #[test]
    fn symbols_resolve_per_network() {
        assert_eq!(Network::Ethereum.resolve_token("usdt"), "0xdAC17F958D2ee523a2206206994597C13D831ec7");
        assert_eq!(Network::Tron.resolve_token(" USDT "), "TR7NHqjeKQxGTCi8q8ZY4pL8otSzgjLj6t");
        assert_eq!(Network::Solana.resolve_token("USDT"), "Es9vMFrzaCERmJfrF4H2FYD4KCoNkY11McCe8BenwNYB");
        // Unknown symbols and raw addresses pass through
        assert_eq!(Network::Bsc.resolve_token("0xabc"), "0xabc");
        assert_eq!(Network::Bsc.resolve_token(""), "");
    }

    #[test]
    fn default_selection_is_ethereum_usdt() {
        let (network, contract) = default_selection();
        assert_eq!(network, Network::Ethereum);
        assert_eq!(contract, "0xdAC17F958D2ee523a2206206994597C13D831ec7");
    }

    #[test]
    fn total_supply_accepts_string_and_number() {
        let from_text: TokenMetadata = serde_json::from_str(r#"{"total_supply":"1500.5"}"#).unwrap();
        assert_eq!(from_text.total_supply, Some(1500.5));

        let from_number: TokenMetadata = serde_json::from_str(r#"{"total_supply":42}"#).unwrap();
        assert_eq!(from_number.total_supply, Some(42.0));

        let garbage: TokenMetadata = serde_json::from_str(r#"{"total_supply":"n/a"}"#).unwrap();
        assert_eq!(garbage.total_supply, None);

        let missing: TokenMetadata = serde_json::from_str(r#"{"symbol":"USDT"}"#).unwrap();
        assert_eq!(missing.total_supply, None);
    }
}
