use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde_json::Value;

/// Transfer row as the upstream reports it for EVM networks. TVM networks
/// use the same shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvmTransfer {
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: String,
    #[serde(default, deserialize_with = "deserialize_decimal")]
    pub value: Option<String>,
    #[serde(default, deserialize_with = "deserialize_block_field")]
    pub log_index: u64,
    #[serde(default)]
    pub transaction_id: String,
    #[serde(default, deserialize_with = "deserialize_block_field")]
    pub block_num: u64,
    #[serde(default)]
    pub contract: Option<String>,
}

/// Transfer row as the upstream reports it for SVM networks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SvmTransfer {
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub destination: String,
    #[serde(default, deserialize_with = "deserialize_decimal")]
    pub value: Option<String>,
    #[serde(default, deserialize_with = "deserialize_block_field")]
    pub block_num: u64,
    #[serde(default)]
    pub signature: String,
    #[serde(default)]
    pub mint: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RawTransfer {
    Evm(EvmTransfer),
    Svm(SvmTransfer),
    Tvm(EvmTransfer),
}

impl RawTransfer {
    /// Contract (EVM/TVM) or mint (SVM) the transfer moved.
    pub fn token(&self) -> Option<&str> {
        match self {
            RawTransfer::Evm(t) | RawTransfer::Tvm(t) => t.contract.as_deref(),
            RawTransfer::Svm(t) => t.mint.as_deref(),
        }
    }

    /// Value with surrounding whitespace removed.
    pub fn value(&self) -> Option<&str> {
        match self {
            RawTransfer::Evm(t) | RawTransfer::Tvm(t) => t.value.as_deref().map(str::trim),
            RawTransfer::Svm(t) => t.value.as_deref().map(str::trim),
        }
    }

    /// Value as a number when it is present, finite and strictly positive.
    pub fn positive_value(&self) -> Option<f64> {
        let value = self.value()?.parse::<f64>().ok()?;
        (value.is_finite() && value > 0.0).then_some(value)
    }

    /// Stable identity built only from the record's own fields, so the same
    /// transfer seen on two polls yields the same id.
    pub fn id(&self) -> String {
        let value = self.value().unwrap_or_default();
        match self {
            RawTransfer::Evm(t) | RawTransfer::Tvm(t) => format!(
                "{}{}{}{}{}",
                t.from,
                t.to,
                value,
                t.log_index,
                t.transaction_id
            ),
            RawTransfer::Svm(t) => format!(
                "{}{}{}{}{}",
                t.source,
                t.destination,
                value,
                t.block_num,
                t.signature
            ),
        }
    }

    /// Maps the record into the common shape. Records without a usable
    /// positive value are not rendered and map to `None`.
    pub fn normalize(&self) -> Option<NormalizedTransfer> {
        self.positive_value()?;
        let value = self.value()?.to_string();
        let id = self.id();
        Some(match self {
            RawTransfer::Evm(t) | RawTransfer::Tvm(t) => NormalizedTransfer {
                id,
                txid: t.transaction_id.clone(),
                block_number: t.block_num,
                from: t.from.clone(),
                to: t.to.clone(),
                value,
            },
            RawTransfer::Svm(t) => NormalizedTransfer {
                id,
                txid: t.signature.clone(),
                block_number: t.block_num,
                from: t.source.clone(),
                to: t.destination.clone(),
                value,
            },
        })
    }
}

/// Chain-independent transfer handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedTransfer {
    pub id: String,
    pub txid: String,
    pub block_number: u64,
    pub from: String,
    pub to: String,
    pub value: String,
}

impl NormalizedTransfer {
    pub fn numeric_value(&self) -> f64 {
        self.value.parse::<f64>().unwrap_or(0.0)
    }
}

/// Upstream sends values as decimal strings or plain JSON numbers depending
/// on the endpoint version; keep the textual form either way. Any other JSON
/// type becomes `None` and the record is dropped later by the value filter.
fn deserialize_decimal<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Block numbers and log indexes: integers, integer strings, or null (0).
fn deserialize_block_field<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64().unwrap_or_default(),
        Value::String(s) => s.trim().parse().unwrap_or_default(),
        _ => 0,
    })
}
