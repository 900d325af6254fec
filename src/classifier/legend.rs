use serde::Serialize;

use crate::model::Tier;

/// One line of the tier legend: the value range that lands in `tier` for a
/// given supply.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendRow {
    pub tier: Tier,
    pub label: &'static str,
    pub min_value: f64,
    pub max_value: Option<f64>,
    pub range: String,
}

pub fn legend(supply: f64) -> Vec<LegendRow> {
    Tier::ALL
        .into_iter()
        .map(|tier| {
            let min_value = tier.lower_bound() * supply;
            let max_value = tier.upper_bound().is_finite().then(|| tier.upper_bound() * supply);
            let range = format!(
                "{} - {}",
                format_threshold(min_value),
                max_value.map_or_else(|| "∞".to_string(), format_threshold)
            );
            LegendRow { tier, label: tier.label(), min_value, max_value, range }
        })
        .collect()
}

/// Compact amount for a fish banner: `1.2M`, `3.4K`, `12.00`, `0.0123`.
pub fn format_amount(value: &str) -> String {
    let num = match value.trim().parse::<f64>() {
        Ok(n) if !n.is_nan() => n,
        _ => return "0".to_string(),
    };
    if num >= 1_000_000.0 {
        format!("{:.1}M", num / 1_000_000.0)
    } else if num >= 1_000.0 {
        format!("{:.1}K", num / 1_000.0)
    } else if num >= 1.0 {
        format!("{:.2}", num)
    } else {
        to_precision(num, 3)
    }
}

/// Legend bound: two decimals for K/M, four under 1, exponent under 0.01.
pub fn format_threshold(value: f64) -> String {
    if !value.is_finite() {
        return "∞".to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    if value >= 1_000_000.0 {
        format!("{:.2}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("{:.2}K", value / 1_000.0)
    } else if value >= 1.0 {
        format!("{:.2}", value)
    } else if value >= 0.01 {
        format!("{:.4}", value)
    } else {
        format!("{:.2e}", value)
    }
}

/// `digits` significant digits, switching to exponent form for tiny values.
fn to_precision(
    value: f64,
    digits: usize,
) -> String {
    if value == 0.0 {
        return format!("{:.*}", digits - 1, 0.0);
    }
    let exponent = value.abs().log10().floor() as i32;
    if exponent < -6 {
        return format!("{:.*e}", digits - 1, value);
    }
    let decimals = (digits as i32 - 1 - exponent).max(0) as usize;
    format!("{:.*}", decimals, value)
}
