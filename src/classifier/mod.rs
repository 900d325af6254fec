pub mod legend;

use serde::Serialize;

use crate::constants::FALLBACK_SUPPLY_RATIO;
use crate::constants::SUPPLY_MODIFIER;
use crate::constants::VALUE_BOOST_CAP;
use crate::constants::VALUE_BOOST_MAX;
use crate::model::tier::FrameDimensions;
use crate::model::Tier;

pub use legend::LegendRow;
pub use legend::format_amount;
pub use legend::format_threshold;
pub use legend::legend;

/// value / supply, with `FALLBACK_SUPPLY_RATIO` standing in when the ratio
/// is not finite (zero supply, NaN value).
pub fn supply_ratio(
    value: f64,
    supply: f64,
) -> f64 {
    let pct = value / supply;
    if pct.is_finite() { pct } else { FALLBACK_SUPPLY_RATIO }
}

/// First tier whose upper bound exceeds the value/supply ratio.
pub fn classify(
    value: f64,
    supply: f64,
) -> Tier {
    let pct = supply_ratio(value, supply);
    Tier::ALL
        .into_iter()
        .find(|tier| pct < tier.upper_bound())
        .unwrap_or(Tier::Whale)
}

/// Supply the aquarium actually classifies against.
pub fn effective_supply(supply: f64) -> f64 {
    supply / SUPPLY_MODIFIER
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualParams {
    pub tier: Tier,
    pub value_boost: f64,
    pub scale: f64,
    pub tier_factor: f64,
    pub banner_offset: u32,
    pub frame: FrameDimensions,
}

/// In-tier growth: 0 at a ratio of 0, `VALUE_BOOST_MAX` from
/// `VALUE_BOOST_CAP` upwards, linear in between. Infinite ratios clamp like
/// any other out-of-range ratio; only NaN takes the fallback ratio.
pub fn value_boost(
    value: f64,
    supply: f64,
) -> f64 {
    let pct = value / supply;
    let pct = if pct.is_nan() { FALLBACK_SUPPLY_RATIO } else { pct };
    pct.clamp(0.0, VALUE_BOOST_CAP) / VALUE_BOOST_CAP * VALUE_BOOST_MAX
}

pub fn visual_params(
    value: f64,
    supply: f64,
    tier: Tier,
) -> VisualParams {
    let value_boost = value_boost(value, supply);
    VisualParams {
        tier,
        value_boost,
        scale: tier.base_scale() * (1.0 + value_boost),
        tier_factor: tier.speed_factor(),
        banner_offset: tier.banner_offset(),
        frame: tier.frame(),
    }
}

/// `classify` and `visual_params` in one call.
pub fn classify_with_params(
    value: f64,
    supply: f64,
) -> VisualParams {
    visual_params(value, supply, classify(value, supply))
}
