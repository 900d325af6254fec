use rand::Rng;
use serde::Serialize;

use crate::classifier::VisualParams;
use crate::classifier::classify_with_params;
use crate::classifier::format_amount;
use crate::constants::ENTRANCE_DELAY_DIVISOR;
use crate::constants::SPRITE_ANIMATION_DURATION;
use crate::constants::SPRITE_BASE_SIZE;
use crate::constants::SPRITE_FRAME_COUNT;
use crate::model::NormalizedTransfer;
use crate::model::Tier;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    LeftToRight,
    RightToLeft,
}

/// Per-fish random draws. Kept apart from the transfer so a render plan is
/// reproducible from (transfer, supply, traits).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FishTraits {
    /// Vertical lane, percent of the tank height
    pub lane: f64,
    pub swim_factor: f64,
    pub frame_offset: u32,
    /// Hue rotation in degrees, 0 keeps the sprite colors
    pub hue: u32,
    pub entrance_factor: f64,
    pub direction: Direction,
}

impl FishTraits {
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let hue = if rng.random_bool(0.5) { rng.random_range(0..360) } else { 0 };
        let direction = if rng.random_bool(0.5) { Direction::LeftToRight } else { Direction::RightToLeft };
        Self {
            lane: 5.0 + rng.random::<f64>() * 65.0,
            swim_factor: rng.random::<f64>(),
            frame_offset: rng.random_range(0..SPRITE_FRAME_COUNT),
            hue,
            entrance_factor: rng.random::<f64>(),
            direction,
        }
    }
}

/// Swim window derived from the poll interval so a fish is still on screen
/// when the next batch arrives.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwimWindow {
    pub min_secs: f64,
    pub max_secs: f64,
}

impl SwimWindow {
    pub fn for_poll_interval(poll_secs: f64) -> Self {
        Self { min_secs: poll_secs * 1.5, max_secs: poll_secs * 3.0 }
    }
}

/// Everything a renderer needs to draw one transfer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Fish {
    pub transfer: NormalizedTransfer,
    pub traits: FishTraits,
    pub visual: VisualParams,
    /// Vertical position, percent of the tank height
    pub top: f64,
    pub swim_secs: f64,
    pub entrance_delay_secs: f64,
    pub sprite_cycle_secs: f64,
    pub image_width: u32,
    pub image_height: u32,
    pub banner: Option<String>,
}

impl Fish {
    pub fn spawn(
        transfer: NormalizedTransfer,
        supply: f64,
        window: SwimWindow,
        traits: FishTraits,
    ) -> Self {
        let visual = classify_with_params(transfer.numeric_value(), supply);
        let tier = visual.tier;

        let top = if tier == Tier::BottomFeeder { 95.0 } else { traits.lane + 5.0 };
        let swim_secs =
            (window.min_secs + traits.swim_factor * (window.max_secs - window.min_secs)) * visual.tier_factor;
        let entrance_delay_secs = traits.entrance_factor * (window.max_secs / ENTRANCE_DELAY_DIVISOR);
        let sprite_cycle_secs = if window.min_secs > 0.0 {
            SPRITE_ANIMATION_DURATION * (swim_secs / window.min_secs)
        } else {
            SPRITE_ANIMATION_DURATION
        };

        let image_height = (SPRITE_BASE_SIZE * visual.scale).round();
        let image_width = (image_height * visual.frame.aspect_ratio()).round();
        let banner = tier.shows_banner().then(|| format_amount(&transfer.value));

        Self {
            transfer,
            traits,
            visual,
            top,
            swim_secs,
            entrance_delay_secs,
            sprite_cycle_secs,
            image_width: image_width as u32,
            image_height: image_height as u32,
            banner,
        }
    }

    pub fn tier(&self) -> Tier {
        self.visual.tier
    }
}
