use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// Discrete size class of a transfer, ordered from smallest to largest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Tier {
    BottomFeeder,
    Tiny,
    Small,
    Medium,
    Large,
    Huge,
    Whale,
}

/// Width and height of one sprite frame, in source pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FrameDimensions {
    pub width: u32,
    pub height: u32,
}

impl FrameDimensions {
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

impl Tier {
    pub const ALL: [Tier; 7] = [
        Tier::BottomFeeder,
        Tier::Tiny,
        Tier::Small,
        Tier::Medium,
        Tier::Large,
        Tier::Huge,
        Tier::Whale,
    ];

    /// Inclusive lower bound of the value/supply ratio.
    pub fn lower_bound(&self) -> f64 {
        match self {
            Tier::BottomFeeder => 0.0,
            Tier::Tiny => 0.000_000_01,
            Tier::Small => 0.000_000_1,
            Tier::Medium => 0.000_001,
            Tier::Large => 0.000_01,
            Tier::Huge => 0.000_1,
            Tier::Whale => 0.001,
        }
    }

    /// Exclusive upper bound of the value/supply ratio.
    pub fn upper_bound(&self) -> f64 {
        match self {
            Tier::BottomFeeder => 0.000_000_01,
            Tier::Tiny => 0.000_000_1,
            Tier::Small => 0.000_001,
            Tier::Medium => 0.000_01,
            Tier::Large => 0.000_1,
            Tier::Huge => 0.001,
            Tier::Whale => f64::INFINITY,
        }
    }

    pub fn base_scale(&self) -> f64 {
        match self {
            Tier::BottomFeeder | Tier::Tiny => 0.3,
            Tier::Small | Tier::Medium => 0.5,
            Tier::Large => 0.6,
            Tier::Huge => 1.1,
            Tier::Whale => 1.8,
        }
    }

    /// Multiplier on swim time. Below 1 swims faster.
    pub fn speed_factor(&self) -> f64 {
        match self {
            Tier::BottomFeeder => 0.8,
            Tier::Tiny | Tier::Small | Tier::Medium => 0.6,
            Tier::Large => 1.1,
            Tier::Huge => 1.3,
            Tier::Whale => 1.5,
        }
    }

    /// Pixels the value banner is lifted from the sprite's bottom edge.
    pub fn banner_offset(&self) -> u32 {
        match self {
            Tier::BottomFeeder => 0,
            Tier::Tiny => 23,
            Tier::Small => 32,
            Tier::Medium => 30,
            Tier::Large => 36,
            Tier::Huge => 60,
            Tier::Whale => 120,
        }
    }

    pub fn frame(&self) -> FrameDimensions {
        let (width, height) = match self {
            Tier::BottomFeeder => (324, 134),
            Tier::Tiny => (360, 148),
            Tier::Small => (502, 304),
            Tier::Medium => (528, 310),
            Tier::Large => (726, 332),
            Tier::Huge => (1192, 450),
            Tier::Whale => (1750, 728),
        };
        FrameDimensions { width, height }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::BottomFeeder => "bottomFeeder",
            Tier::Tiny => "tiny",
            Tier::Small => "small",
            Tier::Medium => "medium",
            Tier::Large => "large",
            Tier::Huge => "huge",
            Tier::Whale => "whale",
        }
    }

    /// Species shown in the legend.
    pub fn label(&self) -> &'static str {
        match self {
            Tier::BottomFeeder => "Shrimp",
            Tier::Tiny => "Chili Rasbora",
            Tier::Small => "Guppy",
            Tier::Medium => "Clownfish",
            Tier::Large => "Koi Carp",
            Tier::Huge => "Great White",
            Tier::Whale => "Blue Whale",
        }
    }

    /// Bottom feeders crawl along the floor and carry no value banner.
    pub fn shows_banner(&self) -> bool {
        *self != Tier::BottomFeeder
    }
}

impl fmt::Display for Tier {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
