//! Static ball catalog: one entry per level, fixed at compile time.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Immutable description of a ball tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallConfig {
    pub level: u8,
    pub radius: f32,
    /// sRGB components in 0..=1.
    pub color: [f32; 3],
    /// Asset path relative to the asset root.
    pub image: &'static str,
    pub score: u32,
}

/// All ten tiers, indexed by `level - 1`.
pub const BALL_CATALOG: [BallConfig; Level::COUNT] = [
    BallConfig { level: 1, radius: 16.0, color: [0.95, 0.33, 0.33], image: "balls/ball_01.png", score: 1 },
    BallConfig { level: 2, radius: 22.0, color: [0.98, 0.60, 0.25], image: "balls/ball_02.png", score: 3 },
    BallConfig { level: 3, radius: 29.0, color: [0.98, 0.85, 0.30], image: "balls/ball_03.png", score: 6 },
    BallConfig { level: 4, radius: 36.0, color: [0.55, 0.85, 0.35], image: "balls/ball_04.png", score: 10 },
    BallConfig { level: 5, radius: 44.0, color: [0.30, 0.80, 0.65], image: "balls/ball_05.png", score: 15 },
    BallConfig { level: 6, radius: 52.0, color: [0.30, 0.65, 0.95], image: "balls/ball_06.png", score: 21 },
    BallConfig { level: 7, radius: 61.0, color: [0.40, 0.45, 0.95], image: "balls/ball_07.png", score: 28 },
    BallConfig { level: 8, radius: 70.0, color: [0.65, 0.40, 0.90], image: "balls/ball_08.png", score: 36 },
    BallConfig { level: 9, radius: 80.0, color: [0.90, 0.40, 0.75], image: "balls/ball_09.png", score: 45 },
    BallConfig { level: 10, radius: 92.0, color: [0.97, 0.97, 0.97], image: "balls/ball_10.png", score: 55 },
];

/// Ball tier in `1..=10`. Construction outside the range is impossible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Level(u8);

impl Level {
    pub const COUNT: usize = 10;
    pub const MIN: Level = Level(1);
    pub const MAX: Level = Level(10);

    pub fn new(value: u8) -> Option<Self> {
        (1..=Self::COUNT as u8).contains(&value).then_some(Self(value))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Level produced when two balls of this level merge. Level 10 wraps to 1.
    pub fn merged(self) -> Self {
        Self(self.0 % Self::COUNT as u8 + 1)
    }

    /// Zero-based position in `BALL_CATALOG`.
    pub fn index(self) -> usize {
        (self.0 - 1) as usize
    }

    pub fn config(self) -> &'static BallConfig {
        &BALL_CATALOG[self.index()]
    }

    pub fn radius(self) -> f32 {
        self.config().radius
    }

    pub fn score(self) -> u32 {
        self.config().score
    }

    pub fn all() -> impl Iterator<Item = Level> {
        (1..=Self::COUNT as u8).map(Level)
    }
}

impl Default for Level {
    fn default() -> Self {
        Self::MIN
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}

impl TryFrom<u8> for Level {
    type Error = String;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Level::new(value).ok_or_else(|| format!("level {value} outside 1..=10"))
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> u8 {
        level.0
    }
}
