//! Race - Race profile construction and odds
//!
//! Generates per-horse performance weights and derives decimal odds
//! from them. A profile is a pure function of `(horse_count, seed)`.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Finish-line threshold in position units
pub const RACE_DISTANCE: u32 = 100;

/// Display token for a horse on the track
pub const HORSE_ICON: &str = "🐴";

/// Bounds of the uniform weight distribution
pub const MIN_WEIGHT: f64 = 0.6;
pub const MAX_WEIGHT: f64 = 1.4;

/// Implied probability floor, keeps a zero-weight horse priced
const MIN_PROBABILITY: f64 = 1e-6;
/// Fair odds are scaled by this to take a flat 10% house edge
const HOUSE_MULTIPLIER: f64 = 0.9;
/// No horse pays less than this
pub const MIN_ODDS: f64 = 1.5;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Reproducibility token for a race.
///
/// Parsed from user input as an integer when possible, otherwise kept
/// verbatim as text. `42` and `"42"` are different seeds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RaceSeed {
    Number(i64),
    Text(String),
}

impl RaceSeed {
    /// Stable 64-bit seed for the generator
    pub fn to_u64(&self) -> u64 {
        match self {
            RaceSeed::Number(n) => fnv1a(fnv1a(FNV_OFFSET_BASIS, &[0]), &n.to_le_bytes()),
            RaceSeed::Text(s) => fnv1a(fnv1a(FNV_OFFSET_BASIS, &[1]), s.as_bytes()),
        }
    }

    /// Generator seeded from this token
    pub fn rng(&self) -> StdRng {
        StdRng::seed_from_u64(self.to_u64())
    }
}

impl FromStr for RaceSeed {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(match s.parse::<i64>() {
            Ok(n) => RaceSeed::Number(n),
            Err(_) => RaceSeed::Text(s.to_string()),
        })
    }
}

impl From<i64> for RaceSeed {
    fn from(n: i64) -> Self {
        RaceSeed::Number(n)
    }
}

impl From<&str> for RaceSeed {
    fn from(s: &str) -> Self {
        RaceSeed::Text(s.to_string())
    }
}

impl fmt::Display for RaceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RaceSeed::Number(n) => write!(f, "{}", n),
            RaceSeed::Text(s) => write!(f, "{}", s),
        }
    }
}

fn fnv1a(mut state: u64, bytes: &[u8]) -> u64 {
    for byte in bytes {
        state ^= u64::from(*byte);
        state = state.wrapping_mul(FNV_PRIME);
    }
    state
}

/// Per-horse weights and the odds derived from them.
///
/// Immutable once built; `odds` is always computed from `weights`.
#[derive(Debug, Clone, PartialEq)]
pub struct RaceProfile {
    weights: Vec<f64>,
    odds: Vec<f64>,
    distance: u32,
    icon: String,
}

impl RaceProfile {
    /// Build a profile around an explicit weight sequence
    pub fn from_weights(weights: Vec<f64>) -> Self {
        let odds = compute_decimal_odds(&weights);
        Self {
            weights,
            odds,
            distance: RACE_DISTANCE,
            icon: HORSE_ICON.to_string(),
        }
    }

    pub fn horse_count(&self) -> usize {
        self.weights.len()
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn odds(&self) -> &[f64] {
        &self.odds
    }

    /// Odds for a 1-based horse number
    pub fn odds_for(&self, horse: usize) -> Option<f64> {
        horse.checked_sub(1).and_then(|i| self.odds.get(i).copied())
    }

    pub fn distance(&self) -> u32 {
        self.distance
    }

    pub fn icon(&self) -> &str {
        &self.icon
    }
}

/// Draw `horse_count` weights uniformly from `[MIN_WEIGHT, MAX_WEIGHT]`
pub fn generate_weights(horse_count: usize, seed: Option<&RaceSeed>) -> Vec<f64> {
    match seed {
        Some(seed) => generate_weights_with(&mut seed.rng(), horse_count),
        None => generate_weights_with(&mut StdRng::from_entropy(), horse_count),
    }
}

/// Draw weights from a caller-supplied generator
pub fn generate_weights_with<R: Rng + ?Sized>(rng: &mut R, horse_count: usize) -> Vec<f64> {
    (0..horse_count)
        .map(|_| rng.gen_range(MIN_WEIGHT..=MAX_WEIGHT))
        .collect()
}

/// Convert weights into decimal odds with a house edge.
///
/// Each horse is priced at `0.9 / p` where `p` is its share of the total
/// weight, floored at `MIN_ODDS` and rounded to two decimals.
pub fn compute_decimal_odds(weights: &[f64]) -> Vec<f64> {
    let total = if weights.is_empty() {
        1.0
    } else {
        weights.iter().sum::<f64>()
    };

    weights
        .iter()
        .map(|weight| {
            let probability = (weight / total).max(MIN_PROBABILITY);
            let fair_odds = 1.0 / probability;
            let house_odds = fair_odds * HOUSE_MULTIPLIER;
            round_cents(house_odds.max(MIN_ODDS))
        })
        .collect()
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Build the profile for one race
pub fn build_race(horse_count: usize, seed: Option<&RaceSeed>) -> RaceProfile {
    let profile = RaceProfile::from_weights(generate_weights(horse_count, seed));
    match seed {
        Some(seed) => log::debug!("Built race for {} horses with seed {}", horse_count, seed),
        None => log::debug!("Built unseeded race for {} horses", horse_count),
    }
    profile
}
