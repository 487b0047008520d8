use crate::{standard_benchmarks, Benchmark, Rarity};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EconomyRule {
    /// Flat money per round number when a benchmark is beaten.
    pub round_bonus: i64,
    /// Money per market-share point of the beaten benchmark.
    pub money_per_share: i64,
}

impl Default for EconomyRule {
    fn default() -> Self {
        Self {
            round_bonus: 50,
            money_per_share: 2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PenaltyRule {
    pub min_penalty: i64,
    /// Penalty added at a total miss (score of zero or less).
    pub shortfall_scale: i64,
}

impl Default for PenaltyRule {
    fn default() -> Self {
        Self {
            min_penalty: 2,
            shortfall_scale: 10,
        }
    }
}

impl PenaltyRule {
    pub fn penalty_for(&self, score: i64, target: i64) -> i64 {
        if target <= 0 || score >= target {
            return self.min_penalty.max(0);
        }
        let shortfall = (target - score) as f64 / target as f64;
        let scaled = (self.shortfall_scale as f64 * shortfall.clamp(0.0, 1.0)).ceil() as i64;
        scaled.max(self.min_penalty).max(0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DeckRule {
    pub guaranteed_legendaries: usize,
    /// After a round, a draw pile smaller than this is topped up.
    pub replenish_below: usize,
}

impl Default for DeckRule {
    fn default() -> Self {
        Self {
            guaranteed_legendaries: 2,
            replenish_below: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RarityOdds {
    pub rarity: Rarity,
    pub step: f64,
    pub cap: f64,
    pub min_tier: u32,
}

impl RarityOdds {
    pub fn chance(&self, tier: u32) -> f64 {
        (self.step * tier as f64).min(self.cap)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ShopRule {
    pub rounds_per_tier: u32,
    pub max_tier: u32,
    pub base_offers: usize,
    pub max_extra_offers: usize,
    pub price_step: f64,
    pub special_from_tier: u32,
    /// Checked in order; anything not hit falls through to common.
    pub rarity_odds: Vec<RarityOdds>,
}

impl Default for ShopRule {
    fn default() -> Self {
        Self {
            rounds_per_tier: 3,
            max_tier: 5,
            base_offers: 3,
            max_extra_offers: 3,
            price_step: 0.1,
            special_from_tier: 3,
            rarity_odds: vec![
                RarityOdds {
                    rarity: Rarity::Legendary,
                    step: 0.05,
                    cap: 0.25,
                    min_tier: 4,
                },
                RarityOdds {
                    rarity: Rarity::Rare,
                    step: 0.10,
                    cap: 0.40,
                    min_tier: 3,
                },
                RarityOdds {
                    rarity: Rarity::Uncommon,
                    step: 0.20,
                    cap: 0.60,
                    min_tier: 2,
                },
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub hand_limit: usize,
    pub base_play_slots: u32,
    pub base_discard_slots: u32,
    pub starting_money: i64,
    pub starting_market_share: i64,
    pub economy: EconomyRule,
    pub penalty: PenaltyRule,
    pub deck: DeckRule,
    pub shop: ShopRule,
    pub benchmarks: Vec<Benchmark>,
    /// Keep generating benchmarks past the end of the fixed ladder.
    pub endless: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            hand_limit: 3,
            base_play_slots: 2,
            base_discard_slots: 2,
            starting_money: 100,
            starting_market_share: 10,
            economy: EconomyRule::default(),
            penalty: PenaltyRule::default(),
            deck: DeckRule::default(),
            shop: ShopRule::default(),
            benchmarks: standard_benchmarks(),
            endless: false,
        }
    }
}

pub const MAX_MARKET_SHARE: i64 = 100;
/// Largest hand a config may allow.
pub const MAX_HAND_SIZE: usize = 3;

pub fn clamp_market_share(value: i64) -> i64 {
    value.clamp(0, MAX_MARKET_SHARE)
}
