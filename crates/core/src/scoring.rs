use crate::{Joker, SpecialEffect};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Score {
    pub chips: i64,
    pub mult: f64,
}

impl Score {
    pub fn new(chips: i64, mult: f64) -> Self {
        Self { chips, mult }
    }

    pub fn total_raw(&self) -> f64 {
        self.chips as f64 * self.mult
    }

    pub fn total(&self) -> i64 {
        self.total_raw().floor() as i64
    }
}

/// Bonuses summed over every owned joker.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct JokerTotals {
    pub chip_bonus: i64,
    pub multiplier_bonus: f64,
    pub extra_play_slots: u32,
    pub extra_discard_slots: u32,
}

impl JokerTotals {
    pub fn from_jokers<'a>(jokers: impl IntoIterator<Item = &'a Joker>) -> Self {
        let mut totals = Self::default();
        for joker in jokers {
            totals.chip_bonus += joker.chip_bonus;
            totals.multiplier_bonus += joker.multiplier_bonus;
            if joker.has_effect(SpecialEffect::ExtraPlaySlot) {
                totals.extra_play_slots += 1;
            }
            if joker.has_effect(SpecialEffect::ExtraDiscardSlot) {
                totals.extra_discard_slots += 1;
            }
        }
        totals
    }

    /// Chips and multiplier every round starts from.
    pub fn base_score(&self) -> Score {
        Score::new(self.chip_bonus, 1.0 + self.multiplier_bonus)
    }
}
