use crate::{
    jokers_of_rarity, special_jokers, IdAllocator, Joker, JokerDef, JokerId, Rarity, RngState,
    ShopRule,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

const MAX_DRAW_ATTEMPTS: usize = 256;

/// Offer tier for a round: `ceil(round / rounds_per_tier)`, clamped to `1..=max_tier`.
pub fn shop_tier(round: u32, rule: &ShopRule) -> u32 {
    let per = rule.rounds_per_tier.max(1);
    let tier = (round + per - 1) / per;
    tier.clamp(1, rule.max_tier.max(1))
}

pub fn offer_count(tier: u32, rule: &ShopRule) -> usize {
    let extra = (tier.saturating_sub(1) as usize).min(rule.max_extra_offers);
    rule.base_offers + extra
}

pub fn price_multiplier(tier: u32, rule: &ShopRule) -> f64 {
    1.0 + tier.saturating_sub(1) as f64 * rule.price_step
}

pub fn roll_rarity(tier: u32, rule: &ShopRule, rng: &mut RngState) -> Rarity {
    let roll = rng.next_f64();
    let mut threshold = 0.0;
    for odds in &rule.rarity_odds {
        threshold += odds.chance(tier);
        if roll < threshold && tier >= odds.min_tier {
            return odds.rarity;
        }
    }
    Rarity::Common
}

fn pick_def<'a>(pool: &[&'a JokerDef], rng: &mut RngState) -> Option<&'a JokerDef> {
    rng.pick_index(pool.len()).map(|idx| pool[idx])
}

/// Jokers on sale for one shop visit. Offers are priced for the tier of the
/// round they were generated in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShopState {
    pub round: u32,
    pub tier: u32,
    pub offers: Vec<Joker>,
}

impl ShopState {
    pub fn generate(round: u32, rule: &ShopRule, rng: &mut RngState, ids: &mut IdAllocator) -> Self {
        let tier = shop_tier(round, rule);
        let count = offer_count(tier, rule);
        let mut picked: Vec<&JokerDef> = Vec::with_capacity(count);

        if tier >= rule.special_from_tier {
            let specials: Vec<&JokerDef> = special_jokers()
                .filter(|def| tier >= 4 || def.rarity != Rarity::Legendary)
                .collect();
            if let Some(def) = pick_def(&specials, rng) {
                picked.push(def);
            }
        }

        let mut attempts = 0;
        while picked.len() < count && attempts < MAX_DRAW_ATTEMPTS {
            attempts += 1;
            let rarity = roll_rarity(tier, rule, rng);
            let pool: Vec<&JokerDef> = jokers_of_rarity(rarity).collect();
            let Some(def) = pick_def(&pool, rng) else {
                continue;
            };
            if picked.iter().any(|existing| existing.name == def.name) {
                continue;
            }
            picked.push(def);
        }
        if picked.len() < count {
            // Unlucky streak of duplicates; fill with the cheapest unused commons.
            let taken: HashSet<&str> = picked.iter().map(|def| def.name).collect();
            let mut rest: Vec<&JokerDef> = jokers_of_rarity(Rarity::Common)
                .filter(|def| !taken.contains(def.name))
                .collect();
            rest.sort_by_key(|def| def.cost);
            picked.extend(rest.into_iter().take(count - picked.len()));
        }

        let scale = price_multiplier(tier, rule);
        let offers = picked
            .into_iter()
            .map(|def| {
                let mut joker = def.instantiate(ids.alloc());
                joker.cost = (def.cost as f64 * scale).floor() as i64;
                joker
            })
            .collect();
        Self {
            round,
            tier,
            offers,
        }
    }

    pub fn find(&self, id: JokerId) -> Option<&Joker> {
        self.offers.iter().find(|joker| joker.id == id)
    }

    pub fn take(&mut self, id: JokerId) -> Option<Joker> {
        let idx = self.offers.iter().position(|joker| joker.id == id)?;
        Some(self.offers.remove(idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! tier_case {
        ($name:ident, $round:expr, $tier:expr, $offers:expr) => {
            #[test]
            fn $name() {
                let rule = ShopRule::default();
                let tier = shop_tier($round, &rule);
                assert_eq!(tier, $tier);
                assert_eq!(offer_count(tier, &rule), $offers);
            }
        };
    }

    tier_case!(tier_round_1, 1, 1, 3);
    tier_case!(tier_round_3, 3, 1, 3);
    tier_case!(tier_round_4, 4, 2, 4);
    tier_case!(tier_round_7, 7, 3, 5);
    tier_case!(tier_round_10, 10, 4, 6);
    tier_case!(tier_round_13, 13, 5, 6);
    tier_case!(tier_round_99, 99, 5, 6);

    #[test]
    fn low_tiers_only_roll_common() {
        let rule = ShopRule::default();
        let mut rng = RngState::from_seed(1);
        for _ in 0..500 {
            assert_eq!(roll_rarity(1, &rule, &mut rng), Rarity::Common);
        }
    }

    #[test]
    fn legendaries_need_tier_four() {
        let rule = ShopRule::default();
        let mut rng = RngState::from_seed(2);
        for _ in 0..2000 {
            assert_ne!(roll_rarity(3, &rule, &mut rng), Rarity::Legendary);
        }
    }

    #[test]
    fn offers_are_unique_by_name_and_freshly_identified() {
        let rule = ShopRule::default();
        let mut ids = IdAllocator::default();
        for seed in 0..40 {
            let mut rng = RngState::from_seed(seed);
            for round in [1, 4, 7, 10, 15] {
                let shop = ShopState::generate(round, &rule, &mut rng, &mut ids);
                assert_eq!(shop.offers.len(), offer_count(shop.tier, &rule));
                let names: HashSet<_> = shop.offers.iter().map(|j| j.name.as_str()).collect();
                assert_eq!(names.len(), shop.offers.len());
                let ids_seen: HashSet<_> = shop.offers.iter().map(|j| j.id).collect();
                assert_eq!(ids_seen.len(), shop.offers.len());
            }
        }
    }

    #[test]
    fn tier_three_guarantees_a_special_effect_joker() {
        let rule = ShopRule::default();
        let mut ids = IdAllocator::default();
        for seed in 0..40 {
            let mut rng = RngState::from_seed(seed);
            let shop = ShopState::generate(7, &rule, &mut rng, &mut ids);
            assert!(shop.offers.iter().any(|j| !j.special_effects.is_empty()));
            assert!(shop.offers[0].rarity != Rarity::Legendary);
        }
    }

    #[test]
    fn prices_scale_with_tier() {
        let rule = ShopRule::default();
        let mut ids = IdAllocator::default();
        let mut rng = RngState::from_seed(8);
        let shop = ShopState::generate(13, &rule, &mut rng, &mut ids);
        assert_eq!(shop.tier, 5);
        let scale = price_multiplier(shop.tier, &rule);
        assert!((scale - 1.4).abs() < 1e-9);
        for offer in &shop.offers {
            let def = crate::joker_def(&offer.name).expect("catalog entry");
            assert_eq!(offer.cost, (def.cost as f64 * scale).floor() as i64);
            assert!(offer.cost > def.cost);
        }
    }

    #[test]
    fn take_removes_the_offer() {
        let rule = ShopRule::default();
        let mut ids = IdAllocator::default();
        let mut rng = RngState::from_seed(4);
        let mut shop = ShopState::generate(1, &rule, &mut rng, &mut ids);
        let id = shop.offers[1].id;
        assert!(shop.find(id).is_some());
        assert_eq!(shop.take(id).map(|j| j.id), Some(id));
        assert!(shop.find(id).is_none());
        assert_eq!(shop.take(id), None);
    }
}
