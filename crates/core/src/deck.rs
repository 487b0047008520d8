use crate::{
    card_catalog, Card, CardTemplate, DeckRule, IdAllocator, Rarity, RngState, API_CARDS,
    FEATURE_CARDS, PRODUCT_CARDS, SPECIAL_CARDS, TEAM_CARDS,
};
use serde::{Deserialize, Serialize};

/// Draw pile and discard pile. Cards only move between the two piles and
/// the hand; nothing is destroyed.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq)]
pub struct Deck {
    pub draw: Vec<Card>,
    pub discard: Vec<Card>,
}

impl Deck {
    pub fn new(draw: Vec<Card>) -> Self {
        Self {
            draw,
            discard: Vec::new(),
        }
    }

    pub fn total_cards(&self) -> usize {
        self.draw.len() + self.discard.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.draw.is_empty() && self.discard.is_empty()
    }

    /// Removes the first card of the draw pile.
    pub fn draw_first(&mut self) -> Option<Card> {
        if self.draw.is_empty() {
            None
        } else {
            Some(self.draw.remove(0))
        }
    }

    pub fn discard(&mut self, card: Card) {
        self.discard.push(card);
    }

    pub fn discard_all(&mut self, cards: &mut Vec<Card>) {
        self.discard.append(cards);
    }

    /// Moves the whole discard pile into the draw pile in random order.
    /// Returns how many cards were moved.
    pub fn reshuffle_discard(&mut self, rng: &mut RngState) -> usize {
        if self.discard.is_empty() {
            return 0;
        }
        let moved = self.discard.len();
        self.draw.append(&mut self.discard);
        rng.shuffle(&mut self.draw);
        moved
    }
}

pub const ADVANCED_DRAFT_SIZE: usize = 3;
pub const MAX_POWER_LEVEL: u32 = 5;

pub fn power_level(round: u32) -> u32 {
    (round / 2).min(MAX_POWER_LEVEL)
}

fn starter_pool() -> Vec<&'static CardTemplate> {
    let special_tail = SPECIAL_CARDS.len().saturating_sub(2);
    PRODUCT_CARDS[..4]
        .iter()
        .chain(&API_CARDS[..3])
        .chain(&FEATURE_CARDS[..3])
        .chain(&TEAM_CARDS[..4])
        .chain(&SPECIAL_CARDS[special_tail..])
        .collect()
}

/// Opening deck: the starter pool in random order followed by
/// `guaranteed_legendaries` random legendary cards.
pub fn initial_deck(rule: &DeckRule, rng: &mut RngState, ids: &mut IdAllocator) -> Vec<Card> {
    let mut pool = starter_pool();
    rng.shuffle(&mut pool);
    let mut cards: Vec<Card> = pool
        .into_iter()
        .map(|template| template.instantiate(ids.alloc()))
        .collect();

    let mut legendaries: Vec<&CardTemplate> = card_catalog()
        .filter(|template| template.rarity == Rarity::Legendary)
        .collect();
    rng.shuffle(&mut legendaries);
    cards.extend(
        legendaries
            .into_iter()
            .take(rule.guaranteed_legendaries)
            .map(|template| template.instantiate(ids.alloc())),
    );
    cards
}

fn unlocked_for_power(rarity: Rarity, power: u32) -> bool {
    match power {
        p if p >= 5 => true,
        p if p >= 3 => rarity != Rarity::Legendary,
        2 => matches!(rarity, Rarity::Common | Rarity::Uncommon),
        _ => rarity == Rarity::Common,
    }
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Three fresh cards for a later round. Higher rounds unlock rarer cards
/// and roll a chip/multiplier bonus on top of the catalog values.
pub fn advanced_deck(round: u32, rng: &mut RngState, ids: &mut IdAllocator) -> Vec<Card> {
    let power = power_level(round);
    let mut available: Vec<&CardTemplate> = card_catalog()
        .filter(|template| unlocked_for_power(template.rarity, power))
        .collect();
    rng.shuffle(&mut available);

    available
        .into_iter()
        .take(ADVANCED_DRAFT_SIZE)
        .map(|template| {
            let mut card = template.instantiate(ids.alloc());
            let (bonus_chips, bonus_multiplier) = if power >= 4 {
                (rng.range_inclusive(5, 14), 1.0 + rng.next_f64() * 0.5)
            } else if power >= 2 {
                (rng.range_inclusive(3, 7), 1.0 + rng.next_f64() * 0.3)
            } else {
                (0, 1.0)
            };
            if bonus_chips > 0 {
                card.base_chips += bonus_chips;
                card.base_multiplier = round_to_hundredths(card.base_multiplier * bonus_multiplier);
                card.description = format!("{} [Upgraded round {round}]", card.description);
            }
            card
        })
        .collect()
}
