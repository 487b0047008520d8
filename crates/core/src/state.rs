use crate::{Benchmark, Card, CardId, Deck, GameConfig, Joker};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameOutcome {
    Victory,
    Defeat,
}

/// Where the game stands, derived from the state flags.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Phase {
    Setup,
    TurnActive,
    ShopOpen,
    GameOver(GameOutcome),
}

/// Everything an observer may read. Only `RunState` writes it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameState {
    pub chips: i64,
    pub multiplier: f64,
    pub score: i64,
    pub market_share: i64,
    pub money: i64,
    pub round: u32,
    pub hand: Vec<Card>,
    pub deck: Deck,
    pub active_jokers: Vec<Joker>,
    pub current_benchmark: Benchmark,
    pub benchmarks_beaten: u32,
    /// Benchmarks generated past the fixed ladder in endless mode.
    pub generated_benchmarks: usize,
    pub max_cards_per_turn: u32,
    pub cards_played_this_turn: u32,
    pub max_discards_per_turn: u32,
    pub cards_discarded_this_turn: u32,
    pub shop_open: bool,
    pub can_visit_shop: bool,
    pub game_over: bool,
    pub outcome: Option<GameOutcome>,
    /// Set by the first turn action; difficulty is locked afterwards.
    pub started: bool,
    pub difficulty: f64,
}

impl GameState {
    pub fn new(config: &GameConfig, deck: Vec<Card>, benchmark: Benchmark) -> Self {
        Self {
            chips: 0,
            multiplier: 1.0,
            score: 0,
            market_share: crate::clamp_market_share(config.starting_market_share),
            money: config.starting_money.max(0),
            round: 1,
            hand: Vec::new(),
            deck: Deck::new(deck),
            active_jokers: Vec::new(),
            current_benchmark: benchmark,
            benchmarks_beaten: 0,
            generated_benchmarks: 0,
            max_cards_per_turn: config.base_play_slots,
            cards_played_this_turn: 0,
            max_discards_per_turn: config.base_discard_slots,
            cards_discarded_this_turn: 0,
            shop_open: false,
            can_visit_shop: false,
            game_over: false,
            outcome: None,
            started: false,
            difficulty: 1.0,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.game_over {
            Phase::GameOver(self.outcome.unwrap_or(GameOutcome::Defeat))
        } else if self.shop_open {
            Phase::ShopOpen
        } else if self.started {
            Phase::TurnActive
        } else {
            Phase::Setup
        }
    }

    pub fn hand_card(&self, id: CardId) -> Option<&Card> {
        self.hand.iter().find(|card| card.id == id)
    }

    /// Cards in the draw pile, the hand and the discard pile together.
    pub fn card_count(&self) -> usize {
        self.deck.total_cards() + self.hand.len()
    }

    pub fn story_points_left(&self) -> u32 {
        self.max_cards_per_turn
            .saturating_sub(self.cards_played_this_turn)
    }

    pub fn discards_left(&self) -> u32 {
        self.max_discards_per_turn
            .saturating_sub(self.cards_discarded_this_turn)
    }
}
