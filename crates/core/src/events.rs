use crate::{CardId, GameOutcome, JokerId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    CardDrawn {
        card_id: CardId,
        hand_size: usize,
    },
    DeckReshuffled {
        cards: usize,
    },
    CardPlayed {
        card_id: CardId,
        chips: i64,
        multiplier: f64,
        story_points: u32,
    },
    CardDiscarded {
        card_id: CardId,
        discards: u32,
    },
    ScoreCalculated {
        chips: i64,
        multiplier: f64,
        score: i64,
    },
    BenchmarkBeaten {
        benchmark: String,
        score: i64,
        target: i64,
        market_share: i64,
        reward: i64,
        money: i64,
    },
    BenchmarkFailed {
        benchmark: String,
        score: i64,
        target: i64,
        penalty: i64,
        market_share: i64,
    },
    BenchmarkAdvanced {
        benchmark: String,
        target: i64,
    },
    DeckReplenished {
        added: usize,
    },
    RoundStarted {
        round: u32,
        chips: i64,
        multiplier: f64,
        play_slots: u32,
        discard_slots: u32,
    },
    ShopOpened {
        round: u32,
        tier: u32,
        offers: usize,
        reopened: bool,
    },
    ShopClosed,
    JokerBought {
        joker_id: JokerId,
        name: String,
        cost: i64,
        money: i64,
    },
    DifficultySet {
        multiplier: f64,
        target: i64,
    },
    GameEnded {
        outcome: GameOutcome,
        round: u32,
        market_share: i64,
    },
    GameReset {
        deck: usize,
    },
}

#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<Event>,
}

impl EventBus {
    pub fn push(&mut self, event: Event) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn events(&self) -> &[Event] {
        &self.queue
    }
}
