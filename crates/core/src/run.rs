use crate::{
    Benchmark, BenchmarkLadder, Card, CardId, Event, EventBus, GameConfig, GameOutcome, GameState,
    IdAllocator, Joker, JokerId, LadderError, RngState, ShopState,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod resolution;
mod setup;
mod shop;
mod turn;

/// Reason an action was refused. The state is untouched whenever one of
/// these is returned.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RunError {
    #[error("hand is full")]
    HandFull,
    #[error("deck and discard pile are empty")]
    NothingToDraw,
    #[error("card {0} is not in hand")]
    CardNotInHand(CardId),
    #[error("not enough story points left this turn")]
    PlayBudgetExceeded,
    #[error("no discards left this turn")]
    DiscardBudgetExceeded,
    #[error("joker {0} is not on offer")]
    JokerNotOffered(JokerId),
    #[error("not enough money")]
    NotEnoughMoney,
    #[error("shop is locked")]
    ShopLocked,
    #[error("game is over")]
    GameOver,
    #[error("difficulty can only change before the first turn")]
    DifficultyLocked,
    #[error("invalid difficulty multiplier {0}")]
    InvalidDifficulty(f64),
    #[error("ladder error: {0}")]
    Ladder(#[from] LadderError),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum Action {
    DrawCard,
    PlayCard(CardId),
    DiscardCard(CardId),
    CalculateScore,
    EndTurn,
    OpenShop,
    CloseShop,
    BuyJoker(JokerId),
    ResetGame,
    SetDifficulty(f64),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum ActionOutcome {
    Drawn(Card),
    Played(Card),
    Discarded(Card),
    Score(i64),
    TurnEnded(TurnReport),
    ShopOffers(Vec<Joker>),
    ShopClosed,
    JokerBought(Joker),
    Reset,
    DifficultySet(Benchmark),
}

/// What `end_turn` resolved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TurnReport {
    pub round: u32,
    pub score: i64,
    pub target: i64,
    pub beaten: bool,
    pub market_share_change: i64,
    pub money_gained: i64,
    pub replenished: usize,
    pub outcome: Option<GameOutcome>,
}

/// Result of [`reduce`]: the successor engine, the action's result and the
/// events it produced.
#[derive(Debug, Clone)]
pub struct Transition {
    pub run: RunState,
    pub result: Result<ActionOutcome, RunError>,
    pub events: Vec<Event>,
}

#[derive(Debug, Clone)]
pub struct RunState {
    pub config: GameConfig,
    /// Ladder as configured, before any difficulty scaling.
    base_ladder: BenchmarkLadder,
    pub ladder: BenchmarkLadder,
    pub rng: RngState,
    pub ids: IdAllocator,
    pub state: GameState,
    pub shop: Option<ShopState>,
}

impl RunState {
    pub fn dispatch(
        &mut self,
        action: Action,
        events: &mut EventBus,
    ) -> Result<ActionOutcome, RunError> {
        match action {
            Action::DrawCard => self.draw_card(events).map(ActionOutcome::Drawn),
            Action::PlayCard(id) => self.play_card(id, events).map(ActionOutcome::Played),
            Action::DiscardCard(id) => self.discard_card(id, events).map(ActionOutcome::Discarded),
            Action::CalculateScore => Ok(ActionOutcome::Score(self.calculate_score(events))),
            Action::EndTurn => self.end_turn(events).map(ActionOutcome::TurnEnded),
            Action::OpenShop => self.open_shop(events).map(ActionOutcome::ShopOffers),
            Action::CloseShop => {
                self.close_shop(events);
                Ok(ActionOutcome::ShopClosed)
            }
            Action::BuyJoker(id) => self.buy_joker(id, events).map(ActionOutcome::JokerBought),
            Action::ResetGame => {
                self.reset_game(events);
                Ok(ActionOutcome::Reset)
            }
            Action::SetDifficulty(factor) => self
                .set_difficulty(factor, events)
                .map(ActionOutcome::DifficultySet),
        }
    }

    fn ensure_running(&self) -> Result<(), RunError> {
        if self.state.game_over {
            Err(RunError::GameOver)
        } else {
            Ok(())
        }
    }
}

/// Applies `action` to a copy of `run`. The input is left as it was.
pub fn reduce(run: &RunState, action: Action) -> Transition {
    let mut next = run.clone();
    let mut events = EventBus::default();
    let result = next.dispatch(action, &mut events);
    let events = events.drain().collect();
    Transition {
        run: next,
        result,
        events,
    }
}
