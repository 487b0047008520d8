use super::*;
use crate::*;

impl RunState {
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, RunError> {
        let ladder = BenchmarkLadder::new(config.benchmarks.clone())?;
        Ok(Self::with_ladder(config, ladder, seed))
    }

    /// A run with the standard rules and ladder.
    pub fn standard(seed: u64) -> Self {
        Self::with_ladder(GameConfig::default(), BenchmarkLadder::standard(), seed)
    }

    fn with_ladder(config: GameConfig, ladder: BenchmarkLadder, seed: u64) -> Self {
        let mut rng = RngState::from_seed(seed);
        let mut ids = IdAllocator::default();
        let deck = initial_deck(&config.deck, &mut rng, &mut ids);
        let state = GameState::new(&config, deck, ladder.first());
        log::debug!("new run seed={seed} deck={}", state.deck.draw.len());
        Self {
            config,
            base_ladder: ladder.clone(),
            ladder,
            rng,
            ids,
            state,
            shop: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        if self.state.game_over {
            self.state.outcome
        } else {
            None
        }
    }

    /// Starts over with a fresh deck. The random stream and id counter carry
    /// on, so the new deck differs from the previous one.
    pub fn reset_game(&mut self, events: &mut EventBus) {
        let deck = initial_deck(&self.config.deck, &mut self.rng, &mut self.ids);
        self.ladder = self.base_ladder.clone();
        self.state = GameState::new(&self.config, deck, self.ladder.first());
        self.shop = None;
        log::debug!("game reset deck={}", self.state.deck.draw.len());
        events.push(Event::GameReset {
            deck: self.state.deck.draw.len(),
        });
    }

    /// Scales every benchmark target by `factor`. Repeated calls scale the
    /// configured ladder again rather than compounding. A factor so small
    /// that two rounded targets meet is rejected.
    pub fn set_difficulty(
        &mut self,
        factor: f64,
        events: &mut EventBus,
    ) -> Result<Benchmark, RunError> {
        self.ensure_running()?;
        if self.phase() != Phase::Setup {
            return Err(RunError::DifficultyLocked);
        }
        if !factor.is_finite() || factor <= 0.0 {
            return Err(RunError::InvalidDifficulty(factor));
        }
        // Targets that collapse onto each other after rounding are a bad
        // factor, not a bad ladder.
        let ladder = self
            .base_ladder
            .scaled(factor)
            .map_err(|_| RunError::InvalidDifficulty(factor))?;
        self.state.current_benchmark = ladder.first();
        self.state.difficulty = factor;
        self.ladder = ladder;
        log::debug!(
            "difficulty x{factor} first target={}",
            self.state.current_benchmark.target_score
        );
        events.push(Event::DifficultySet {
            multiplier: factor,
            target: self.state.current_benchmark.target_score,
        });
        Ok(self.state.current_benchmark.clone())
    }
}
