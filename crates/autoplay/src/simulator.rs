use crate::{
    target_reached, AutoplayConfig, AutoplayError, AutoplayResult, EvalMetrics, GreedyPolicy,
    Policy, RunStatus, StepRecord, SummaryStats, TargetConfig,
};
use scalatro_core::{
    Action, ActionOutcome, EventBus, GameConfig, GameOutcome, Phase, RunState,
};
use std::time::Instant;

#[derive(Debug)]
pub struct Simulator {
    pub run: RunState,
    pub events: EventBus,
}

impl Simulator {
    pub fn new(run: RunState) -> Self {
        Self {
            run,
            events: EventBus::default(),
        }
    }

    /// Builds a run from `config`, applying the autoplay difficulty if set.
    pub fn from_config(config: GameConfig, autoplay: &AutoplayConfig) -> Result<Self, AutoplayError> {
        let run = RunState::new(config, autoplay.seed)
            .map_err(|err| AutoplayError::Setup(err.to_string()))?;
        let mut sim = Self::new(run);
        if let Some(factor) = autoplay.difficulty {
            sim.run.set_difficulty(factor, &mut sim.events)?;
        }
        Ok(sim)
    }

    pub fn metrics(&self) -> EvalMetrics {
        EvalMetrics::of(&self.run)
    }

    pub fn phase_name(&self) -> String {
        phase_label(self.run.phase()).to_string()
    }

    /// Applies one action. A refused action is reported as an error since
    /// policies only pick actions the engine accepts.
    pub fn step(&mut self, index: u32, action: Action) -> Result<StepRecord, AutoplayError> {
        let phase_before = self.phase_name();
        let before = self.metrics();
        let queued = self.events.len();
        let outcome = self
            .run
            .dispatch(action, &mut self.events)
            .map_err(|err| AutoplayError::InvalidAction(format!("{action:?}: {err}")))?;
        Ok(StepRecord {
            step: index,
            phase_before,
            action,
            before,
            after: self.metrics(),
            detail: describe_outcome(&outcome),
            event_count: self.events.len().saturating_sub(queued),
        })
    }

    pub fn run_with(
        &mut self,
        policy: &mut dyn Policy,
        config: &AutoplayConfig,
        targets: TargetConfig,
    ) -> Result<AutoplayResult, AutoplayError> {
        let started = Instant::now();
        let mut steps = Vec::new();
        let mut step_count = 0u32;
        let mut turns = 0u32;

        let status = loop {
            if let Some(outcome) = self.run.outcome() {
                break match outcome {
                    GameOutcome::Victory => RunStatus::Victory,
                    GameOutcome::Defeat => RunStatus::Defeat,
                };
            }
            if target_reached(self.metrics(), targets) {
                break RunStatus::TargetReached;
            }
            if step_count >= config.max_steps {
                break RunStatus::MaxSteps;
            }
            let Some(action) = policy.choose(&self.run) else {
                break RunStatus::NoLegalAction;
            };
            step_count += 1;
            if action == Action::EndTurn {
                turns += 1;
            }
            let record = self.step(step_count, action)?;
            if config.record_steps {
                steps.push(record);
            }
            self.events.drain().for_each(|event| log::trace!("{event:?}"));
        };

        log::debug!(
            "seed {} finished {status:?} after {step_count} steps",
            config.seed
        );
        let state = &self.run.state;
        Ok(AutoplayResult {
            seed: self.run.rng.seed(),
            status,
            final_metrics: self.metrics(),
            final_benchmark: state.current_benchmark.clone(),
            jokers: state.active_jokers.iter().map(|joker| joker.name.clone()).collect(),
            steps,
            summary: SummaryStats {
                steps: step_count,
                turns,
                jokers_bought: state.active_jokers.len(),
                wall_time_ms: started.elapsed().as_millis() as u64,
            },
        })
    }
}

/// Plays one seeded game with the greedy policy.
pub fn autoplay(
    game: GameConfig,
    config: &AutoplayConfig,
    targets: TargetConfig,
) -> Result<AutoplayResult, AutoplayError> {
    let mut sim = Simulator::from_config(game, config)?;
    let mut policy = GreedyPolicy::new(config.money_reserve);
    sim.run_with(&mut policy, config, targets)
}

fn describe_outcome(outcome: &ActionOutcome) -> Option<String> {
    match outcome {
        ActionOutcome::Drawn(card) | ActionOutcome::Played(card) | ActionOutcome::Discarded(card) => {
            Some(format!(
                "{} chips={} mult={:.2} cost={}",
                card.name, card.base_chips, card.base_multiplier, card.play_cost
            ))
        }
        ActionOutcome::TurnEnded(report) => Some(format!(
            "score {}/{} {} share {:+} money {:+}",
            report.score,
            report.target,
            if report.beaten { "beaten" } else { "missed" },
            report.market_share_change,
            report.money_gained
        )),
        ActionOutcome::JokerBought(joker) => Some(format!("{} for {}", joker.name, joker.cost)),
        ActionOutcome::ShopOffers(offers) => Some(format!("{} offers", offers.len())),
        _ => None,
    }
}

pub fn phase_label(phase: Phase) -> &'static str {
    match phase {
        Phase::Setup => "Setup",
        Phase::TurnActive => "Turn",
        Phase::ShopOpen => "Shop",
        Phase::GameOver(GameOutcome::Victory) => "Victory",
        Phase::GameOver(GameOutcome::Defeat) => "Defeat",
    }
}
