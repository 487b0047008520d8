use scalatro_core::RunState;
use serde::{Deserialize, Serialize};

/// Early-stop goals. With nothing set a run plays until the game ends.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TargetConfig {
    pub target_round: Option<u32>,
    pub target_market_share: Option<i64>,
    pub target_money: Option<i64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct EvalMetrics {
    pub round: u32,
    pub money: i64,
    pub market_share: i64,
    pub score: i64,
    pub target: i64,
    pub benchmarks_beaten: u32,
    pub game_over: bool,
}

impl EvalMetrics {
    pub fn of(run: &RunState) -> Self {
        let state = &run.state;
        Self {
            round: state.round,
            money: state.money,
            market_share: state.market_share,
            score: state.score,
            target: state.current_benchmark.target_score,
            benchmarks_beaten: state.benchmarks_beaten,
            game_over: state.game_over,
        }
    }
}

pub fn target_reached(metrics: EvalMetrics, targets: TargetConfig) -> bool {
    if let Some(target) = targets.target_round {
        if metrics.round < target {
            return false;
        }
    }
    if let Some(target) = targets.target_market_share {
        if metrics.market_share < target {
            return false;
        }
    }
    if let Some(target) = targets.target_money {
        if metrics.money < target {
            return false;
        }
    }
    targets.target_round.is_some()
        || targets.target_market_share.is_some()
        || targets.target_money.is_some()
}
