use crate::{AutoplayError, EvalMetrics};
use scalatro_core::{Action, Benchmark};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RunStatus {
    Victory,
    Defeat,
    TargetReached,
    MaxSteps,
    NoLegalAction,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StepRecord {
    pub step: u32,
    pub phase_before: String,
    pub action: Action,
    pub before: EvalMetrics,
    pub after: EvalMetrics,
    #[serde(default)]
    pub detail: Option<String>,
    pub event_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SummaryStats {
    pub steps: u32,
    pub turns: u32,
    pub jokers_bought: usize,
    pub wall_time_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AutoplayResult {
    pub seed: u64,
    pub status: RunStatus,
    pub final_metrics: EvalMetrics,
    pub final_benchmark: Benchmark,
    #[serde(default)]
    pub jokers: Vec<String>,
    #[serde(default)]
    pub steps: Vec<StepRecord>,
    pub summary: SummaryStats,
}

impl AutoplayResult {
    pub fn to_text_report(&self) -> String {
        let metrics = &self.final_metrics;
        let mut lines = vec![
            format!("seed: {}", self.seed),
            format!("status: {}", run_status_label(self.status)),
            format!(
                "final: round={} share={} money={} beaten={} benchmark={} ({})",
                metrics.round,
                metrics.market_share,
                metrics.money,
                metrics.benchmarks_beaten,
                self.final_benchmark.name,
                self.final_benchmark.target_score
            ),
            format!(
                "summary: steps={} turns={} jokers={} wall_ms={}",
                self.summary.steps,
                self.summary.turns,
                self.summary.jokers_bought,
                self.summary.wall_time_ms
            ),
        ];
        if !self.jokers.is_empty() {
            lines.push(format!("jokers: {}", self.jokers.join(", ")));
        }
        if !self.steps.is_empty() {
            lines.push(String::new());
            lines.push("steps:".to_string());
        }
        for step in &self.steps {
            lines.push(format!(
                "  {:>4} | {:<10} | {}",
                step.step,
                step.phase_before,
                action_name(&step.action)
            ));
            lines.push(format!(
                "       round {} share {} money {} score {}/{} -> round {} share {} money {} score {}/{}",
                step.before.round,
                step.before.market_share,
                step.before.money,
                step.before.score,
                step.before.target,
                step.after.round,
                step.after.market_share,
                step.after.money,
                step.after.score,
                step.after.target
            ));
            if let Some(detail) = step.detail.as_ref() {
                lines.push(format!("       {detail}"));
            }
        }
        lines.join("\n")
    }
}

fn action_name(action: &Action) -> String {
    match action {
        Action::DrawCard => "draw".to_string(),
        Action::PlayCard(id) => format!("play {id}"),
        Action::DiscardCard(id) => format!("discard {id}"),
        Action::CalculateScore => "score".to_string(),
        Action::EndTurn => "end turn".to_string(),
        Action::OpenShop => "open shop".to_string(),
        Action::CloseShop => "close shop".to_string(),
        Action::BuyJoker(id) => format!("buy joker {id}"),
        Action::ResetGame => "reset".to_string(),
        Action::SetDifficulty(factor) => format!("difficulty x{factor}"),
    }
}

pub fn run_status_label(status: RunStatus) -> &'static str {
    match status {
        RunStatus::Victory => "Victory",
        RunStatus::Defeat => "Defeat",
        RunStatus::TargetReached => "TargetReached",
        RunStatus::MaxSteps => "MaxSteps",
        RunStatus::NoLegalAction => "NoLegalAction",
    }
}

pub fn write_json(path: &Path, result: &AutoplayResult) -> Result<(), AutoplayError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let body = serde_json::to_string_pretty(result)?;
    fs::write(path, body)?;
    Ok(())
}

pub fn write_text(path: &Path, result: &AutoplayResult) -> Result<(), AutoplayError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, result.to_text_report())?;
    Ok(())
}
