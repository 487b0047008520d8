use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Benchmark {
    pub id: String,
    pub name: String,
    pub target_score: i64,
    pub market_share_reward: i64,
    #[serde(default)]
    pub completed: bool,
}

impl Benchmark {
    pub fn new(id: &str, name: &str, target_score: i64, market_share_reward: i64) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            target_score,
            market_share_reward,
            completed: false,
        }
    }
}

pub fn standard_benchmarks() -> Vec<Benchmark> {
    vec![
        Benchmark::new("bench-1", "Small Local Chatbot", 20, 5),
        Benchmark::new("bench-2", "Basic Text Assistant", 50, 8),
        Benchmark::new("bench-3", "Multilingual Translator", 100, 10),
        Benchmark::new("bench-4", "Code Generator", 180, 12),
        Benchmark::new("bench-5", "Image Generator", 250, 15),
        Benchmark::new("bench-6", "Copilot Agent", 350, 18),
        Benchmark::new("bench-7", "Multimodal Assistant", 500, 20),
        Benchmark::new("bench-8", "MMLU - Human Knowledge", 750, 25),
        Benchmark::new("bench-9", "Artificial Consciousness", 1000, 30),
        Benchmark::new("bench-10", "AGI - Superintelligence", 1500, 50),
    ]
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum LadderError {
    #[error("benchmark ladder is empty")]
    Empty,
    #[error("benchmark {id} target {target} does not exceed previous target {previous}")]
    NotIncreasing {
        id: String,
        target: i64,
        previous: i64,
    },
    #[error("duplicate benchmark id {0}")]
    DuplicateId(String),
    #[error("invalid difficulty multiplier {0}")]
    InvalidScale(f64),
}

const GENERATED_PREFIX: &str = "Frontier Model";
const GROWTH: f64 = 1.5;

/// Ordered benchmark targets. Targets strictly increase along the ladder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BenchmarkLadder {
    steps: Vec<Benchmark>,
}

impl BenchmarkLadder {
    pub fn new(steps: Vec<Benchmark>) -> Result<Self, LadderError> {
        if steps.is_empty() {
            return Err(LadderError::Empty);
        }
        for (idx, step) in steps.iter().enumerate() {
            if steps[..idx].iter().any(|prev| prev.id == step.id) {
                return Err(LadderError::DuplicateId(step.id.clone()));
            }
            if let Some(prev) = idx.checked_sub(1).map(|p| &steps[p]) {
                if step.target_score <= prev.target_score {
                    return Err(LadderError::NotIncreasing {
                        id: step.id.clone(),
                        target: step.target_score,
                        previous: prev.target_score,
                    });
                }
            }
        }
        Ok(Self { steps })
    }

    pub fn standard() -> Self {
        Self {
            steps: standard_benchmarks(),
        }
    }

    pub fn steps(&self) -> &[Benchmark] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn first(&self) -> Benchmark {
        // `new` rejects empty ladders and `standard` is never empty.
        self.steps
            .first()
            .cloned()
            .unwrap_or_else(|| Benchmark::new("bench-1", GENERATED_PREFIX, 1, 0))
    }

    pub fn get(&self, id: &str) -> Option<&Benchmark> {
        self.steps.iter().find(|step| step.id == id)
    }

    /// The entry after `current_id`, or `None` when it is the last entry or
    /// not on the ladder at all.
    pub fn next_after(&self, current_id: &str) -> Option<Benchmark> {
        let idx = self.steps.iter().position(|step| step.id == current_id)?;
        self.steps.get(idx + 1).cloned()
    }

    pub fn is_last(&self, current_id: &str) -> bool {
        self.steps
            .last()
            .map(|step| step.id == current_id)
            .unwrap_or(false)
    }

    /// Continues past the fixed ladder: 1.5x target and reward, labelled
    /// A, B, ... Z, AA, AB, ...
    pub fn generate_after(previous: &Benchmark, index: usize) -> Benchmark {
        let target = (previous.target_score as f64 * GROWTH).floor() as i64;
        let reward = (previous.market_share_reward as f64 * GROWTH).floor() as i64;
        Benchmark {
            id: format!("bench-gen-{}", index + 1),
            name: format!("{GENERATED_PREFIX} {}", sequence_label(index)),
            target_score: target.max(previous.target_score + 1),
            market_share_reward: reward,
            completed: false,
        }
    }

    /// Every target multiplied by `factor`, rounded, at least 1.
    pub fn scaled(&self, factor: f64) -> Result<Self, LadderError> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(LadderError::InvalidScale(factor));
        }
        let steps = self
            .steps
            .iter()
            .map(|step| Benchmark {
                target_score: ((step.target_score as f64 * factor).round() as i64).max(1),
                ..step.clone()
            })
            .collect();
        Self::new(steps)
    }
}

pub fn sequence_label(mut index: usize) -> String {
    let mut label = Vec::new();
    loop {
        label.push(b'A' + (index % 26) as u8);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    label.reverse();
    String::from_utf8_lossy(&label).into_owned()
}
