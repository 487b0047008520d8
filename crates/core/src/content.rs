use crate::Rarity;
use serde::{Deserialize, Serialize};

pub type JokerId = u32;

/// Behaviour tags a joker carries beyond its flat bonuses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SpecialEffect {
    ExtraPlaySlot,
    ExtraDiscardSlot,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Joker {
    pub id: JokerId,
    pub name: String,
    pub rarity: Rarity,
    pub cost: i64,
    pub chip_bonus: i64,
    /// Added to the multiplier, so 0.0 is neutral.
    pub multiplier_bonus: f64,
    pub description: String,
    #[serde(default)]
    pub special_effects: Vec<SpecialEffect>,
}

impl Joker {
    pub fn has_effect(&self, effect: SpecialEffect) -> bool {
        self.special_effects.contains(&effect)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JokerDef {
    pub name: &'static str,
    pub rarity: Rarity,
    pub cost: i64,
    pub chip_bonus: i64,
    pub multiplier_bonus: f64,
    pub special_effects: &'static [SpecialEffect],
    pub description: &'static str,
}

impl JokerDef {
    pub fn instantiate(&self, id: JokerId) -> Joker {
        Joker {
            id,
            name: self.name.to_string(),
            rarity: self.rarity,
            cost: self.cost,
            chip_bonus: self.chip_bonus,
            multiplier_bonus: self.multiplier_bonus,
            description: self.description.to_string(),
            special_effects: self.special_effects.to_vec(),
        }
    }

    pub fn is_special(&self) -> bool {
        !self.special_effects.is_empty()
    }
}

const fn joker(
    name: &'static str,
    rarity: Rarity,
    cost: i64,
    chip_bonus: i64,
    multiplier_bonus: f64,
    special_effects: &'static [SpecialEffect],
    description: &'static str,
) -> JokerDef {
    JokerDef {
        name,
        rarity,
        cost,
        chip_bonus,
        multiplier_bonus,
        special_effects,
        description,
    }
}

use Rarity::{Common, Legendary, Rare, Uncommon};
use SpecialEffect::{ExtraDiscardSlot, ExtraPlaySlot};

const NONE: &[SpecialEffect] = &[];

pub const JOKER_CATALOG: &[JokerDef] = &[
    // Compute: mostly chips.
    joker("NVIDIA T4", Common, 50, 5, 0.1, NONE, "Entry-level inference GPU."),
    joker("AMD Radeon Pro", Common, 60, 7, 0.0, NONE, "Mid-range training GPU."),
    joker("NVIDIA RTX 3090", Uncommon, 120, 12, 0.2, NONE, "Solid training and inference card."),
    joker("NVIDIA A100", Rare, 200, 25, 0.3, NONE, "Professional GPU for large models."),
    joker("NVIDIA H100", Legendary, 350, 40, 0.5, NONE, "The most advanced AI accelerator."),
    joker("GPU Farm", Legendary, 500, 75, 0.2, NONE, "A whole data center of GPUs."),
    // Data: mostly multiplier.
    joker("Public Web Data", Common, 40, 2, 0.3, NONE, "Scraped public data."),
    joker("Curated Dataset", Common, 65, 3, 0.4, NONE, "Clean, labelled data."),
    joker("User Data", Uncommon, 130, 5, 0.8, NONE, "Behavioural data from real users."),
    joker("Enterprise Data", Rare, 220, 8, 1.2, NONE, "Valuable business records."),
    joker("Complete Internet", Legendary, 380, 15, 2.0, NONE, "An indexed copy of the web."),
    // Training: balanced.
    joker("Basic Fine-tuning", Common, 45, 4, 0.2, NONE, "Small gains on both fronts."),
    joker("LoRA Strategy", Uncommon, 90, 8, 0.5, NONE, "Low-rank adaptation."),
    joker("Distributed Training", Rare, 180, 15, 0.7, NONE, "Training across many nodes."),
    joker("Advanced RLHF", Legendary, 400, 30, 1.5, NONE, "Learning from human feedback."),
    // Trade-offs.
    joker("Inference Optimization", Uncommon, 100, 0, 1.0, NONE, "Faster serving, same model."),
    joker("Quantum Computing", Rare, 250, 10, 2.0, NONE, "Experimental qubits."),
    joker("Neural Compression", Rare, 200, -5, 3.0, NONE, "Less raw power, far more leverage."),
    joker("Neuromorphic Networks", Rare, 230, 40, -0.2, NONE, "Huge chips, weaker multiplier."),
    joker("Aluminum Foil", Legendary, 150, -10, 6.0, NONE, "Keeps the alien signals out."),
    joker("Donation to OpenAI", Legendary, 777, 77, 6.7, NONE, "Lucky sevens."),
    // Team: extra per-turn slots.
    joker("Backlog Grooming", Common, 70, 2, 0.0, &[ExtraDiscardSlot], "One more discard every turn."),
    joker("Scrum Master", Uncommon, 110, 0, 0.2, &[ExtraPlaySlot], "One more story point every turn."),
    joker("Agile Coach", Rare, 260, 5, 0.3, &[ExtraPlaySlot, ExtraDiscardSlot], "One more play and discard every turn."),
    joker("Platform Team", Legendary, 420, 20, 0.5, &[ExtraPlaySlot], "A team that ships for the team."),
];

pub fn jokers_of_rarity(rarity: Rarity) -> impl Iterator<Item = &'static JokerDef> {
    JOKER_CATALOG.iter().filter(move |def| def.rarity == rarity)
}

pub fn special_jokers() -> impl Iterator<Item = &'static JokerDef> {
    JOKER_CATALOG.iter().filter(|def| def.is_special())
}

pub fn joker_def(name: &str) -> Option<&'static JokerDef> {
    JOKER_CATALOG.iter().find(|def| def.name == name)
}
