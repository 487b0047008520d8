use serde::{Deserialize, Serialize};

pub type CardId = u32;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Legendary,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CardCategory {
    Product,
    Api,
    Feature,
}

fn default_play_cost() -> u32 {
    1
}

/// A playable card. Every copy carries its own id, even when two copies
/// come from the same catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Card {
    pub id: CardId,
    pub name: String,
    pub category: CardCategory,
    pub rarity: Rarity,
    pub base_chips: i64,
    pub base_multiplier: f64,
    pub description: String,
    #[serde(default = "default_play_cost")]
    pub play_cost: u32,
}

impl Card {
    /// Multiplier added to the running total when this card is played.
    pub fn multiplier_delta(&self) -> f64 {
        self.base_multiplier - 1.0
    }
}

/// Catalog entry from which cards are stamped out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardTemplate {
    pub name: &'static str,
    pub category: CardCategory,
    pub rarity: Rarity,
    pub base_chips: i64,
    pub base_multiplier: f64,
    pub play_cost: u32,
    pub description: &'static str,
}

impl CardTemplate {
    pub fn instantiate(&self, id: CardId) -> Card {
        Card {
            id,
            name: self.name.to_string(),
            category: self.category,
            rarity: self.rarity,
            base_chips: self.base_chips,
            base_multiplier: self.base_multiplier,
            description: self.description.to_string(),
            play_cost: self.play_cost.max(1),
        }
    }
}

const fn card(
    name: &'static str,
    category: CardCategory,
    rarity: Rarity,
    base_chips: i64,
    base_multiplier: f64,
    play_cost: u32,
    description: &'static str,
) -> CardTemplate {
    CardTemplate {
        name,
        category,
        rarity,
        base_chips,
        base_multiplier,
        play_cost,
        description,
    }
}

use CardCategory::{Api, Feature, Product};
use Rarity::{Common, Legendary, Rare, Uncommon};

// Products lean on chips.
pub const PRODUCT_CARDS: &[CardTemplate] = &[
    card("Basic Chatbot", Product, Common, 3, 1.0, 1, "A simple chat model with basic capabilities."),
    card("Text Assistant", Product, Common, 4, 1.0, 1, "Answers simple questions about a text."),
    card("Simple Classifier", Product, Common, 5, 1.0, 1, "Sorts text into predefined categories."),
    card("Text Generator", Product, Uncommon, 8, 1.1, 1, "Writes creative text from a prompt."),
    card("Personal Assistant", Product, Uncommon, 10, 1.1, 1, "Virtual assistant for daily tasks."),
    card("Code Copilot", Product, Rare, 15, 1.2, 1, "Programming assistant that suggests code."),
    card("Image Generator", Product, Rare, 20, 1.2, 1, "Creates realistic images from descriptions."),
    card("Autonomous Agent", Product, Legendary, 30, 1.5, 2, "Runs complex tasks without supervision."),
];

// APIs lean on the multiplier.
pub const API_CARDS: &[CardTemplate] = &[
    card("Completion API", Api, Common, 1, 1.3, 1, "Basic text completion endpoint."),
    card("Summary API", Api, Common, 1, 1.4, 1, "Summarizes long documents."),
    card("Embeddings API", Api, Uncommon, 2, 1.7, 1, "Turns text into vectors for semantic search."),
    card("Analysis API", Api, Uncommon, 2, 1.8, 1, "Extracts sentiment and key facts."),
    card("Multimodal API", Api, Rare, 3, 2.2, 1, "Text, images and audio behind one endpoint."),
    card("Universal API", Api, Legendary, 5, 3.0, 1, "One API to rule them all."),
];

// Features balance both.
pub const FEATURE_CARDS: &[CardTemplate] = &[
    card("Basic Moderation", Feature, Common, 2, 1.2, 1, "Filters basic inappropriate content."),
    card("Simple Instructions", Feature, Common, 3, 1.1, 1, "Lets users give the model plain instructions."),
    card("Conversation Memory", Feature, Uncommon, 5, 1.4, 1, "The model remembers earlier turns."),
    card("Internet Access", Feature, Uncommon, 6, 1.5, 1, "Gives the model fresh information."),
    card("Adaptive Personality", Feature, Rare, 10, 1.8, 1, "Adjusts tone to the context."),
    card("Advanced Safety", Feature, Rare, 8, 2.0, 1, "Blocks malicious use."),
    card("Advanced Reasoning", Feature, Legendary, 15, 2.5, 1, "Works through hard problems step by step."),
];

pub const TEAM_CARDS: &[CardTemplate] = &[
    card("Junior Dev", Product, Common, 6, 1.0, 1, "Little experience, lots of drive."),
    card("Senior Dev", Product, Uncommon, 12, 1.2, 1, "Ships quality code."),
    card("Tech Lead", Product, Rare, 18, 1.5, 1, "Leads the team through hard problems."),
    card("Full-stack Architect", Product, Legendary, 25, 2.0, 2, "Knows every layer of the product."),
    card("Product Owner", Feature, Common, 4, 1.3, 1, "Prioritizes the backlog."),
    card("Scrum Master", Feature, Uncommon, 6, 1.6, 1, "Removes impediments."),
    card("Product Manager", Feature, Rare, 10, 1.9, 1, "Owns the product vision."),
    card("Chief Product Officer", Feature, Legendary, 15, 2.4, 1, "Coordinates every product line."),
];

pub const SPECIAL_CARDS: &[CardTemplate] = &[
    card("DevOps LLM", Feature, Rare, 12, 2.2, 1, "Automates the whole delivery pipeline."),
    card("Enterprise Suite", Product, Rare, 18, 1.5, 1, "A bundle of business products."),
    card("API Gateway", Api, Rare, 4, 2.5, 1, "Routes every integration through one door."),
    card("General AI", Product, Legendary, 50, 2.0, 2, "Solves any intellectual problem."),
    card("Parallel Inference", Api, Legendary, 10, 4.0, 1, "Massively parallel serving."),
    card("Zero Hallucination", Feature, Legendary, 25, 3.0, 1, "Every answer is accurate."),
    card("Agile Team", Feature, Rare, 15, 2.0, 1, "Devs and owners in lockstep."),
    card("Pair Programming", Product, Uncommon, 14, 1.5, 1, "Two devs, one keyboard."),
    card("Planning Poker", Feature, Uncommon, 8, 1.6, 1, "Estimates the effort of each task."),
    card("Coffee for the Devs", Feature, Uncommon, 7, 1.7, 1, "Caffeine for the model builders."),
    card("Prompt Engineering 101", Feature, Uncommon, 5, 1.9, 1, "A primer on better instructions."),
];

pub fn card_catalog() -> impl Iterator<Item = &'static CardTemplate> {
    PRODUCT_CARDS
        .iter()
        .chain(API_CARDS)
        .chain(FEATURE_CARDS)
        .chain(TEAM_CARDS)
        .chain(SPECIAL_CARDS)
}

/// Hands out fresh ids for every generated card and joker copy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IdAllocator {
    next: u32,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl IdAllocator {
    pub fn alloc(&mut self) -> u32 {
        let id = self.next;
        self.next = self.next.saturating_add(1);
        id
    }

    pub fn peek(&self) -> u32 {
        self.next
    }
}
