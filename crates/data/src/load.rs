use anyhow::{bail, Context};
use scalatro_core::{BenchmarkLadder, GameConfig, MAX_HAND_SIZE};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "game.json";

/// Parses a config; fields missing from `raw` keep their standard values.
pub fn parse_game_config(raw: &str) -> anyhow::Result<GameConfig> {
    let config: GameConfig = serde_json::from_str(raw).context("parse game config")?;
    validate_config(&config)?;
    Ok(config)
}

/// Loads a config from a JSON file, or from `game.json` when `path` is a
/// directory.
pub fn load_game_config(path: &Path) -> anyhow::Result<GameConfig> {
    let file = if path.is_dir() {
        path.join(DEFAULT_CONFIG_FILE)
    } else {
        path.to_path_buf()
    };
    let config: GameConfig = load_json(&file)?;
    validate_config(&config).with_context(|| format!("validate {}", file.display()))?;
    log::debug!(
        "loaded {} with {} benchmarks",
        file.display(),
        config.benchmarks.len()
    );
    Ok(config)
}

pub fn validate_config(config: &GameConfig) -> anyhow::Result<()> {
    BenchmarkLadder::new(config.benchmarks.clone()).context("invalid benchmark ladder")?;
    if !(1..=MAX_HAND_SIZE).contains(&config.hand_limit) {
        bail!(
            "hand_limit {} outside 1..={MAX_HAND_SIZE}",
            config.hand_limit
        );
    }
    if config.base_play_slots == 0 {
        bail!("base_play_slots must be at least 1");
    }
    if !(0..=scalatro_core::MAX_MARKET_SHARE).contains(&config.starting_market_share) {
        bail!(
            "starting_market_share {} outside 0..={}",
            config.starting_market_share,
            scalatro_core::MAX_MARKET_SHARE
        );
    }
    if config.starting_money < 0 {
        bail!("starting_money cannot be negative");
    }
    if config.penalty.min_penalty < 0 || config.penalty.shortfall_scale < 0 {
        bail!("penalty values cannot be negative");
    }
    let shop = &config.shop;
    if shop.rounds_per_tier == 0 || shop.max_tier == 0 {
        bail!("shop tiers need rounds_per_tier and max_tier of at least 1");
    }
    if shop.base_offers == 0 {
        bail!("shop must offer at least one joker");
    }
    if !shop.price_step.is_finite() || shop.price_step < 0.0 {
        bail!("shop price_step {} is invalid", shop.price_step);
    }
    let valid = |value: f64| value.is_finite() && (0.0..=1.0).contains(&value);
    for odds in &shop.rarity_odds {
        if !valid(odds.step) || !valid(odds.cap) {
            bail!("rarity odds for {:?} must lie in 0..=1", odds.rarity);
        }
    }
    Ok(())
}

fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> anyhow::Result<T> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let value = serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(value)
}
