//! Core game logic. Keep this crate free of IO and platform concerns.

pub mod benchmarks;
pub mod cards;
pub mod config;
pub mod content;
pub mod deck;
pub mod events;
pub mod rng;
pub mod run;
pub mod scoring;
pub mod shared;
pub mod shop;
pub mod state;

pub use benchmarks::*;
pub use cards::*;
pub use config::*;
pub use content::*;
pub use deck::*;
pub use events::*;
pub use rng::*;
pub use run::*;
pub use scoring::*;
pub use shared::*;
pub use shop::*;
pub use state::*;
