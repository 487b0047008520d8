//! Seeded headless autoplay over the core run API.

mod config;
mod error;
mod objective;
mod policy;
mod simulator;
mod trace;

pub use config::*;
pub use error::*;
pub use objective::*;
pub use policy::*;
pub use simulator::*;
pub use trace::*;
