//! Loading and validation of game rules from JSON.

pub mod load;

pub use load::*;
