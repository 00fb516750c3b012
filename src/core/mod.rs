//! Core engine types: seats, actions, RNG, configuration, errors.

pub mod action;
pub mod config;
pub mod error;
pub mod player;
pub mod rng;

pub use action::{Action, Play};
pub use config::{RulesConfig, WildcardClearRule, MAX_PLAYERS, MIN_PLAYERS};
pub use error::EngineError;
pub use player::{PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState};
