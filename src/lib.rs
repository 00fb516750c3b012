//! # daifugo-engine
//!
//! Rule validation and turn progression for Daifugo-style climbing card
//! games, built for simulation and self-play.
//!
//! ## Design Principles
//!
//! 1. **Pure rules**: The rule engine and the legal-action generator are
//!    functions of the hand, the table and the orientation. Orientation is
//!    always an explicit parameter, never hidden state.
//!
//! 2. **Total steps**: Every action produces a next state. Illegal plays
//!    become passes with a recorded reason; only invariant violations
//!    (unknown seat, acting out of turn, stepping a finished round) are
//!    errors.
//!
//! 3. **Configuration Over Convention**: Rule variants that differ between
//!    tables (deck, clearing rank, joker-clear lead, house rules) live in
//!    `RulesConfig`.
//!
//! ## Architecture
//!
//! - **Transient joker substitution**: Resolving a combination returns a
//!   `Combo` with per-card slots; cards themselves are never mutated.
//!
//! - **Persistent step log**: Each step appends an immutable record to an
//!   `im::Vector`, so cloning a `GameState` stays cheap.
//!
//! - **Deterministic deals**: Shuffles come from a seeded ChaCha8 stream.
//!
//! ## Modules
//!
//! - `core`: Players, actions, RNG, configuration, errors
//! - `cards`: Suits, ranks, jokers and the deck
//! - `rules`: Strength, combination resolution, move validation, exchange
//! - `legal`: Legal-action enumeration
//! - `game`: Round state, the turn engine, the step log, player views
//! - `policy`: Decision policies and a round runner
//!
//! ## Example
//!
//! ```
//! use daifugo_engine::{Action, RulesConfig, TurnEngine};
//!
//! let engine = TurnEngine::new(RulesConfig::default()).unwrap();
//! let mut state = engine.new_round(4, 7, None).unwrap();
//!
//! let player = state.turn();
//! let legal = engine.legal_actions(&state).unwrap();
//! assert_eq!(legal.last(), Some(&Action::Pass));
//!
//! let outcome = engine.step(&mut state, player, &legal[0]).unwrap();
//! assert!(!outcome.round_over);
//! ```

pub mod cards;
pub mod core;
pub mod game;
pub mod legal;
pub mod policy;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    Action, EngineError, GameRng, GameRngState, Play, PlayerId, PlayerMap, RulesConfig,
    WildcardClearRule,
};

pub use crate::cards::{parse_cards, Card, Deck, DeckVariant, Rank, Suit};

pub use crate::rules::{
    check_against, check_move, classify, is_valid_move, resolve, triggers_inversion,
    triggers_table_clear, Combo, Rejection, Shape, TableClear,
};

pub use crate::legal::{legal_actions, legal_actions_against};

pub use crate::game::{
    GameState, Observation, PassReason, Phase, PlayerView, Resolution, StepLog, StepOutcome,
    StepRecord, TurnEngine,
};

pub use crate::policy::{
    play_round, play_rounds, LowestCardPolicy, Policy, RandomPolicy, ShapePreferencePolicy,
};
