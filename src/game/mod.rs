//! Round state, the turn engine, the step log and player views.

pub mod engine;
pub mod log;
pub mod state;
pub mod view;

pub use engine::{StepOutcome, TurnEngine};
pub use log::{PassReason, Resolution, StepLog, StepRecord};
pub use state::{holds_all, GameState, Phase, Table};
pub use view::{encode_card, Observation, PlayerView, EMPTY_CODE, HAND_SLOTS, JOKER_CODE, TABLE_SLOTS};
