//! Legal-action generator.
//!
//! Given a hand, the table and the orientation, enumerate every play the
//! rule engine would accept, deduplicated as card multisets, plus pass.

pub mod generator;

pub use generator::{has_playable, legal_actions, legal_actions_against};
