//! Decision policies and a round runner.
//!
//! A policy sees only a [`PlayerView`] and the legal actions, and
//! returns one of them. Policies are interchangeable per seat.

pub mod runner;
pub mod strategies;

use crate::core::Action;
use crate::game::PlayerView;

pub use runner::{play_round, play_rounds};
pub use strategies::{LowestCardPolicy, RandomPolicy, ShapePreferencePolicy};

/// Chooses an action for the seat to act.
pub trait Policy: Send {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Pick one of `legal`. Returning anything else is treated by the
    /// engine as an illegal play and downgraded to a pass.
    fn choose(&mut self, view: &PlayerView<'_>, legal: &[Action]) -> Action;
}
