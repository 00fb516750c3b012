//! Built-in decision policies.
//!
//! - `RandomPolicy`: uniform over the legal actions
//! - `LowestCardPolicy`: sheds the weakest play available
//! - `ShapePreferencePolicy`: prefers runs, then groups, then singles

use std::cmp::Reverse;

use super::Policy;
use crate::cards::Card;
use crate::core::{Action, GameRng, GameRngState};
use crate::game::PlayerView;
use crate::rules::{resolve, resolve_as, Shape};

// =============================================================================
// Random
// =============================================================================

/// Picks uniformly among the legal actions, pass included.
#[derive(Clone, Debug)]
pub struct RandomPolicy {
    rng: GameRng,
}

impl RandomPolicy {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
        }
    }

    /// Capture the policy's random stream.
    #[must_use]
    pub fn checkpoint(&self) -> GameRngState {
        self.rng.state()
    }

    /// Continue from a stream captured with [`RandomPolicy::checkpoint`].
    #[must_use]
    pub fn resume(state: &GameRngState) -> Self {
        Self {
            rng: GameRng::from_state(state),
        }
    }
}

impl Policy for RandomPolicy {
    fn name(&self) -> &'static str {
        "random"
    }

    fn choose(&mut self, _view: &PlayerView<'_>, legal: &[Action]) -> Action {
        self.rng.choose(legal).cloned().unwrap_or(Action::Pass)
    }
}

// =============================================================================
// Lowest card
// =============================================================================

/// Plays the weakest legal play in the current orientation.
///
/// Ties go to the longer play, so pairs are shed before breaking them.
/// Passes only when nothing else is legal.
#[derive(Clone, Copy, Debug, Default)]
pub struct LowestCardPolicy;

impl Policy for LowestCardPolicy {
    fn name(&self) -> &'static str {
        "lowest-card"
    }

    fn choose(&mut self, view: &PlayerView<'_>, legal: &[Action]) -> Action {
        legal
            .iter()
            .filter(|action| !action.is_pass())
            .min_by_key(|action| {
                let cards = action.cards();
                (play_strength(cards, view), Reverse(cards.len()))
            })
            .cloned()
            .unwrap_or(Action::Pass)
    }
}

/// Strength of `cards` read in the table's shape when a trick is live.
fn play_strength(cards: &[Card], view: &PlayerView<'_>) -> u8 {
    let combo = match view.on_table {
        Some(on_table) => resolve_as(cards, on_table.shape(), view.inverted),
        None => resolve(cards, view.inverted),
    };
    combo.map_or(u8::MAX, |combo| combo.strength(view.inverted))
}

// =============================================================================
// Shape preference
// =============================================================================

/// Preference classes, best first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Preference {
    Run,
    Group,
    NaturalSingle,
    JokerSingle,
}

/// Prefers runs, then groups, then non-joker singles, then a lone joker.
///
/// Chooses at random within the best class present; passes only when
/// forced.
#[derive(Clone, Debug)]
pub struct ShapePreferencePolicy {
    rng: GameRng,
}

impl ShapePreferencePolicy {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
        }
    }
}

impl Policy for ShapePreferencePolicy {
    fn name(&self) -> &'static str {
        "shape-preference"
    }

    fn choose(&mut self, view: &PlayerView<'_>, legal: &[Action]) -> Action {
        let classified: Vec<(Preference, &Action)> = legal
            .iter()
            .filter_map(|action| preference(action, view).map(|class| (class, action)))
            .collect();
        let Some(best) = classified.iter().map(|(class, _)| *class).min() else {
            return Action::Pass;
        };
        let candidates: Vec<&Action> = classified
            .into_iter()
            .filter(|(class, _)| *class == best)
            .map(|(_, action)| action)
            .collect();
        self.rng
            .choose(&candidates)
            .map_or(Action::Pass, |&action| action.clone())
    }
}

fn preference(action: &Action, view: &PlayerView<'_>) -> Option<Preference> {
    let cards = action.cards();
    if cards.is_empty() {
        return None;
    }
    // A live table fixes the shape of every legal answer.
    let shape = match view.on_table {
        Some(combo) => combo.shape(),
        None => resolve(cards, view.inverted)?.shape(),
    };
    match shape {
        Shape::Run => Some(Preference::Run),
        Shape::Group => Some(Preference::Group),
        Shape::Single if cards[0].is_joker() => Some(Preference::JokerSingle),
        Shape::Single => Some(Preference::NaturalSingle),
        Shape::Invalid => None,
    }
}
