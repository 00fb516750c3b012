//! Player actions: play a card multiset, or pass.
//!
//! A play is a multiset of cards; the order in which the cards are
//! listed carries no meaning. Plays produced by the legal-action
//! generator are sorted canonically so equal multisets compare equal.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::Card;

/// Cards of a single play. Legal plays hold at most five cards.
pub type Play = SmallVec<[Card; 5]>;

/// A player's action for one step.
///
/// ```
/// use daifugo_engine::cards::parse_cards;
/// use daifugo_engine::core::Action;
///
/// let play = Action::play(&parse_cards("5S 5H").unwrap());
/// assert_eq!(play.cards().len(), 2);
/// assert!(Action::Pass.is_pass());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Decline to play this turn.
    Pass,
    /// Play these cards from hand.
    Play(Play),
}

impl Action {
    /// A play of the given cards, in canonical order.
    #[must_use]
    pub fn play(cards: &[Card]) -> Self {
        let mut play = Play::from_slice(cards);
        play.sort_unstable();
        Action::Play(play)
    }

    #[must_use]
    pub fn is_pass(&self) -> bool {
        matches!(self, Action::Pass)
    }

    /// Cards of the play; empty for a pass.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        match self {
            Action::Pass => &[],
            Action::Play(cards) => cards,
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Pass => f.write_str("pass"),
            Action::Play(cards) => {
                let names: Vec<String> = cards.iter().map(ToString::to_string).collect();
                write!(f, "[{}]", names.join(" "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    #[test]
    fn test_play_is_order_independent() {
        let a = Action::play(&parse_cards("7S 7H JK").unwrap());
        let b = Action::play(&parse_cards("JK 7H 7S").unwrap());
        assert_eq!(a, b);
    }

    #[test]
    fn test_pass_has_no_cards() {
        assert!(Action::Pass.cards().is_empty());
        assert!(!Action::play(&[Card::Joker]).is_pass());
    }

    #[test]
    fn test_display() {
        let play = Action::play(&parse_cards("QS KS AS").unwrap());
        assert_eq!(play.to_string(), "[A♠ Q♠ K♠]");
        assert_eq!(Action::Pass.to_string(), "pass");
    }
}
