//! Strength model.
//!
//! Normal orientation: 3 is weakest, then 4 … K, A, and 2 is the
//! strongest rank. Inversion reverses the rank order. An un-substituted
//! joker sits above every rank in both orientations; a joker standing in
//! for a rank takes that rank's strength.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Rank, Suit};

/// Strength of an un-substituted joker.
pub const WILD_STRENGTH: u8 = 13;

/// Strength of a rank in the given orientation (0..=12).
///
/// ```
/// use daifugo_engine::cards::Rank;
/// use daifugo_engine::rules::rank_strength;
///
/// assert!(rank_strength(Rank::TWO, false) > rank_strength(Rank::ACE, false));
/// assert!(rank_strength(Rank::THREE, true) > rank_strength(Rank::TWO, true));
/// ```
#[must_use]
pub const fn rank_strength(rank: Rank, inverted: bool) -> u8 {
    let position = rank.cycle_position();
    if inverted {
        Rank::CYCLE_LEN - 1 - position
    } else {
        position
    }
}

/// Strength of a card played on its own.
#[must_use]
pub const fn strength(card: Card, inverted: bool) -> u8 {
    match card {
        Card::Standard { rank, .. } => rank_strength(rank, inverted),
        Card::Joker => WILD_STRENGTH,
    }
}

/// What a joker stands for inside one combination.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Substitution {
    pub rank: Rank,
    /// Fixed for run members; groups only pin the rank.
    pub suit: Option<Suit>,
}

/// A card as it participates in one resolved combination.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slot {
    pub card: Card,
    pub substitution: Option<Substitution>,
}

impl Slot {
    /// A card standing for itself.
    #[must_use]
    pub const fn natural(card: Card) -> Self {
        Self {
            card,
            substitution: None,
        }
    }

    /// A joker standing in for `rank` (and `suit`, for runs).
    #[must_use]
    pub const fn substituted(rank: Rank, suit: Option<Suit>) -> Self {
        Self {
            card: Card::Joker,
            substitution: Some(Substitution { rank, suit }),
        }
    }

    /// The rank this slot counts as; `None` for an un-substituted joker.
    #[must_use]
    pub fn rank(&self) -> Option<Rank> {
        self.card
            .rank()
            .or_else(|| self.substitution.map(|s| s.rank))
    }

    /// True for a joker that is not standing in for anything.
    #[must_use]
    pub fn is_wild(&self) -> bool {
        self.card.is_joker() && self.substitution.is_none()
    }

    #[must_use]
    pub fn strength(&self, inverted: bool) -> u8 {
        match self.rank() {
            Some(rank) => rank_strength(rank, inverted),
            None => WILD_STRENGTH,
        }
    }
}

/// Compare two slots under the given orientation.
///
/// A lone un-substituted joker beats anything that is not itself one.
#[must_use]
pub fn compare(a: &Slot, b: &Slot, inverted: bool) -> Ordering {
    match (a.is_wild(), b.is_wild()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.strength(inverted).cmp(&b.strength(inverted)),
    }
}
