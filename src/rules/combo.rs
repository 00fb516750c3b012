//! Combination shapes and joker resolution.
//!
//! `resolve` turns a card multiset into a [`Combo`]: its shape plus one
//! [`Slot`] per card saying what each card counts as. Jokers receive a
//! substitution that lives only inside the returned value.
//!
//! ## Shapes
//!
//! - Single: one card.
//! - Group: 2-4 cards of one rank, jokers standing in for that rank.
//!   Two jokers alone form a group with no rank.
//! - Run: 3-5 cards of one suit on consecutive positions of the cycle
//!   `3, 4, …, K, A, 2`. The cycle does not wrap, so a 2 can end a run
//!   but never sit inside one. Jokers fill missing positions.
//!
//! A multiset that is both a valid group and a valid run (one natural
//! card plus two jokers) resolves as a group unless the caller asks for
//! a specific shape with [`resolve_as`].

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::strength::{rank_strength, Slot, WILD_STRENGTH};
use crate::cards::{Card, Rank, Suit};

pub const MIN_GROUP: usize = 2;
pub const MAX_GROUP: usize = 4;
pub const MIN_RUN: usize = 3;
pub const MAX_RUN: usize = 5;

/// Shape of a card multiset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shape {
    Single,
    Group,
    Run,
    Invalid,
}

/// A resolved combination.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combo {
    shape: Shape,
    slots: SmallVec<[Slot; 5]>,
    suit: Option<Suit>,
}

impl Combo {
    #[must_use]
    pub fn shape(&self) -> Shape {
        self.shape
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Slots in resolution order (ascending cycle position for runs).
    #[must_use]
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// The physical cards of the combination.
    pub fn cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.slots.iter().map(|s| s.card)
    }

    /// Suit of a run; `None` for other shapes and all-joker runs.
    #[must_use]
    pub fn suit(&self) -> Option<Suit> {
        self.suit
    }

    #[must_use]
    pub fn wildcard_count(&self) -> usize {
        self.slots.iter().filter(|s| s.card.is_joker()).count()
    }

    #[must_use]
    pub fn natural_count(&self) -> usize {
        self.len() - self.wildcard_count()
    }

    /// Whether any slot counts as `rank`, substitutions included.
    #[must_use]
    pub fn contains_rank(&self, rank: Rank) -> bool {
        self.slots.iter().any(|s| s.rank() == Some(rank))
    }

    /// Comparison strength in the given orientation.
    ///
    /// Singles use the card itself, groups their common rank, and runs
    /// their terminal card in the direction of play.
    #[must_use]
    pub fn strength(&self, inverted: bool) -> u8 {
        match self.shape {
            Shape::Single => self.slots[0].strength(inverted),
            Shape::Group => self
                .slots
                .iter()
                .find_map(Slot::rank)
                .map_or(WILD_STRENGTH, |rank| rank_strength(rank, inverted)),
            Shape::Run => self
                .slots
                .iter()
                .map(|s| s.strength(inverted))
                .max()
                .unwrap_or(WILD_STRENGTH),
            Shape::Invalid => 0,
        }
    }
}

/// Shape of `cards`, independent of orientation.
///
/// ```
/// use daifugo_engine::cards::parse_cards;
/// use daifugo_engine::rules::{classify, Shape};
///
/// assert_eq!(classify(&parse_cards("KS AS 2S").unwrap()), Shape::Run);
/// assert_eq!(classify(&parse_cards("AS 2S 3S").unwrap()), Shape::Invalid);
/// ```
#[must_use]
pub fn classify(cards: &[Card]) -> Shape {
    resolve(cards, false).map_or(Shape::Invalid, |combo| combo.shape)
}

/// Resolve `cards` into its preferred shape.
///
/// Where jokers could extend a run at either end, the window strongest
/// in the given orientation is chosen.
#[must_use]
pub fn resolve(cards: &[Card], inverted: bool) -> Option<Combo> {
    match cards.len() {
        0 => None,
        1 => resolve_single(cards),
        _ => resolve_group(cards).or_else(|| resolve_run(cards, inverted)),
    }
}

/// Resolve `cards` as exactly `shape`.
#[must_use]
pub fn resolve_as(cards: &[Card], shape: Shape, inverted: bool) -> Option<Combo> {
    match shape {
        Shape::Single => resolve_single(cards),
        Shape::Group => resolve_group(cards),
        Shape::Run => resolve_run(cards, inverted),
        Shape::Invalid => None,
    }
}

fn resolve_single(cards: &[Card]) -> Option<Combo> {
    match cards {
        [card] => Some(Combo {
            shape: Shape::Single,
            slots: SmallVec::from_elem(Slot::natural(*card), 1),
            suit: None,
        }),
        _ => None,
    }
}

fn resolve_group(cards: &[Card]) -> Option<Combo> {
    if !(MIN_GROUP..=MAX_GROUP).contains(&cards.len()) {
        return None;
    }

    let mut common: Option<Rank> = None;
    for rank in cards.iter().filter_map(|c| c.rank()) {
        match common {
            None => common = Some(rank),
            Some(r) if r != rank => return None,
            Some(_) => {}
        }
    }

    // Three or more jokers on their own read as a run.
    if common.is_none() && cards.len() > MIN_GROUP {
        return None;
    }

    let slots = cards
        .iter()
        .map(|&card| match (card, common) {
            (Card::Joker, Some(rank)) => Slot::substituted(rank, None),
            _ => Slot::natural(card),
        })
        .collect();

    Some(Combo {
        shape: Shape::Group,
        slots,
        suit: None,
    })
}

fn resolve_run(cards: &[Card], inverted: bool) -> Option<Combo> {
    if !(MIN_RUN..=MAX_RUN).contains(&cards.len()) {
        return None;
    }

    let mut suit: Option<Suit> = None;
    let mut positions: SmallVec<[u8; 5]> = SmallVec::new();
    for card in cards {
        if let Card::Standard { suit: s, rank } = *card {
            if suit.is_some_and(|existing| existing != s) {
                return None;
            }
            suit = Some(s);
            positions.push(rank.cycle_position());
        }
    }
    positions.sort_unstable();
    if positions.windows(2).any(|w| w[0] == w[1]) {
        return None;
    }

    let span = cards.len() as u8;
    let last_start = Rank::CYCLE_LEN - span;
    let (lo, hi) = match (positions.first(), positions.last()) {
        (Some(&min), Some(&max)) => ((max + 1).saturating_sub(span), min.min(last_start)),
        _ => (0, last_start),
    };
    if lo > hi {
        return None;
    }

    let start = if inverted { lo } else { hi };
    let slots = (start..start + span)
        .filter_map(|position| {
            let rank = Rank::from_cycle_position(position)?;
            Some(match suit {
                Some(s) if positions.contains(&position) => Slot::natural(Card::new(s, rank)),
                _ => Slot::substituted(rank, suit),
            })
        })
        .collect();

    Some(Combo {
        shape: Shape::Run,
        slots,
        suit,
    })
}
