//! Deck construction, shuffling and dealing.

use serde::{Deserialize, Serialize};

use super::card::{Card, Rank, Suit};
use crate::core::{GameRng, PlayerId, PlayerMap};

/// Supported deck compositions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeckVariant {
    /// 52 standard cards plus one joker.
    OneJoker,
    /// 52 standard cards plus two jokers.
    #[default]
    TwoJokers,
}

impl DeckVariant {
    #[must_use]
    pub const fn joker_count(self) -> usize {
        match self {
            DeckVariant::OneJoker => 1,
            DeckVariant::TwoJokers => 2,
        }
    }

    #[must_use]
    pub const fn size(self) -> usize {
        52 + self.joker_count()
    }
}

/// An ordered deck; the top is the front.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Build an unshuffled deck in canonical order.
    #[must_use]
    pub fn new(variant: DeckVariant) -> Self {
        let mut cards: Vec<Card> = Suit::ALL
            .iter()
            .flat_map(|&suit| Rank::all().map(move |rank| Card::new(suit, rank)))
            .collect();
        cards.extend(std::iter::repeat(Card::Joker).take(variant.joker_count()));
        Self { cards }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(&mut self.cards);
    }

    /// Deal every card round-robin from seat 0.
    ///
    /// When the deck does not divide evenly, lower seats receive one
    /// extra card. Each hand is returned in canonical order.
    #[must_use]
    pub fn deal(self, player_count: usize) -> PlayerMap<Vec<Card>> {
        let mut hands: PlayerMap<Vec<Card>> = PlayerMap::with_default(player_count);
        for (i, card) in self.cards.into_iter().enumerate() {
            hands[PlayerId::new((i % player_count) as u8)].push(card);
        }
        for hand in hands.values_mut() {
            hand.sort_unstable();
        }
        hands
    }
}
