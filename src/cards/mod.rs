//! Card model: suits, ranks, jokers, and the deck.

pub mod card;
pub mod deck;

pub use card::{parse_cards, Card, Rank, Suit};
pub use deck::{Deck, DeckVariant};
