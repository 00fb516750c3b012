//! Card identity: suit, rank, or joker.
//!
//! Identity is structural. Two jokers are the same card for every rule
//! purpose; what a joker stands for inside a combination is resolved by
//! the rules module and never stored on the card.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::EngineError;

/// One of the four French suits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

impl Suit {
    /// All suits, in canonical order.
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

    /// Canonical index (♠0 ♥1 ♦2 ♣3).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Suit::Spades => '♠',
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
        }
    }

    fn from_char(c: char) -> Option<Self> {
        match c {
            '♠' | 'S' | 's' => Some(Suit::Spades),
            '♥' | 'H' | 'h' => Some(Suit::Hearts),
            '♦' | 'D' | 'd' => Some(Suit::Diamonds),
            '♣' | 'C' | 'c' => Some(Suit::Clubs),
            _ => None,
        }
    }
}

/// Face rank, 1 (ace) through 13 (king).
///
/// The derived ordering is by face value and is only used for canonical
/// sorting. Play strength comes from [`Rank::cycle_position`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Rank(u8);

impl Rank {
    pub const ACE: Rank = Rank(1);
    pub const TWO: Rank = Rank(2);
    pub const THREE: Rank = Rank(3);
    pub const EIGHT: Rank = Rank(8);
    pub const JACK: Rank = Rank(11);
    pub const QUEEN: Rank = Rank(12);
    pub const KING: Rank = Rank(13);

    /// Number of positions in the rank cycle.
    pub const CYCLE_LEN: u8 = 13;

    /// Create a rank from its face value (1..=13).
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value >= 1 && value <= 13 {
            Some(Self(value))
        } else {
            None
        }
    }

    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Position in the climbing cycle `3, 4, …, K, A, 2`.
    ///
    /// ```
    /// use daifugo_engine::cards::Rank;
    ///
    /// assert_eq!(Rank::THREE.cycle_position(), 0);
    /// assert_eq!(Rank::KING.cycle_position(), 10);
    /// assert_eq!(Rank::ACE.cycle_position(), 11);
    /// assert_eq!(Rank::TWO.cycle_position(), 12);
    /// ```
    #[must_use]
    pub const fn cycle_position(self) -> u8 {
        (self.0 + 10) % 13
    }

    /// Inverse of [`Rank::cycle_position`].
    #[must_use]
    pub const fn from_cycle_position(position: u8) -> Option<Self> {
        if position < Self::CYCLE_LEN {
            Some(Self((position + 2) % 13 + 1))
        } else {
            None
        }
    }

    /// All ranks by face value.
    pub fn all() -> impl Iterator<Item = Rank> {
        (1..=13).map(Rank)
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            1 => f.write_str("A"),
            11 => f.write_str("J"),
            12 => f.write_str("Q"),
            13 => f.write_str("K"),
            n => write!(f, "{n}"),
        }
    }
}

impl FromStr for Rank {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = match s {
            "A" | "a" => 1,
            "J" | "j" => 11,
            "Q" | "q" => 12,
            "K" | "k" => 13,
            other => other.parse().unwrap_or(0),
        };
        Rank::new(value).ok_or_else(|| EngineError::InvalidCard(s.to_string()))
    }
}

/// A playing card.
///
/// The derived ordering (suit, then face value, jokers last) is the
/// canonical order used to sort hands and compare card multisets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Card {
    Standard { suit: Suit, rank: Rank },
    Joker,
}

impl Card {
    #[must_use]
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Card::Standard { suit, rank }
    }

    #[must_use]
    pub const fn is_joker(self) -> bool {
        matches!(self, Card::Joker)
    }

    #[must_use]
    pub const fn rank(self) -> Option<Rank> {
        match self {
            Card::Standard { rank, .. } => Some(rank),
            Card::Joker => None,
        }
    }

    #[must_use]
    pub const fn suit(self) -> Option<Suit> {
        match self {
            Card::Standard { suit, .. } => Some(suit),
            Card::Joker => None,
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Card::Standard { suit, rank } => write!(f, "{rank}{}", suit.symbol()),
            Card::Joker => f.write_str("JOKER"),
        }
    }
}

/// Parses `"10♦"`, `"AS"`, `"qh"`, `"JOKER"` or `"JK"`.
impl FromStr for Card {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if text.eq_ignore_ascii_case("joker") || text.eq_ignore_ascii_case("jk") {
            return Ok(Card::Joker);
        }

        let invalid = || EngineError::InvalidCard(s.to_string());
        let suit_char = text.chars().last().ok_or_else(invalid)?;
        let suit = Suit::from_char(suit_char).ok_or_else(invalid)?;
        let rank_text = &text[..text.len() - suit_char.len_utf8()];
        let rank = rank_text.parse::<Rank>().map_err(|_| invalid())?;
        Ok(Card::new(suit, rank))
    }
}

/// Parse a whitespace-separated list of cards.
///
/// ```
/// use daifugo_engine::cards::{parse_cards, Card};
///
/// let cards = parse_cards("3S 4S JK").unwrap();
/// assert_eq!(cards.len(), 3);
/// assert_eq!(cards[2], Card::Joker);
/// ```
pub fn parse_cards(text: &str) -> Result<Vec<Card>, EngineError> {
    text.split_whitespace().map(str::parse).collect()
}
