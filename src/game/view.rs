//! What one player may observe.
//!
//! `PlayerView` borrows the state read-only and hides other hands apart
//! from their sizes. `Observation` is a fixed-size integer encoding of a
//! view for learning pipelines.

use serde::{Deserialize, Serialize};

use super::state::GameState;
use crate::cards::Card;
use crate::core::{PlayerId, PlayerMap};
use crate::rules::Combo;

/// Hand slots in an [`Observation`].
pub const HAND_SLOTS: usize = 27;
/// Table slots in an [`Observation`].
pub const TABLE_SLOTS: usize = 5;
/// Encoding of the joker.
pub const JOKER_CODE: i32 = 53;
/// Encoding of an empty slot.
pub const EMPTY_CODE: i32 = -1;

/// Read-only view of the round from one seat.
#[derive(Clone, Debug)]
pub struct PlayerView<'a> {
    pub player: PlayerId,
    pub hand: &'a [Card],
    pub table: &'a [Card],
    /// The table as it was accepted; `None` on an open lead.
    pub on_table: Option<&'a Combo>,
    pub inverted: bool,
    pub hand_sizes: PlayerMap<usize>,
    pub finishing_order: &'a [PlayerId],
    pub lead_holder: Option<PlayerId>,
}

impl GameState {
    /// The view of the round from `player`'s seat.
    #[must_use]
    pub fn view(&self, player: PlayerId) -> PlayerView<'_> {
        PlayerView {
            player,
            hand: self.hand(player),
            table: self.table().cards(),
            on_table: self.table().combo(),
            inverted: self.inverted(),
            hand_sizes: self.hand_sizes(),
            finishing_order: self.finishing_order(),
            lead_holder: self.lead_holder(),
        }
    }
}

/// Card code: `suit * 13 + (rank - 1)` (♠0 ♥1 ♦2 ♣3), joker 53.
///
/// ```
/// use daifugo_engine::game::encode_card;
///
/// assert_eq!(encode_card("AS".parse().unwrap()), 0);
/// assert_eq!(encode_card("KC".parse().unwrap()), 51);
/// assert_eq!(encode_card("JK".parse().unwrap()), 53);
/// ```
#[must_use]
pub fn encode_card(card: Card) -> i32 {
    match card {
        Card::Standard { suit, rank } => (suit.index() * 13) as i32 + i32::from(rank.value()) - 1,
        Card::Joker => JOKER_CODE,
    }
}

/// Fixed-size integer encoding of a [`PlayerView`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub hand: [i32; HAND_SLOTS],
    pub table: [i32; TABLE_SLOTS],
    pub inverted: bool,
}

impl Observation {
    /// Encode a view; slots past the cards held are [`EMPTY_CODE`].
    #[must_use]
    pub fn encode(view: &PlayerView<'_>) -> Self {
        Self {
            hand: fill(view.hand),
            table: fill(view.table),
            inverted: view.inverted,
        }
    }
}

fn fill<const N: usize>(cards: &[Card]) -> [i32; N] {
    let mut slots = [EMPTY_CODE; N];
    for (slot, &card) in slots.iter_mut().zip(cards) {
        *slot = encode_card(card);
    }
    slots
}
