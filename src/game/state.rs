//! Round state.
//!
//! ## Table
//!
//! The most recent accepted play, kept with the combination it was
//! accepted as. Empty means an open lead.
//!
//! ## GameState
//!
//! Everything the turn engine owns for one round:
//! - Hands, turn pointer and step counter
//! - Per-seat passed flags and the lead holder
//! - The rank-order inversion flag
//! - The finishing order and the terminal flag
//! - The step log
//!
//! Reads are public; only the turn engine mutates a round in progress.

use serde::{Deserialize, Serialize};

use super::log::StepLog;
use crate::cards::Card;
use crate::core::{EngineError, Play, PlayerId, PlayerMap};
use crate::rules::Combo;

/// Phase of the current trick, derived from the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Table empty; any valid shape may lead.
    LeadOpen,
    /// A play is on the table and must be matched or passed.
    TrickActive,
}

/// Cards currently on the table.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    cards: Play,
    combo: Option<Combo>,
}

impl Table {
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Shape and joker substitutions fixed when the play was accepted.
    #[must_use]
    pub fn combo(&self) -> Option<&Combo> {
        self.combo.as_ref()
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub(crate) fn set(&mut self, cards: &[Card], combo: Combo) {
        self.cards = Play::from_slice(cards);
        self.combo = Some(combo);
    }

    pub(crate) fn clear(&mut self) {
        self.cards.clear();
        self.combo = None;
    }
}

/// State of one round.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    pub(crate) hands: PlayerMap<Vec<Card>>,
    pub(crate) table: Table,
    pub(crate) turn: PlayerId,
    pub(crate) turn_count: u32,
    pub(crate) passed: PlayerMap<bool>,
    pub(crate) lead_holder: Option<PlayerId>,
    pub(crate) inverted: bool,
    pub(crate) finishing_order: Vec<PlayerId>,
    pub(crate) round_over: bool,
    pub(crate) log: StepLog,
}

impl GameState {
    /// Start a round from already dealt hands with `first` to lead.
    ///
    /// Hands are sorted into canonical order. Fails if `first` is not a
    /// seat at this table.
    pub fn from_hands(hands: Vec<Vec<Card>>, first: PlayerId) -> Result<Self, EngineError> {
        if hands.is_empty() || hands.len() > 255 {
            return Err(EngineError::InvalidConfig(format!(
                "cannot seat {} players",
                hands.len()
            )));
        }
        Self::from_dealt(PlayerMap::from_vec(hands), first)
    }

    pub(crate) fn from_dealt(
        mut hands: PlayerMap<Vec<Card>>,
        first: PlayerId,
    ) -> Result<Self, EngineError> {
        for hand in hands.values_mut() {
            hand.sort_unstable();
        }
        let player_count = hands.player_count();
        if !hands.contains(first) {
            return Err(EngineError::UnknownPlayer {
                player: first,
                player_count,
            });
        }

        Ok(Self {
            hands,
            table: Table::default(),
            turn: first,
            turn_count: 0,
            passed: PlayerMap::with_value(player_count, false),
            lead_holder: None,
            inverted: false,
            finishing_order: Vec::new(),
            round_over: false,
            log: StepLog::new(),
        })
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.hands.player_count()
    }

    /// Seat to act.
    #[must_use]
    pub fn turn(&self) -> PlayerId {
        self.turn
    }

    /// Steps taken this round.
    #[must_use]
    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    #[must_use]
    pub fn table(&self) -> &Table {
        &self.table
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.table.is_open() {
            Phase::LeadOpen
        } else {
            Phase::TrickActive
        }
    }

    /// Whether the rank order is currently inverted.
    #[must_use]
    pub fn inverted(&self) -> bool {
        self.inverted
    }

    /// Last player whose play was accepted.
    #[must_use]
    pub fn lead_holder(&self) -> Option<PlayerId> {
        self.lead_holder
    }

    #[must_use]
    pub fn hand(&self, player: PlayerId) -> &[Card] {
        &self.hands[player]
    }

    #[must_use]
    pub fn hand_sizes(&self) -> PlayerMap<usize> {
        PlayerMap::new(self.player_count(), |p| self.hands[p].len())
    }

    #[must_use]
    pub fn has_passed(&self, player: PlayerId) -> bool {
        self.passed[player]
    }

    /// Players who emptied their hands, in order.
    #[must_use]
    pub fn finishing_order(&self) -> &[PlayerId] {
        &self.finishing_order
    }

    #[must_use]
    pub fn is_round_over(&self) -> bool {
        self.round_over
    }

    #[must_use]
    pub fn log(&self) -> &StepLog {
        &self.log
    }

    /// Whether `player` still holds cards.
    #[must_use]
    pub fn is_active(&self, player: PlayerId) -> bool {
        !self.hands[player].is_empty()
    }

    /// Seats still holding cards.
    pub fn active_players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.hands.iter().filter(|(_, h)| !h.is_empty()).map(|(p, _)| p)
    }

    /// Error unless `player` is seated at this table.
    pub fn check_player(&self, player: PlayerId) -> Result<(), EngineError> {
        if self.hands.contains(player) {
            Ok(())
        } else {
            Err(EngineError::UnknownPlayer {
                player,
                player_count: self.player_count(),
            })
        }
    }

    // === Mutation (turn engine only) ===

    /// Remove a multiset of cards; false (and no change) if any is missing.
    pub(crate) fn remove_from_hand(&mut self, player: PlayerId, cards: &[Card]) -> bool {
        if !holds_all(&self.hands[player], cards) {
            return false;
        }
        let hand = &mut self.hands[player];
        for card in cards {
            if let Some(pos) = hand.iter().position(|c| c == card) {
                hand.remove(pos);
            }
        }
        true
    }

    pub(crate) fn reset_passes(&mut self) {
        for flag in self.passed.values_mut() {
            *flag = false;
        }
    }

    /// Append `player` to the finishing order once. Returns true if added.
    pub(crate) fn record_finish(&mut self, player: PlayerId) -> bool {
        if self.finishing_order.contains(&player) {
            return false;
        }
        self.finishing_order.push(player);
        true
    }

    /// First seat after `player` that still holds cards.
    pub(crate) fn next_active_after(&self, player: PlayerId) -> Option<PlayerId> {
        let count = self.player_count();
        std::iter::successors(Some(player.next(count)), |p| Some(p.next(count)))
            .take(count)
            .find(|&p| self.is_active(p))
    }

    /// `player` if they still hold cards, otherwise the next seat that does.
    pub(crate) fn lead_seat(&self, player: PlayerId) -> Option<PlayerId> {
        if self.is_active(player) {
            Some(player)
        } else {
            self.next_active_after(player)
        }
    }
}

/// Whether `hand` contains every card of `cards`, with multiplicity.
#[must_use]
pub fn holds_all(hand: &[Card], cards: &[Card]) -> bool {
    let mut remaining = hand.to_vec();
    cards.iter().all(|card| match remaining.iter().position(|c| c == card) {
        Some(pos) => {
            remaining.swap_remove(pos);
            true
        }
        None => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn state(hands: &[&str]) -> GameState {
        let hands = hands.iter().map(|h| parse_cards(h).unwrap()).collect();
        GameState::from_hands(hands, PlayerId::new(0)).unwrap()
    }

    #[test]
    fn test_from_hands() {
        let s = state(&["3S 4S", "5S", "JK"]);
        assert_eq!(s.player_count(), 3);
        assert_eq!(s.turn(), PlayerId::new(0));
        assert_eq!(s.phase(), Phase::LeadOpen);
        assert!(!s.inverted());
        assert!(s.finishing_order().is_empty());
        assert_eq!(s.hand_sizes()[PlayerId::new(0)], 2);
    }

    #[test]
    fn test_from_hands_rejects_unknown_leader() {
        let hands = vec![Vec::new(), Vec::new()];
        assert!(matches!(
            GameState::from_hands(hands, PlayerId::new(2)),
            Err(EngineError::UnknownPlayer { .. })
        ));
    }

    #[test]
    fn test_holds_all_counts_multiplicity() {
        let hand = parse_cards("JK JK 5S").unwrap();
        assert!(holds_all(&hand, &parse_cards("JK JK").unwrap()));
        assert!(!holds_all(&hand, &parse_cards("5S 5S").unwrap()));
        assert!(!holds_all(&hand, &parse_cards("6S").unwrap()));
    }

    #[test]
    fn test_remove_from_hand_is_all_or_nothing() {
        let mut s = state(&["3S 4S", "5S"]);
        assert!(!s.remove_from_hand(PlayerId::new(0), &parse_cards("3S 9S").unwrap()));
        assert_eq!(s.hand(PlayerId::new(0)).len(), 2);
        assert!(s.remove_from_hand(PlayerId::new(0), &parse_cards("4S").unwrap()));
        assert_eq!(s.hand(PlayerId::new(0)), parse_cards("3S").unwrap().as_slice());
    }

    #[test]
    fn test_next_active_skips_empty_hands() {
        let s = state(&["3S", "", "5S", ""]);
        assert_eq!(s.next_active_after(PlayerId::new(0)), Some(PlayerId::new(2)));
        assert_eq!(s.next_active_after(PlayerId::new(2)), Some(PlayerId::new(0)));
        assert_eq!(s.lead_seat(PlayerId::new(1)), Some(PlayerId::new(2)));
        assert_eq!(s.lead_seat(PlayerId::new(2)), Some(PlayerId::new(2)));
    }

    #[test]
    fn test_record_finish_once() {
        let mut s = state(&["", "5S"]);
        assert!(s.record_finish(PlayerId::new(0)));
        assert!(!s.record_finish(PlayerId::new(0)));
        assert_eq!(s.finishing_order(), &[PlayerId::new(0)]);
    }

    #[test]
    fn test_check_player() {
        let s = state(&["3S", "4S"]);
        assert!(s.check_player(PlayerId::new(1)).is_ok());
        assert!(s.check_player(PlayerId::new(2)).is_err());
    }
}
