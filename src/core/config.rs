//! Rules configuration.
//!
//! Rule variants that differ between tables are configured here rather
//! than hardcoded in the rule engine:
//! - Deck composition (one or two jokers)
//! - The table-clearing rank (8 by default)
//! - Who leads after a joker clears the table
//! - The card whose holder opens the first trick
//! - Optional house rules

use serde::{Deserialize, Serialize};

use super::error::EngineError;
use crate::cards::{Card, DeckVariant, Rank, Suit};

/// Smallest supported table.
pub const MIN_PLAYERS: usize = 2;
/// Largest supported table.
pub const MAX_PLAYERS: usize = 8;

/// What happens when a play containing a joker is accepted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WildcardClearRule {
    /// Table clears and the next seat with cards leads.
    #[default]
    AdvanceSeat,
    /// Table clears and the player who played the joker leads again.
    SameLeader,
    /// Jokers do not clear the table.
    Disabled,
}

/// Rules configuration for a table.
///
/// ## Example
///
/// ```
/// use daifugo_engine::cards::{DeckVariant, Rank};
/// use daifugo_engine::core::{RulesConfig, WildcardClearRule};
///
/// let config = RulesConfig::default()
///     .with_deck_variant(DeckVariant::OneJoker)
///     .with_clearing_rank(Some(Rank::EIGHT))
///     .with_wildcard_clear(WildcardClearRule::SameLeader);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Deck composition.
    pub deck_variant: DeckVariant,

    /// Rank that clears the table when played with at least one natural
    /// card. `None` disables the rule.
    pub clearing_rank: Option<Rank>,

    /// Lead rule after a joker clears the table.
    pub wildcard_clear: WildcardClearRule,

    /// The holder of this card leads the first trick of a round.
    pub opening_card: Card,

    /// House rule: a pair of a rank-2 card and a joker cannot be beaten.
    pub unbeatable_two_joker_pair: bool,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            deck_variant: DeckVariant::TwoJokers,
            clearing_rank: Some(Rank::EIGHT),
            wildcard_clear: WildcardClearRule::AdvanceSeat,
            opening_card: Card::new(Suit::Diamonds, Rank::THREE),
            unbeatable_two_joker_pair: false,
        }
    }
}

impl RulesConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_deck_variant(mut self, variant: DeckVariant) -> Self {
        self.deck_variant = variant;
        self
    }

    #[must_use]
    pub fn with_clearing_rank(mut self, rank: Option<Rank>) -> Self {
        self.clearing_rank = rank;
        self
    }

    #[must_use]
    pub fn with_wildcard_clear(mut self, rule: WildcardClearRule) -> Self {
        self.wildcard_clear = rule;
        self
    }

    #[must_use]
    pub fn with_opening_card(mut self, card: Card) -> Self {
        self.opening_card = card;
        self
    }

    #[must_use]
    pub fn with_unbeatable_two_joker_pair(mut self, enabled: bool) -> Self {
        self.unbeatable_two_joker_pair = enabled;
        self
    }

    /// Check that the configuration describes a playable table.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.opening_card.is_joker() {
            return Err(EngineError::InvalidConfig(
                "opening card must be a standard card".to_string(),
            ));
        }
        Ok(())
    }

    /// Check that `player_count` seats can be dealt from this deck.
    pub fn validate_player_count(&self, player_count: usize) -> Result<(), EngineError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&player_count) {
            return Err(EngineError::InvalidConfig(format!(
                "player count must be {MIN_PLAYERS}-{MAX_PLAYERS}, got {player_count}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RulesConfig::default();
        assert_eq!(config.deck_variant.size(), 54);
        assert_eq!(config.clearing_rank, Some(Rank::EIGHT));
        assert_eq!(config.wildcard_clear, WildcardClearRule::AdvanceSeat);
        assert_eq!(config.opening_card.to_string(), "3♦");
        assert!(!config.unbeatable_two_joker_pair);
    }

    #[test]
    fn test_builder_chain() {
        let config = RulesConfig::new()
            .with_clearing_rank(None)
            .with_unbeatable_two_joker_pair(true)
            .with_opening_card(Card::new(Suit::Spades, Rank::THREE));

        assert_eq!(config.clearing_rank, None);
        assert!(config.unbeatable_two_joker_pair);
        assert_eq!(config.opening_card.suit(), Some(Suit::Spades));
    }

    #[test]
    fn test_joker_opening_card_rejected() {
        let config = RulesConfig::default().with_opening_card(Card::Joker);
        assert!(matches!(config.validate(), Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn test_player_count_bounds() {
        let config = RulesConfig::default();
        assert!(config.validate_player_count(1).is_err());
        assert!(config.validate_player_count(2).is_ok());
        assert!(config.validate_player_count(8).is_ok());
        assert!(config.validate_player_count(9).is_err());
    }

    #[test]
    fn test_config_serde() {
        let config = RulesConfig::default().with_wildcard_clear(WildcardClearRule::Disabled);
        let json = serde_json::to_string(&config).unwrap();
        let restored: RulesConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, restored);
    }
}
