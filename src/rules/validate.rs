//! Move validation and play effects.
//!
//! All functions here are pure: orientation and configuration come in
//! as parameters and nothing is read from hidden state.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::combo::{resolve, resolve_as, Combo, Shape, MAX_GROUP, MAX_RUN};
use crate::cards::{Card, Rank};
use crate::core::{RulesConfig, WildcardClearRule};

/// Why a proposed play is not legal against the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum Rejection {
    #[error("no cards were played")]
    Empty,
    #[error("cards do not form a single, group or run")]
    InvalidShape,
    #[error("play does not match the shape and length on the table")]
    ShapeMismatch,
    #[error("run suit differs from the run on the table")]
    SuitMismatch,
    #[error("play does not beat the table")]
    TooWeak,
}

/// Table-clearing effect of an accepted play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableClear {
    /// The trick continues.
    NoClear,
    /// The clearing rank was played; the same player leads next.
    ClearingRank,
    /// A joker was played; the lead follows [`WildcardClearRule`].
    Wildcard,
}

impl TableClear {
    #[must_use]
    pub fn clears(self) -> bool {
        !matches!(self, TableClear::NoClear)
    }
}

/// Resolve `cards` and check it may be played on `table`.
///
/// An open (empty) table accepts any valid shape. Otherwise the table is
/// resolved in its preferred shape and the play is judged by
/// [`check_against`].
pub fn check_move(
    cards: &[Card],
    table: &[Card],
    inverted: bool,
    config: &RulesConfig,
) -> Result<Combo, Rejection> {
    if table.is_empty() {
        return check_against(cards, None, inverted, config);
    }
    if cards.is_empty() {
        return Err(Rejection::Empty);
    }
    let on_table = resolve(table, inverted).ok_or(Rejection::ShapeMismatch)?;
    check_against(cards, Some(&on_table), inverted, config)
}

/// Resolve `cards` and check it may be played on an already resolved
/// table combination.
///
/// The play must have the table's shape and length, match suit for
/// runs, and be strictly stronger in the current orientation. The
/// table's shape and joker substitutions are taken as given.
pub fn check_against(
    cards: &[Card],
    on_table: Option<&Combo>,
    inverted: bool,
    config: &RulesConfig,
) -> Result<Combo, Rejection> {
    if cards.is_empty() {
        return Err(Rejection::Empty);
    }
    let preferred = resolve(cards, inverted).ok_or(Rejection::InvalidShape)?;
    let Some(on_table) = on_table else {
        return Ok(preferred);
    };

    if cards.len() != on_table.len() {
        return Err(Rejection::ShapeMismatch);
    }
    let play = if preferred.shape() == on_table.shape() {
        preferred
    } else {
        resolve_as(cards, on_table.shape(), inverted).ok_or(Rejection::ShapeMismatch)?
    };

    if config.unbeatable_two_joker_pair && is_two_joker_pair(on_table) {
        return Err(Rejection::TooWeak);
    }
    if play.shape() == Shape::Run {
        if let (Some(ours), Some(theirs)) = (play.suit(), on_table.suit()) {
            if ours != theirs {
                return Err(Rejection::SuitMismatch);
            }
        }
    }
    if play.strength(inverted) <= on_table.strength(inverted) {
        return Err(Rejection::TooWeak);
    }
    Ok(play)
}

/// Whether `cards` may be played on `table`.
///
/// ```
/// use daifugo_engine::cards::parse_cards;
/// use daifugo_engine::core::RulesConfig;
/// use daifugo_engine::rules::is_valid_move;
///
/// let config = RulesConfig::default();
/// let table = parse_cards("5S").unwrap();
/// assert!(is_valid_move(&parse_cards("6H").unwrap(), &table, false, &config));
/// assert!(!is_valid_move(&parse_cards("6H").unwrap(), &table, true, &config));
/// assert!(is_valid_move(&parse_cards("JK").unwrap(), &table, true, &config));
/// ```
#[must_use]
pub fn is_valid_move(cards: &[Card], table: &[Card], inverted: bool, config: &RulesConfig) -> bool {
    check_move(cards, table, inverted, config).is_ok()
}

/// A four-card group or a five-card run flips the rank order.
#[must_use]
pub fn triggers_inversion(combo: &Combo) -> bool {
    match combo.shape() {
        Shape::Group => combo.len() >= MAX_GROUP,
        Shape::Run => combo.len() >= MAX_RUN,
        Shape::Single | Shape::Invalid => false,
    }
}

/// Table-clearing effect of an accepted play.
///
/// The clearing rank counts when at least one natural card is in the
/// play, so a joker standing in for it clears too. It takes precedence
/// over the joker rule when both apply.
#[must_use]
pub fn triggers_table_clear(combo: &Combo, config: &RulesConfig) -> TableClear {
    let clearing_rank = config
        .clearing_rank
        .is_some_and(|rank| combo.natural_count() > 0 && combo.contains_rank(rank));
    if clearing_rank {
        return TableClear::ClearingRank;
    }
    if combo.wildcard_count() > 0 && config.wildcard_clear != WildcardClearRule::Disabled {
        return TableClear::Wildcard;
    }
    TableClear::NoClear
}

fn is_two_joker_pair(combo: &Combo) -> bool {
    combo.shape() == Shape::Group
        && combo.len() == 2
        && combo.wildcard_count() == 1
        && combo.cards().any(|c| c.rank() == Some(Rank::TWO))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;
    use crate::rules::rank_strength;

    fn cards(text: &str) -> Vec<Card> {
        parse_cards(text).unwrap()
    }

    fn check(play: &str, table: &str, inverted: bool) -> Result<Combo, Rejection> {
        check_move(&cards(play), &cards(table), inverted, &RulesConfig::default())
    }

    #[test]
    fn test_open_table_accepts_any_shape() {
        assert!(check("4C", "", false).is_ok());
        assert!(check("4C 4D JK", "", false).is_ok());
        assert!(check("4C 5C 6C 7C", "", false).is_ok());
        assert_eq!(check("4C 5D", "", false), Err(Rejection::InvalidShape));
        assert_eq!(check("", "", false), Err(Rejection::Empty));
    }

    #[test]
    fn test_singles() {
        assert!(check("6H", "5S", false).is_ok());
        assert_eq!(check("5H", "5S", false), Err(Rejection::TooWeak));
        assert_eq!(check("4H", "5S", false), Err(Rejection::TooWeak));
        assert!(check("4H", "5S", true).is_ok());
        assert!(check("2H", "AS", false).is_ok());
    }

    #[test]
    fn test_wildcard_single() {
        assert!(check("JK", "2S", false).is_ok());
        assert!(check("JK", "3S", true).is_ok());
        assert_eq!(check("2S", "JK", false), Err(Rejection::TooWeak));
        assert_eq!(check("JK", "JK", false), Err(Rejection::TooWeak));
    }

    #[test]
    fn test_length_and_shape_must_match() {
        assert_eq!(check("9H 9S", "5S", false), Err(Rejection::ShapeMismatch));
        assert_eq!(check("9H 9S 9D", "5S 5H", false), Err(Rejection::ShapeMismatch));
        assert_eq!(check("9H 10H JH", "5S 5H 5D", false), Err(Rejection::ShapeMismatch));
        assert_eq!(check("9H 9S 9D", "5S 6S 7S", false), Err(Rejection::ShapeMismatch));
    }

    #[test]
    fn test_groups() {
        assert!(check("9H 9S", "5S 5H", false).is_ok());
        assert!(check("9H JK", "5S 5H", false).is_ok());
        assert_eq!(check("4H 4S", "5S 5H", false), Err(Rejection::TooWeak));
        assert!(check("4H 4S", "5S 5H", true).is_ok());
        assert!(check("JK JK", "2S 2H", false).is_ok());
    }

    #[test]
    fn test_runs_need_matching_suit() {
        assert!(check("6S 7S 8S", "3S 4S 5S", false).is_ok());
        assert_eq!(check("6H 7H 8H", "3S 4S 5S", false), Err(Rejection::SuitMismatch));
        assert_eq!(check("3S 4S 5S", "6S 7S 8S", false), Err(Rejection::TooWeak));
        assert!(check("3S 4S 5S", "6S 7S 8S", true).is_ok());
    }

    #[test]
    fn test_run_joker_takes_best_window() {
        // 6S 7S + joker reads as 6-7-8 normally, beating 5-6-7.
        assert!(check("6S 7S JK", "5S 6S 7S", false).is_ok());
        // Under inversion it reads as 5-6-7, which does not beat 5-6-7.
        assert_eq!(check("6S 7S JK", "5S 6S 7S", true), Err(Rejection::TooWeak));
    }

    #[test]
    fn test_group_shape_forced_by_table_run() {
        // One natural plus two jokers is a group by default but may top a run.
        assert!(check("9S JK JK", "3S 4S 5S", false).is_ok());
    }

    #[test]
    fn test_resolved_table_keeps_its_shape() {
        let config = RulesConfig::default();
        let on_table = resolve_as(&cards("9S JK JK"), Shape::Run, false).unwrap();

        let run = check_against(&cards("10S JS QS"), Some(&on_table), false, &config);
        assert_eq!(run.map(|c| c.shape()), Ok(Shape::Run));
        assert_eq!(
            check_against(&cards("10H 10D 10C"), Some(&on_table), false, &config),
            Err(Rejection::ShapeMismatch)
        );
    }

    #[test]
    fn test_resolved_run_window_survives_inversion() {
        // Played upright as 9-K; the flipped order must judge that window.
        let config = RulesConfig::default();
        let on_table = resolve(&cards("9S 10S JS QS JK"), false).unwrap();
        assert_eq!(on_table.strength(true), rank_strength(Rank::new(9).unwrap(), true));

        // 8-Q has its weakest card lower under inversion than 9, so it wins.
        let answer = cards("8S 9S 10S JS QS");
        assert!(check_against(&answer, Some(&on_table), true, &config).is_ok());
        // 9-K does not beat itself.
        let same = cards("9S 10S JS QS KS");
        assert_eq!(
            check_against(&same, Some(&on_table), true, &config),
            Err(Rejection::TooWeak)
        );
    }

    #[test]
    fn test_inversion_triggers() {
        let quad = resolve(&cards("7S 7H 7D 7C"), false).unwrap();
        let quad_with_joker = resolve(&cards("7S 7H 7D JK"), false).unwrap();
        let triple = resolve(&cards("7S 7H 7D"), false).unwrap();
        let five_run = resolve(&cards("3S 4S 5S 6S 7S"), false).unwrap();
        let four_run = resolve(&cards("3S 4S 5S 6S"), false).unwrap();

        assert!(triggers_inversion(&quad));
        assert!(triggers_inversion(&quad_with_joker));
        assert!(!triggers_inversion(&triple));
        assert!(triggers_inversion(&five_run));
        assert!(!triggers_inversion(&four_run));
    }

    #[test]
    fn test_table_clear_triggers() {
        let config = RulesConfig::default();
        let clear = |text: &str| triggers_table_clear(&resolve(&cards(text), false).unwrap(), &config);

        assert_eq!(clear("8S"), TableClear::ClearingRank);
        assert_eq!(clear("8S 8H"), TableClear::ClearingRank);
        assert_eq!(clear("7S 8S 9S"), TableClear::ClearingRank);
        assert_eq!(clear("7S JK 9S"), TableClear::ClearingRank);
        assert_eq!(clear("8S JK"), TableClear::ClearingRank);
        assert_eq!(clear("JK"), TableClear::Wildcard);
        assert_eq!(clear("9S JK"), TableClear::Wildcard);
        assert_eq!(clear("9S"), TableClear::NoClear);
        assert!(!TableClear::NoClear.clears());
    }

    #[test]
    fn test_wildcard_clear_can_be_disabled() {
        let config = RulesConfig::default()
            .with_wildcard_clear(WildcardClearRule::Disabled)
            .with_clearing_rank(None);
        let joker = resolve(&cards("JK"), false).unwrap();
        let eight = resolve(&cards("8S"), false).unwrap();
        assert_eq!(triggers_table_clear(&joker, &config), TableClear::NoClear);
        assert_eq!(triggers_table_clear(&eight, &config), TableClear::NoClear);
    }

    #[test]
    fn test_unbeatable_two_joker_pair_house_rule() {
        let table = cards("2S JK");
        let play = cards("JK JK");
        let off = RulesConfig::default();
        let on = RulesConfig::default().with_unbeatable_two_joker_pair(true);

        assert!(is_valid_move(&play, &table, false, &off));
        assert!(!is_valid_move(&play, &table, false, &on));
        assert!(!is_valid_move(&cards("3S 3H"), &table, true, &on));
        assert!(is_valid_move(&cards("3S 3H"), &table, true, &off));
    }
}
