//! Property-based tests for the rule engine, the legal-action generator
//! and whole rounds.

use proptest::prelude::*;
use proptest::sample::{select, subsequence, Index};

use daifugo_engine::cards::{Card, Deck, DeckVariant, Rank, Suit};
use daifugo_engine::core::{Action, PlayerId, RulesConfig};
use daifugo_engine::game::TurnEngine;
use daifugo_engine::legal::legal_actions;
use daifugo_engine::policy::{play_round, Policy, RandomPolicy};
use daifugo_engine::rules::{check_move, classify, is_valid_move, resolve, Shape};

fn deck_cards() -> Vec<Card> {
    Deck::new(DeckVariant::TwoJokers).cards().to_vec()
}

fn hand(max: usize) -> impl Strategy<Value = Vec<Card>> {
    subsequence(deck_cards(), 0..=max)
}

/// A table produced by a real opening play, or an empty table.
fn table() -> impl Strategy<Value = Vec<Card>> {
    (hand(10), any::<Index>(), any::<bool>()).prop_map(|(cards, pick, inverted)| {
        let options = legal_actions(&cards, &[], inverted, &RulesConfig::default());
        pick.get(&options).cards().to_vec()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Every generated play is accepted by the rule engine and pass is
    /// always the final option.
    #[test]
    fn prop_legal_actions_are_valid(
        hand in hand(14),
        table in table(),
        inverted in any::<bool>(),
    ) {
        let config = RulesConfig::default();
        let actions = legal_actions(&hand, &table, inverted, &config);

        prop_assert_eq!(actions.last(), Some(&Action::Pass));
        prop_assert_eq!(actions.iter().filter(|a| a.is_pass()).count(), 1);
        for action in &actions {
            if let Action::Play(cards) = action {
                prop_assert!(is_valid_move(cards, &table, inverted, &config),
                    "{} is not valid on {:?}", action, table);
            }
        }
    }

    /// Legal plays never repeat a card multiset.
    #[test]
    fn prop_legal_actions_unique(hand in hand(14), table in table(), inverted in any::<bool>()) {
        let actions = legal_actions(&hand, &table, inverted, &RulesConfig::default());
        for (i, a) in actions.iter().enumerate() {
            prop_assert!(!actions[i + 1..].contains(a), "{} listed twice", a);
        }
    }

    /// An accepted play on a live table is strictly stronger than it.
    #[test]
    fn prop_accepted_play_is_stronger(
        play in hand(5),
        table in table(),
        inverted in any::<bool>(),
    ) {
        prop_assume!(!table.is_empty());
        if let Ok(combo) = check_move(&play, &table, inverted, &RulesConfig::default()) {
            let on_table = resolve(&table, inverted).unwrap();
            prop_assert!(combo.strength(inverted) > on_table.strength(inverted));
            prop_assert_eq!(combo.len(), on_table.len());
        }
    }

    /// A card of another suit breaks any natural run.
    #[test]
    fn prop_foreign_suit_breaks_run(
        suit in select(Suit::ALL.to_vec()),
        other in select(Suit::ALL.to_vec()),
        start in 0u8..=9,
        len in 3usize..=4,
        extra in 0u8..13,
    ) {
        prop_assume!(suit != other);
        let mut cards: Vec<Card> = (start..start + len as u8)
            .filter_map(Rank::from_cycle_position)
            .map(|rank| Card::new(suit, rank))
            .collect();
        prop_assert_eq!(classify(&cards), Shape::Run);

        let intruder = Rank::from_cycle_position(extra).map(|rank| Card::new(other, rank));
        cards.extend(intruder);
        prop_assert_ne!(classify(&cards), Shape::Run);
    }

    /// Rank 2 never sits inside a run.
    #[test]
    fn prop_two_never_inside_run(suit in select(Suit::ALL.to_vec()), len in 3usize..=5) {
        // A, 2, 3, ... would need the cycle to wrap.
        let cards: Vec<Card> = (0..len)
            .filter_map(|i| Rank::from_cycle_position(((11 + i) % 13) as u8))
            .map(|rank| Card::new(suit, rank))
            .collect();
        prop_assert_ne!(classify(&cards), Shape::Run);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// Random play always terminates with every seat ranked exactly once.
    #[test]
    fn prop_rounds_rank_every_player(seed in any::<u64>(), players in 2usize..=8) {
        let engine = TurnEngine::new(RulesConfig::default()).unwrap();
        let mut state = engine.new_round(players, seed, None).unwrap();
        let mut policies: Vec<Box<dyn Policy>> = (0..players)
            .map(|seat| Box::new(RandomPolicy::new(seed ^ seat as u64)) as Box<dyn Policy>)
            .collect();

        let order = play_round(&engine, &mut state, &mut policies, 200_000).unwrap();
        let mut seats = order.clone();
        seats.sort();
        seats.dedup();
        prop_assert_eq!(order.len(), players);
        prop_assert_eq!(seats, PlayerId::all(players).collect::<Vec<_>>());
    }
}
