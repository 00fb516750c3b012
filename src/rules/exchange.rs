//! End-of-round card exchange.
//!
//! Given the previous round's finishing order (best to worst), after the
//! new deal:
//! - the last finisher gives their two strongest cards to the first
//!   finisher, who gives back their two weakest;
//! - with four or more players, the second-to-last and second finishers
//!   swap one card the same way.
//!
//! Both sides choose from their freshly dealt hands and the cards move
//! simultaneously. Strength is measured in normal orientation.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use super::strength::strength;
use crate::cards::Card;
use crate::core::{EngineError, PlayerId, PlayerMap};

/// One directed transfer of cards between two players.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub from: PlayerId,
    pub to: PlayerId,
    pub cards: SmallVec<[Card; 2]>,
}

/// Apply the exchange to freshly dealt hands.
///
/// Returns the transfers performed, tribute first. `prior_order` must
/// name every seat exactly once.
pub fn exchange_cards(
    hands: &mut PlayerMap<Vec<Card>>,
    prior_order: &[PlayerId],
) -> Result<Vec<Transfer>, EngineError> {
    let player_count = hands.player_count();
    validate_order(prior_order, player_count)?;

    let mut pairs = vec![(prior_order[0], prior_order[player_count - 1], 2)];
    if player_count >= 4 {
        pairs.push((prior_order[1], prior_order[player_count - 2], 1));
    }

    let mut transfers = Vec::with_capacity(pairs.len() * 2);
    for &(best, worst, count) in &pairs {
        transfers.push(Transfer {
            from: worst,
            to: best,
            cards: pick(&hands[worst], count, true),
        });
        transfers.push(Transfer {
            from: best,
            to: worst,
            cards: pick(&hands[best], count, false),
        });
    }

    for transfer in &transfers {
        for card in &transfer.cards {
            if let Some(pos) = hands[transfer.from].iter().position(|c| c == card) {
                hands[transfer.from].swap_remove(pos);
            }
        }
    }
    for transfer in &transfers {
        hands[transfer.to].extend(transfer.cards.iter().copied());
        debug!(
            from = %transfer.from,
            to = %transfer.to,
            cards = transfer.cards.len(),
            "exchanged cards"
        );
    }
    for hand in hands.values_mut() {
        hand.sort_unstable();
    }

    Ok(transfers)
}

/// The `count` strongest (or weakest) cards of `hand`.
fn pick(hand: &[Card], count: usize, strongest: bool) -> SmallVec<[Card; 2]> {
    let mut sorted = hand.to_vec();
    sorted.sort_by_key(|&card| (strength(card, false), card));
    if strongest {
        sorted.reverse();
    }
    sorted.into_iter().take(count).collect()
}

fn validate_order(order: &[PlayerId], player_count: usize) -> Result<(), EngineError> {
    if order.len() != player_count {
        return Err(EngineError::InvalidFinishingOrder(format!(
            "expected {player_count} players, got {}",
            order.len()
        )));
    }
    let mut seen = vec![false; player_count];
    for player in order {
        match seen.get_mut(player.index()) {
            Some(slot) if !*slot => *slot = true,
            Some(_) => {
                return Err(EngineError::InvalidFinishingOrder(format!("{player} appears twice")))
            }
            None => {
                return Err(EngineError::UnknownPlayer {
                    player: *player,
                    player_count,
                })
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn hands(texts: &[&str]) -> PlayerMap<Vec<Card>> {
        PlayerMap::from_vec(texts.iter().map(|t| parse_cards(t).unwrap()).collect())
    }

    fn order(ids: &[u8]) -> Vec<PlayerId> {
        ids.iter().copied().map(PlayerId::new).collect()
    }

    #[test]
    fn test_four_player_exchange() {
        let mut h = hands(&[
            "3S 4S 9S KS",  // seat 0: best
            "3H 5H 10H QH", // seat 1: second
            "6D 7D JK 2D",  // seat 2: worst
            "4C 6C AC JC",  // seat 3: second-worst
        ]);
        let transfers = exchange_cards(&mut h, &order(&[0, 1, 3, 2])).unwrap();
        assert_eq!(transfers.len(), 4);

        // worst gave joker and 2D, best gave 3S and 4S
        assert!(h[PlayerId::new(0)].contains(&Card::Joker));
        assert!(h[PlayerId::new(0)].contains(&"2D".parse().unwrap()));
        assert!(h[PlayerId::new(2)].contains(&"3S".parse().unwrap()));
        assert!(h[PlayerId::new(2)].contains(&"4S".parse().unwrap()));

        // second-worst gave AC, second gave 3H
        assert!(h[PlayerId::new(1)].contains(&"AC".parse().unwrap()));
        assert!(h[PlayerId::new(3)].contains(&"3H".parse().unwrap()));

        for (_, hand) in h.iter() {
            assert_eq!(hand.len(), 4);
        }
    }

    #[test]
    fn test_three_player_exchange_skips_middle() {
        let mut h = hands(&["3S 4S", "5S 6S", "2S AS"]);
        let transfers = exchange_cards(&mut h, &order(&[0, 1, 2])).unwrap();
        assert_eq!(transfers.len(), 2);
        assert_eq!(h[PlayerId::new(1)], parse_cards("5S 6S").unwrap());
        assert_eq!(h[PlayerId::new(0)], parse_cards("AS 2S").unwrap());
    }

    #[test]
    fn test_invalid_orders_rejected() {
        let mut h = hands(&["3S", "4S", "5S"]);
        assert!(matches!(
            exchange_cards(&mut h, &order(&[0, 1])),
            Err(EngineError::InvalidFinishingOrder(_))
        ));
        assert!(matches!(
            exchange_cards(&mut h, &order(&[0, 1, 1])),
            Err(EngineError::InvalidFinishingOrder(_))
        ));
        assert!(matches!(
            exchange_cards(&mut h, &order(&[0, 1, 7])),
            Err(EngineError::UnknownPlayer { .. })
        ));
    }
}
