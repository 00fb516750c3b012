//! Legal-action enumeration.
//!
//! Candidates are generated per shape from an index of the hand, joker
//! fills included, then deduplicated as card multisets and filtered
//! through [`check_against`]. Anything returned is therefore accepted by
//! the rule engine, and `Action::Pass` is always the last entry.

use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;
use std::ops::RangeInclusive;

use crate::cards::{Card, Rank, Suit};
use crate::core::{Action, Play, RulesConfig};
use crate::rules::{
    check_against, resolve, Combo, Shape, MAX_GROUP, MAX_RUN, MIN_GROUP, MIN_RUN,
};

/// Hand bucketed by rank and by suit.
struct HandIndex {
    by_rank: FxHashMap<Rank, SmallVec<[Card; 4]>>,
    by_suit: [[bool; 13]; 4],
    jokers: usize,
    distinct: Vec<Card>,
}

impl HandIndex {
    fn new(hand: &[Card]) -> Self {
        let mut index = Self {
            by_rank: FxHashMap::default(),
            by_suit: [[false; 13]; 4],
            jokers: 0,
            distinct: hand.to_vec(),
        };
        index.distinct.sort_unstable();
        index.distinct.dedup();

        for &card in &index.distinct {
            if let Card::Standard { suit, rank } = card {
                index.by_rank.entry(rank).or_default().push(card);
                index.by_suit[suit.index()][rank.cycle_position() as usize] = true;
            }
        }
        index.jokers = hand.iter().filter(|c| c.is_joker()).count();
        index
    }
}

/// Every play the holder of `hand` may make on `table`, plus pass.
///
/// ```
/// use daifugo_engine::cards::parse_cards;
/// use daifugo_engine::core::{Action, RulesConfig};
/// use daifugo_engine::legal::legal_actions;
///
/// let hand = parse_cards("4S 6H 6D").unwrap();
/// let table = parse_cards("5C").unwrap();
/// let actions = legal_actions(&hand, &table, false, &RulesConfig::default());
/// assert_eq!(actions.len(), 3); // 6H, 6D, pass
/// assert_eq!(actions.last(), Some(&Action::Pass));
/// ```
#[must_use]
pub fn legal_actions(
    hand: &[Card],
    table: &[Card],
    inverted: bool,
    config: &RulesConfig,
) -> Vec<Action> {
    if table.is_empty() {
        return legal_actions_against(hand, None, inverted, config);
    }
    match resolve(table, inverted) {
        Some(on_table) => legal_actions_against(hand, Some(&on_table), inverted, config),
        None => vec![Action::Pass],
    }
}

/// Every play the holder of `hand` may make on an already resolved table
/// combination (`None` for an open lead), plus pass.
#[must_use]
pub fn legal_actions_against(
    hand: &[Card],
    on_table: Option<&Combo>,
    inverted: bool,
    config: &RulesConfig,
) -> Vec<Action> {
    let index = HandIndex::new(hand);
    let mut candidates: Vec<Play> = Vec::new();
    match on_table.map(|combo| (combo.shape(), combo.len())) {
        None => {
            singles(&index, &mut candidates);
            groups(&index, MIN_GROUP..=MAX_GROUP, &mut candidates);
            runs(&index, MIN_RUN..=MAX_RUN, &mut candidates);
        }
        Some((Shape::Single, _)) => singles(&index, &mut candidates),
        Some((Shape::Group, len)) => groups(&index, len..=len, &mut candidates),
        Some((Shape::Run, len)) => runs(&index, len..=len, &mut candidates),
        Some((Shape::Invalid, _)) => {}
    }

    let mut seen: FxHashSet<Play> = FxHashSet::default();
    let mut actions = Vec::new();
    for mut play in candidates {
        play.sort_unstable();
        if !seen.insert(play.clone()) {
            continue;
        }
        if check_against(&play, on_table, inverted, config).is_ok() {
            actions.push(Action::Play(play));
        }
    }
    actions.push(Action::Pass);
    actions
}

/// Whether any play besides passing is available.
#[must_use]
pub fn has_playable(hand: &[Card], table: &[Card], inverted: bool, config: &RulesConfig) -> bool {
    legal_actions(hand, table, inverted, config).len() > 1
}

fn singles(index: &HandIndex, out: &mut Vec<Play>) {
    out.extend(index.distinct.iter().map(|&card| Play::from_elem(card, 1)));
}

fn groups(index: &HandIndex, sizes: RangeInclusive<usize>, out: &mut Vec<Play>) {
    for rank in Rank::all() {
        let Some(naturals) = index.by_rank.get(&rank) else {
            continue;
        };
        for size in sizes.clone() {
            for used in 1..=naturals.len().min(size) {
                let wild = size - used;
                if wild > index.jokers {
                    continue;
                }
                for subset in combinations(naturals, used) {
                    let mut play: Play = subset.into_iter().collect();
                    play.extend(std::iter::repeat(Card::Joker).take(wild));
                    out.push(play);
                }
            }
        }
    }

    if index.jokers >= MIN_GROUP && sizes.contains(&MIN_GROUP) {
        out.push(Play::from_elem(Card::Joker, MIN_GROUP));
    }
}

fn runs(index: &HandIndex, lengths: RangeInclusive<usize>, out: &mut Vec<Play>) {
    for suit in Suit::ALL {
        let row = &index.by_suit[suit.index()];
        for len in lengths.clone() {
            for start in 0..=(Rank::CYCLE_LEN as usize - len) {
                let present: SmallVec<[usize; 5]> = (start..start + len).filter(|&p| row[p]).collect();
                if present.is_empty() {
                    continue;
                }
                let missing = len - present.len();
                if missing > index.jokers {
                    continue;
                }

                // Jokers may also stand in for cards the hand does hold,
                // as long as one natural card remains.
                let spare = (index.jokers - missing).min(present.len() - 1);
                for extra in 0..=spare {
                    for replaced in combinations(&present, extra) {
                        let mut play: Play = present
                            .iter()
                            .filter(|p| !replaced.contains(*p))
                            .filter_map(|&p| Rank::from_cycle_position(p as u8))
                            .map(|rank| Card::new(suit, rank))
                            .collect();
                        play.extend(std::iter::repeat(Card::Joker).take(missing + extra));
                        out.push(play);
                    }
                }
            }
        }
    }

    for len in lengths {
        if index.jokers >= len {
            out.push(Play::from_elem(Card::Joker, len));
        }
    }
}

/// All `k`-element subsets of `items`, preserving order.
fn combinations<T: Copy>(items: &[T], k: usize) -> Vec<SmallVec<[T; 5]>> {
    fn recurse<T: Copy>(
        items: &[T],
        k: usize,
        start: usize,
        current: &mut SmallVec<[T; 5]>,
        out: &mut Vec<SmallVec<[T; 5]>>,
    ) {
        if current.len() == k {
            out.push(current.clone());
            return;
        }
        for i in start..items.len() {
            current.push(items[i]);
            recurse(items, k, i + 1, current, out);
            current.pop();
        }
    }

    let mut out = Vec::new();
    recurse(items, k, 0, &mut SmallVec::new(), &mut out);
    out
}
