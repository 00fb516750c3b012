//! Turn engine: the only code that mutates a round in progress.
//!
//! ## Step
//!
//! One call to [`TurnEngine::step`] fully resolves one player's action:
//!
//! 1. The action is judged against the acting player's hand and the
//!    table. A play that names cards not held, or that the rule engine
//!    rejects, is downgraded to a pass with an advisory [`PassReason`].
//! 2. An accepted play leaves the hand, becomes the table, clears every
//!    passed flag and makes the player lead holder. Inversion, finishing
//!    and table clears are evaluated in that order.
//! 3. A pass marks the player. Once every other active player has passed
//!    against a live table the trick closes and the lead holder (or the
//!    next seat with cards after them) leads.
//! 4. When at most one player has not finished, they are appended and the
//!    round is over.
//!
//! ## Fatal errors
//!
//! Stepping a finished round, an unknown seat, or a seat acting out of
//! turn is an [`EngineError`]; the state is left untouched.

use tracing::{debug, info, trace};

use super::log::{PassReason, Resolution, StepRecord};
use super::state::{holds_all, GameState};
use crate::cards::{Card, Deck};
use crate::core::{Action, EngineError, GameRng, Play, PlayerId, RulesConfig, WildcardClearRule};
use crate::legal;
use crate::rules::{
    check_against, exchange_cards, triggers_inversion, triggers_table_clear, Combo, Rejection,
    TableClear,
};

/// Result of a successful step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepOutcome {
    /// The round reached its terminal state on this step.
    pub round_over: bool,
    /// The record appended to the state's log.
    pub record: StepRecord,
}

/// Drives rounds under a fixed rules configuration.
#[derive(Clone, Debug)]
pub struct TurnEngine {
    config: RulesConfig,
}

impl TurnEngine {
    /// Create an engine, validating the configuration.
    pub fn new(config: RulesConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self { config })
    }

    #[must_use]
    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    // === Round setup ===

    /// Deal a fresh round.
    ///
    /// The deck is shuffled from `seed`. With a `prior_order` (best to
    /// worst) the card exchange is applied before the opener is chosen.
    /// The holder of the configured opening card leads, or seat 0 if it
    /// was not dealt.
    pub fn new_round(
        &self,
        player_count: usize,
        seed: u64,
        prior_order: Option<&[PlayerId]>,
    ) -> Result<GameState, EngineError> {
        self.config.validate_player_count(player_count)?;

        let mut rng = GameRng::new(seed).for_context("deal");
        let mut deck = Deck::new(self.config.deck_variant);
        deck.shuffle(&mut rng);
        let mut hands = deck.deal(player_count);

        if let Some(order) = prior_order {
            let transfers = exchange_cards(&mut hands, order)?;
            debug!(transfers = transfers.len(), "applied card exchange");
        }

        let opener = hands
            .iter()
            .find(|(_, hand)| hand.contains(&self.config.opening_card))
            .map_or(PlayerId::new(0), |(player, _)| player);

        info!(players = player_count, seed, opener = %opener, "dealt new round");
        GameState::from_dealt(hands, opener)
    }

    /// Deal the round that follows a finished one, with the exchange
    /// driven by its finishing order.
    pub fn next_round(&self, finished: &GameState, seed: u64) -> Result<GameState, EngineError> {
        let order = self.finishing_order(finished)?;
        self.new_round(finished.player_count(), seed, Some(order))
    }

    // === Queries ===

    /// Legal actions for the player to act, pass last.
    pub fn legal_actions(&self, state: &GameState) -> Result<Vec<Action>, EngineError> {
        if state.is_round_over() {
            return Err(EngineError::RoundOver);
        }
        Ok(legal::legal_actions_against(
            state.hand(state.turn()),
            state.table().combo(),
            state.inverted(),
            &self.config,
        ))
    }

    /// Final ranking, best first. Only available once the round is over.
    pub fn finishing_order<'a>(&self, state: &'a GameState) -> Result<&'a [PlayerId], EngineError> {
        if state.is_round_over() {
            Ok(state.finishing_order())
        } else {
            Err(EngineError::RoundInProgress)
        }
    }

    // === Step ===

    /// Resolve one action by `player`.
    pub fn step(
        &self,
        state: &mut GameState,
        player: PlayerId,
        action: &Action,
    ) -> Result<StepOutcome, EngineError> {
        if state.round_over {
            return Err(EngineError::RoundOver);
        }
        state.check_player(player)?;
        if player != state.turn {
            return Err(EngineError::OutOfTurn {
                player,
                expected: state.turn,
            });
        }
        state.turn_count += 1;

        let mut record = StepRecord {
            turn: state.turn_count,
            player,
            resolution: Resolution::Passed(PassReason::Chosen),
            table: Play::new(),
            inversion_toggled: false,
            inverted: state.inverted,
            clear: TableClear::NoClear,
            trick_closed: false,
            finished: false,
            next: None,
        };

        let mut next = match self.judge(state, player, action) {
            Ok(combo) => {
                let mut cards = Play::from_slice(action.cards());
                cards.sort_unstable();
                let next = self.apply_play(state, player, &cards, &combo, &mut record);
                record.resolution = Resolution::Played {
                    cards,
                    shape: combo.shape(),
                };
                next
            }
            Err(reason) => {
                if reason != PassReason::Chosen {
                    trace!(player = %player, action = %action, %reason, "play downgraded to pass");
                }
                record.resolution = Resolution::Passed(reason);
                apply_pass(state, player, &mut record)
            }
        };

        let unfinished: Vec<PlayerId> = PlayerId::all(state.player_count())
            .filter(|p| !state.finishing_order.contains(p))
            .collect();
        if unfinished.len() <= 1 || next.is_none() {
            for last in unfinished {
                state.record_finish(last);
            }
            state.round_over = true;
            next = None;
            info!(
                steps = state.turn_count,
                order = ?state.finishing_order,
                "round over"
            );
        } else if let Some(seat) = next {
            state.turn = seat;
        }

        record.table = Play::from_slice(state.table.cards());
        record.inverted = state.inverted;
        record.next = next;
        state.log.push(record.clone());

        Ok(StepOutcome {
            round_over: state.round_over,
            record,
        })
    }

    /// Accept the action as a play, or say why it counts as a pass.
    fn judge(&self, state: &GameState, player: PlayerId, action: &Action) -> Result<Combo, PassReason> {
        let cards = match action {
            Action::Pass => return Err(PassReason::Chosen),
            Action::Play(cards) => cards,
        };
        if cards.is_empty() {
            return Err(PassReason::Rejected(Rejection::Empty));
        }
        if !holds_all(state.hand(player), cards) {
            return Err(PassReason::NotInHand);
        }
        check_against(cards, state.table.combo(), state.inverted, &self.config)
            .map_err(PassReason::Rejected)
    }

    fn apply_play(
        &self,
        state: &mut GameState,
        player: PlayerId,
        cards: &[Card],
        combo: &Combo,
        record: &mut StepRecord,
    ) -> Option<PlayerId> {
        let removed = state.remove_from_hand(player, cards);
        debug_assert!(removed, "judged play must be held");
        state.table.set(cards, combo.clone());
        state.reset_passes();
        state.lead_holder = Some(player);

        if triggers_inversion(combo) {
            state.inverted = !state.inverted;
            record.inversion_toggled = true;
            debug!(player = %player, inverted = state.inverted, "rank order flipped");
        }

        if !state.is_active(player) && state.record_finish(player) {
            record.finished = true;
            debug!(player = %player, place = state.finishing_order.len(), "player finished");
        }

        let clear = triggers_table_clear(combo, &self.config);
        record.clear = clear;
        match clear {
            TableClear::NoClear => state.next_active_after(player),
            TableClear::ClearingRank => {
                state.table.clear();
                debug!(player = %player, "clearing rank cleared the table");
                state.lead_seat(player)
            }
            TableClear::Wildcard => {
                state.table.clear();
                debug!(player = %player, rule = ?self.config.wildcard_clear, "joker cleared the table");
                match self.config.wildcard_clear {
                    WildcardClearRule::SameLeader => state.lead_seat(player),
                    WildcardClearRule::AdvanceSeat | WildcardClearRule::Disabled => {
                        state.next_active_after(player)
                    }
                }
            }
        }
    }
}

fn apply_pass(state: &mut GameState, player: PlayerId, record: &mut StepRecord) -> Option<PlayerId> {
    state.passed[player] = true;

    if !state.table.is_empty() {
        let lead = state.lead_holder;
        let everyone_passed = state
            .active_players()
            .filter(|&p| Some(p) != lead)
            .all(|p| state.passed[p]);
        if everyone_passed {
            state.table.clear();
            state.reset_passes();
            record.trick_closed = true;
            let leader = lead.unwrap_or(player);
            debug!(leader = %leader, "trick closed");
            return state.lead_seat(leader);
        }
    }
    state.next_active_after(player)
}
