//! Drive rounds to completion with one policy per seat.

use tracing::{info, trace};

use super::Policy;
use crate::core::{EngineError, PlayerId};
use crate::game::{GameState, TurnEngine};

/// Play `state` until the round ends and return the finishing order.
///
/// `policies[i]` acts for seat `i`. Fails with
/// [`EngineError::StepLimit`] if the round is still running after
/// `max_steps` steps.
///
/// ```
/// use daifugo_engine::core::RulesConfig;
/// use daifugo_engine::game::TurnEngine;
/// use daifugo_engine::policy::{play_round, LowestCardPolicy, Policy};
///
/// let engine = TurnEngine::new(RulesConfig::default()).unwrap();
/// let mut state = engine.new_round(3, 42, None).unwrap();
/// let mut policies: Vec<Box<dyn Policy>> = (0..3)
///     .map(|_| Box::new(LowestCardPolicy) as Box<dyn Policy>)
///     .collect();
/// let order = play_round(&engine, &mut state, &mut policies, 1_000).unwrap();
/// assert_eq!(order.len(), 3);
/// ```
pub fn play_round(
    engine: &TurnEngine,
    state: &mut GameState,
    policies: &mut [Box<dyn Policy>],
    max_steps: usize,
) -> Result<Vec<PlayerId>, EngineError> {
    if policies.len() != state.player_count() {
        return Err(EngineError::PolicyCount {
            policies: policies.len(),
            players: state.player_count(),
        });
    }

    for _ in 0..max_steps {
        if state.is_round_over() {
            break;
        }
        let player = state.turn();
        let legal = engine.legal_actions(state)?;
        let policy = &mut policies[player.index()];
        let action = policy.choose(&state.view(player), &legal);
        trace!(player = %player, policy = policy.name(), action = %action, "policy chose");
        engine.step(state, player, &action)?;
    }

    if !state.is_round_over() {
        return Err(EngineError::StepLimit(max_steps));
    }
    Ok(engine.finishing_order(state)?.to_vec())
}

/// Play `rounds` consecutive rounds at one table.
///
/// Each round after the first applies the card exchange from the previous
/// finishing order. Round `i` is dealt from `seed + i`.
pub fn play_rounds(
    engine: &TurnEngine,
    policies: &mut [Box<dyn Policy>],
    rounds: usize,
    seed: u64,
    max_steps: usize,
) -> Result<Vec<Vec<PlayerId>>, EngineError> {
    let player_count = policies.len();
    let mut results: Vec<Vec<PlayerId>> = Vec::with_capacity(rounds);

    for round in 0..rounds {
        let prior = results.last().map(Vec::as_slice);
        let mut state = engine.new_round(player_count, seed.wrapping_add(round as u64), prior)?;
        let order = play_round(engine, &mut state, policies, max_steps)?;
        if let Some(winner) = order.first() {
            info!(round, winner = %winner, steps = state.turn_count(), "round complete");
        }
        results.push(order);
    }
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RulesConfig;
    use crate::policy::{LowestCardPolicy, RandomPolicy};

    fn lowest(count: usize) -> Vec<Box<dyn Policy>> {
        (0..count)
            .map(|_| Box::new(LowestCardPolicy) as Box<dyn Policy>)
            .collect()
    }

    #[test]
    fn test_policy_count_must_match() {
        let engine = TurnEngine::new(RulesConfig::default()).unwrap();
        let mut state = engine.new_round(4, 1, None).unwrap();
        let err = play_round(&engine, &mut state, &mut lowest(3), 100).unwrap_err();
        assert_eq!(err, EngineError::PolicyCount { policies: 3, players: 4 });
    }

    #[test]
    fn test_step_limit() {
        let engine = TurnEngine::new(RulesConfig::default()).unwrap();
        let mut state = engine.new_round(4, 1, None).unwrap();
        let err = play_round(&engine, &mut state, &mut lowest(4), 3).unwrap_err();
        assert_eq!(err, EngineError::StepLimit(3));
        assert_eq!(state.turn_count(), 3);
    }

    #[test]
    fn test_random_round_completes() {
        let engine = TurnEngine::new(RulesConfig::default()).unwrap();
        let mut state = engine.new_round(5, 11, None).unwrap();
        let mut policies: Vec<Box<dyn Policy>> = (0..5)
            .map(|seat| Box::new(RandomPolicy::new(seat)) as Box<dyn Policy>)
            .collect();
        let order = play_round(&engine, &mut state, &mut policies, 100_000).unwrap();

        let mut seats = order.clone();
        seats.sort();
        assert_eq!(seats, PlayerId::all(5).collect::<Vec<_>>());
    }

    #[test]
    fn test_consecutive_rounds() {
        let engine = TurnEngine::new(RulesConfig::default()).unwrap();
        let results = play_rounds(&engine, &mut lowest(4), 3, 7, 10_000).unwrap();
        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|order| order.len() == 4));
    }
}
