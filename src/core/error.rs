//! Engine error taxonomy.
//!
//! Only invariant violations are errors. An illegal play is never an
//! error: the turn engine downgrades it to a pass and records why.

use thiserror::Error;

use super::player::PlayerId;

/// Fatal errors raised by the engine.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A seat that is not part of this round.
    #[error("{player} is not seated in a {player_count}-player round")]
    UnknownPlayer { player: PlayerId, player_count: usize },

    /// A step submitted for someone other than the seat to act.
    #[error("{player} acted out of turn; {expected} is to act")]
    OutOfTurn { player: PlayerId, expected: PlayerId },

    /// A step submitted after the round terminated.
    #[error("round is over; start a new round before stepping")]
    RoundOver,

    /// Finishing order requested before the round terminated.
    #[error("round is still in progress")]
    RoundInProgress,

    /// Rules configuration that cannot produce a playable round.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Prior finishing order that cannot drive a card exchange.
    #[error("invalid finishing order: {0}")]
    InvalidFinishingOrder(String),

    /// Text that does not name a card.
    #[error("cannot parse card {0:?}")]
    InvalidCard(String),

    /// A driven round that did not terminate in time.
    #[error("round did not finish within {0} steps")]
    StepLimit(usize),

    /// Number of policies handed to a runner differs from the seat count.
    #[error("{policies} policies supplied for {players} players")]
    PolicyCount { policies: usize, players: usize },

    /// Step log (de)serialization failure.
    #[error("step log serialization failed: {0}")]
    Serialization(String),
}

impl From<bincode::Error> for EngineError {
    fn from(err: bincode::Error) -> Self {
        EngineError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = EngineError::UnknownPlayer {
            player: PlayerId::new(6),
            player_count: 4,
        };
        assert_eq!(err.to_string(), "Player 6 is not seated in a 4-player round");

        let err = EngineError::OutOfTurn {
            player: PlayerId::new(1),
            expected: PlayerId::new(2),
        };
        assert_eq!(err.to_string(), "Player 1 acted out of turn; Player 2 is to act");
    }
}
