//! Append-only log of step results.
//!
//! Each call to `TurnEngine::step` appends one immutable [`StepRecord`].
//! The engine never reads the log back; it is an observation channel for
//! replay, debugging and training data.
//!
//! The log is an `im::Vector`, so cloning a `GameState` shares the
//! history instead of copying it.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::{EngineError, Play, PlayerId};
use crate::rules::{Rejection, Shape, TableClear};

/// Why a step ended in a pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PassReason {
    /// The player chose to pass.
    Chosen,
    /// The play named cards the player does not hold.
    NotInHand,
    /// The rule engine rejected the play.
    Rejected(Rejection),
}

impl std::fmt::Display for PassReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PassReason::Chosen => f.write_str("passed"),
            PassReason::NotInHand => f.write_str("cards not in hand"),
            PassReason::Rejected(rejection) => write!(f, "{rejection}"),
        }
    }
}

/// What a step did with the submitted action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    Played { cards: Play, shape: Shape },
    Passed(PassReason),
}

impl Resolution {
    #[must_use]
    pub fn is_play(&self) -> bool {
        matches!(self, Resolution::Played { .. })
    }
}

/// The result of one step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    /// Step number within the round (starts at 1).
    pub turn: u32,

    /// Seat that acted.
    pub player: PlayerId,

    /// Play or (possibly downgraded) pass.
    pub resolution: Resolution,

    /// Cards on the table after the step.
    pub table: Play,

    /// The play flipped the rank order.
    pub inversion_toggled: bool,

    /// Rank order after the step.
    pub inverted: bool,

    /// Clearing effect of the play.
    pub clear: TableClear,

    /// Every other active player passed and the trick closed.
    pub trick_closed: bool,

    /// The acting player emptied their hand on this step.
    pub finished: bool,

    /// Seat to act next; `None` once the round is over.
    pub next: Option<PlayerId>,
}

/// History of a round.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepLog {
    records: Vector<StepRecord>,
}

impl StepLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: StepRecord) {
        self.records.push_back(record);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn last(&self) -> Option<&StepRecord> {
        self.records.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StepRecord> {
        self.records.iter()
    }

    /// Records of one seat.
    pub fn for_player(&self, player: PlayerId) -> impl Iterator<Item = &StepRecord> {
        self.records.iter().filter(move |r| r.player == player)
    }

    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, EngineError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a log written by [`StepLog::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EngineError> {
        Ok(bincode::deserialize(bytes)?)
    }
}
