//! Rule engine: strength, combination shapes, move validation, effects.
//!
//! Every function here is pure. Orientation (`inverted`) and the table
//! are explicit parameters, and joker substitutions exist only inside the
//! returned [`Combo`] values, so the rule engine is safe to call from any
//! number of read-only contexts.

pub mod combo;
pub mod exchange;
pub mod strength;
pub mod validate;

pub use combo::{classify, resolve, resolve_as, Combo, Shape, MAX_GROUP, MAX_RUN, MIN_GROUP, MIN_RUN};
pub use exchange::{exchange_cards, Transfer};
pub use strength::{compare, rank_strength, strength, Slot, Substitution, WILD_STRENGTH};
pub use validate::{
    check_against, check_move, is_valid_move, triggers_inversion, triggers_table_clear, Rejection,
    TableClear,
};
