//! Game rules: phase validators and the legal-action mask.
//!
//! Validators are pure functions of the scoresheet, turn state and dice.
//! `env::YambEnv` runs them before every transition and `legal_action_mask`
//! evaluates them across the whole action encoding.

mod mask;
mod validate;

pub use mask::legal_action_mask;
pub use validate::{
    need_to_announce, valid_announce_row, validate, validate_fill, validate_first_roll, validate_keep,
    validate_second_roll, Phase, RejectReason,
};
