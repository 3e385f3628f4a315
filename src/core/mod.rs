//! Core types: scoresheet, dice, actions, turn state, RNG, configuration.
//!
//! Everything here is plain data with no game rules attached. The rules
//! live in `rules` and `scoring`; the state machine in `env`.

pub mod action;
pub mod board;
pub mod config;
pub mod dice;
pub mod rng;
pub mod state;

pub use action::{Action, ActionMask, ContractViolation, RAW_ACTION_LEN};
pub use board::{
    Cell, Column, FillIndex, FillIndexOutOfRange, Row, Scoresheet, CELL_COUNT, COLUMN_COUNT,
    ROW_COUNT,
};
pub use config::{EnvConfig, DEFAULT_TRUNCATION_PENALTY};
pub use dice::{DiceCounts, DICE_COUNT, FACE_COUNT};
pub use rng::{GameRng, GameRngState};
pub use state::{Observation, TurnState, ROLLS_PER_TURN, TOTAL_TURNS};
