//! # yamb-env
//!
//! A single-player Yamb dice game environment for reinforcement learning.
//!
//! ## Design Principles
//!
//! 1. **Masked Actions**: Every decision uses one fixed-shape action record.
//!    `legal_action_mask` is built from the same validators `step` runs, so
//!    an agent sampling only masked actions never truncates.
//!
//! 2. **Illegal Moves End Episodes**: An illegal action is a game outcome, not
//!    an error. It returns the truncation penalty and leaves state untouched.
//!
//! 3. **Deterministic**: All dice come from a seedable ChaCha8 generator.
//!
//! ## Game
//!
//! 56 turns, one per cell of a 14-row by 4-column scoresheet. Each turn has
//! three rolls of five dice: keep dice (and optionally announce a row) after
//! the first, keep dice after the second, fill a cell after the third.
//!
//! ## Modules
//!
//! - `core`: Board, dice, actions, masks, RNG, configuration
//! - `scoring`: Combination values and scoresheet totals
//! - `rules`: Phase validators and legal-action masks
//! - `env`: The `YambEnv` reset/step state machine
//! - `nn`: Observation encoding and policy interfaces
//! - `training`: Episode recording, rollouts and evaluation
//! - `render`: Plain-text rendering

pub mod core;
pub mod env;
pub mod nn;
pub mod render;
pub mod rules;
pub mod scoring;
pub mod training;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionMask, Cell, Column, ContractViolation, DiceCounts, EnvConfig, FillIndex,
    GameRng, GameRngState, Observation, Row, Scoresheet, TurnState,
};

pub use crate::env::{EnvCheckpoint, StepInfo, StepResult, YambEnv};

pub use crate::rules::{legal_action_mask, Phase, RejectReason};

pub use crate::scoring::{combination_value, score};

pub use crate::nn::{EncodedState, FlatEncoder, MaskedRandomPolicy, ObservationEncoder, Policy};

pub use crate::training::{Episode, EvaluationSummary, RolloutConfig, RolloutWorker, Transition};
