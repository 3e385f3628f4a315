//! The Yamb environment.
//!
//! `YambEnv` drives the reset/step loop: it validates each action with
//! `rules`, applies it, rolls dice through `GameRng` and reports the
//! score delta as reward.

mod yamb;

pub use yamb::{EnvCheckpoint, StepInfo, StepResult, YambEnv};
