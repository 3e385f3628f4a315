//! Turn bookkeeping and the observation snapshot.
//!
//! ## TurnState
//!
//! Where the game is within its 56 turns of three rolls each, and whether
//! the current turn carries an announcement.
//!
//! ## Observation
//!
//! The full Markov state handed to callers after `reset` and `step`. The
//! game is fully observable, so nothing is hidden from it.

use serde::{Deserialize, Serialize};

use super::board::{Row, Scoresheet, CELL_COUNT};
use super::dice::DiceCounts;

/// Number of rolls in each turn.
pub const ROLLS_PER_TURN: u8 = 3;

/// Number of turns in a game, one per scoresheet cell.
pub const TOTAL_TURNS: u8 = CELL_COUNT as u8;

/// Position within the game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TurnState {
    /// Completed turns (0..=56).
    pub turn_number: u8,

    /// Active roll within the turn (0, 1 or 2).
    pub roll_number: u8,

    /// Row announced on this turn's first roll, if any.
    pub announced: Option<Row>,
}

impl TurnState {
    /// Fresh state at the start of a game.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether all turns have been played.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.turn_number >= TOTAL_TURNS
    }

    /// Move to the next roll within the turn.
    pub fn advance_roll(&mut self) {
        debug_assert!(self.roll_number + 1 < ROLLS_PER_TURN);
        self.roll_number += 1;
    }

    /// Finish the turn: back to the first roll, announcement cleared.
    pub fn advance_turn(&mut self) {
        self.turn_number += 1;
        self.roll_number = 0;
        self.announced = None;
    }
}

/// Snapshot of the environment returned by `reset` and `step`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Observation {
    /// Completed turns (0..=56).
    pub turn_number: u8,

    /// Active roll within the turn (0..=2).
    pub roll_number: u8,

    /// The scoresheet.
    pub grid: Scoresheet,

    /// Current dice as face counts.
    pub dice: DiceCounts,

    /// Whether this turn carries an announcement.
    pub announced: bool,

    /// Announced row ordinal; 0 when nothing is announced.
    pub announced_row: u8,
}

impl Observation {
    /// Build a snapshot from engine state.
    #[must_use]
    pub fn new(turn: &TurnState, grid: &Scoresheet, dice: DiceCounts) -> Self {
        Self {
            turn_number: turn.turn_number,
            roll_number: turn.roll_number,
            grid: *grid,
            dice,
            announced: turn.announced.is_some(),
            announced_row: turn.announced.map_or(0, |row| row.index() as u8),
        }
    }

    /// The announced row, if any.
    #[must_use]
    pub fn announced_row(&self) -> Option<Row> {
        if self.announced {
            Row::from_index(self.announced_row as usize)
        } else {
            None
        }
    }
}
