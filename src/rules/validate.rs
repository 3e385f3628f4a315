//! Phase validators.
//!
//! Each validator is a pure predicate over the current sheet, turn and
//! dice. The environment calls them before mutating anything, and the mask
//! generator calls the same functions to decide which actions are legal.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{Action, Cell, Column, DiceCounts, FillIndex, Row, Scoresheet, TurnState};

/// Decision point within a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// First roll: keep dice, optionally announce.
    FirstRoll,
    /// Second roll: keep dice.
    SecondRoll,
    /// Third roll: fill a cell.
    Fill,
}

impl Phase {
    /// Phase for a roll number.
    ///
    /// Panics on a roll number above 2.
    #[must_use]
    pub fn from_roll(roll_number: u8) -> Self {
        match roll_number {
            0 => Phase::FirstRoll,
            1 => Phase::SecondRoll,
            2 => Phase::Fill,
            other => panic!("roll number {other} out of range 0..3"),
        }
    }
}

/// Why an action was rejected.
///
/// A rejected action ends the episode with the truncation penalty.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum RejectReason {
    #[error("cannot keep {keep} when only {available} available")]
    KeepExceedsRoll { keep: DiceCounts, available: DiceCounts },

    #[error("invalid announce row {0}: announce cell already filled")]
    InvalidAnnounceRow(Row),

    #[error("announcement required, no other cells open")]
    AnnouncementRequired,

    #[error("cell {0} already filled")]
    AlreadyFilled(Cell),

    #[error("wrong row for Up column, expected {expected:?} but got {got}")]
    WrongUpRow { expected: Option<Row>, got: Row },

    #[error("wrong row for Down column, expected {expected:?} but got {got}")]
    WrongDownRow { expected: Option<Row>, got: Row },

    #[error("must fill the announced cell ({announced}, Announce) but got {got}")]
    MustFillAnnounced { announced: Row, got: Cell },

    #[error("cannot fill Announce column without announcing")]
    AnnounceColumnWithoutAnnouncement,
}

/// Check whether `row` can be announced: its Announce cell is still empty.
#[must_use]
pub fn valid_announce_row(sheet: &Scoresheet, row: Row) -> bool {
    !sheet.is_filled(row, Column::Announce)
}

/// Check whether announcing is mandatory: Down, Up and Free are all full.
#[must_use]
pub fn need_to_announce(sheet: &Scoresheet) -> bool {
    Column::OPEN.iter().all(|&column| sheet.is_column_complete(column))
}

/// Kept dice must be a sub-multiset of the current roll.
pub fn validate_keep(dice: &DiceCounts, keep: &DiceCounts) -> Result<(), RejectReason> {
    if dice.can_keep(keep) {
        Ok(())
    } else {
        Err(RejectReason::KeepExceedsRoll {
            keep: *keep,
            available: *dice,
        })
    }
}

/// Validate a first-roll action: keep plus the announcement rules.
pub fn validate_first_roll(
    sheet: &Scoresheet,
    dice: &DiceCounts,
    action: &Action,
) -> Result<(), RejectReason> {
    validate_keep(dice, &action.keep)?;

    if action.announce {
        if !valid_announce_row(sheet, action.announce_row) {
            return Err(RejectReason::InvalidAnnounceRow(action.announce_row));
        }
    } else if need_to_announce(sheet) {
        return Err(RejectReason::AnnouncementRequired);
    }

    Ok(())
}

/// Validate a second-roll action.
pub fn validate_second_roll(dice: &DiceCounts, action: &Action) -> Result<(), RejectReason> {
    validate_keep(dice, &action.keep)
}

/// Validate filling `index` given the turn's announcement.
pub fn validate_fill(
    sheet: &Scoresheet,
    announced: Option<Row>,
    index: FillIndex,
) -> Result<(), RejectReason> {
    let cell = index.cell();
    let Cell { row, column } = cell;

    if sheet.is_filled(row, column) {
        return Err(RejectReason::AlreadyFilled(cell));
    }

    if column == Column::Up {
        let expected = sheet.next_up();
        if expected != Some(row) {
            return Err(RejectReason::WrongUpRow { expected, got: row });
        }
    }

    if column == Column::Down {
        let expected = sheet.next_down();
        if expected != Some(row) {
            return Err(RejectReason::WrongDownRow { expected, got: row });
        }
    }

    match announced {
        Some(announced) if cell != Cell::new(announced, Column::Announce) => {
            Err(RejectReason::MustFillAnnounced { announced, got: cell })
        }
        None if column == Column::Announce => Err(RejectReason::AnnounceColumnWithoutAnnouncement),
        _ => Ok(()),
    }
}

/// Validate `action` for the phase implied by `turn`.
pub fn validate(
    sheet: &Scoresheet,
    turn: &TurnState,
    dice: &DiceCounts,
    action: &Action,
) -> Result<(), RejectReason> {
    match Phase::from_roll(turn.roll_number) {
        Phase::FirstRoll => validate_first_roll(sheet, dice, action),
        Phase::SecondRoll => validate_second_roll(dice, action),
        Phase::Fill => validate_fill(sheet, turn.announced, action.fill),
    }
}
