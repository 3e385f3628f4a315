//! Action record and legal-action mask layout.
//!
//! Every decision uses the same fixed-shape record; fields that don't apply
//! to the current roll are ignored by the environment:
//!
//! | Roll | Used fields |
//! |---|---|
//! | 0 | `keep`, `announce`, `announce_row` |
//! | 1 | `keep` |
//! | 2 | `fill` |
//!
//! ## Raw format
//!
//! Harnesses exchange actions as nine integers,
//! `[keep1, keep2, keep3, keep4, keep5, keep6, announce, announce_row, fill_index]`:
//!
//! ```
//! use yamb_env::core::{Action, Row};
//!
//! let action = Action::from_raw(&[2, 0, 0, 0, 0, 1, 1, 13, 0]).unwrap();
//! assert!(action.announce);
//! assert_eq!(action.announce_row, Row::Yamb);
//! assert_eq!(action.to_raw(), [2, 0, 0, 0, 0, 1, 1, 13, 0]);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::board::{Cell, Column, FillIndex, Row, CELL_COUNT, ROW_COUNT};
use super::dice::{DiceCounts, DICE_COUNT, FACE_COUNT};

/// Length of the raw multi-discrete action.
pub const RAW_ACTION_LEN: usize = FACE_COUNT + 3;

/// A malformed action or an operation the environment can never accept.
///
/// These are caller defects, not game outcomes.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ContractViolation {
    #[error("raw action must have {RAW_ACTION_LEN} components, got {0}")]
    WrongArity(usize),

    #[error("raw action component {index} = {value} out of range 0..{bound}")]
    OutOfRange { index: usize, value: i64, bound: i64 },

    #[error("cannot parse action command {command:?}: {detail}")]
    BadCommand { command: String, detail: String },

    #[error("step called after the episode ended; call reset first")]
    EpisodeOver,
}

/// One decision in the Yamb turn structure.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    /// Dice to keep, as face counts. Must be a sub-multiset of the current roll.
    pub keep: DiceCounts,

    /// Announce a row on the first roll.
    pub announce: bool,

    /// Row announced when `announce` is set.
    pub announce_row: Row,

    /// Cell to fill on the third roll.
    pub fill: FillIndex,
}

impl Action {
    /// Reroll decision: keep the given dice, no announcement.
    #[must_use]
    pub fn keep(keep: DiceCounts) -> Self {
        Self {
            keep,
            ..Self::default()
        }
    }

    /// First-roll decision announcing `row`.
    #[must_use]
    pub fn announce(keep: DiceCounts, row: Row) -> Self {
        Self {
            keep,
            announce: true,
            announce_row: row,
            ..Self::default()
        }
    }

    /// Third-roll decision filling `cell`.
    #[must_use]
    pub fn fill(cell: Cell) -> Self {
        Self {
            fill: FillIndex::from(cell),
            ..Self::default()
        }
    }

    /// Decode the nine-integer multi-discrete format.
    pub fn from_raw(raw: &[i64]) -> Result<Self, ContractViolation> {
        if raw.len() != RAW_ACTION_LEN {
            return Err(ContractViolation::WrongArity(raw.len()));
        }

        let bounded = |index: usize, bound: i64| -> Result<usize, ContractViolation> {
            let value = raw[index];
            if (0..bound).contains(&value) {
                Ok(value as usize)
            } else {
                Err(ContractViolation::OutOfRange { index, value, bound })
            }
        };

        let mut keep = [0u8; FACE_COUNT];
        for (face, slot) in keep.iter_mut().enumerate() {
            *slot = bounded(face, i64::from(DICE_COUNT) + 1)? as u8;
        }
        let announce = bounded(FACE_COUNT, 2)? == 1;
        let announce_row = Row::ALL[bounded(FACE_COUNT + 1, ROW_COUNT as i64)?];
        let fill = FillIndex::new(bounded(FACE_COUNT + 2, CELL_COUNT as i64)?);

        Ok(Self {
            keep: DiceCounts::new(keep),
            announce,
            announce_row,
            fill,
        })
    }

    /// Encode into the nine-integer multi-discrete format.
    #[must_use]
    pub fn to_raw(&self) -> [i64; RAW_ACTION_LEN] {
        let mut raw = [0i64; RAW_ACTION_LEN];
        for (slot, &count) in raw.iter_mut().zip(self.keep.as_array().iter()) {
            *slot = i64::from(count);
        }
        raw[FACE_COUNT] = i64::from(self.announce);
        raw[FACE_COUNT + 1] = self.announce_row.index() as i64;
        raw[FACE_COUNT + 2] = self.fill.raw() as i64;
        raw
    }

    /// Parse a compact text command.
    ///
    /// Leading digits are dice to keep (`"113"` keeps two 1s and a 3).
    /// `a<row>` announces a row, `r<row>` and `c<column>` select the cell
    /// to fill. Row and column numbers are ordinals; missing parts default
    /// to zero.
    pub fn parse_command(command: &str) -> Result<Self, ContractViolation> {
        let bad = |detail: &str| ContractViolation::BadCommand {
            command: command.to_string(),
            detail: detail.to_string(),
        };

        let text = command.trim();
        let split = text.find(|c: char| !c.is_ascii_digit()).unwrap_or(text.len());
        let (dice, rest) = text.split_at(split);

        let mut keep = [0u8; FACE_COUNT];
        for (kept, ch) in dice.chars().enumerate() {
            if kept >= DICE_COUNT as usize {
                return Err(bad("cannot keep more than five dice"));
            }
            match ch.to_digit(10) {
                Some(face @ 1..=6) => keep[face as usize - 1] += 1,
                _ => return Err(bad("die faces must be 1-6")),
            }
        }

        let number_after = |tag: char| -> Result<Option<usize>, ContractViolation> {
            let Some(pos) = rest.find(tag) else {
                return Ok(None);
            };
            let digits: String = rest[pos + 1..].chars().take_while(char::is_ascii_digit).collect();
            digits
                .parse::<usize>()
                .map(Some)
                .map_err(|_| bad(&format!("'{tag}' must be followed by a number")))
        };

        let announce_row = number_after('a')?;
        let row = number_after('r')?.unwrap_or(0);
        let column = number_after('c')?.unwrap_or(0);

        let announce_row = match announce_row {
            Some(index) => Some(Row::from_index(index).ok_or_else(|| bad("announce row out of range"))?),
            None => None,
        };
        let row = Row::from_index(row).ok_or_else(|| bad("row out of range"))?;
        let column = Column::from_index(column).ok_or_else(|| bad("column out of range"))?;

        Ok(Self {
            keep: DiceCounts::new(keep),
            announce: announce_row.is_some(),
            announce_row: announce_row.unwrap_or_default(),
            fill: FillIndex::from(Cell::new(row, column)),
        })
    }
}

/// Legal-action mask over the flattened multi-discrete action space.
///
/// Layout (108 bits):
///
/// | Bits | Meaning |
/// |---|---|
/// | `6*f + k` for face `f` in 0..6, `k` in 0..=5 | keeping `k` dice of face `f+1` is legal |
/// | 36 | may skip announcing |
/// | 37 | may announce |
/// | 38..52 | announce row `r` is legal |
/// | 52..108 | fill index `i` is legal |
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionMask(u128);

impl ActionMask {
    /// Options per keep sub-mask (keep 0..=5 dice).
    pub const KEEP_OPTIONS: usize = DICE_COUNT as usize + 1;
    /// Offset of the announce flag bits.
    pub const ANNOUNCE_OFFSET: usize = FACE_COUNT * Self::KEEP_OPTIONS;
    /// Offset of the announce row bits.
    pub const ANNOUNCE_ROW_OFFSET: usize = Self::ANNOUNCE_OFFSET + 2;
    /// Offset of the fill index bits.
    pub const FILL_OFFSET: usize = Self::ANNOUNCE_ROW_OFFSET + ROW_COUNT;
    /// Total mask length.
    pub const LEN: usize = Self::FILL_OFFSET + CELL_COUNT;

    /// Sizes of the nine sub-spaces, in raw action order.
    pub const NVEC: [usize; RAW_ACTION_LEN] = [6, 6, 6, 6, 6, 6, 2, ROW_COUNT, CELL_COUNT];

    /// An all-false mask.
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Check a bit.
    #[must_use]
    pub fn get(&self, bit: usize) -> bool {
        assert!(bit < Self::LEN, "mask bit {bit} out of range");
        self.0 & (1u128 << bit) != 0
    }

    /// Set a bit.
    pub fn set(&mut self, bit: usize, value: bool) {
        assert!(bit < Self::LEN, "mask bit {bit} out of range");
        if value {
            self.0 |= 1u128 << bit;
        } else {
            self.0 &= !(1u128 << bit);
        }
    }

    /// Bit index for keeping `count` dice of `face` (1..=6).
    #[must_use]
    pub fn keep_bit(face: u8, count: u8) -> usize {
        (face as usize - 1) * Self::KEEP_OPTIONS + count as usize
    }

    /// Is keeping `count` dice of `face` legal?
    #[must_use]
    pub fn keep_allowed(&self, face: u8, count: u8) -> bool {
        self.get(Self::keep_bit(face, count))
    }

    /// May the first-roll action skip announcing?
    #[must_use]
    pub fn may_skip_announce(&self) -> bool {
        self.get(Self::ANNOUNCE_OFFSET)
    }

    /// May the first-roll action announce?
    #[must_use]
    pub fn may_announce(&self) -> bool {
        self.get(Self::ANNOUNCE_OFFSET + 1)
    }

    /// Is announcing `row` legal?
    #[must_use]
    pub fn announce_row_allowed(&self, row: Row) -> bool {
        self.get(Self::ANNOUNCE_ROW_OFFSET + row.index())
    }

    /// Is filling `index` legal?
    #[must_use]
    pub fn fill_allowed(&self, index: FillIndex) -> bool {
        self.get(Self::FILL_OFFSET + index.raw())
    }

    /// Number of set bits.
    #[must_use]
    pub fn count_ones(&self) -> u32 {
        self.0.count_ones()
    }

    /// Raw bits.
    #[must_use]
    pub const fn bits(&self) -> u128 {
        self.0
    }

    /// Expand into a boolean vector of length [`ActionMask::LEN`].
    #[must_use]
    pub fn to_vec(&self) -> Vec<bool> {
        (0..Self::LEN).map(|bit| self.get(bit)).collect()
    }

    /// The sub-mask for raw action component `component` (0..9).
    #[must_use]
    pub fn component(&self, component: usize) -> Vec<bool> {
        let start: usize = Self::NVEC[..component].iter().sum();
        (start..start + Self::NVEC[component]).map(|bit| self.get(bit)).collect()
    }
}
