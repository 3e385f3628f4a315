//! Legal-action mask generation.
//!
//! Every bit is decided by the same validators `step` uses, so a caller
//! that only samples masked actions never triggers truncation.

use crate::core::{ActionMask, DiceCounts, FillIndex, Row, Scoresheet, TurnState, DICE_COUNT};

use super::validate::{need_to_announce, valid_announce_row, validate_fill, Phase};

/// Build the legal-action mask for the current decision point.
///
/// Keep bits are set on the first two rolls, announcement bits on the
/// first roll only, fill bits on the third roll only.
#[must_use]
pub fn legal_action_mask(sheet: &Scoresheet, turn: &TurnState, dice: &DiceCounts) -> ActionMask {
    let mut mask = ActionMask::empty();
    let phase = Phase::from_roll(turn.roll_number);

    if matches!(phase, Phase::FirstRoll | Phase::SecondRoll) {
        for (face, available) in dice.faces_with_counts() {
            for count in 0..=DICE_COUNT {
                mask.set(ActionMask::keep_bit(face, count), count <= available);
            }
        }
    }

    if phase == Phase::FirstRoll {
        let mut any_row = false;
        for row in Row::ALL {
            let valid = valid_announce_row(sheet, row);
            any_row |= valid;
            mask.set(ActionMask::ANNOUNCE_ROW_OFFSET + row.index(), valid);
        }
        mask.set(ActionMask::ANNOUNCE_OFFSET, !need_to_announce(sheet));
        mask.set(ActionMask::ANNOUNCE_OFFSET + 1, any_row);
    }

    if phase == Phase::Fill {
        for index in FillIndex::all() {
            let legal = validate_fill(sheet, turn.announced, index).is_ok();
            mask.set(ActionMask::FILL_OFFSET + index.raw(), legal);
        }
    }

    mask
}
