//! Scoresheet totals.
//!
//! Each column scores three independent parts:
//!
//! - **Numbers**: sum of Ones..Sixes, plus a 30 point bonus at 60 or more
//! - **Max/Min**: `(Max - Min) × Ones`, zero unless all three cells are filled
//! - **Combinations**: sum of TwoPairs..Yamb
//!
//! Empty cells count as zero, except in the Max/Min term where any empty
//! operand zeroes the whole term. The Max/Min term is negative when Max is
//! below Min, so totals are not monotone in general.

use serde::{Deserialize, Serialize};

use crate::core::{Column, Row, Scoresheet};

/// Number subtotal needed for the bonus.
pub const NUMBERS_BONUS_THRESHOLD: i32 = 60;

/// Bonus for reaching the number subtotal threshold.
pub const NUMBERS_BONUS: i32 = 30;

/// Score breakdown for one column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnScore {
    /// Ones..Sixes, bonus included.
    pub numbers: i32,
    /// `(Max - Min) × Ones`.
    pub max_min: i32,
    /// TwoPairs..Yamb.
    pub combinations: i32,
}

impl ColumnScore {
    /// Sum of the three parts.
    #[must_use]
    pub fn total(&self) -> i32 {
        self.numbers + self.max_min + self.combinations
    }
}

fn filled_sum(sheet: &Scoresheet, rows: &[Row], column: Column) -> i32 {
    rows.iter()
        .filter_map(|&row| sheet.get(row, column))
        .map(i32::from)
        .sum()
}

/// Score breakdown for one column.
#[must_use]
pub fn column_score(sheet: &Scoresheet, column: Column) -> ColumnScore {
    let mut numbers = filled_sum(sheet, &Row::NUMBERS, column);
    if numbers >= NUMBERS_BONUS_THRESHOLD {
        numbers += NUMBERS_BONUS;
    }

    let max_min = match (
        sheet.get(Row::Max, column),
        sheet.get(Row::Min, column),
        sheet.get(Row::Ones, column),
    ) {
        (Some(max), Some(min), Some(ones)) => (i32::from(max) - i32::from(min)) * i32::from(ones),
        _ => 0,
    };

    ColumnScore {
        numbers,
        max_min,
        combinations: filled_sum(sheet, &Row::COMBINATIONS, column),
    }
}

/// Total score of a scoresheet.
#[must_use]
pub fn score(sheet: &Scoresheet) -> i32 {
    Column::ALL
        .iter()
        .map(|&column| column_score(sheet, column).total())
        .sum()
}
