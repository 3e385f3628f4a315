//! Pure scoring functions.
//!
//! - `combination_value`: what a roll is worth in a given row
//! - `score`: the total of a scoresheet, with per-column breakdown
//!
//! Nothing here touches environment state.

mod combination;
mod total;

pub use combination::combination_value;
pub use total::{column_score, score, ColumnScore, NUMBERS_BONUS, NUMBERS_BONUS_THRESHOLD};
