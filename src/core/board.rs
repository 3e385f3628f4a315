//! The Yamb scoresheet: rows, columns, cells and the fill-order scans.
//!
//! The sheet is a fixed 14×4 grid. Each cell is either empty or holds a
//! non-negative score. Cells are written once and never cleared; the only
//! writer is the environment's fill transition.
//!
//! ## Fill index encoding
//!
//! A cell is addressed in actions by a single index in `0..56`:
//!
//! ```
//! use yamb_env::core::{Cell, Column, FillIndex, Row};
//!
//! let cell = Cell::new(Row::Sixes, Column::Up);
//! let index = FillIndex::from(cell);
//! assert_eq!(index.raw(), 5 + 14);
//! assert_eq!(index.cell(), cell);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of rows on the scoresheet.
pub const ROW_COUNT: usize = 14;

/// Number of columns on the scoresheet.
pub const COLUMN_COUNT: usize = 4;

/// Number of cells on the scoresheet (and turns in a game).
pub const CELL_COUNT: usize = ROW_COUNT * COLUMN_COUNT;

/// Scoring category. Ordinal order is the Down column's fill order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Row {
    #[default]
    Ones,
    Twos,
    Threes,
    Fours,
    Fives,
    Sixes,
    Max,
    Min,
    TwoPairs,
    ThreeOfAKind,
    Straight,
    FullHouse,
    FourOfAKind,
    Yamb,
}

impl Row {
    /// All rows in ascending ordinal order.
    pub const ALL: [Row; ROW_COUNT] = [
        Row::Ones,
        Row::Twos,
        Row::Threes,
        Row::Fours,
        Row::Fives,
        Row::Sixes,
        Row::Max,
        Row::Min,
        Row::TwoPairs,
        Row::ThreeOfAKind,
        Row::Straight,
        Row::FullHouse,
        Row::FourOfAKind,
        Row::Yamb,
    ];

    /// The number rows, Ones through Sixes.
    pub const NUMBERS: [Row; 6] = [
        Row::Ones,
        Row::Twos,
        Row::Threes,
        Row::Fours,
        Row::Fives,
        Row::Sixes,
    ];

    /// The combination rows, TwoPairs through Yamb.
    pub const COMBINATIONS: [Row; 6] = [
        Row::TwoPairs,
        Row::ThreeOfAKind,
        Row::Straight,
        Row::FullHouse,
        Row::FourOfAKind,
        Row::Yamb,
    ];

    /// Row at the given ordinal, if in range.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Ordinal position of this row.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Face value (1..=6) for the number rows, `None` otherwise.
    #[must_use]
    pub const fn face(self) -> Option<u8> {
        match self {
            Row::Ones => Some(1),
            Row::Twos => Some(2),
            Row::Threes => Some(3),
            Row::Fours => Some(4),
            Row::Fives => Some(5),
            Row::Sixes => Some(6),
            _ => None,
        }
    }

    /// Short display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Row::Ones => "Ones",
            Row::Twos => "Twos",
            Row::Threes => "Threes",
            Row::Fours => "Fours",
            Row::Fives => "Fives",
            Row::Sixes => "Sixes",
            Row::Max => "Max",
            Row::Min => "Min",
            Row::TwoPairs => "TwoPairs",
            Row::ThreeOfAKind => "Three",
            Row::Straight => "Straight",
            Row::FullHouse => "Full",
            Row::FourOfAKind => "Four",
            Row::Yamb => "Yamb",
        }
    }
}

impl std::fmt::Display for Row {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Scoresheet section.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Column {
    /// Filled strictly top to bottom.
    Down,
    /// Filled strictly bottom to top.
    Up,
    /// Filled in any order.
    Free,
    /// Filled only in the row announced on the first roll.
    Announce,
}

impl Column {
    /// All columns in ordinal order.
    pub const ALL: [Column; COLUMN_COUNT] = [Column::Down, Column::Up, Column::Free, Column::Announce];

    /// Columns that can be filled without an announcement.
    pub const OPEN: [Column; 3] = [Column::Down, Column::Up, Column::Free];

    /// Column at the given ordinal, if in range.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Ordinal position of this column.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Short display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Column::Down => "Down",
            Column::Up => "Up",
            Column::Free => "Free",
            Column::Announce => "Announce",
        }
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A (row, column) coordinate on the scoresheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: Row,
    pub column: Column,
}

impl Cell {
    #[must_use]
    pub const fn new(row: Row, column: Column) -> Self {
        Self { row, column }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// Single-integer cell address: `row + 14 * column`, always in `0..56`.
///
/// Serialized as a bare integer; out-of-range values fail to deserialize.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct FillIndex(u8);

/// A fill index outside `0..56`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("fill index {0} out of range 0..{CELL_COUNT}")]
pub struct FillIndexOutOfRange(pub u8);

impl FillIndex {
    /// Create a fill index.
    ///
    /// Panics if `index >= 56`; an out-of-range index is a caller defect.
    #[must_use]
    pub fn new(index: usize) -> Self {
        assert!(index < CELL_COUNT, "fill index {index} out of range 0..{CELL_COUNT}");
        Self(index as u8)
    }

    /// Create a fill index, returning `None` when out of range.
    #[must_use]
    pub fn checked(index: usize) -> Option<Self> {
        (index < CELL_COUNT).then_some(Self(index as u8))
    }

    /// Get the raw index value.
    #[must_use]
    pub const fn raw(self) -> usize {
        self.0 as usize
    }

    /// Decode into the addressed cell.
    #[must_use]
    pub fn cell(self) -> Cell {
        let raw = self.raw();
        Cell::new(Row::ALL[raw % ROW_COUNT], Column::ALL[raw / ROW_COUNT])
    }

    /// Iterate over all 56 indices in ascending order.
    pub fn all() -> impl Iterator<Item = FillIndex> {
        (0..CELL_COUNT as u8).map(FillIndex)
    }
}

impl TryFrom<u8> for FillIndex {
    type Error = FillIndexOutOfRange;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        Self::checked(usize::from(raw)).ok_or(FillIndexOutOfRange(raw))
    }
}

impl From<FillIndex> for u8 {
    fn from(index: FillIndex) -> Self {
        index.0
    }
}

impl From<Cell> for FillIndex {
    fn from(cell: Cell) -> Self {
        Self((cell.row.index() + ROW_COUNT * cell.column.index()) as u8)
    }
}

/// The 14×4 score grid.
///
/// `None` marks an empty cell. Filled values are always non-negative.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Scoresheet {
    cells: [[Option<u16>; COLUMN_COUNT]; ROW_COUNT],
}

impl Scoresheet {
    /// Create an empty scoresheet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a cell's value, `None` if empty.
    #[must_use]
    pub fn get(&self, row: Row, column: Column) -> Option<u16> {
        self.cells[row.index()][column.index()]
    }

    /// Check whether a cell has been filled.
    #[must_use]
    pub fn is_filled(&self, row: Row, column: Column) -> bool {
        self.get(row, column).is_some()
    }

    /// Write a value into an empty cell.
    ///
    /// Panics if the cell is already filled; callers validate first.
    pub fn fill(&mut self, row: Row, column: Column, value: u16) {
        let slot = &mut self.cells[row.index()][column.index()];
        assert!(slot.is_none(), "cell ({row}, {column}) already filled");
        *slot = Some(value);
    }

    /// Lowest-ordinal row with an empty Down cell.
    #[must_use]
    pub fn next_down(&self) -> Option<Row> {
        for row in Row::ALL {
            if !self.is_filled(row, Column::Down) {
                return Some(row);
            }
        }
        None
    }

    /// Highest-ordinal row with an empty Up cell.
    #[must_use]
    pub fn next_up(&self) -> Option<Row> {
        for row in Row::ALL.into_iter().rev() {
            if !self.is_filled(row, Column::Up) {
                return Some(row);
            }
        }
        None
    }

    /// Check whether every cell of a column is filled.
    #[must_use]
    pub fn is_column_complete(&self, column: Column) -> bool {
        Row::ALL.iter().all(|&row| self.is_filled(row, column))
    }

    /// Number of filled cells.
    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_some()).count()
    }

    /// Iterate over filled cells and their values.
    pub fn filled(&self) -> impl Iterator<Item = (Cell, u16)> + '_ {
        FillIndex::all().filter_map(move |index| {
            let cell = index.cell();
            self.get(cell.row, cell.column).map(|value| (cell, value))
        })
    }

    /// Raw rows in `[row][column]` order.
    #[must_use]
    pub fn rows(&self) -> &[[Option<u16>; COLUMN_COUNT]; ROW_COUNT] {
        &self.cells
    }

    /// Cell values in row-major order with `empty` in unfilled cells.
    #[must_use]
    pub fn dense(&self, empty: i32) -> [i32; CELL_COUNT] {
        let mut out = [empty; CELL_COUNT];
        for (slot, cell) in out.iter_mut().zip(self.cells.iter().flatten()) {
            if let Some(value) = cell {
                *slot = i32::from(*value);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_index_examples() {
        assert_eq!(FillIndex::new(0).cell(), Cell::new(Row::Ones, Column::Down));
        assert_eq!(FillIndex::new(14).cell(), Cell::new(Row::Ones, Column::Up));
        assert_eq!(FillIndex::new(55).cell(), Cell::new(Row::Yamb, Column::Announce));

        assert_eq!(FillIndex::from(Cell::new(Row::Twos, Column::Down)).raw(), 1);
        assert_eq!(FillIndex::from(Cell::new(Row::Yamb, Column::Announce)).raw(), 55);
    }

    #[test]
    fn test_dense_is_row_major() {
        let mut sheet = Scoresheet::new();
        sheet.fill(Row::Twos, Column::Up, 8);
        let dense = sheet.dense(-145);

        assert_eq!(dense[Row::Twos.index() * COLUMN_COUNT + Column::Up.index()], 8);
        assert_eq!(dense.iter().filter(|&&v| v == -145).count(), CELL_COUNT - 1);
    }

    #[test]
    fn test_fill_index_try_from() {
        assert_eq!(FillIndex::try_from(55u8), Ok(FillIndex::new(55)));
        assert_eq!(FillIndex::try_from(56u8), Err(FillIndexOutOfRange(56)));
    }

    #[test]
    fn test_fill_index_serde_checks_range() {
        assert_eq!(serde_json::to_string(&FillIndex::new(19)).unwrap(), "19");
        assert_eq!(serde_json::from_str::<FillIndex>("55").unwrap(), FillIndex::new(55));
        assert!(serde_json::from_str::<FillIndex>("56").is_err());
        assert!(serde_json::from_str::<FillIndex>("200").is_err());
    }

    #[test]
    fn test_fill_index_round_trip() {
        for index in FillIndex::all() {
            assert_eq!(FillIndex::from(index.cell()), index);
        }
        for row in Row::ALL {
            for column in Column::ALL {
                let cell = Cell::new(row, column);
                assert_eq!(FillIndex::from(cell).cell(), cell);
            }
        }
    }

    #[test]
    fn test_fill_index_checked() {
        assert!(FillIndex::checked(55).is_some());
        assert!(FillIndex::checked(56).is_none());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_fill_index_out_of_range() {
        let _ = FillIndex::new(56);
    }

    #[test]
    fn test_next_down() {
        let mut sheet = Scoresheet::new();
        assert_eq!(sheet.next_down(), Some(Row::Ones));

        // Other columns don't affect the scan
        sheet.fill(Row::Ones, Column::Up, 1);
        sheet.fill(Row::Ones, Column::Free, 1);
        assert_eq!(sheet.next_down(), Some(Row::Ones));

        for (i, row) in Row::ALL.iter().enumerate().take(ROW_COUNT - 1) {
            sheet.fill(*row, Column::Down, 0);
            assert_eq!(sheet.next_down(), Some(Row::ALL[i + 1]));
        }

        sheet.fill(Row::Yamb, Column::Down, 0);
        assert_eq!(sheet.next_down(), None);
        assert!(sheet.is_column_complete(Column::Down));
    }

    #[test]
    fn test_next_up() {
        let mut sheet = Scoresheet::new();
        assert_eq!(sheet.next_up(), Some(Row::Yamb));

        sheet.fill(Row::Yamb, Column::Down, 1);
        sheet.fill(Row::Yamb, Column::Free, 1);
        assert_eq!(sheet.next_up(), Some(Row::Yamb));

        for i in (1..ROW_COUNT).rev() {
            sheet.fill(Row::ALL[i], Column::Up, 0);
            assert_eq!(sheet.next_up(), Some(Row::ALL[i - 1]));
        }

        sheet.fill(Row::Ones, Column::Up, 0);
        assert_eq!(sheet.next_up(), None);
    }

    #[test]
    #[should_panic(expected = "already filled")]
    fn test_fill_twice_panics() {
        let mut sheet = Scoresheet::new();
        sheet.fill(Row::Max, Column::Free, 20);
        sheet.fill(Row::Max, Column::Free, 25);
    }

    #[test]
    fn test_filled_iteration() {
        let mut sheet = Scoresheet::new();
        sheet.fill(Row::Straight, Column::Free, 45);
        sheet.fill(Row::Ones, Column::Down, 3);

        let filled: Vec<_> = sheet.filled().collect();
        assert_eq!(filled.len(), 2);
        assert_eq!(sheet.filled_count(), 2);
        assert!(filled.contains(&(Cell::new(Row::Straight, Column::Free), 45)));
    }

    #[test]
    fn test_row_metadata() {
        assert_eq!(Row::from_index(13), Some(Row::Yamb));
        assert_eq!(Row::from_index(14), None);
        assert_eq!(Row::Fours.face(), Some(4));
        assert_eq!(Row::Max.face(), None);
        assert_eq!(Column::from_index(3), Some(Column::Announce));
        assert_eq!(format!("{}", Cell::new(Row::Min, Column::Up)), "(Min, Up)");
    }
}
