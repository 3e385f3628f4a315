//! Integration tests for combination values and scoresheet totals.

use proptest::prelude::*;

use yamb_env::core::{Column, DiceCounts, Row, Scoresheet};
use yamb_env::scoring::{column_score, combination_value, score, NUMBERS_BONUS};

fn dice(faces: &[u8]) -> DiceCounts {
    DiceCounts::from_faces(faces)
}

// =============================================================================
// Combination values
// =============================================================================

#[test]
fn test_number_rows() {
    let roll = dice(&[1, 1, 3, 6, 6]);
    assert_eq!(combination_value(Row::Ones, &roll), 2);
    assert_eq!(combination_value(Row::Twos, &roll), 0);
    assert_eq!(combination_value(Row::Threes, &roll), 3);
    assert_eq!(combination_value(Row::Sixes, &roll), 12);
}

#[test]
fn test_max_min_are_pip_sums() {
    let roll = dice(&[2, 3, 4, 5, 6]);
    assert_eq!(combination_value(Row::Max, &roll), 20);
    assert_eq!(combination_value(Row::Min, &roll), 20);
}

#[test]
fn test_combination_rows() {
    assert_eq!(combination_value(Row::TwoPairs, &dice(&[2, 2, 5, 5, 1])), 10 + 4 + 10);
    assert_eq!(combination_value(Row::TwoPairs, &dice(&[2, 2, 2, 2, 1])), 0);
    assert_eq!(combination_value(Row::ThreeOfAKind, &dice(&[4, 4, 4, 1, 2])), 20 + 12);
    assert_eq!(combination_value(Row::Straight, &dice(&[1, 2, 3, 4, 5])), 45);
    assert_eq!(combination_value(Row::Straight, &dice(&[2, 3, 4, 5, 6])), 50);
    assert_eq!(combination_value(Row::Straight, &dice(&[1, 2, 3, 4, 6])), 0);
    assert_eq!(combination_value(Row::FullHouse, &dice(&[3, 3, 3, 6, 6])), 40 + 21);
    assert_eq!(combination_value(Row::FullHouse, &dice(&[3, 3, 3, 3, 6])), 0);
    assert_eq!(combination_value(Row::FourOfAKind, &dice(&[5, 5, 5, 5, 2])), 50 + 20);
    assert_eq!(combination_value(Row::Yamb, &dice(&[6, 6, 6, 6, 6])), 90);
    assert_eq!(combination_value(Row::Yamb, &dice(&[6, 6, 6, 6, 1])), 0);
}

// =============================================================================
// Totals
// =============================================================================

#[test]
fn test_empty_sheet_scores_zero() {
    assert_eq!(score(&Scoresheet::new()), 0);
}

#[test]
fn test_numbers_bonus_per_column() {
    let mut sheet = Scoresheet::new();
    for row in Row::NUMBERS {
        let face = row.face().unwrap_or(0);
        sheet.fill(row, Column::Free, u16::from(face) * 4);
    }

    // 4 × (1 + 2 + ... + 6) = 84
    assert_eq!(column_score(&sheet, Column::Free).numbers, 84 + NUMBERS_BONUS);
    assert_eq!(column_score(&sheet, Column::Down).numbers, 0);
    assert_eq!(score(&sheet), 84 + NUMBERS_BONUS);
}

#[test]
fn test_max_min_term() {
    let mut sheet = Scoresheet::new();
    sheet.fill(Row::Max, Column::Up, 28);
    sheet.fill(Row::Min, Column::Up, 8);
    // Max and Min only count through the product
    assert_eq!(score(&sheet), 0);

    sheet.fill(Row::Ones, Column::Up, 3);
    // 3 + (28 - 8) * 3
    assert_eq!(score(&sheet), 3 + 60);
}

#[test]
fn test_max_below_min_lowers_score() {
    let mut sheet = Scoresheet::new();
    sheet.fill(Row::Ones, Column::Down, 2);
    sheet.fill(Row::Min, Column::Down, 20);
    let before = score(&sheet);

    sheet.fill(Row::Max, Column::Down, 10);
    assert_eq!(column_score(&sheet, Column::Down).max_min, -20);
    assert!(score(&sheet) < before);
}

#[test]
fn test_columns_are_independent() {
    let mut sheet = Scoresheet::new();
    sheet.fill(Row::Max, Column::Down, 30);
    sheet.fill(Row::Min, Column::Up, 5);
    sheet.fill(Row::Ones, Column::Free, 5);

    // No column has all three Max/Min operands
    assert_eq!(score(&sheet), 5);
}

// =============================================================================
// Properties
// =============================================================================

fn roll_strategy() -> impl Strategy<Value = DiceCounts> {
    prop::array::uniform5(1..=6u8).prop_map(|faces| DiceCounts::from_faces(&faces))
}

proptest! {
    #[test]
    fn number_rows_count_faces(roll in roll_strategy()) {
        for row in Row::NUMBERS {
            let face = row.face().unwrap_or(0);
            prop_assert_eq!(combination_value(row, &roll), u16::from(roll.count(face)) * u16::from(face));
        }
    }

    #[test]
    fn values_are_bounded(roll in roll_strategy()) {
        for row in Row::ALL {
            prop_assert!(combination_value(row, &roll) <= 90);
        }
    }

    #[test]
    fn yamb_implies_lower_combinations(face in 1..=6u8) {
        let roll = DiceCounts::from_faces(&[face; 5]);
        let pips = u16::from(face) * 5;
        prop_assert_eq!(combination_value(Row::Yamb, &roll), 60 + pips);
        prop_assert_eq!(combination_value(Row::FourOfAKind, &roll), 50 + u16::from(face) * 4);
        prop_assert_eq!(combination_value(Row::ThreeOfAKind, &roll), 20 + u16::from(face) * 3);
        prop_assert_eq!(combination_value(Row::FullHouse, &roll), 0);
    }

    #[test]
    fn filling_non_max_min_rows_never_lowers_score(
        roll in roll_strategy(),
        row_index in 0usize..14,
        column_index in 0usize..4,
    ) {
        let row = Row::ALL[row_index];
        prop_assume!(!matches!(row, Row::Ones | Row::Max | Row::Min));
        let column = Column::ALL[column_index];

        let mut sheet = Scoresheet::new();
        sheet.fill(Row::Ones, column, 1);
        sheet.fill(Row::Max, column, 20);
        sheet.fill(Row::Min, column, 25);
        let before = score(&sheet);

        sheet.fill(row, column, combination_value(row, &roll));
        prop_assert!(score(&sheet) >= before);
    }
}
