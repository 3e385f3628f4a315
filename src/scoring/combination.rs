//! Combination values: what a roll is worth in each row.

use crate::core::{DiceCounts, Row};

/// Score a roll for a row.
///
/// | Row | Value |
/// |---|---|
/// | Ones..Sixes | face × count |
/// | Max, Min | pip sum |
/// | TwoPairs | 10 + 2×face for each face with ≥2 dice, needs two such faces |
/// | ThreeOfAKind | 20 + 3×face for each face with ≥3 dice |
/// | Straight | 45 for 1-5, 50 for 2-6 |
/// | FullHouse | 40 + pip sum, needs exactly 3 + 2 |
/// | FourOfAKind | 50 + 4×face for the face with ≥4 dice |
/// | Yamb | 60 + pip sum, needs all five equal |
///
/// Any unmet requirement scores 0.
#[must_use]
pub fn combination_value(row: Row, dice: &DiceCounts) -> u16 {
    match row {
        Row::Ones | Row::Twos | Row::Threes | Row::Fours | Row::Fives | Row::Sixes => {
            number_value(row, dice)
        }
        Row::Max | Row::Min => dice.pip_sum(),
        Row::TwoPairs => two_pairs(dice),
        Row::ThreeOfAKind => of_a_kind(dice, 3, 20),
        Row::Straight => straight(dice),
        Row::FullHouse => full_house(dice),
        Row::FourOfAKind => of_a_kind(dice, 4, 50),
        Row::Yamb => yamb(dice),
    }
}

fn number_value(row: Row, dice: &DiceCounts) -> u16 {
    row.face()
        .map_or(0, |face| u16::from(face) * u16::from(dice.count(face)))
}

/// Sum of `size × face` over faces with at least `size` dice, plus `base`.
fn of_a_kind(dice: &DiceCounts, size: u8, base: u16) -> u16 {
    let mut matched = false;
    let mut total = 0u16;
    for (face, count) in dice.faces_with_counts() {
        if count >= size {
            matched = true;
            total += u16::from(size) * u16::from(face);
        }
    }
    if matched {
        base + total
    } else {
        0
    }
}

fn two_pairs(dice: &DiceCounts) -> u16 {
    let pairs = dice.faces_with_counts().filter(|&(_, count)| count >= 2).count();
    if pairs < 2 {
        return 0;
    }
    let total: u16 = dice
        .faces_with_counts()
        .filter(|&(_, count)| count >= 2)
        .map(|(face, _)| 2 * u16::from(face))
        .sum();
    10 + total
}

fn straight(dice: &DiceCounts) -> u16 {
    match dice.as_array() {
        [1, 1, 1, 1, 1, 0] => 45,
        [0, 1, 1, 1, 1, 1] => 50,
        _ => 0,
    }
}

fn full_house(dice: &DiceCounts) -> u16 {
    let has = |n: u8| dice.as_array().contains(&n);
    if has(3) && has(2) {
        40 + dice.pip_sum()
    } else {
        0
    }
}

fn yamb(dice: &DiceCounts) -> u16 {
    if dice.as_array().iter().any(|&count| count >= 5) {
        60 + dice.pip_sum()
    } else {
        0
    }
}
