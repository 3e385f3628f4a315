//! Plain-text rendering of an observation.
//!
//! ```text
//! TURN: 3, ROLL: 1, SCORE: 12
//! ANNOUNCED: Straight
//!
//!                  Down    Up  Free  Anno
//! Ones                3     -     -     -
//! ...
//!
//! DICE: 1 1 3 4 6
//! ```

use std::fmt;

use crate::core::{Column, Observation, Row};
use crate::scoring;

const LABEL_WIDTH: usize = 14;
const CELL_WIDTH: usize = 6;

/// Render an observation as a multi-line string.
#[must_use]
pub fn render(observation: &Observation) -> String {
    Board(observation).to_string()
}

/// Display adapter producing the same text as [`render`].
#[derive(Clone, Copy, Debug)]
pub struct Board<'a>(pub &'a Observation);

impl fmt::Display for Board<'_> {
    fn fmt(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        let observation = self.0;
        writeln!(
            out,
            "TURN: {}, ROLL: {}, SCORE: {}",
            observation.turn_number,
            observation.roll_number,
            scoring::score(&observation.grid)
        )?;
        match observation.announced_row() {
            Some(row) => writeln!(out, "ANNOUNCED: {row}")?,
            None => writeln!(out, "ANNOUNCED: -")?,
        }
        writeln!(out)?;

        write!(out, "{:LABEL_WIDTH$}", "")?;
        for column in Column::ALL {
            let name = column.name();
            write!(out, "{:>CELL_WIDTH$}", &name[..name.len().min(4)])?;
        }
        writeln!(out)?;

        for row in Row::ALL {
            write!(out, "{:<LABEL_WIDTH$}", row.name())?;
            for column in Column::ALL {
                match observation.grid.get(row, column) {
                    Some(value) => write!(out, "{value:>CELL_WIDTH$}")?,
                    None => write!(out, "{:>CELL_WIDTH$}", "-")?,
                }
            }
            writeln!(out)?;
        }
        writeln!(out)?;

        let faces: Vec<String> = observation.dice.faces().iter().map(u8::to_string).collect();
        writeln!(out, "DICE: {}", faces.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DiceCounts, Scoresheet, TurnState};

    #[test]
    fn test_render_layout() {
        let mut sheet = Scoresheet::new();
        sheet.fill(Row::Ones, Column::Down, 3);
        let turn = TurnState {
            turn_number: 1,
            roll_number: 2,
            announced: Some(Row::Straight),
        };
        let obs = Observation::new(&turn, &sheet, DiceCounts::new([2, 0, 1, 1, 0, 1]));

        let text = render(&obs);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "TURN: 1, ROLL: 2, SCORE: 3");
        assert_eq!(lines[1], format!("ANNOUNCED: {}", Row::Straight));
        // Header, blank line and title lines precede the 14 rows
        assert_eq!(lines.len(), 3 + 1 + 14 + 2);
        assert!(lines[4].starts_with(Row::Ones.name()));
        assert!(lines[4].contains('3'));
        assert_eq!(lines.last().copied(), Some("DICE: 1 1 3 4 6"));
    }

    #[test]
    fn test_render_without_announcement() {
        let obs = Observation::new(
            &TurnState::new(),
            &Scoresheet::new(),
            DiceCounts::new([0, 0, 0, 0, 0, 5]),
        );
        let text = render(&obs);

        assert!(text.contains("ANNOUNCED: -"));
        assert!(text.ends_with("DICE: 6 6 6 6 6\n"));
    }

    #[test]
    fn test_board_display_matches_render() {
        let obs = Observation::new(
            &TurnState::new(),
            &Scoresheet::new(),
            DiceCounts::new([1, 1, 1, 1, 1, 0]),
        );
        assert_eq!(format!("{}", Board(&obs)), render(&obs));
    }
}
