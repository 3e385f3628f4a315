//! Observation encoding for neural network input.

use crate::core::{Column, Observation, Row, COLUMN_COUNT, FACE_COUNT, ROW_COUNT, TOTAL_TURNS};
use crate::nn::traits::EncodedState;

/// Divisor applied to grid values.
pub const MAX_CELL_VALUE: f32 = 145.0;

/// Encodes observations into tensors.
pub trait ObservationEncoder: Send + Sync {
    /// Encode an observation.
    fn encode(&self, observation: &Observation) -> EncodedState;

    /// Shape of encoded states.
    fn output_shape(&self) -> Vec<usize>;
}

/// Flat, normalized feature vector.
///
/// Layout:
/// - turn number / 56
/// - roll number / 2
/// - 56 grid values in row-major order, value / 145, empty cells -1.0
/// - 6 dice counts, `(count - 1) / 5`
/// - announced flag
/// - announced row / 13
#[derive(Clone, Copy, Debug, Default)]
pub struct FlatEncoder;

impl FlatEncoder {
    /// Number of features.
    pub const FEATURES: usize = 2 + ROW_COUNT * COLUMN_COUNT + FACE_COUNT + 2;

    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ObservationEncoder for FlatEncoder {
    fn encode(&self, observation: &Observation) -> EncodedState {
        let mut tensor = Vec::with_capacity(Self::FEATURES);

        tensor.push(f32::from(observation.turn_number) / f32::from(TOTAL_TURNS));
        tensor.push(f32::from(observation.roll_number) / 2.0);

        for row in Row::ALL {
            for column in Column::ALL {
                let value = observation
                    .grid
                    .get(row, column)
                    .map_or(-1.0, |v| f32::from(v) / MAX_CELL_VALUE);
                tensor.push(value);
            }
        }

        for &count in observation.dice.as_array() {
            tensor.push((f32::from(count) - 1.0) / 5.0);
        }

        tensor.push(if observation.announced { 1.0 } else { 0.0 });
        tensor.push(f32::from(observation.announced_row) / (ROW_COUNT - 1) as f32);

        EncodedState::new(tensor, vec![Self::FEATURES])
    }

    fn output_shape(&self) -> Vec<usize> {
        vec![Self::FEATURES]
    }
}
