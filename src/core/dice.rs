//! Dice as a multiset of face counts.
//!
//! Five six-sided dice are stored as counts per face: `counts[2]` is the
//! number of dice showing a 3. Order of individual dice never matters.

use serde::{Deserialize, Serialize};

/// Number of dice rolled each turn.
pub const DICE_COUNT: u8 = 5;

/// Number of faces on each die.
pub const FACE_COUNT: usize = 6;

/// Face counts for a set of dice.
///
/// After any roll the counts sum to exactly [`DICE_COUNT`]. A keep vector
/// uses the same type with a smaller (possibly zero) sum.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiceCounts(pub [u8; FACE_COUNT]);

impl DiceCounts {
    /// Create from raw face counts.
    #[must_use]
    pub const fn new(counts: [u8; FACE_COUNT]) -> Self {
        Self(counts)
    }

    /// No dice.
    #[must_use]
    pub const fn empty() -> Self {
        Self([0; FACE_COUNT])
    }

    /// Build counts from individual face values (1..=6).
    ///
    /// Panics on a face outside 1..=6.
    #[must_use]
    pub fn from_faces(faces: &[u8]) -> Self {
        let mut counts = [0u8; FACE_COUNT];
        for &face in faces {
            assert!((1..=6).contains(&face), "die face {face} out of range 1..=6");
            counts[(face - 1) as usize] += 1;
        }
        Self(counts)
    }

    /// Count of dice showing `face` (1..=6).
    #[must_use]
    pub fn count(&self, face: u8) -> u8 {
        self.0[(face - 1) as usize]
    }

    /// Total number of dice.
    #[must_use]
    pub fn total(&self) -> u8 {
        self.0.iter().sum()
    }

    /// Sum of all pips.
    #[must_use]
    pub fn pip_sum(&self) -> u16 {
        self.faces_with_counts()
            .map(|(face, count)| u16::from(face) * u16::from(count))
            .sum()
    }

    /// Iterate over `(face, count)` pairs, faces 1..=6.
    pub fn faces_with_counts(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        self.0.iter().enumerate().map(|(i, &count)| (i as u8 + 1, count))
    }

    /// Check whether `keep` is a sub-multiset of these dice.
    #[must_use]
    pub fn can_keep(&self, keep: &DiceCounts) -> bool {
        self.0.iter().zip(keep.0.iter()).all(|(have, want)| want <= have)
    }

    /// Combine two multisets.
    #[must_use]
    pub fn merged(&self, other: &DiceCounts) -> Self {
        let mut counts = self.0;
        for (slot, add) in counts.iter_mut().zip(other.0.iter()) {
            *slot += add;
        }
        Self(counts)
    }

    /// Individual die faces in ascending order.
    #[must_use]
    pub fn faces(&self) -> Vec<u8> {
        self.faces_with_counts()
            .flat_map(|(face, count)| std::iter::repeat(face).take(count as usize))
            .collect()
    }

    /// Raw counts.
    #[must_use]
    pub fn as_array(&self) -> &[u8; FACE_COUNT] {
        &self.0
    }
}

impl std::fmt::Display for DiceCounts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.0)
    }
}
