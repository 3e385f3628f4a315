//! Baseline policies.

use smallvec::SmallVec;

use crate::core::{Action, ActionMask, DiceCounts, FillIndex, GameRng, Observation, Row, DICE_COUNT};
use crate::nn::traits::Policy;

/// Samples every sub-space of the action uniformly from its legal values.
///
/// Keep counts are drawn independently per face, so the kept dice are
/// always a sub-multiset of the roll. Sub-spaces with no legal value
/// (announce row when announcing is impossible, fill index before the
/// third roll) fall back to 0, which the environment ignores.
#[derive(Clone, Debug)]
pub struct MaskedRandomPolicy {
    rng: GameRng,
}

impl MaskedRandomPolicy {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
        }
    }

    fn pick<T: Copy + Default>(&mut self, options: &[T]) -> T {
        self.rng.choose(options).copied().unwrap_or_default()
    }
}

impl Policy for MaskedRandomPolicy {
    fn act(&mut self, _observation: &Observation, mask: &ActionMask) -> Action {
        let mut keep = DiceCounts::empty();
        for face in 1..=6u8 {
            let counts: SmallVec<[u8; 6]> = (0..=DICE_COUNT)
                .filter(|&count| mask.keep_allowed(face, count))
                .collect();
            keep.0[face as usize - 1] = self.pick(&counts);
        }

        let mut announce_options: SmallVec<[bool; 2]> = SmallVec::new();
        if mask.may_skip_announce() {
            announce_options.push(false);
        }
        if mask.may_announce() {
            announce_options.push(true);
        }
        let announce = self.pick(&announce_options);

        let rows: SmallVec<[Row; 14]> = Row::ALL
            .into_iter()
            .filter(|&row| mask.announce_row_allowed(row))
            .collect();
        let announce_row = self.pick(&rows);

        let fills: SmallVec<[FillIndex; 16]> =
            FillIndex::all().filter(|&index| mask.fill_allowed(index)).collect();
        let fill = self.pick(&fills);

        Action {
            keep,
            announce,
            announce_row,
            fill,
        }
    }

    fn name(&self) -> &str {
        "masked-random"
    }
}
