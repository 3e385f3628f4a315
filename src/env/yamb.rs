//! The Yamb environment state machine.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, info, trace};

use crate::core::{
    Action, ActionMask, Cell, ContractViolation, DiceCounts, EnvConfig, FillIndex, GameRng,
    GameRngState, Observation, Row, Scoresheet, TurnState, DICE_COUNT,
};
use crate::rules::{self, Phase, RejectReason};
use crate::scoring;

/// Diagnostics attached to every step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepInfo {
    /// Score after the step.
    pub score: i32,

    /// Why the action was rejected, if it was.
    pub rejection: Option<RejectReason>,
}

/// Outcome of a single `step`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepResult {
    pub observation: Observation,

    /// Score delta, or the truncation penalty on rejection.
    pub reward: f64,

    /// All 56 turns have been played.
    pub terminated: bool,

    /// An illegal action ended the episode.
    pub truncated: bool,

    pub info: StepInfo,
}

impl StepResult {
    /// Check whether the episode has ended either way.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.terminated || self.truncated
    }
}

/// Serializable copy of an environment's mutable state.
///
/// Restoring it reproduces the remaining dice sequence exactly.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnvCheckpoint {
    pub sheet: Scoresheet,
    pub turn: TurnState,
    pub dice: DiceCounts,
    pub rng: GameRngState,
    pub done: bool,
}

/// Single-player Yamb environment.
///
/// Owns the scoresheet, dice, turn counters and RNG. Each accepted `step`
/// advances exactly one roll; a rejected step leaves state untouched and
/// ends the episode.
///
/// ## Example
///
/// ```
/// use yamb_env::core::EnvConfig;
/// use yamb_env::env::YambEnv;
///
/// let mut env = YambEnv::new(EnvConfig::new().with_seed(42));
/// let obs = env.reset(None);
/// assert_eq!(obs.dice.total(), 5);
///
/// let mask = env.legal_action_mask();
/// assert!(mask.may_skip_announce());
/// ```
#[derive(Clone, Debug)]
pub struct YambEnv {
    config: EnvConfig,
    sheet: Scoresheet,
    turn: TurnState,
    dice: DiceCounts,
    rng: GameRng,
    done: bool,
}

impl YambEnv {
    /// Create an environment. Call [`YambEnv::reset`] before stepping.
    #[must_use]
    pub fn new(config: EnvConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        Self {
            config,
            sheet: Scoresheet::new(),
            turn: TurnState::new(),
            dice: DiceCounts::empty(),
            rng,
            done: true,
        }
    }

    /// Start a new episode and roll the first five dice.
    ///
    /// `Some(seed)` reseeds the generator; `None` continues the current stream.
    pub fn reset(&mut self, seed: Option<u64>) -> Observation {
        if let Some(seed) = seed {
            self.rng = GameRng::new(seed);
        }
        debug!(seed = self.rng.seed(), "resetting yamb episode");

        self.sheet = Scoresheet::new();
        self.turn = TurnState::new();
        self.dice = self.rng.roll_dice(DICE_COUNT);
        self.done = false;
        self.observation()
    }

    /// Apply one action.
    ///
    /// Panics on a contract violation (stepping a finished episode). Use
    /// [`YambEnv::try_step`] to handle that case without panicking.
    pub fn step(&mut self, action: &Action) -> StepResult {
        match self.try_step(action) {
            Ok(result) => result,
            Err(violation) => panic!("{violation}"),
        }
    }

    /// Apply one action, reporting contract violations as errors.
    ///
    /// Illegal moves are not errors: they come back as a truncated
    /// [`StepResult`] carrying the rejection reason.
    pub fn try_step(&mut self, action: &Action) -> Result<StepResult, ContractViolation> {
        if self.done {
            return Err(ContractViolation::EpisodeOver);
        }

        let prev_score = self.score();
        let phase = self.phase();

        if let Err(reason) = rules::validate(&self.sheet, &self.turn, &self.dice, action) {
            debug!(%reason, turn = self.turn.turn_number, ?phase, "action rejected");
            self.done = true;
            return Ok(StepResult {
                observation: self.observation(),
                reward: self.config.truncation_penalty,
                terminated: false,
                truncated: true,
                info: StepInfo {
                    score: prev_score,
                    rejection: Some(reason),
                },
            });
        }

        match phase {
            Phase::FirstRoll => {
                self.reroll(&action.keep);
                self.turn.announced = action.announce.then_some(action.announce_row);
                self.turn.advance_roll();
            }
            Phase::SecondRoll => {
                self.reroll(&action.keep);
                self.turn.advance_roll();
            }
            Phase::Fill => {
                let Cell { row, column } = action.fill.cell();
                let value = scoring::combination_value(row, &self.dice);
                self.sheet.fill(row, column, value);
                self.turn.advance_turn();
                self.dice = self.rng.roll_dice(DICE_COUNT);
            }
        }
        trace!(?phase, dice = %self.dice, turn = self.turn.turn_number, "step applied");

        let score = self.score();
        let terminated = self.turn.is_game_over();
        if terminated {
            self.done = true;
            info!(score, turns = self.turn.turn_number, "yamb episode complete");
        }

        Ok(StepResult {
            observation: self.observation(),
            reward: f64::from(score - prev_score),
            terminated,
            truncated: false,
            info: StepInfo {
                score,
                rejection: None,
            },
        })
    }

    /// Keep `keep` and roll the rest.
    fn reroll(&mut self, keep: &DiceCounts) {
        let rolled = self.rng.roll_dice(DICE_COUNT - keep.total());
        self.dice = keep.merged(&rolled);
    }

    /// Legal-action mask for the current decision point.
    #[must_use]
    pub fn legal_action_mask(&self) -> ActionMask {
        rules::legal_action_mask(&self.sheet, &self.turn, &self.dice)
    }

    /// Cells that may be filled right now (empty unless on the third roll).
    #[must_use]
    pub fn legal_fill_cells(&self) -> SmallVec<[Cell; 16]> {
        if self.phase() != Phase::Fill {
            return SmallVec::new();
        }
        FillIndex::all()
            .filter(|&index| rules::validate_fill(&self.sheet, self.turn.announced, index).is_ok())
            .map(FillIndex::cell)
            .collect()
    }

    /// Current score of the sheet.
    #[must_use]
    pub fn score(&self) -> i32 {
        scoring::score(&self.sheet)
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn observation(&self) -> Observation {
        Observation::new(&self.turn, &self.sheet, self.dice)
    }

    /// Current decision phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        Phase::from_roll(self.turn.roll_number)
    }

    /// Must the next first-roll action announce?
    #[must_use]
    pub fn need_to_announce(&self) -> bool {
        rules::need_to_announce(&self.sheet)
    }

    /// Can `row` be announced?
    #[must_use]
    pub fn valid_announce_row(&self, row: Row) -> bool {
        rules::valid_announce_row(&self.sheet, row)
    }

    /// Next row to fill in the Down column.
    #[must_use]
    pub fn next_down(&self) -> Option<Row> {
        self.sheet.next_down()
    }

    /// Next row to fill in the Up column.
    #[must_use]
    pub fn next_up(&self) -> Option<Row> {
        self.sheet.next_up()
    }

    /// The scoresheet.
    #[must_use]
    pub fn sheet(&self) -> &Scoresheet {
        &self.sheet
    }

    /// Turn counters and announcement.
    #[must_use]
    pub fn turn(&self) -> &TurnState {
        &self.turn
    }

    /// Current dice.
    #[must_use]
    pub fn dice(&self) -> DiceCounts {
        self.dice
    }

    /// The configuration this environment was created with.
    #[must_use]
    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    /// Check whether the episode has ended (or was never started).
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Capture the current state.
    #[must_use]
    pub fn checkpoint(&self) -> EnvCheckpoint {
        EnvCheckpoint {
            sheet: self.sheet,
            turn: self.turn,
            dice: self.dice,
            rng: self.rng.state(),
            done: self.done,
        }
    }

    /// Return to a captured state. The configuration is left as is.
    pub fn restore(&mut self, checkpoint: &EnvCheckpoint) {
        self.sheet = checkpoint.sheet;
        self.turn = checkpoint.turn;
        self.dice = checkpoint.dice;
        self.rng = GameRng::from_state(&checkpoint.rng);
        self.done = checkpoint.done;
        debug!(turn = self.turn.turn_number, roll = self.turn.roll_number, "restored checkpoint");
    }
}
