//! Episode collection for training and evaluation.
//!
//! ## Overview
//!
//! - **Episode**: Records every decision of a game with its mask and reward
//! - **ExperienceBuffer**: Collects episodes and samples transitions
//! - **RolloutWorker**: Plays episodes with any `Policy` and summarizes returns
//!
//! ## Usage
//!
//! ```
//! use yamb_env::nn::MaskedRandomPolicy;
//! use yamb_env::training::{ExperienceBuffer, RolloutConfig, RolloutWorker};
//!
//! let worker = RolloutWorker::new(RolloutConfig::new().with_seed_offset(10));
//! let mut policy = MaskedRandomPolicy::new(0);
//!
//! let mut buffer = ExperienceBuffer::new(100);
//! for episode in worker.play_episodes(&mut policy, 2) {
//!     buffer.push(episode);
//! }
//! let batch = buffer.sample_batch(32, 7);
//! assert_eq!(batch.len(), 32);
//!
//! let summary = worker.evaluate(&mut policy, 2);
//! assert_eq!(summary.episodes, 2);
//! ```

pub mod rollout;
pub mod trajectory;

pub use rollout::{EvaluationSummary, RolloutConfig, RolloutWorker};
pub use trajectory::{Episode, ExperienceBuffer, Transition};
