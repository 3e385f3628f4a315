//! Episode recording and experience buffer.
//!
//! An episode records every decision of one game:
//! - the observation and legal-action mask the agent saw
//! - the action it took
//! - the reward and end flags the environment returned

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::core::{Action, ActionMask, GameRng, Observation};

/// A single decision within an episode.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    /// Observation before acting.
    pub observation: Observation,

    /// Legal actions at that observation.
    pub mask: ActionMask,

    /// The action taken.
    pub action: Action,

    /// Reward returned by the environment.
    pub reward: f64,

    pub terminated: bool,
    pub truncated: bool,
}

/// A complete episode.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    /// Seed the episode was reset with.
    pub seed: u64,

    /// All decisions in order.
    pub transitions: Vec<Transition>,

    /// Scoresheet total at the end of the episode.
    pub final_score: i32,
}

impl Episode {
    /// Create an empty episode.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Add a transition.
    pub fn push(&mut self, transition: Transition) {
        self.transitions.push(transition);
    }

    /// Number of recorded decisions.
    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    /// Check if the episode is empty.
    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Sum of rewards (the episode return).
    pub fn total_reward(&self) -> f64 {
        self.transitions.iter().map(|t| t.reward).sum()
    }

    /// Did all 56 turns complete?
    pub fn is_terminated(&self) -> bool {
        self.transitions.last().is_some_and(|t| t.terminated)
    }

    /// Was the episode cut short by an illegal action?
    pub fn is_truncated(&self) -> bool {
        self.transitions.last().is_some_and(|t| t.truncated)
    }

    /// Undiscounted return-to-go for every transition.
    pub fn returns(&self) -> Vec<f64> {
        let mut returns = vec![0.0; self.transitions.len()];
        let mut acc = 0.0;
        for (i, transition) in self.transitions.iter().enumerate().rev() {
            acc += transition.reward;
            returns[i] = acc;
        }
        returns
    }

    /// Encode with bincode.
    pub fn to_bytes(&self) -> bincode::Result<Vec<u8>> {
        bincode::serialize(self)
    }

    /// Decode from bincode.
    pub fn from_bytes(bytes: &[u8]) -> bincode::Result<Self> {
        bincode::deserialize(bytes)
    }
}

/// Buffer for storing episodes during training.
///
/// Uses a FIFO strategy: when full, oldest episodes are removed.
#[derive(Clone, Debug)]
pub struct ExperienceBuffer {
    episodes: VecDeque<Episode>,
    max_episodes: usize,
}

impl ExperienceBuffer {
    /// Create a new experience buffer.
    pub fn new(max_episodes: usize) -> Self {
        Self {
            episodes: VecDeque::with_capacity(max_episodes),
            max_episodes,
        }
    }

    /// Add an episode, evicting the oldest if full.
    pub fn push(&mut self, episode: Episode) {
        if self.episodes.len() >= self.max_episodes {
            self.episodes.pop_front();
        }
        self.episodes.push_back(episode);
    }

    pub fn len(&self) -> usize {
        self.episodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.episodes.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.max_episodes
    }

    pub fn clear(&mut self) {
        self.episodes.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Episode> {
        self.episodes.iter()
    }

    /// Total number of transitions across all episodes.
    pub fn total_transitions(&self) -> usize {
        self.episodes.iter().map(Episode::len).sum()
    }

    /// Sample a random batch of transitions.
    ///
    /// Uses the provided seed for reproducibility.
    pub fn sample_batch(&self, batch_size: usize, seed: u64) -> Vec<Transition> {
        let all: Vec<&Transition> = self.episodes.iter().flat_map(|e| &e.transitions).collect();
        if all.is_empty() || batch_size == 0 {
            return vec![];
        }

        let mut rng = GameRng::new(seed);

        // Fisher-Yates shuffle of the first `batch_size` positions
        let mut indices: Vec<usize> = (0..all.len()).collect();
        let n = indices.len();
        let limit = batch_size.min(n);

        for i in 0..limit {
            let j = i + rng.gen_range_usize(0..n - i);
            indices.swap(i, j);
        }

        indices[..limit].iter().map(|&i| all[i].clone()).collect()
    }
}

impl Default for ExperienceBuffer {
    fn default() -> Self {
        Self::new(10000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DiceCounts, Scoresheet, TurnState};

    fn make_transition(reward: f64, terminated: bool, truncated: bool) -> Transition {
        Transition {
            observation: Observation::new(
                &TurnState::new(),
                &Scoresheet::new(),
                DiceCounts::new([1, 1, 1, 1, 1, 0]),
            ),
            mask: ActionMask::empty(),
            action: Action::default(),
            reward,
            terminated,
            truncated,
        }
    }

    #[test]
    fn test_episode_creation() {
        let mut episode = Episode::new(42);
        assert!(episode.is_empty());
        assert!(!episode.is_terminated());

        episode.push(make_transition(0.0, false, false));
        episode.push(make_transition(5.0, true, false));

        assert_eq!(episode.len(), 2);
        assert_eq!(episode.total_reward(), 5.0);
        assert!(episode.is_terminated());
        assert!(!episode.is_truncated());
    }

    #[test]
    fn test_episode_returns() {
        let mut episode = Episode::new(0);
        episode.push(make_transition(1.0, false, false));
        episode.push(make_transition(2.0, false, false));
        episode.push(make_transition(-1000.0, false, true));

        assert_eq!(episode.returns(), vec![-997.0, -998.0, -1000.0]);
        assert!(episode.is_truncated());
    }

    #[test]
    fn test_episode_bincode() {
        let mut episode = Episode::new(9);
        episode.push(make_transition(3.0, false, false));
        episode.final_score = 3;

        let bytes = episode.to_bytes().unwrap();
        let restored = Episode::from_bytes(&bytes).unwrap();
        assert_eq!(restored, episode);

        assert!(Episode::from_bytes(&bytes[..bytes.len() / 2]).is_err());
    }

    #[test]
    fn test_experience_buffer_capacity() {
        let mut buffer = ExperienceBuffer::new(3);

        for seed in 1..=4 {
            buffer.push(Episode::new(seed));
        }
        assert_eq!(buffer.len(), 3);

        let seeds: Vec<_> = buffer.iter().map(|e| e.seed).collect();
        assert_eq!(seeds, vec![2, 3, 4]);
    }

    #[test]
    fn test_experience_buffer_sample_batch() {
        let mut buffer = ExperienceBuffer::new(10);

        let mut episode = Episode::new(42);
        for i in 0..10 {
            episode.push(make_transition(i as f64, false, false));
        }
        buffer.push(episode);
        assert_eq!(buffer.total_transitions(), 10);

        let batch = buffer.sample_batch(5, 123);
        assert_eq!(batch.len(), 5);
        assert_eq!(batch, buffer.sample_batch(5, 123));

        assert_eq!(buffer.sample_batch(50, 1).len(), 10);
        assert!(buffer.sample_batch(0, 1).is_empty());
    }

    #[test]
    fn test_empty_buffer_sample() {
        let buffer = ExperienceBuffer::default();
        assert_eq!(buffer.capacity(), 10000);
        assert!(buffer.sample_batch(5, 0).is_empty());
    }
}
