//! Rollout loop for collecting episodes and evaluating policies.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::EnvConfig;
use crate::env::YambEnv;
use crate::nn::Policy;

use super::trajectory::{Episode, Transition};

/// Configuration for rollouts.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RolloutConfig {
    /// Environment settings used for every episode.
    pub env: EnvConfig,

    /// Seed offset combined with the episode index for unique seeds.
    pub seed_offset: u64,

    /// Safety cap on decisions per episode. A full game takes 168.
    pub max_steps: usize,
}

impl Default for RolloutConfig {
    fn default() -> Self {
        Self {
            env: EnvConfig::default(),
            seed_offset: 0,
            max_steps: 1000,
        }
    }
}

impl RolloutConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the environment configuration.
    pub fn with_env(mut self, env: EnvConfig) -> Self {
        self.env = env;
        self
    }

    /// Set seed offset.
    pub fn with_seed_offset(mut self, offset: u64) -> Self {
        self.seed_offset = offset;
        self
    }

    /// Set maximum decisions per episode.
    pub fn with_max_steps(mut self, max: usize) -> Self {
        assert!(max > 0, "max_steps must be positive");
        self.max_steps = max;
        self
    }
}

/// Mean and spread of episode returns over an evaluation run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvaluationSummary {
    pub episodes: usize,
    pub mean_reward: f64,
    pub std_reward: f64,
    pub mean_score: f64,

    /// Episodes that ended on an illegal action.
    pub truncated: usize,
}

impl EvaluationSummary {
    fn from_episodes(episodes: &[Episode]) -> Self {
        let n = episodes.len();
        if n == 0 {
            return Self {
                episodes: 0,
                mean_reward: 0.0,
                std_reward: 0.0,
                mean_score: 0.0,
                truncated: 0,
            };
        }

        let rewards: Vec<f64> = episodes.iter().map(Episode::total_reward).collect();
        let mean_reward = rewards.iter().sum::<f64>() / n as f64;
        let variance = rewards.iter().map(|r| (r - mean_reward).powi(2)).sum::<f64>() / n as f64;
        let mean_score = episodes.iter().map(|e| f64::from(e.final_score)).sum::<f64>() / n as f64;

        Self {
            episodes: n,
            mean_reward,
            std_reward: variance.sqrt(),
            mean_score,
            truncated: episodes.iter().filter(|e| e.is_truncated()).count(),
        }
    }
}

/// Plays episodes with a policy and records them.
#[derive(Clone, Debug, Default)]
pub struct RolloutWorker {
    config: RolloutConfig,
}

impl RolloutWorker {
    pub fn new(config: RolloutConfig) -> Self {
        Self { config }
    }

    /// Play one episode from `seed` to termination or truncation.
    pub fn play_episode<P: Policy + ?Sized>(&self, policy: &mut P, seed: u64) -> Episode {
        let mut env = YambEnv::new(self.config.env.clone());
        let mut observation = env.reset(Some(seed));
        let mut episode = Episode::new(seed);

        for _ in 0..self.config.max_steps {
            let mask = env.legal_action_mask();
            let action = policy.act(&observation, &mask);
            if policy.halted() {
                debug!(seed, policy = policy.name(), "policy halted");
                break;
            }

            // The env is never done here: the loop exits as soon as a step ends it
            let result = match env.try_step(&action) {
                Ok(result) => result,
                Err(_) => break,
            };

            episode.push(Transition {
                observation,
                mask,
                action,
                reward: result.reward,
                terminated: result.terminated,
                truncated: result.truncated,
            });
            observation = result.observation;

            if result.is_done() {
                break;
            }
        }

        episode.final_score = env.score();
        debug!(
            seed,
            policy = policy.name(),
            steps = episode.len(),
            score = episode.final_score,
            "episode finished"
        );
        episode
    }

    /// Play `count` episodes with consecutive seeds.
    ///
    /// Stops early if the policy halts; the interrupted episode is kept.
    pub fn play_episodes<P: Policy + ?Sized>(&self, policy: &mut P, count: usize) -> Vec<Episode> {
        let mut episodes = Vec::with_capacity(count);
        for i in 0..count {
            let seed = self.config.seed_offset.wrapping_add(i as u64);
            episodes.push(self.play_episode(policy, seed));
            if policy.halted() {
                break;
            }
        }
        episodes
    }

    /// Evaluate a policy over `count` episodes.
    pub fn evaluate<P: Policy + ?Sized>(&self, policy: &mut P, count: usize) -> EvaluationSummary {
        let episodes = self.play_episodes(policy, count);
        let summary = EvaluationSummary::from_episodes(&episodes);
        info!(
            policy = policy.name(),
            episodes = summary.episodes,
            mean_reward = summary.mean_reward,
            std_reward = summary.std_reward,
            "evaluation complete"
        );
        summary
    }

    pub fn config(&self) -> &RolloutConfig {
        &self.config
    }
}
