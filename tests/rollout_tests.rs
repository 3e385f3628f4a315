//! Integration tests for encoding, policies and episode collection.

use yamb_env::core::{Action, ActionMask, DiceCounts, EnvConfig, FillIndex, Observation, Row};
use yamb_env::env::YambEnv;
use yamb_env::nn::{FlatEncoder, MaskedRandomPolicy, ObservationEncoder, Policy};
use yamb_env::render::render;
use yamb_env::scoring::combination_value;
use yamb_env::training::{Episode, ExperienceBuffer, RolloutConfig, RolloutWorker};

/// Keeps every die and fills the legal cell worth the most right now.
struct GreedyFillPolicy;

impl Policy for GreedyFillPolicy {
    fn act(&mut self, observation: &Observation, mask: &ActionMask) -> Action {
        if observation.roll_number == 2 {
            let best = FillIndex::all()
                .filter(|&index| mask.fill_allowed(index))
                .max_by_key(|&index| combination_value(index.cell().row, &observation.dice))
                .unwrap_or_default();
            return Action {
                fill: best,
                ..Action::default()
            };
        }

        let keep = observation.dice;
        if observation.roll_number == 0 && !mask.may_skip_announce() {
            let row = Row::ALL
                .into_iter()
                .find(|&row| mask.announce_row_allowed(row))
                .unwrap_or_default();
            return Action::announce(keep, row);
        }
        Action::keep(keep)
    }

    fn name(&self) -> &str {
        "greedy-fill"
    }
}

// =============================================================================
// Encoding
// =============================================================================

#[test]
fn test_flat_encoder_on_live_env() {
    let mut env = YambEnv::new(EnvConfig::new().with_seed(12));
    let obs = env.reset(None);
    let encoded = FlatEncoder::new().encode(&obs);

    assert_eq!(encoded.shape, vec![FlatEncoder::FEATURES]);
    // Every grid cell is empty at the start
    assert!(encoded.tensor[2..58].iter().all(|&v| v == -1.0));
    let dice_sum: f32 = encoded.tensor[58..64].iter().map(|v| v * 5.0 + 1.0).sum();
    assert!((dice_sum - 5.0).abs() < 1e-4);
}

#[test]
fn test_render_live_env() {
    let mut env = YambEnv::new(EnvConfig::new().with_seed(12));
    let obs = env.reset(None);
    let text = render(&obs);

    assert!(text.starts_with("TURN: 0, ROLL: 0, SCORE: 0"));
    let faces: Vec<String> = obs.dice.faces().iter().map(u8::to_string).collect();
    assert!(text.contains(&format!("DICE: {}", faces.join(" "))));
}

// =============================================================================
// Rollouts
// =============================================================================

#[test]
fn test_rollouts_are_deterministic() {
    let worker = RolloutWorker::new(RolloutConfig::new().with_seed_offset(500));

    let a = worker.play_episodes(&mut MaskedRandomPolicy::new(3), 3);
    let b = worker.play_episodes(&mut MaskedRandomPolicy::new(3), 3);
    assert_eq!(a, b);

    let seeds: Vec<u64> = a.iter().map(|e| e.seed).collect();
    assert_eq!(seeds, vec![500, 501, 502]);
}

#[test]
fn test_recorded_masks_allow_recorded_actions() {
    let worker = RolloutWorker::default();
    let episode = worker.play_episode(&mut MaskedRandomPolicy::new(8), 8);

    for transition in &episode.transitions {
        let obs = &transition.observation;
        let action = &transition.action;
        if obs.roll_number == 2 {
            assert!(transition.mask.fill_allowed(action.fill));
        } else {
            for face in 1..=6 {
                assert!(transition.mask.keep_allowed(face, action.keep.count(face)));
            }
        }
    }
}

#[test]
fn test_greedy_policy_completes_game() {
    let worker = RolloutWorker::new(RolloutConfig::new().with_seed_offset(1));
    let episode = worker.play_episode(&mut GreedyFillPolicy, 1);

    assert!(episode.is_terminated());
    assert!(!episode.is_truncated());
    assert_eq!(episode.len(), 168);
    assert_eq!(episode.total_reward(), f64::from(episode.final_score));
}

#[test]
fn test_evaluate_reports_mean_and_std() {
    let worker = RolloutWorker::new(RolloutConfig::new().with_seed_offset(40));
    let episodes = worker.play_episodes(&mut MaskedRandomPolicy::new(2), 5);
    let summary = worker.evaluate(&mut MaskedRandomPolicy::new(2), 5);

    let returns: Vec<f64> = episodes.iter().map(Episode::total_reward).collect();
    let mean = returns.iter().sum::<f64>() / 5.0;
    let std = (returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / 5.0).sqrt();

    assert_eq!(summary.episodes, 5);
    assert!((summary.mean_reward - mean).abs() < 1e-9);
    assert!((summary.std_reward - std).abs() < 1e-9);
    assert_eq!(summary.truncated, 0);
}

#[test]
fn test_truncation_penalty_flows_into_returns() {
    struct KeepTooMany;

    impl Policy for KeepTooMany {
        fn act(&mut self, _observation: &Observation, _mask: &ActionMask) -> Action {
            Action::keep(DiceCounts::new([5, 5, 5, 5, 5, 5]))
        }
    }

    let config = RolloutConfig::new().with_env(EnvConfig::new().with_truncation_penalty(-10.0));
    let summary = RolloutWorker::new(config).evaluate(&mut KeepTooMany, 3);

    assert_eq!(summary.truncated, 3);
    assert_eq!(summary.mean_reward, -10.0);
    assert_eq!(summary.std_reward, 0.0);
    assert_eq!(summary.mean_score, 0.0);
}

// =============================================================================
// Storage
// =============================================================================

#[test]
fn test_episode_bincode_roundtrip() {
    let worker = RolloutWorker::default();
    let episode = worker.play_episode(&mut MaskedRandomPolicy::new(4), 4);

    let bytes = episode.to_bytes().unwrap();
    assert_eq!(Episode::from_bytes(&bytes).unwrap(), episode);
}

#[test]
fn test_episode_json_roundtrip() {
    let worker = RolloutWorker::new(RolloutConfig::new().with_max_steps(9));
    let episode = worker.play_episode(&mut MaskedRandomPolicy::new(4), 4);

    let json = serde_json::to_string(&episode).unwrap();
    let restored: Episode = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, episode);
}

#[test]
fn test_buffer_collects_rollouts() {
    let worker = RolloutWorker::default();
    let mut buffer = ExperienceBuffer::new(2);

    for episode in worker.play_episodes(&mut MaskedRandomPolicy::new(0), 3) {
        buffer.push(episode);
    }

    assert_eq!(buffer.len(), 2);
    assert_eq!(buffer.total_transitions(), 2 * 168);
    assert_eq!(buffer.sample_batch(16, 1).len(), 16);
}
