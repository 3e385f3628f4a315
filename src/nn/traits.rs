//! Interfaces between the environment and a decision-making agent.
//!
//! The environment never chooses actions itself. Agents implement
//! [`Policy`] and consume observations (optionally encoded as tensors)
//! together with the legal-action mask.

use serde::{Deserialize, Serialize};

use crate::core::{Action, ActionMask, Observation};

/// Encoded observation as a flat tensor for neural network input.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EncodedState {
    /// Flattened tensor data (row-major order).
    pub tensor: Vec<f32>,

    /// Shape of the tensor.
    pub shape: Vec<usize>,
}

impl EncodedState {
    /// Create a new encoded state.
    pub fn new(tensor: Vec<f32>, shape: Vec<usize>) -> Self {
        debug_assert_eq!(
            tensor.len(),
            shape.iter().product::<usize>(),
            "Tensor length must match shape product"
        );
        Self { tensor, shape }
    }

    /// Get the total number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tensor.len()
    }

    /// Check if the tensor is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tensor.is_empty()
    }

    /// Get element at a flat index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<f32> {
        self.tensor.get(index).copied()
    }
}

/// Chooses an action for the current decision point.
///
/// Implementations receive the legal-action mask and should only pick
/// actions it allows; anything else truncates the episode.
pub trait Policy {
    /// Pick an action.
    fn act(&mut self, observation: &Observation, mask: &ActionMask) -> Action;

    /// Human-readable name for logs and evaluation summaries.
    fn name(&self) -> &str {
        "policy"
    }

    /// True once the policy can no longer produce actions.
    ///
    /// Checked after every [`act`](Policy::act); a halted policy's last
    /// action is discarded and rollouts stop.
    fn halted(&self) -> bool {
        false
    }
}

impl<P: Policy + ?Sized> Policy for Box<P> {
    fn act(&mut self, observation: &Observation, mask: &ActionMask) -> Action {
        (**self).act(observation, mask)
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn halted(&self) -> bool {
        (**self).halted()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoded_state_new() {
        let state = EncodedState::new(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]);
        assert_eq!(state.len(), 4);
        assert!(!state.is_empty());
        assert_eq!(state.shape, vec![2, 2]);
        assert_eq!(state.get(0), Some(1.0));
        assert_eq!(state.get(3), Some(4.0));
        assert_eq!(state.get(4), None);
    }

    struct FixedPolicy;

    impl Policy for FixedPolicy {
        fn act(&mut self, _observation: &Observation, _mask: &ActionMask) -> Action {
            Action::default()
        }
    }

    #[test]
    fn test_boxed_policy_delegates() {
        let mut policy: Box<dyn Policy> = Box::new(FixedPolicy);
        let obs = Observation::new(
            &crate::core::TurnState::new(),
            &crate::core::Scoresheet::new(),
            crate::core::DiceCounts::new([1, 1, 1, 1, 1, 0]),
        );

        assert_eq!(policy.act(&obs, &ActionMask::empty()), Action::default());
        assert_eq!(policy.name(), "policy");
        assert!(!policy.halted());
    }
}
