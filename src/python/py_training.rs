//! Episode collection bindings for Python.

use numpy::{PyArray1, PyArray2, PyArrayMethods};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::nn::{FlatEncoder, MaskedRandomPolicy};
use crate::training::{Episode, EvaluationSummary, ExperienceBuffer, RolloutConfig, RolloutWorker, Transition};

use super::py_core::{observation_to_dict, PyAction, PyEnvConfig};
use super::py_nn::{PyEncodedState, PyFlatEncoder, PyPolicy};

/// Python wrapper for Transition.
#[pyclass(name = "Transition")]
#[derive(Clone)]
pub struct PyTransition(pub Transition);

#[pymethods]
impl PyTransition {
    /// Observation before acting, as a dict.
    fn observation<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        observation_to_dict(py, &self.0.observation)
    }

    /// Observation before acting, flat-encoded.
    fn encoded(&self) -> PyEncodedState {
        PyFlatEncoder::default().encode(&self.0.observation)
    }

    fn mask<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<bool>> {
        PyArray1::from_vec_bound(py, self.0.mask.to_vec())
    }

    #[getter]
    fn action(&self) -> PyAction {
        PyAction(self.0.action)
    }

    #[getter]
    fn reward(&self) -> f64 {
        self.0.reward
    }

    #[getter]
    fn terminated(&self) -> bool {
        self.0.terminated
    }

    #[getter]
    fn truncated(&self) -> bool {
        self.0.truncated
    }

    fn __repr__(&self) -> String {
        format!(
            "Transition(turn={}, roll={}, reward={})",
            self.0.observation.turn_number, self.0.observation.roll_number, self.0.reward
        )
    }
}

/// Python wrapper for Episode.
#[pyclass(name = "Episode")]
#[derive(Clone)]
pub struct PyEpisode(pub Episode);

#[pymethods]
impl PyEpisode {
    #[getter]
    fn transitions(&self) -> Vec<PyTransition> {
        self.0.transitions.iter().cloned().map(PyTransition).collect()
    }

    #[getter]
    fn seed(&self) -> u64 {
        self.0.seed
    }

    #[getter]
    fn final_score(&self) -> i32 {
        self.0.final_score
    }

    #[getter]
    fn total_reward(&self) -> f64 {
        self.0.total_reward()
    }

    #[getter]
    fn truncated(&self) -> bool {
        self.0.is_truncated()
    }

    fn returns(&self) -> Vec<f64> {
        self.0.returns()
    }

    fn __len__(&self) -> usize {
        self.0.len()
    }

    /// Encode with bincode.
    fn to_bytes(&self) -> PyResult<Vec<u8>> {
        self.0.to_bytes().map_err(|e| PyValueError::new_err(e.to_string()))
    }

    /// Decode from bincode.
    #[staticmethod]
    fn from_bytes(bytes: Vec<u8>) -> PyResult<Self> {
        Episode::from_bytes(&bytes)
            .map(Self)
            .map_err(|e| PyValueError::new_err(e.to_string()))
    }

    /// All transitions as numpy arrays.
    ///
    /// Returns (features, masks, actions, rewards):
    /// - features: [N, 66] float32
    /// - masks: [N, 108] bool
    /// - actions: [N, 9] int64
    /// - rewards: [N] float64
    #[allow(clippy::type_complexity)]
    fn to_numpy<'py>(
        &self,
        py: Python<'py>,
    ) -> PyResult<(
        Bound<'py, PyArray2<f32>>,
        Bound<'py, PyArray2<bool>>,
        Bound<'py, PyArray2<i64>>,
        Bound<'py, PyArray1<f64>>,
    )> {
        let encoder = PyFlatEncoder::default();
        let n = self.0.len();

        let mut features = Vec::with_capacity(n * FlatEncoder::FEATURES);
        let mut masks = Vec::with_capacity(n * crate::core::ActionMask::LEN);
        let mut actions = Vec::with_capacity(n * crate::core::RAW_ACTION_LEN);
        let mut rewards = Vec::with_capacity(n);

        for transition in &self.0.transitions {
            features.extend(encoder.encode(&transition.observation).0.tensor);
            masks.extend(transition.mask.to_vec());
            actions.extend(transition.action.to_raw());
            rewards.push(transition.reward);
        }

        Ok((
            PyArray1::from_vec_bound(py, features).reshape([n, FlatEncoder::FEATURES])?,
            PyArray1::from_vec_bound(py, masks).reshape([n, crate::core::ActionMask::LEN])?,
            PyArray1::from_vec_bound(py, actions).reshape([n, crate::core::RAW_ACTION_LEN])?,
            PyArray1::from_vec_bound(py, rewards),
        ))
    }

    fn __repr__(&self) -> String {
        format!(
            "Episode(seed={}, steps={}, score={})",
            self.0.seed,
            self.0.len(),
            self.0.final_score
        )
    }
}

/// Python wrapper for ExperienceBuffer.
#[pyclass(name = "ExperienceBuffer")]
pub struct PyExperienceBuffer {
    inner: ExperienceBuffer,
}

#[pymethods]
impl PyExperienceBuffer {
    #[new]
    #[pyo3(signature = (max_episodes = 10000))]
    fn new(max_episodes: usize) -> Self {
        Self {
            inner: ExperienceBuffer::new(max_episodes),
        }
    }

    fn push(&mut self, episode: &PyEpisode) {
        self.inner.push(episode.0.clone());
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }

    #[getter]
    fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    #[getter]
    fn total_transitions(&self) -> usize {
        self.inner.total_transitions()
    }

    fn clear(&mut self) {
        self.inner.clear();
    }

    /// Sample a random batch of transitions.
    fn sample_batch(&self, batch_size: usize, seed: u64) -> Vec<PyTransition> {
        self.inner
            .sample_batch(batch_size, seed)
            .into_iter()
            .map(PyTransition)
            .collect()
    }

    fn __repr__(&self) -> String {
        format!(
            "ExperienceBuffer(len={}, capacity={})",
            self.inner.len(),
            self.inner.capacity()
        )
    }
}

/// Python wrapper for EvaluationSummary.
#[pyclass(name = "EvaluationSummary")]
#[derive(Clone)]
pub struct PyEvaluationSummary(pub EvaluationSummary);

#[pymethods]
impl PyEvaluationSummary {
    #[getter]
    fn episodes(&self) -> usize {
        self.0.episodes
    }

    #[getter]
    fn mean_reward(&self) -> f64 {
        self.0.mean_reward
    }

    #[getter]
    fn std_reward(&self) -> f64 {
        self.0.std_reward
    }

    #[getter]
    fn mean_score(&self) -> f64 {
        self.0.mean_score
    }

    #[getter]
    fn truncated(&self) -> usize {
        self.0.truncated
    }

    fn __repr__(&self) -> String {
        format!(
            "EvaluationSummary(episodes={}, mean={:.2}, std={:.2})",
            self.0.episodes, self.0.mean_reward, self.0.std_reward
        )
    }
}

/// Rollout worker.
///
/// Plays episodes with a Python `Policy`, or with the masked random
/// baseline when no policy is given.
#[pyclass(name = "RolloutWorker")]
pub struct PyRolloutWorker {
    inner: RolloutWorker,
}

#[pymethods]
impl PyRolloutWorker {
    #[new]
    #[pyo3(signature = (config = None, seed_offset = 0, max_steps = 1000))]
    fn new(config: Option<PyEnvConfig>, seed_offset: u64, max_steps: usize) -> PyResult<Self> {
        if max_steps == 0 {
            return Err(PyValueError::new_err("max_steps must be positive"));
        }
        let config = RolloutConfig::new()
            .with_env(config.map(|c| c.0).unwrap_or_default())
            .with_seed_offset(seed_offset)
            .with_max_steps(max_steps);
        Ok(Self {
            inner: RolloutWorker::new(config),
        })
    }

    /// Play one episode.
    ///
    /// Re-raises the first exception from `policy`.
    #[pyo3(signature = (seed, policy = None, policy_seed = 0))]
    fn play_episode(
        &self,
        seed: u64,
        policy: Option<PyRefMut<'_, PyPolicy>>,
        policy_seed: u64,
    ) -> PyResult<PyEpisode> {
        let episode = match policy {
            Some(mut policy) => {
                let episode = self.inner.play_episode(&mut *policy, seed);
                raise_policy_error(&mut policy)?;
                episode
            }
            None => self.inner.play_episode(&mut MaskedRandomPolicy::new(policy_seed), seed),
        };
        Ok(PyEpisode(episode))
    }

    /// Play `count` episodes with consecutive seeds.
    #[pyo3(signature = (count, policy = None, policy_seed = 0))]
    fn play_episodes(
        &self,
        count: usize,
        policy: Option<PyRefMut<'_, PyPolicy>>,
        policy_seed: u64,
    ) -> PyResult<Vec<PyEpisode>> {
        let episodes = match policy {
            Some(mut policy) => {
                let episodes = self.inner.play_episodes(&mut *policy, count);
                raise_policy_error(&mut policy)?;
                episodes
            }
            None => self.inner.play_episodes(&mut MaskedRandomPolicy::new(policy_seed), count),
        };
        Ok(episodes.into_iter().map(PyEpisode).collect())
    }

    /// Mean and standard deviation of episode returns.
    #[pyo3(signature = (episodes, policy = None, policy_seed = 0))]
    fn evaluate(
        &self,
        episodes: usize,
        policy: Option<PyRefMut<'_, PyPolicy>>,
        policy_seed: u64,
    ) -> PyResult<PyEvaluationSummary> {
        let summary = match policy {
            Some(mut policy) => {
                let summary = self.inner.evaluate(&mut *policy, episodes);
                raise_policy_error(&mut policy)?;
                summary
            }
            None => self.inner.evaluate(&mut MaskedRandomPolicy::new(policy_seed), episodes),
        };
        Ok(PyEvaluationSummary(summary))
    }
}

fn raise_policy_error(policy: &mut PyPolicy) -> PyResult<()> {
    policy.take_error().map_or(Ok(()), Err)
}
