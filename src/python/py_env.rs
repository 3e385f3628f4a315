//! Gym-style environment binding.

use numpy::PyArray1;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::core::{Action, EnvConfig};
use crate::env::{StepResult, YambEnv};
use crate::nn::{FlatEncoder, ObservationEncoder};
use crate::render;

use super::py_core::{observation_to_dict, PyEnvConfig};

/// Yamb environment with the gymnasium reset/step contract.
///
/// ```python
/// env = yamb_env.YambEnv(seed=0)
/// obs, info = env.reset()
/// obs, reward, terminated, truncated, info = env.step([0, 0, 0, 0, 0, 0, 0, 0, 0])
/// mask = env.action_masks()
/// ```
#[pyclass(name = "YambEnv")]
pub struct PyYambEnv {
    inner: YambEnv,
}

impl PyYambEnv {
    fn info<'py>(py: Python<'py>, result: &StepResult) -> PyResult<Bound<'py, PyDict>> {
        let info = PyDict::new_bound(py);
        info.set_item("score", result.info.score)?;
        info.set_item("rejection", result.info.rejection.as_ref().map(ToString::to_string))?;
        Ok(info)
    }
}

#[pymethods]
impl PyYambEnv {
    #[new]
    #[pyo3(signature = (seed = None, truncation_penalty = crate::core::DEFAULT_TRUNCATION_PENALTY, config = None))]
    fn new(seed: Option<u64>, truncation_penalty: f64, config: Option<PyEnvConfig>) -> PyResult<Self> {
        let config = match config {
            Some(config) => config.0,
            None => {
                if !truncation_penalty.is_finite() {
                    return Err(PyValueError::new_err("truncation_penalty must be finite"));
                }
                EnvConfig {
                    seed,
                    truncation_penalty,
                }
            }
        };
        Ok(Self {
            inner: YambEnv::new(config),
        })
    }

    /// Start a new episode. Returns `(observation, info)`.
    #[pyo3(signature = (seed = None))]
    fn reset<'py>(
        &mut self,
        py: Python<'py>,
        seed: Option<u64>,
    ) -> PyResult<(Bound<'py, PyDict>, Bound<'py, PyDict>)> {
        let observation = self.inner.reset(seed);
        let info = PyDict::new_bound(py);
        info.set_item("score", self.inner.score())?;
        Ok((observation_to_dict(py, &observation)?, info))
    }

    /// Apply a raw action. Returns `(observation, reward, terminated, truncated, info)`.
    ///
    /// Raises `ValueError` for malformed actions or stepping a finished episode.
    #[allow(clippy::type_complexity)]
    fn step<'py>(
        &mut self,
        py: Python<'py>,
        action: Vec<i64>,
    ) -> PyResult<(Bound<'py, PyDict>, f64, bool, bool, Bound<'py, PyDict>)> {
        let action = Action::from_raw(&action)?;
        let result = self.inner.try_step(&action)?;
        Ok((
            observation_to_dict(py, &result.observation)?,
            result.reward,
            result.terminated,
            result.truncated,
            Self::info(py, &result)?,
        ))
    }

    /// Flat 108-entry boolean legal-action mask.
    fn action_masks<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<bool>> {
        PyArray1::from_vec_bound(py, self.inner.legal_action_mask().to_vec())
    }

    /// Normalized feature vector for the current observation.
    fn flat_observation<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f32>> {
        let encoded = FlatEncoder::new().encode(&self.inner.observation());
        PyArray1::from_vec_bound(py, encoded.tensor)
    }

    /// Current observation as a dict.
    fn observation<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        observation_to_dict(py, &self.inner.observation())
    }

    /// Text rendering of the current state.
    fn render(&self) -> String {
        render::render(&self.inner.observation())
    }

    #[getter]
    fn score(&self) -> i32 {
        self.inner.score()
    }

    #[getter]
    fn done(&self) -> bool {
        self.inner.is_done()
    }

    fn need_to_announce(&self) -> bool {
        self.inner.need_to_announce()
    }

    fn __repr__(&self) -> String {
        let turn = self.inner.turn();
        format!(
            "YambEnv(turn={}, roll={}, score={})",
            turn.turn_number,
            turn.roll_number,
            self.inner.score()
        )
    }
}
