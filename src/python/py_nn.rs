//! Encoder and policy bindings for Python.

use numpy::PyArray1;
use pyo3::prelude::*;
use tracing::debug;

use crate::core::{Action, ActionMask, Observation};
use crate::nn::{EncodedState, FlatEncoder, ObservationEncoder, Policy};

use super::py_core::observation_to_dict;

/// Python wrapper for EncodedState.
#[pyclass(name = "EncodedState")]
#[derive(Clone, Debug)]
pub struct PyEncodedState(pub EncodedState);

#[pymethods]
impl PyEncodedState {
    #[getter]
    fn tensor(&self) -> Vec<f32> {
        self.0.tensor.clone()
    }

    #[getter]
    fn shape(&self) -> Vec<usize> {
        self.0.shape.clone()
    }

    fn __len__(&self) -> usize {
        self.0.len()
    }

    /// Convert tensor to numpy array (flat).
    fn to_numpy<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f32>> {
        PyArray1::from_slice_bound(py, &self.0.tensor)
    }

    fn __repr__(&self) -> String {
        format!("EncodedState(shape={:?})", self.0.shape)
    }
}

/// Python-implemented policy.
///
/// Wraps a callable `policy(observation: dict, mask: np.ndarray) -> list[int]`
/// returning a raw nine-integer action.
///
/// The first exception raised by the callback (or a malformed action) halts
/// the policy. Rollout methods re-raise it once they stop.
#[pyclass(name = "Policy")]
pub struct PyPolicy {
    callback: PyObject,
    name: String,
    error: Option<PyErr>,
}

#[pymethods]
impl PyPolicy {
    #[new]
    #[pyo3(signature = (callback, name = String::from("python")))]
    fn new(callback: PyObject, name: String) -> Self {
        Self {
            callback,
            name,
            error: None,
        }
    }

    /// Call the policy directly.
    fn __call__(&self, py: Python<'_>, observation: PyObject, mask: PyObject) -> PyResult<Vec<i64>> {
        self.callback.call1(py, (observation, mask))?.extract(py)
    }

    #[getter]
    fn get_name(&self) -> &str {
        &self.name
    }
}

impl PyPolicy {
    fn try_act(&self, py: Python<'_>, observation: &Observation, mask: &ActionMask) -> PyResult<Action> {
        let obs = observation_to_dict(py, observation)?;
        let mask = PyArray1::from_vec_bound(py, mask.to_vec());
        let raw: Vec<i64> = self.callback.call1(py, (obs, mask))?.extract(py)?;
        Ok(Action::from_raw(&raw)?)
    }

    /// Take the error that halted this policy, clearing it.
    pub(crate) fn take_error(&mut self) -> Option<PyErr> {
        self.error.take()
    }
}

impl Policy for PyPolicy {
    fn act(&mut self, observation: &Observation, mask: &ActionMask) -> Action {
        if self.error.is_some() {
            return Action::default();
        }
        Python::with_gil(|py| match self.try_act(py, observation, mask) {
            Ok(action) => action,
            Err(err) => {
                debug!(policy = %self.name, %err, "python policy raised");
                self.error = Some(err);
                Action::default()
            }
        })
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn halted(&self) -> bool {
        self.error.is_some()
    }
}

/// Flat normalized observation encoder.
#[pyclass(name = "FlatEncoder")]
#[derive(Clone, Default)]
pub struct PyFlatEncoder(FlatEncoder);

#[pymethods]
impl PyFlatEncoder {
    #[new]
    fn new() -> Self {
        Self::default()
    }

    /// Number of features.
    #[getter]
    fn features(&self) -> usize {
        FlatEncoder::FEATURES
    }

    fn output_shape(&self) -> Vec<usize> {
        self.0.output_shape()
    }
}

impl PyFlatEncoder {
    pub(crate) fn encode(&self, observation: &Observation) -> PyEncodedState {
        PyEncodedState(self.0.encode(observation))
    }
}
