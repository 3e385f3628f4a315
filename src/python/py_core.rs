//! Core type bindings for Python.

use numpy::{PyArray1, PyArrayMethods};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::core::{Action, ContractViolation, EnvConfig, Observation, COLUMN_COUNT, ROW_COUNT};

impl From<ContractViolation> for PyErr {
    fn from(violation: ContractViolation) -> Self {
        PyValueError::new_err(violation.to_string())
    }
}

/// Grid value marking an unfilled cell in Python observations.
pub const EMPTY_CELL: i32 = -145;

/// Convert an observation into the gym-style dict.
///
/// Keys: `turn_number`, `roll_number`, `grid` (14x4 int array,
/// [`EMPTY_CELL`] for empty), `roll` (6 face counts), `announced`,
/// `announced_row`.
pub(crate) fn observation_to_dict<'py>(
    py: Python<'py>,
    observation: &Observation,
) -> PyResult<Bound<'py, PyDict>> {
    let grid = PyArray1::from_slice_bound(py, &observation.grid.dense(EMPTY_CELL)[..])
        .reshape([ROW_COUNT, COLUMN_COUNT])?;
    let roll = PyArray1::from_slice_bound(py, observation.dice.as_array());

    let dict = PyDict::new_bound(py);
    dict.set_item("turn_number", observation.turn_number)?;
    dict.set_item("roll_number", observation.roll_number)?;
    dict.set_item("grid", grid)?;
    dict.set_item("roll", roll)?;
    dict.set_item("announced", u8::from(observation.announced))?;
    dict.set_item("announced_row", observation.announced_row)?;
    Ok(dict)
}

/// Python wrapper for Action.
#[pyclass(name = "Action")]
#[derive(Clone, Debug)]
pub struct PyAction(pub Action);

#[pymethods]
impl PyAction {
    /// Build an action from the nine-integer raw format.
    #[new]
    fn new(raw: Vec<i64>) -> PyResult<Self> {
        Ok(Self(Action::from_raw(&raw)?))
    }

    /// Parse a text command such as `"112a13"` or `"r5c2"`.
    #[staticmethod]
    fn parse(command: &str) -> PyResult<Self> {
        Ok(Self(Action::parse_command(command)?))
    }

    /// The nine-integer raw format.
    fn to_raw(&self) -> Vec<i64> {
        self.0.to_raw().to_vec()
    }

    #[getter]
    fn keep(&self) -> Vec<u8> {
        self.0.keep.as_array().to_vec()
    }

    #[getter]
    fn announce(&self) -> bool {
        self.0.announce
    }

    #[getter]
    fn announce_row(&self) -> usize {
        self.0.announce_row.index()
    }

    #[getter]
    fn fill_index(&self) -> usize {
        self.0.fill.raw()
    }

    fn __repr__(&self) -> String {
        format!("Action({:?})", self.0.to_raw())
    }

    fn __eq__(&self, other: &Self) -> bool {
        self.0 == other.0
    }

    fn __hash__(&self) -> u64 {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};
        let mut hasher = DefaultHasher::new();
        self.0.hash(&mut hasher);
        hasher.finish()
    }
}

/// Python wrapper for EnvConfig.
#[pyclass(name = "EnvConfig")]
#[derive(Clone, Debug)]
pub struct PyEnvConfig(pub EnvConfig);

#[pymethods]
impl PyEnvConfig {
    #[new]
    #[pyo3(signature = (seed = None, truncation_penalty = crate::core::DEFAULT_TRUNCATION_PENALTY))]
    fn new(seed: Option<u64>, truncation_penalty: f64) -> PyResult<Self> {
        if !truncation_penalty.is_finite() {
            return Err(PyValueError::new_err("truncation_penalty must be finite"));
        }
        Ok(Self(EnvConfig {
            seed,
            truncation_penalty,
        }))
    }

    #[getter]
    fn seed(&self) -> Option<u64> {
        self.0.seed
    }

    #[getter]
    fn truncation_penalty(&self) -> f64 {
        self.0.truncation_penalty
    }

    fn __repr__(&self) -> String {
        format!(
            "EnvConfig(seed={:?}, truncation_penalty={})",
            self.0.seed, self.0.truncation_penalty
        )
    }
}
