//! Python bindings for the Yamb environment.
//!
//! # Quick Start
//!
//! ```python
//! import numpy as np
//! import yamb_env
//!
//! env = yamb_env.YambEnv(seed=42)
//! obs, info = env.reset()
//!
//! done = False
//! while not done:
//!     mask = env.action_masks()
//!     action = my_agent(obs, mask)  # nine integers
//!     obs, reward, terminated, truncated, info = env.step(action)
//!     done = terminated or truncated
//!
//! # Baseline evaluation
//! worker = yamb_env.RolloutWorker(seed_offset=0)
//! print(worker.evaluate(100))
//! ```

use pyo3::prelude::*;

mod py_core;
mod py_env;
mod py_nn;
mod py_training;

pub use py_core::*;
pub use py_env::*;
pub use py_nn::*;
pub use py_training::*;

/// yamb_env: a Yamb dice game environment for RL training.
#[pymodule]
fn yamb_env(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Core types
    m.add_class::<PyAction>()?;
    m.add_class::<PyEnvConfig>()?;

    // Environment
    m.add_class::<PyYambEnv>()?;

    // Encoding and policies
    m.add_class::<PyEncodedState>()?;
    m.add_class::<PyFlatEncoder>()?;
    m.add_class::<PyPolicy>()?;

    // Episode collection
    m.add_class::<PyTransition>()?;
    m.add_class::<PyEpisode>()?;
    m.add_class::<PyExperienceBuffer>()?;
    m.add_class::<PyEvaluationSummary>()?;
    m.add_class::<PyRolloutWorker>()?;

    m.add("MASK_LEN", crate::core::ActionMask::LEN)?;
    m.add("ACTION_NVEC", crate::core::ActionMask::NVEC.to_vec())?;
    m.add("EMPTY_CELL", py_core::EMPTY_CELL)?;

    Ok(())
}
