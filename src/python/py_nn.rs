//! Network bindings for Python.

use log::warn;
use numpy::PyArray1;
use pyo3::prelude::*;

use crate::nn::{EncodedState, PolicyNetwork};

/// Python-implemented PolicyNetwork wrapper.
///
/// Allows Python callables to score actions from Rust.
#[pyclass(name = "PolicyNetwork")]
pub struct PyPolicyNetwork {
    callback: PyObject,
    action_space_size: usize,
}

#[pymethods]
impl PyPolicyNetwork {
    /// Create a new network wrapper from a Python callable.
    ///
    /// The callable receives a float32 numpy array (the observation) and
    /// returns a list of `action_space_size` scores, e.g. Q-values.
    #[new]
    #[pyo3(signature = (callback, action_space_size = 44))]
    fn new(callback: PyObject, action_space_size: usize) -> Self {
        Self {
            callback,
            action_space_size,
        }
    }

    #[getter]
    fn action_space_size(&self) -> usize {
        self.action_space_size
    }
}

impl PyPolicyNetwork {
    /// A second handle to the same callback, for use outside the Python object.
    pub(crate) fn clone_ref(&self, py: Python<'_>) -> Self {
        Self {
            callback: self.callback.clone_ref(py),
            action_space_size: self.action_space_size,
        }
    }

    /// Uniform scores, used when the Python callback fails.
    fn fallback_prediction(&self) -> Vec<f32> {
        vec![0.0; self.action_space_size]
    }
}

impl PolicyNetwork for PyPolicyNetwork {
    fn predict(&self, encoded: &EncodedState) -> Vec<f32> {
        Python::with_gil(|py| {
            let obs = PyArray1::from_slice_bound(py, &encoded.tensor);
            match self.callback.call1(py, (obs,)) {
                Ok(result) => match result.extract::<Vec<f32>>(py) {
                    Ok(scores) => scores,
                    Err(e) => {
                        warn!("PolicyNetwork: failed to extract scores: {}", e);
                        self.fallback_prediction()
                    }
                },
                Err(e) => {
                    warn!("PolicyNetwork: callback failed: {}", e);
                    self.fallback_prediction()
                }
            }
        })
    }
}
