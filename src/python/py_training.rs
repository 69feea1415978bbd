//! Training data bindings for Python.

use numpy::{PyArray1, PyArray2, PyArrayMethods};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::nn::ENCODED_LEN;
use crate::training::{EpisodeRunner, ExperienceBuffer, PolicyAgent, RunnerConfig, Transition};

use super::py_env::{to_py_err, PyOkeyEnv};
use super::py_nn::PyPolicyNetwork;

/// (states, actions, rewards, next_states, dones)
type NumpyBatch<'py> = (
    Bound<'py, PyArray2<f32>>,
    Bound<'py, PyArray1<i64>>,
    Bound<'py, PyArray1<f32>>,
    Bound<'py, PyArray2<f32>>,
    Bound<'py, PyArray1<bool>>,
);

/// Python wrapper for ExperienceBuffer.
#[pyclass(name = "ExperienceBuffer")]
pub struct PyExperienceBuffer {
    inner: ExperienceBuffer,
}

#[pymethods]
impl PyExperienceBuffer {
    #[new]
    #[pyo3(signature = (max_transitions = 10000))]
    fn new(max_transitions: usize) -> Self {
        Self {
            inner: ExperienceBuffer::new(max_transitions),
        }
    }

    /// Play `episodes` episodes in `env` and store their transitions.
    ///
    /// Actions come from `policy` (a PolicyNetwork) when given, otherwise
    /// uniformly at random. Returns each episode's total reward.
    #[pyo3(signature = (env, episodes, policy = None, max_steps = 25, seed = 0))]
    fn collect(
        &mut self,
        py: Python<'_>,
        mut env: PyRefMut<'_, PyOkeyEnv>,
        episodes: usize,
        policy: Option<PyRef<'_, PyPolicyNetwork>>,
        max_steps: usize,
        seed: u64,
    ) -> PyResult<Vec<f32>> {
        let config = RunnerConfig::new().with_max_steps(max_steps).with_seed(seed);
        let rewards = match policy {
            Some(network) => {
                let agent = PolicyAgent::new(network.clone_ref(py));
                EpisodeRunner::new(agent, config).fill_buffer(
                    &mut env.inner,
                    &mut self.inner,
                    episodes,
                )
            }
            None => EpisodeRunner::random(config).fill_buffer(
                &mut env.inner,
                &mut self.inner,
                episodes,
            ),
        };
        rewards.map_err(to_py_err)
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }

    #[getter]
    fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    fn clear(&mut self) {
        self.inner.clear();
    }

    /// Sample a batch as numpy arrays.
    ///
    /// Returns (states, actions, rewards, next_states, dones):
    /// - states, next_states: [N, 72] float32
    /// - actions: [N] int64
    /// - rewards: [N] float32
    /// - dones: [N] bool
    fn sample_batch<'py>(
        &self,
        py: Python<'py>,
        batch_size: usize,
        seed: u64,
    ) -> PyResult<NumpyBatch<'py>> {
        let batch = self.inner.sample_batch(batch_size, seed);
        to_numpy_batch(py, &batch)
    }

    fn __repr__(&self) -> String {
        format!(
            "ExperienceBuffer(len={}, capacity={})",
            self.inner.len(),
            self.inner.capacity()
        )
    }
}

fn to_numpy_batch<'py>(py: Python<'py>, batch: &[Transition]) -> PyResult<NumpyBatch<'py>> {
    let n = batch.len();
    let mut states: Vec<f32> = Vec::with_capacity(n * ENCODED_LEN);
    let mut next_states: Vec<f32> = Vec::with_capacity(n * ENCODED_LEN);
    let mut actions = Vec::with_capacity(n);
    let mut rewards = Vec::with_capacity(n);
    let mut dones = Vec::with_capacity(n);

    for (i, t) in batch.iter().enumerate() {
        if t.state.len() != ENCODED_LEN || t.next_state.len() != ENCODED_LEN {
            return Err(PyErr::new::<PyValueError, _>(format!(
                "Inconsistent state dimension at sample {}: expected {}",
                i, ENCODED_LEN
            )));
        }
        states.extend_from_slice(&t.state.tensor);
        next_states.extend_from_slice(&t.next_state.tensor);
        actions.push(t.action as i64);
        rewards.push(t.reward);
        dones.push(t.done);
    }

    let reshape_err = |e: PyErr| PyErr::new::<PyValueError, _>(format!("{}", e));
    let states = PyArray1::from_vec_bound(py, states)
        .reshape([n, ENCODED_LEN])
        .map_err(reshape_err)?;
    let next_states = PyArray1::from_vec_bound(py, next_states)
        .reshape([n, ENCODED_LEN])
        .map_err(reshape_err)?;

    Ok((
        states,
        PyArray1::from_vec_bound(py, actions),
        PyArray1::from_vec_bound(py, rewards),
        next_states,
        PyArray1::from_vec_bound(py, dones),
    ))
}
