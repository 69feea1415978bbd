//! Environment bindings for Python.

use numpy::PyArray1;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyBytes;

use crate::core::action::ACTION_SPACE_SIZE;
use crate::core::{EngineConfig, IllegalActionPolicy};
use crate::error::EngineError;
use crate::games::okey::OkeyEnv;
use crate::nn::{EncodedState, ENCODED_LEN};
use crate::tiles::Tile;

pub(crate) fn to_py_err(err: EngineError) -> PyErr {
    PyErr::new::<PyValueError, _>(err.to_string())
}

pub(crate) fn to_numpy<'py>(py: Python<'py>, encoded: EncodedState) -> Bound<'py, PyArray1<f32>> {
    PyArray1::from_vec_bound(py, encoded.tensor)
}

fn tile_pair(tile: Tile) -> (u8, u8) {
    (tile.color.index() as u8, tile.rank.get())
}

/// Python wrapper for OkeyEnv.
///
/// Observations are float32 numpy arrays of length 72; actions are integers
/// in 0..44.
#[pyclass(name = "OkeyEnv")]
pub struct PyOkeyEnv {
    pub(crate) inner: OkeyEnv,
}

#[pymethods]
impl PyOkeyEnv {
    /// Create a new environment.
    ///
    /// # Arguments
    /// - seed: Shuffle seed; None draws one from OS entropy
    /// - strict: Raise ValueError on illegal actions instead of ending the
    ///   episode
    #[new]
    #[pyo3(signature = (seed = None, strict = false))]
    fn new(seed: Option<u64>, strict: bool) -> Self {
        let policy = if strict {
            IllegalActionPolicy::Reject
        } else {
            IllegalActionPolicy::Terminate
        };
        let config = EngineConfig {
            seed,
            illegal_action: policy,
        };
        Self {
            inner: OkeyEnv::new(config),
        }
    }

    /// Start a new episode and return the first observation.
    fn reset<'py>(&mut self, py: Python<'py>) -> Bound<'py, PyArray1<f32>> {
        to_numpy(py, self.inner.reset())
    }

    /// Start a new episode from an explicit draw order of (color, rank) pairs.
    fn reset_with_deck<'py>(
        &mut self,
        py: Python<'py>,
        order: Vec<(u8, u8)>,
    ) -> PyResult<Bound<'py, PyArray1<f32>>> {
        let tiles = order
            .into_iter()
            .map(|(color, rank)| Tile::from_parts(color, rank).ok_or(EngineError::InvalidDeck))
            .collect::<Result<Vec<_>, _>>()
            .map_err(to_py_err)?;
        let obs = self.inner.reset_with_deck(tiles).map_err(to_py_err)?;
        Ok(to_numpy(py, obs))
    }

    /// Legal action indices for the current state, ascending.
    fn get_valid_actions(&mut self) -> Vec<usize> {
        self.inner.get_valid_actions()
    }

    /// Apply an action. Returns (next_state, reward, done).
    fn step<'py>(
        &mut self,
        py: Python<'py>,
        action: usize,
    ) -> PyResult<(Bound<'py, PyArray1<f32>>, f32, bool)> {
        let result = self.inner.step(action).map_err(to_py_err)?;
        Ok((to_numpy(py, result.state), result.reward, result.done))
    }

    /// Current observation without stepping.
    fn observe<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f32>> {
        to_numpy(py, self.inner.observe())
    }

    #[getter]
    fn state_size(&self) -> usize {
        ENCODED_LEN
    }

    #[getter]
    fn action_size(&self) -> usize {
        ACTION_SPACE_SIZE
    }

    /// Tiles left in the deck.
    #[getter]
    fn deck_size(&self) -> usize {
        self.inner.deck_len()
    }

    /// Hand slots as (color, rank) pairs, None for empty slots.
    #[getter]
    fn hand(&self) -> Vec<Option<(u8, u8)>> {
        self.inner
            .hand()
            .slots()
            .iter()
            .map(|slot| slot.tile().map(tile_pair))
            .collect()
    }

    /// Discarded tiles in discard order.
    #[getter]
    fn discarded(&self) -> Vec<(u8, u8)> {
        self.inner.discard().iter().map(tile_pair).collect()
    }

    #[getter]
    fn done(&self) -> bool {
        self.inner.is_done()
    }

    #[getter]
    fn episode_return(&self) -> f32 {
        self.inner.episode_return()
    }

    #[getter]
    fn steps(&self) -> u32 {
        self.inner.steps()
    }

    /// Why the episode ended, or None while it is running.
    #[getter]
    fn end_reason(&self) -> Option<String> {
        self.inner.end_reason().map(|end| format!("{:?}", end))
    }

    /// Serialize the environment to bytes.
    fn snapshot<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyBytes>> {
        let bytes = self.inner.snapshot().map_err(to_py_err)?;
        Ok(PyBytes::new_bound(py, &bytes))
    }

    /// Rebuild an environment from `snapshot()` bytes.
    #[staticmethod]
    fn restore(data: &[u8]) -> PyResult<Self> {
        let inner = OkeyEnv::restore(data).map_err(to_py_err)?;
        Ok(Self { inner })
    }

    fn __repr__(&self) -> String {
        format!(
            "OkeyEnv(deck={}, hand={}, done={})",
            self.inner.deck_len(),
            self.inner.hand().occupied_count(),
            self.inner.is_done()
        )
    }
}
