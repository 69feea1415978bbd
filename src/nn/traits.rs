//! Observation tensor and the action-scoring interface.

use serde::{Deserialize, Serialize};

/// A flat `f32` observation together with its logical shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EncodedState {
    /// Row-major values.
    pub tensor: Vec<f32>,
    pub shape: Vec<usize>,
}

impl EncodedState {
    /// Wrap `tensor`, or `None` if its length disagrees with `shape`.
    #[must_use]
    pub fn from_tensor(tensor: Vec<f32>, shape: Vec<usize>) -> Option<Self> {
        (tensor.len() == shape.iter().product::<usize>()).then_some(Self { tensor, shape })
    }

    /// All-zero observation of the given shape.
    #[must_use]
    pub fn zeros(shape: Vec<usize>) -> Self {
        let len = shape.iter().product();
        Self {
            tensor: vec![0.0; len],
            shape,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tensor.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tensor.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<f32> {
        self.tensor.get(index).copied()
    }

    /// Write one entry. Writes past the end are dropped.
    pub fn set(&mut self, index: usize, value: f32) {
        if let Some(entry) = self.tensor.get_mut(index) {
            *entry = value;
        }
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.tensor
    }
}

/// Scores every action index for an observation.
///
/// The returned vector is indexed by action index. Scores may be
/// probabilities, logits or Q-values; agents only compare them.
pub trait PolicyNetwork: Send + Sync {
    fn predict(&self, encoded: &EncodedState) -> Vec<f32>;
}

/// Equal score for every action.
#[derive(Clone, Copy, Debug, Default)]
pub struct UniformPolicy {
    actions: usize,
}

impl UniformPolicy {
    #[must_use]
    pub fn new(actions: usize) -> Self {
        Self { actions }
    }
}

impl PolicyNetwork for UniformPolicy {
    fn predict(&self, _encoded: &EncodedState) -> Vec<f32> {
        match self.actions {
            0 => Vec::new(),
            n => vec![1.0 / n as f32; n],
        }
    }
}

/// The legal index with the highest score. Ties go to the lowest index;
/// indices without a score are skipped.
#[must_use]
pub fn masked_argmax(scores: &[f32], legal: &[usize]) -> Option<usize> {
    legal
        .iter()
        .filter_map(|&index| scores.get(index).map(|&score| (index, score)))
        .fold(None, |best: Option<(usize, f32)>, (index, score)| match best {
            Some((_, top)) if top >= score => best,
            _ => Some((index, score)),
        })
        .map(|(index, _)| index)
}
