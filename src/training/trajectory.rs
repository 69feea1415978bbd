//! Trajectory data structures for training.
//!
//! A trajectory records one episode as a sequence of transitions. The
//! experience buffer keeps the most recent transitions for replay.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::core::GameRng;
use crate::nn::EncodedState;
use crate::rules::EpisodeEnd;

/// One `(state, action, reward, next_state, done)` tuple.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    /// Observation the action was chosen from.
    pub state: EncodedState,

    /// Action index taken.
    pub action: usize,

    pub reward: f32,

    /// Observation after the step.
    pub next_state: EncodedState,

    pub done: bool,
}

/// A complete episode.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Trajectory {
    /// Transitions in order.
    pub transitions: Vec<Transition>,

    /// Why the episode ended. `None` if the runner hit its step cap first.
    pub end: Option<EpisodeEnd>,

    /// Position of the episode in its run.
    pub episode: usize,
}

impl Trajectory {
    /// Create a new trajectory.
    pub fn new(episode: usize) -> Self {
        Self {
            transitions: Vec::new(),
            end: None,
            episode,
        }
    }

    /// Add a transition to the trajectory.
    pub fn push(&mut self, transition: Transition) {
        self.transitions.push(transition);
    }

    /// Get the number of transitions.
    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    /// Check if trajectory is empty.
    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Sum of rewards over the episode.
    pub fn total_reward(&self) -> f32 {
        self.transitions.iter().map(|t| t.reward).sum()
    }

    /// True if the episode reached a terminal state.
    pub fn is_complete(&self) -> bool {
        self.end.is_some()
    }

    /// Action indices taken, in order.
    pub fn actions(&self) -> impl Iterator<Item = usize> + '_ {
        self.transitions.iter().map(|t| t.action)
    }
}

/// Bounded replay memory of transitions.
///
/// Uses a FIFO strategy: when full, the oldest transitions are removed.
#[derive(Clone, Debug)]
pub struct ExperienceBuffer {
    transitions: VecDeque<Transition>,
    max_transitions: usize,
}

impl ExperienceBuffer {
    /// Create a new experience buffer.
    pub fn new(max_transitions: usize) -> Self {
        Self {
            transitions: VecDeque::with_capacity(max_transitions),
            max_transitions,
        }
    }

    /// Add a transition to the buffer.
    ///
    /// If the buffer is full, the oldest transition is removed.
    pub fn push(&mut self, transition: Transition) {
        if self.max_transitions == 0 {
            return;
        }
        if self.transitions.len() >= self.max_transitions {
            self.transitions.pop_front();
        }
        self.transitions.push_back(transition);
    }

    /// Add every transition of `trajectory`.
    pub fn extend(&mut self, trajectory: Trajectory) {
        for transition in trajectory.transitions {
            self.push(transition);
        }
    }

    /// Get the number of transitions in the buffer.
    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    /// Check if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Get the maximum capacity.
    pub fn capacity(&self) -> usize {
        self.max_transitions
    }

    /// Clear all transitions.
    pub fn clear(&mut self) {
        self.transitions.clear();
    }

    /// Get an iterator over transitions, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Transition> {
        self.transitions.iter()
    }

    /// Sample up to `batch_size` distinct transitions.
    ///
    /// Uses the provided RNG seed for reproducibility.
    pub fn sample_batch(&self, batch_size: usize, seed: u64) -> Vec<Transition> {
        let n = self.transitions.len();
        if n == 0 || batch_size == 0 {
            return vec![];
        }

        let mut rng = GameRng::new(seed);

        // Partial Fisher-Yates over the first `limit` positions
        let mut indices: Vec<usize> = (0..n).collect();
        let limit = batch_size.min(n);
        for i in 0..limit {
            let j = i + rng.below(n - i);
            indices.swap(i, j);
        }

        indices[..limit]
            .iter()
            .filter_map(|&i| self.transitions.get(i).cloned())
            .collect()
    }
}

impl Default for ExperienceBuffer {
    fn default() -> Self {
        Self::new(10000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_transition(action: usize, reward: f32) -> Transition {
        Transition {
            state: EncodedState::zeros(vec![4]),
            action,
            reward,
            next_state: EncodedState::zeros(vec![4]),
            done: false,
        }
    }

    #[test]
    fn test_trajectory_creation() {
        let mut traj = Trajectory::new(42);
        assert!(traj.is_empty());
        assert!(!traj.is_complete());

        traj.push(make_transition(8, 50.0));
        traj.push(make_transition(20, 0.0));

        assert_eq!(traj.len(), 2);
        assert_eq!(traj.total_reward(), 50.0);
        assert_eq!(traj.actions().collect::<Vec<_>>(), vec![8, 20]);
    }

    #[test]
    fn test_experience_buffer_capacity() {
        let mut buffer = ExperienceBuffer::new(3);
        for action in 0..4 {
            buffer.push(make_transition(action, 0.0));
        }

        assert_eq!(buffer.len(), 3);
        let actions: Vec<_> = buffer.iter().map(|t| t.action).collect();
        assert_eq!(actions, vec![1, 2, 3]);
    }

    #[test]
    fn test_experience_buffer_zero_capacity() {
        let mut buffer = ExperienceBuffer::new(0);
        buffer.push(make_transition(0, 0.0));
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_experience_buffer_extend() {
        let mut traj = Trajectory::new(1);
        traj.push(make_transition(0, 20.0));
        traj.push(make_transition(21, 0.0));

        let mut buffer = ExperienceBuffer::default();
        buffer.extend(traj);
        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.capacity(), 10000);
    }

    #[test]
    fn test_sample_batch() {
        let mut buffer = ExperienceBuffer::new(100);
        for action in 0..20 {
            buffer.push(make_transition(action, action as f32));
        }

        let batch = buffer.sample_batch(5, 42);
        assert_eq!(batch.len(), 5);

        let mut actions: Vec<_> = batch.iter().map(|t| t.action).collect();
        actions.sort_unstable();
        actions.dedup();
        assert_eq!(actions.len(), 5, "samples are distinct");

        let again = buffer.sample_batch(5, 42);
        assert_eq!(batch, again);
    }

    #[test]
    fn test_sample_batch_larger_than_buffer() {
        let mut buffer = ExperienceBuffer::new(10);
        buffer.push(make_transition(0, 0.0));
        buffer.push(make_transition(1, 0.0));

        assert_eq!(buffer.sample_batch(8, 0).len(), 2);
        assert!(ExperienceBuffer::new(4).sample_batch(8, 0).is_empty());
    }
}
