use ndarray::Array1;
use rand::Rng;
use serde::{Serialize, Deserialize};

/// One observed transition, in encoded network-input space.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub state0: Array1<f32>,
    pub action0: usize,
    pub reward0: f32,
    pub state1: Array1<f32>,
}

impl Experience {
    pub fn new(state0: Array1<f32>, action0: usize, reward0: f32, state1: Array1<f32>) -> Self {
        Experience { state0, action0, reward0, state1 }
    }
}

/// Bounded replay memory.
///
/// Appends until `capacity` is reached; after that every insertion overwrites
/// a uniformly random slot, so the retained set is a random subset of the
/// whole history rather than its most recent tail.
#[derive(Clone, Debug)]
pub struct ReplayMemory {
    buffer: Vec<Experience>,
    capacity: usize,
}

impl ReplayMemory {
    pub fn new(capacity: usize) -> Self {
        ReplayMemory {
            buffer: Vec::with_capacity(capacity.min(1 << 16)),
            capacity,
        }
    }

    /// Insert an experience. Once full, a uniformly random slot is
    /// overwritten and its index returned.
    pub fn add<R: Rng + ?Sized>(&mut self, experience: Experience, rng: &mut R) -> Option<usize> {
        if self.capacity() == 0 {
            return None;
        }
        if !self.is_full() {
            self.buffer.push(experience);
            return None;
        }
        let slot = rng.gen_range(0..self.capacity());
        self.buffer[slot] = experience;
        Some(slot)
    }

    /// Draw one experience uniformly at random, or `None` when empty.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Experience> {
        if self.is_empty() {
            return None;
        }
        self.get(rng.gen_range(0..self.len()))
    }

    pub fn get(&self, index: usize) -> Option<&Experience> {
        self.buffer.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Experience> {
        self.buffer.iter()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.buffer.len() >= self.capacity
    }
}
