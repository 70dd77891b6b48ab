use std::collections::VecDeque;
use serde::{Serialize, Deserialize};

/// Moving average over the last `size` values. The average is withheld until
/// at least `min_size` values were recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmoothedWindow {
    values: VecDeque<f32>,
    size: usize,
    min_size: usize,
    sum: f64,
}

impl SmoothedWindow {
    pub fn new(size: usize, min_size: usize) -> Self {
        SmoothedWindow {
            values: VecDeque::with_capacity(size),
            size,
            min_size,
            sum: 0.0,
        }
    }

    /// Record a value, dropping the oldest once `size` is reached
    pub fn add(&mut self, value: f32) {
        if self.size == 0 {
            return;
        }
        if self.values.len() >= self.size {
            if let Some(oldest) = self.values.pop_front() {
                self.sum -= oldest as f64;
            }
        }
        self.values.push_back(value);
        self.sum += value as f64;
    }

    /// Mean of the retained values
    pub fn average(&self) -> Option<f32> {
        if self.is_empty() || self.len() < self.min_size {
            return None;
        }
        Some((self.sum / self.len() as f64) as f32)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Default for SmoothedWindow {
    fn default() -> Self {
        Self::new(1000, 10)
    }
}
