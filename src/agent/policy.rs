//! Action selection: random sampling, greedy argmax and the annealed
//! exploration rate that arbitrates between them.

use ndarray::ArrayView1;
use rand::Rng;
use serde::{Serialize, Deserialize};

/// The greedy choice for a state and its estimated value
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActionValue {
    pub action: usize,
    pub value: f32,
}

/// Argmax over action values. Ties go to the lowest index.
///
/// Returns `None` for an empty slice.
pub fn greedy(values: ArrayView1<f32>) -> Option<ActionValue> {
    let mut iter = values.iter().copied().enumerate();
    let (_, first) = iter.next()?;
    let mut best = ActionValue { action: 0, value: first };
    for (action, value) in iter {
        if value > best.value {
            best = ActionValue { action, value };
        }
    }
    Some(best)
}

/// Draw a random action in `[0, num_actions)`.
///
/// Without a distribution the draw is uniform. With one, a uniform `p` in
/// `[0, 1)` is compared against the running cumulative probability and the
/// first index whose cumulative probability exceeds `p` is returned. Rounding
/// can leave the total just under `p`; the last index is returned then.
pub fn random_action<R: Rng + ?Sized>(
    rng: &mut R,
    num_actions: usize,
    distribution: Option<&[f32]>,
) -> usize {
    let last = num_actions.saturating_sub(1);
    match distribution {
        None => {
            if num_actions == 0 {
                0
            } else {
                rng.gen_range(0..num_actions)
            }
        }
        Some(probabilities) => {
            let p: f32 = rng.gen();
            let mut cumulative = 0.0;
            for (i, &probability) in probabilities.iter().take(num_actions).enumerate() {
                cumulative += probability;
                if p < cumulative {
                    return i;
                }
            }
            last
        }
    }
}

/// Linear exploration schedule keyed on the brain's learning age.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EpsilonSchedule {
    pub learning_steps_burn_in: usize,
    pub learning_steps_total: usize,
    pub epsilon_min: f32,
    pub epsilon_test_time: f32,
}

impl EpsilonSchedule {
    /// `1 - (age - burn_in) / (total - burn_in)` clamped to
    /// `[epsilon_min, 1]` while learning, `epsilon_test_time` otherwise.
    pub fn epsilon(&self, age: usize, learning: bool) -> f32 {
        if !learning {
            return self.epsilon_test_time;
        }
        let burn_in = self.learning_steps_burn_in as f64;
        let span = self.learning_steps_total as f64 - burn_in;
        let raw = if span > 0.0 {
            1.0 - (age as f64 - burn_in) / span
        } else if (age as f64) < burn_in {
            1.0
        } else {
            0.0
        };
        (raw as f32).max(self.epsilon_min).min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_greedy_first_maximum_wins() {
        let values = array![5.0, 5.0, 3.0];
        assert_eq!(greedy(values.view()), Some(ActionValue { action: 0, value: 5.0 }));

        let values = array![1.0, 7.0, 7.0];
        assert_eq!(greedy(values.view()).map(|av| av.action), Some(1));

        let empty = ndarray::Array1::<f32>::zeros(0);
        assert_eq!(greedy(empty.view()), None);
    }

    #[test]
    fn test_uniform_random_action_in_range() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut seen = [false; 4];
        for _ in 0..500 {
            let action = random_action(&mut rng, 4, None);
            assert!(action < 4);
            seen[action] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_distribution_biases_random_action() {
        let mut rng = StdRng::seed_from_u64(11);
        let distribution = [0.9, 0.1, 0.0];
        let mut counts = [0usize; 3];
        for _ in 0..10_000 {
            counts[random_action(&mut rng, 3, Some(&distribution))] += 1;
        }
        assert_eq!(counts[2], 0);
        assert!(counts[0] > 8_500 && counts[0] < 9_500, "counts: {:?}", counts);
    }

    #[test]
    fn test_distribution_rounding_falls_back_to_last() {
        let mut rng = StdRng::seed_from_u64(5);
        // Sums to well under 1, so most draws exhaust the loop.
        let distribution = [0.0, 0.0];
        for _ in 0..100 {
            assert_eq!(random_action(&mut rng, 2, Some(&distribution)), 1);
        }
    }

    #[test]
    fn test_zero_probability_action_never_drawn() {
        let mut rng = StdRng::seed_from_u64(21);
        let distribution = [0.0, 1.0];
        for _ in 0..10_000 {
            assert_eq!(random_action(&mut rng, 2, Some(&distribution)), 1);
        }

        // A draw of exactly 0.0 must skip a leading zero-mass action too.
        let mut zeros = rand::rngs::mock::StepRng::new(0, 0);
        assert_eq!(random_action(&mut zeros, 3, Some(&[0.0, 0.5, 0.5])), 1);
    }

    #[test]
    fn test_epsilon_schedule_endpoints() {
        let schedule = EpsilonSchedule {
            learning_steps_burn_in: 100,
            learning_steps_total: 1100,
            epsilon_min: 0.05,
            epsilon_test_time: 0.01,
        };
        assert_eq!(schedule.epsilon(0, true), 1.0);
        assert_eq!(schedule.epsilon(100, true), 1.0);
        assert!((schedule.epsilon(600, true) - 0.5).abs() < 1e-6);
        assert_eq!(schedule.epsilon(1100, true), 0.05);
        assert_eq!(schedule.epsilon(50_000, true), 0.05);
        assert_eq!(schedule.epsilon(600, false), 0.01);
    }
}
