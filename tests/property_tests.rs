#[cfg(test)]
mod property_tests {
    use proptest::prelude::*;
    use deepq::agent::policy::{greedy, EpsilonSchedule};
    use deepq::config::{BrainConfig, BrainConfigBuilder};
    use deepq::layers::LayerDef;
    use deepq::replay_buffer::{Experience, ReplayMemory};
    use ndarray::{array, Array1};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    // Strategy for a probability vector with no zero-mass corner cases
    fn distribution_strategy() -> impl Strategy<Value = Vec<f32>> {
        prop::collection::vec(0.05f32..1.0, 2..=6).prop_map(|weights| {
            let total: f32 = weights.iter().sum();
            weights.into_iter().map(|w| w / total).collect()
        })
    }

    fn schedule_strategy() -> impl Strategy<Value = EpsilonSchedule> {
        (0usize..500, 1usize..5000, 0.0f32..0.5, 0.0f32..1.0).prop_map(
            |(burn_in, span, epsilon_min, epsilon_test_time)| EpsilonSchedule {
                learning_steps_burn_in: burn_in,
                learning_steps_total: burn_in + span,
                epsilon_min,
                epsilon_test_time,
            },
        )
    }

    proptest! {
        #[test]
        fn test_encoded_length_matches_default_stack(
            states in 1usize..20,
            actions in 1usize..10,
            window in 2usize..8,
        ) {
            let config = BrainConfig { temporal_window: window, ..BrainConfig::new(states, actions) };
            let expected = states * window + actions * window + states;

            prop_assert_eq!(config.encoded_input_length(), expected);
            prop_assert_eq!(LayerDef::input_width(&config.layer_definitions()), Some(expected));
            prop_assert_eq!(LayerDef::output_width(&config.layer_definitions()), Some(actions));
            prop_assert!(config.validate().is_ok());
        }

        #[test]
        fn test_epsilon_is_bounded_and_non_increasing(
            schedule in schedule_strategy(),
            age in 0usize..10_000,
        ) {
            let now = schedule.epsilon(age, true);
            let later = schedule.epsilon(age + 1, true);

            prop_assert!(now <= 1.0);
            prop_assert!(now >= schedule.epsilon_min);
            prop_assert!(later <= now);
            prop_assert_eq!(schedule.epsilon(age, false), schedule.epsilon_test_time);
        }

        #[test]
        fn test_epsilon_endpoints(schedule in schedule_strategy()) {
            prop_assert_eq!(schedule.epsilon(0, true), 1.0);
            prop_assert_eq!(schedule.epsilon(schedule.learning_steps_burn_in, true), 1.0);
            prop_assert_eq!(
                schedule.epsilon(schedule.learning_steps_total, true),
                schedule.epsilon_min
            );
        }

        #[test]
        fn test_replay_memory_length(capacity in 1usize..50, inserts in 0usize..200, seed in any::<u64>()) {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut memory = ReplayMemory::new(capacity);
            for i in 0..inserts {
                let experience = Experience::new(array![i as f32], 0, 0.0, array![0.0]);
                memory.add(experience, &mut rng);
            }

            prop_assert_eq!(memory.len(), inserts.min(capacity));
            prop_assert!(memory.len() <= memory.capacity());
        }

        #[test]
        fn test_normalized_distribution_accepted(distribution in distribution_strategy()) {
            let actions = distribution.len();
            let accepted = BrainConfigBuilder::new(2, actions)
                .random_action_distribution(&distribution)
                .build();
            prop_assert!(accepted.is_ok());

            for scale in [0.9f32, 1.1] {
                let scaled: Vec<f32> = distribution.iter().map(|p| p * scale).collect();
                let rejected = BrainConfigBuilder::new(2, actions)
                    .random_action_distribution(&scaled)
                    .build();
                prop_assert!(rejected.is_err());
            }
        }

        #[test]
        fn test_greedy_returns_first_maximum(values in prop::collection::vec(-100.0f32..100.0, 1..20)) {
            let best = greedy(Array1::from_vec(values.clone()).view()).unwrap();
            let max = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
            let first = values.iter().position(|&v| v == max).unwrap();

            prop_assert_eq!(best.value, max);
            prop_assert_eq!(best.action, first);
        }
    }
}
