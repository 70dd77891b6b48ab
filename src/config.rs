//! # Brain Configuration
//!
//! [`BrainConfig`] gathers every hyperparameter of a [`Brain`](crate::agent::Brain)
//! and validates them before anything is constructed. It can be written by
//! hand, assembled with [`BrainConfigBuilder`], or read from JSON, in which
//! case only `number_of_states` and `number_of_actions` are required:
//!
//! ```
//! use deepq::config::BrainConfig;
//!
//! let config = BrainConfig::from_json_str(r#"{
//!     "number_of_states": 4,
//!     "number_of_actions": 2,
//!     "temporal_window": 3,
//!     "trainer": { "learning_rate": 0.001, "batch_size": 32 }
//! }"#).unwrap();
//!
//! assert_eq!(config.encoded_input_length(), 4 * 3 + 2 * 3 + 4);
//! assert_eq!(config.trainer.momentum, 0.0);
//! ```

use std::borrow::Cow;
use std::path::Path;
use serde::{Serialize, Deserialize};

use crate::agent::policy::EpsilonSchedule;
use crate::error::{DeepQError, Result};
use crate::layers::LayerDef;
use crate::optimizer::TrainerOptions;

/// Tolerance on the sum of `random_action_distribution`
pub const DISTRIBUTION_TOLERANCE: f32 = 1e-4;

/// Hidden layer width of the architecture derived when no layer
/// definitions are given
pub const DEFAULT_HIDDEN_NEURONS: usize = 50;

fn default_temporal_window() -> usize {
    2
}

fn default_experience_size() -> usize {
    30_000
}

fn default_gamma() -> f32 {
    0.8
}

fn default_learning_steps_total() -> usize {
    100_000
}

fn default_learning_steps_burn_in() -> usize {
    3_000
}

fn default_epsilon_min() -> f32 {
    0.05
}

fn default_epsilon_test_time() -> f32 {
    0.01
}

/// Hyperparameters of a brain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrainConfig {
    /// Length of each raw observation
    pub number_of_states: usize,
    /// Number of discrete actions
    pub number_of_actions: usize,
    /// Number of past (observation, action) pairs fed to the network; at least 2
    #[serde(default = "default_temporal_window")]
    pub temporal_window: usize,
    /// Replay memory capacity
    #[serde(default = "default_experience_size")]
    pub experience_size: usize,
    /// Experiences required before training starts; derived from
    /// `experience_size` when unset
    #[serde(default)]
    pub start_learn_threshold: Option<usize>,
    /// Discount factor in `[0, 1]`
    #[serde(default = "default_gamma")]
    pub gamma: f32,
    /// Learning age at which epsilon reaches `epsilon_min`
    #[serde(default = "default_learning_steps_total")]
    pub learning_steps_total: usize,
    /// Learning age before which actions are fully random
    #[serde(default = "default_learning_steps_burn_in")]
    pub learning_steps_burn_in: usize,
    #[serde(default = "default_epsilon_min")]
    pub epsilon_min: f32,
    /// Exploration rate used while learning is switched off
    #[serde(default = "default_epsilon_test_time")]
    pub epsilon_test_time: f32,
    /// Bias for random actions; must sum to 1
    #[serde(default)]
    pub random_action_distribution: Option<Vec<f32>>,
    /// Value network architecture; a two-hidden-layer ReLU network is
    /// derived when unset
    #[serde(default)]
    pub layer_definitions: Option<Vec<LayerDef>>,
    #[serde(default)]
    pub trainer: TrainerOptions,
    /// Seed for the brain's random source; OS entropy when unset
    #[serde(default)]
    pub seed: Option<u64>,
}

impl BrainConfig {
    /// A configuration with every optional field at its default
    pub fn new(number_of_states: usize, number_of_actions: usize) -> Self {
        BrainConfig {
            number_of_states,
            number_of_actions,
            temporal_window: default_temporal_window(),
            experience_size: default_experience_size(),
            start_learn_threshold: None,
            gamma: default_gamma(),
            learning_steps_total: default_learning_steps_total(),
            learning_steps_burn_in: default_learning_steps_burn_in(),
            epsilon_min: default_epsilon_min(),
            epsilon_test_time: default_epsilon_test_time(),
            random_action_distribution: None,
            layer_definitions: None,
            trainer: TrainerOptions::default(),
            seed: None,
        }
    }

    /// Length of the vector fed to the approximator: the current observation
    /// plus `temporal_window` past observations and one-hot actions.
    pub fn encoded_input_length(&self) -> usize {
        self.number_of_states * self.temporal_window
            + self.number_of_actions * self.temporal_window
            + self.number_of_states
    }

    pub fn window_size(&self) -> usize {
        self.temporal_window.max(2)
    }

    /// `start_learn_threshold`, or `floor(min(0.1 * experience_size, 1000))`
    pub fn start_learn_threshold(&self) -> usize {
        self.start_learn_threshold
            .unwrap_or_else(|| (self.experience_size / 10).min(1000))
    }

    /// The configured layer definitions, or the derived default stack
    pub fn layer_definitions(&self) -> Cow<'_, [LayerDef]> {
        match &self.layer_definitions {
            Some(defs) => Cow::Borrowed(defs.as_slice()),
            None => Cow::Owned(LayerDef::default_stack(
                self.encoded_input_length(),
                self.number_of_actions,
                DEFAULT_HIDDEN_NEURONS,
            )),
        }
    }

    pub fn epsilon_schedule(&self) -> EpsilonSchedule {
        EpsilonSchedule {
            learning_steps_burn_in: self.learning_steps_burn_in,
            learning_steps_total: self.learning_steps_total,
            epsilon_min: self.epsilon_min,
            epsilon_test_time: self.epsilon_test_time,
        }
    }

    /// Check every field and the layer definitions against the derived
    /// input and output widths.
    pub fn validate(&self) -> Result<()> {
        if self.number_of_states == 0 {
            return Err(DeepQError::invalid_parameter("number_of_states", "must be at least 1"));
        }
        if self.number_of_actions == 0 {
            return Err(DeepQError::invalid_parameter("number_of_actions", "must be at least 1"));
        }
        if self.temporal_window < 2 {
            return Err(DeepQError::invalid_parameter(
                "temporal_window",
                "must be at least 2, even higher provides more context",
            ));
        }
        if self.experience_size == 0 {
            return Err(DeepQError::invalid_parameter("experience_size", "must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.gamma) {
            return Err(DeepQError::invalid_parameter("gamma", "must be in [0, 1]"));
        }
        if self.learning_steps_total <= self.learning_steps_burn_in {
            return Err(DeepQError::invalid_parameter(
                "learning_steps_total",
                "must be greater than learning_steps_burn_in",
            ));
        }
        if !(0.0..=1.0).contains(&self.epsilon_min) {
            return Err(DeepQError::invalid_parameter("epsilon_min", "must be in [0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.epsilon_test_time) {
            return Err(DeepQError::invalid_parameter("epsilon_test_time", "must be in [0, 1]"));
        }
        if let Some(distribution) = &self.random_action_distribution {
            validate_distribution(distribution, self.number_of_actions)?;
        }
        self.trainer.validate()?;
        self.validate_layer_definitions()
    }

    fn validate_layer_definitions(&self) -> Result<()> {
        let defs = self.layer_definitions();
        LayerDef::validate_stack(&defs)?;

        let expected_inputs = self.encoded_input_length();
        if LayerDef::input_width(&defs) != Some(expected_inputs) {
            return Err(DeepQError::InvalidParameter {
                name: "layer_definitions".to_string(),
                reason: format!(
                    "input width must be number_of_states * temporal_window + \
                     number_of_actions * temporal_window + number_of_states = {}, got {}",
                    expected_inputs,
                    defs[0].width()
                ),
            });
        }
        if LayerDef::output_width(&defs) != Some(self.number_of_actions) {
            return Err(DeepQError::InvalidParameter {
                name: "layer_definitions".to_string(),
                reason: format!(
                    "regression neurons must equal number_of_actions = {}, got {}",
                    self.number_of_actions,
                    defs[defs.len() - 1].width()
                ),
            });
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: BrainConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json_str(&data)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn validate_distribution(distribution: &[f32], number_of_actions: usize) -> Result<()> {
    if distribution.len() != number_of_actions {
        return Err(DeepQError::InvalidParameter {
            name: "random_action_distribution".to_string(),
            reason: format!(
                "length {} must equal number_of_actions {}",
                distribution.len(),
                number_of_actions
            ),
        });
    }
    if distribution.iter().any(|&p| !(p >= 0.0) || !p.is_finite()) {
        return Err(DeepQError::invalid_parameter(
            "random_action_distribution",
            "probabilities must be finite and non-negative",
        ));
    }
    let sum: f32 = distribution.iter().sum();
    if (sum - 1.0).abs() > DISTRIBUTION_TOLERANCE {
        return Err(DeepQError::InvalidParameter {
            name: "random_action_distribution".to_string(),
            reason: format!("must sum to 1, sums to {}", sum),
        });
    }
    Ok(())
}

/// Builder for [`BrainConfig`]
pub struct BrainConfigBuilder {
    config: BrainConfig,
}

impl BrainConfigBuilder {
    pub fn new(number_of_states: usize, number_of_actions: usize) -> Self {
        BrainConfigBuilder {
            config: BrainConfig::new(number_of_states, number_of_actions),
        }
    }

    pub fn temporal_window(mut self, temporal_window: usize) -> Self {
        self.config.temporal_window = temporal_window;
        self
    }

    pub fn experience_size(mut self, experience_size: usize) -> Self {
        self.config.experience_size = experience_size;
        self
    }

    pub fn start_learn_threshold(mut self, threshold: usize) -> Self {
        self.config.start_learn_threshold = Some(threshold);
        self
    }

    pub fn gamma(mut self, gamma: f32) -> Self {
        self.config.gamma = gamma;
        self
    }

    pub fn learning_steps(mut self, burn_in: usize, total: usize) -> Self {
        self.config.learning_steps_burn_in = burn_in;
        self.config.learning_steps_total = total;
        self
    }

    pub fn epsilon_min(mut self, epsilon_min: f32) -> Self {
        self.config.epsilon_min = epsilon_min;
        self
    }

    pub fn epsilon_test_time(mut self, epsilon_test_time: f32) -> Self {
        self.config.epsilon_test_time = epsilon_test_time;
        self
    }

    pub fn random_action_distribution(mut self, distribution: &[f32]) -> Self {
        self.config.random_action_distribution = Some(distribution.to_vec());
        self
    }

    pub fn layer_definitions(mut self, defs: Vec<LayerDef>) -> Self {
        self.config.layer_definitions = Some(defs);
        self
    }

    /// Derive an input → hidden... → regression stack from hidden layer widths
    pub fn hidden_layers(mut self, widths: &[usize], activation: crate::activations::Activation) -> Self {
        let mut defs = vec![LayerDef::input(self.config.encoded_input_length())];
        defs.extend(widths.iter().map(|&w| LayerDef::fc(w, activation)));
        defs.push(LayerDef::regression(self.config.number_of_actions));
        self.config.layer_definitions = Some(defs);
        self
    }

    pub fn trainer(mut self, trainer: TrainerOptions) -> Self {
        self.config.trainer = trainer;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    pub fn build(self) -> Result<BrainConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
