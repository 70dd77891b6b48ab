use log::{debug, info, trace};
use ndarray::{Array1, ArrayView1};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::agent::policy::{self, ActionValue, EpsilonSchedule};
use crate::agent::traits::Approximator;
use crate::agent::window::RollingWindow;
use crate::config::BrainConfig;
use crate::error::{DeepQError, Result};
use crate::loss::RegressionTarget;
use crate::metrics::{BrainStats, SmoothedWindow};
use crate::network::ValueNetwork;
use crate::replay_buffer::{Experience, ReplayMemory};

/// Size and minimum fill of the smoothed reward and loss windows
const STATS_WINDOW: (usize, usize) = (1000, 10);

/// Online Q-learning agent with experience replay.
///
/// Each environment tick the host calls [`Brain::step_forward`] with the
/// current observation, executes the returned action, then reports the
/// resulting reward through [`Brain::step_backward`]. While learning, every
/// backward step stores the latest transition in replay memory and, once
/// enough transitions exist, trains the approximator on a random mini-batch.
///
/// The approximator sees an *encoded input*: the current observation
/// followed, newest first, by `temporal_window` past observations each paired
/// with a one-hot encoding of the action taken, scaled by
/// `number_of_states`.
///
/// # Example
///
/// ```rust
/// use deepq::agent::Brain;
/// use deepq::config::BrainConfigBuilder;
/// use ndarray::array;
///
/// let config = BrainConfigBuilder::new(2, 3)
///     .experience_size(500)
///     .seed(7)
///     .build()
///     .unwrap();
/// let mut brain = Brain::new(config).unwrap();
///
/// for step in 0..20 {
///     let observation = array![step as f32 * 0.1, 1.0];
///     let action = brain.step_forward(observation.view()).unwrap();
///     let reward = if action == 1 { 1.0 } else { 0.0 };
///     brain.step_backward(reward).unwrap();
/// }
///
/// assert_eq!(brain.age(), 20);
/// assert_eq!(brain.experience_count(), 17);
/// ```
pub struct Brain<A = ValueNetwork, R = StdRng> {
    config: BrainConfig,
    approximator: A,
    rng: R,
    schedule: EpsilonSchedule,
    experience: ReplayMemory,

    state_window: RollingWindow<Array1<f32>>,
    action_window: RollingWindow<usize>,
    reward_window: RollingWindow<f32>,
    net_window: RollingWindow<Array1<f32>>,

    age: usize,
    forward_passes: usize,
    epsilon: f32,
    latest_reward: f32,
    learning: bool,

    average_reward_window: SmoothedWindow,
    average_loss_window: SmoothedWindow,
}

impl Brain<ValueNetwork, StdRng> {
    /// Validate `config` and build a brain around a freshly initialised
    /// [`ValueNetwork`].
    ///
    /// The random source is seeded from `config.seed`, or from OS entropy
    /// when no seed is set.
    pub fn new(config: BrainConfig) -> Result<Self> {
        config.validate()?;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let network = ValueNetwork::from_layer_defs(&config.layer_definitions(), config.trainer, &mut rng)?;
        Self::with_approximator(config, network, rng)
    }
}

impl<A: Approximator, R: Rng> Brain<A, R> {
    /// Build a brain around any approximator and random source.
    ///
    /// Fails if `config` is invalid or the approximator's declared widths
    /// disagree with the encoded input length and action count.
    pub fn with_approximator(config: BrainConfig, approximator: A, rng: R) -> Result<Self> {
        config.validate()?;

        let net_inputs = config.encoded_input_length();
        if approximator.input_width() != net_inputs {
            return Err(DeepQError::dimension_mismatch(
                format!("approximator input width {}", net_inputs),
                approximator.input_width().to_string(),
            ));
        }
        if approximator.output_width() != config.number_of_actions {
            return Err(DeepQError::dimension_mismatch(
                format!("approximator output width {}", config.number_of_actions),
                approximator.output_width().to_string(),
            ));
        }

        let window_size = config.window_size();
        let (stats_size, stats_min) = STATS_WINDOW;

        info!(
            "brain created: {} states, {} actions, temporal window {}, {} network inputs, replay capacity {}",
            config.number_of_states,
            config.number_of_actions,
            config.temporal_window,
            net_inputs,
            config.experience_size
        );

        Ok(Brain {
            schedule: config.epsilon_schedule(),
            experience: ReplayMemory::new(config.experience_size),
            state_window: RollingWindow::new(window_size),
            action_window: RollingWindow::new(window_size),
            reward_window: RollingWindow::new(window_size),
            net_window: RollingWindow::new(window_size),
            age: 0,
            forward_passes: 0,
            epsilon: 1.0,
            latest_reward: 0.0,
            learning: true,
            average_reward_window: SmoothedWindow::new(stats_size, stats_min),
            average_loss_window: SmoothedWindow::new(stats_size, stats_min),
            config,
            approximator,
            rng,
        })
    }

    /// A random action, biased by `random_action_distribution` if one is set.
    pub fn random_action(&mut self) -> usize {
        policy::random_action(
            &mut self.rng,
            self.config.number_of_actions,
            self.config.random_action_distribution.as_deref(),
        )
    }

    /// Greedy action for an encoded input and its estimated value.
    pub fn policy(&mut self, input: ArrayView1<f32>) -> Result<ActionValue> {
        let net_inputs = self.config.encoded_input_length();
        if input.len() != net_inputs {
            return Err(DeepQError::dimension_mismatch(
                net_inputs.to_string(),
                input.len().to_string(),
            ));
        }
        let values = self.approximator.forward(input);
        greedy_checked(values.view(), self.config.number_of_actions)
    }

    /// Encode `observation` together with the last `temporal_window`
    /// observations and actions. `None` while that history is incomplete.
    pub fn encode_input(&self, observation: ArrayView1<f32>) -> Option<Array1<f32>> {
        let states = self.config.number_of_states;
        let actions = self.config.number_of_actions;
        let mut input = Vec::with_capacity(self.config.encoded_input_length());
        input.extend(observation.iter().copied());

        for k in 0..self.config.temporal_window {
            let state = self.state_window.back(k)?;
            let action = *self.action_window.back(k)?;
            input.extend(state.iter().copied());
            input.extend((0..actions).map(|q| if q == action { states as f32 } else { 0.0 }));
        }

        Some(Array1::from_vec(input))
    }

    /// Choose an action for `observation`.
    ///
    /// For the first `temporal_window` calls there is not enough history to
    /// encode an input and the action is random. Afterwards the action is
    /// random with probability epsilon and greedy otherwise.
    pub fn step_forward(&mut self, observation: ArrayView1<f32>) -> Result<usize> {
        if observation.len() != self.config.number_of_states {
            return Err(DeepQError::dimension_mismatch(
                self.config.number_of_states.to_string(),
                observation.len().to_string(),
            ));
        }

        self.forward_passes += 1;

        let encoded = if self.forward_passes > self.config.temporal_window {
            self.encode_input(observation)
        } else {
            None
        };

        let action = match &encoded {
            Some(net_input) => {
                self.epsilon = self.schedule.epsilon(self.age, self.learning);
                let roll: f32 = self.rng.gen();
                if roll < self.epsilon {
                    self.random_action()
                } else {
                    self.policy(net_input.view())?.action
                }
            }
            None => self.random_action(),
        };

        self.net_window.push(encoded);
        self.state_window.push(Some(observation.to_owned()));
        self.action_window.push(Some(action));

        Ok(action)
    }

    /// Report the reward for the last action and, while learning, store the
    /// latest transition and train on replayed experience.
    ///
    /// An error from the approximator leaves the brain with its counters and
    /// windows already advanced; the learning run should be restarted.
    pub fn step_backward(&mut self, reward: f32) -> Result<()> {
        self.latest_reward = reward;
        self.average_reward_window.add(reward);
        self.reward_window.push(Some(reward));

        if !self.learning {
            return Ok(());
        }

        self.age += 1;

        if self.forward_passes > self.config.temporal_window + 1 {
            self.remember_latest_transition();
        }

        if self.experience.len() > self.config.start_learn_threshold() {
            self.learn_from_replay()?;
        }

        Ok(())
    }

    /// Store `(s_t, a_t, r_t, s_{t+1})` from the last two window slots.
    fn remember_latest_transition(&mut self) {
        let n = self.config.window_size();
        let transition = (
            self.net_window.get(n - 2),
            self.action_window.get(n - 2),
            self.reward_window.get(n - 2),
            self.net_window.get(n - 1),
        );

        let experience = match transition {
            (Some(state0), Some(&action0), Some(&reward0), Some(state1)) => {
                Experience::new(state0.clone(), action0, reward0, state1.clone())
            }
            _ => {
                debug!("window slots not populated at age {}, transition skipped", self.age);
                return;
            }
        };

        self.experience.add(experience, &mut self.rng);
        if self.experience.len() == self.config.start_learn_threshold() + 1 {
            debug!(
                "replay memory holds {} experiences, starting mini-batch updates",
                self.experience.len()
            );
        }
    }

    /// One mini-batch of TD updates, `target = r + gamma * max_a Q(s', a)`.
    fn learn_from_replay(&mut self) -> Result<()> {
        let batch_size = self.config.trainer.batch_size;
        let mut total_loss = 0.0;

        for _ in 0..batch_size {
            let Some(experience) = self.experience.sample(&mut self.rng) else {
                break;
            };
            let next_values = self.approximator.forward(experience.state1.view());
            let best = greedy_checked(next_values.view(), self.config.number_of_actions)?;
            let target = experience.reward0 + self.config.gamma * best.value;
            total_loss += self
                .approximator
                .train(experience.state0.view(), RegressionTarget::new(experience.action0, target))?;
        }

        let average_loss = total_loss / batch_size as f32;
        trace!("age {}: mini-batch loss {}", self.age, average_loss);
        self.average_loss_window.add(average_loss);
        Ok(())
    }

    pub fn learning(&self) -> bool {
        self.learning
    }

    /// Switch between learning and evaluation. While not learning, rewards
    /// are still recorded but nothing is stored or trained and epsilon is
    /// fixed at `epsilon_test_time`.
    pub fn set_learning(&mut self, learning: bool) {
        if self.learning != learning {
            info!("learning {}", if learning { "enabled" } else { "disabled" });
        }
        self.learning = learning;
    }

    pub fn age(&self) -> usize {
        self.age
    }

    pub fn forward_passes(&self) -> usize {
        self.forward_passes
    }

    /// Exploration rate used by the most recent non-bootstrap forward step
    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }

    pub fn experience_count(&self) -> usize {
        self.experience.len()
    }

    pub fn latest_reward(&self) -> f32 {
        self.latest_reward
    }

    /// Smoothed mini-batch loss, once enough batches were trained
    pub fn average_loss(&self) -> Option<f32> {
        self.average_loss_window.average()
    }

    /// Smoothed reward, once enough rewards were reported
    pub fn average_reward(&self) -> Option<f32> {
        self.average_reward_window.average()
    }

    pub fn config(&self) -> &BrainConfig {
        &self.config
    }

    pub fn approximator(&self) -> &A {
        &self.approximator
    }

    pub fn approximator_mut(&mut self) -> &mut A {
        &mut self.approximator
    }

    pub fn replay_memory(&self) -> &ReplayMemory {
        &self.experience
    }

    pub fn stats(&self) -> BrainStats {
        BrainStats {
            experience_count: self.experience.len(),
            epsilon: self.epsilon,
            age: self.age,
            forward_passes: self.forward_passes,
            average_loss: self.average_loss(),
            average_reward: self.average_reward(),
            latest_reward: self.latest_reward,
            learning: self.learning,
        }
    }
}

fn greedy_checked(values: ArrayView1<f32>, number_of_actions: usize) -> Result<ActionValue> {
    if values.len() != number_of_actions {
        return Err(DeepQError::dimension_mismatch(
            number_of_actions.to_string(),
            values.len().to_string(),
        ));
    }
    policy::greedy(values).ok_or_else(|| DeepQError::Training("approximator returned no values".to_string()))
}
