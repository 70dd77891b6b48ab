//! # Agent Module
//!
//! The learning core: a [`Brain`] that turns a stream of observations and
//! rewards into actions while learning a state-action value function by
//! Q-learning with experience replay.
//!
//! ## Core Concepts
//!
//! - **Temporal window**: the approximator sees the current observation plus
//!   the last `temporal_window` observations and actions ([`window`])
//! - **Exploration**: epsilon-greedy, with epsilon annealed linearly from 1.0
//!   to `epsilon_min` between `learning_steps_burn_in` and
//!   `learning_steps_total` ([`policy`])
//! - **Experience replay**: transitions go to a bounded memory with random
//!   overwrite, and every learning step trains on a random mini-batch
//! - **Approximator**: anything implementing [`Approximator`]; the default is
//!   [`ValueNetwork`](crate::network::ValueNetwork)
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use deepq::agent::Brain;
//! use deepq::config::BrainConfig;
//! use ndarray::array;
//!
//! let mut brain = Brain::new(BrainConfig::new(4, 2)).unwrap();
//!
//! loop {
//!     let observation = array![0.1, 0.2, -0.3, 0.4];
//!     let action = brain.step_forward(observation.view()).unwrap();
//!     // ... act in the environment ...
//!     brain.step_backward(1.0).unwrap();
//! }
//! ```

pub mod brain;
pub mod policy;
pub mod traits;
pub mod window;

pub use brain::Brain;
pub use policy::{ActionValue, EpsilonSchedule};
pub use traits::Approximator;
