//! # deepq - Online Deep Q-Learning Brain
//!
//! `deepq` provides a reinforcement-learning agent that learns a
//! state-action value function online with Q-learning and experience replay,
//! using a small feed-forward network as its function approximator.
//!
//! ## Key Features
//!
//! - **Temporal inputs**: observations and one-hot actions from a sliding
//!   window are concatenated into the network input
//! - **Annealed exploration**: epsilon-greedy with a burn-in period
//! - **Replay memory**: bounded, with random overwrite once full
//! - **Pluggable approximator**: any [`agent::Approximator`]; a dense
//!   [`network::ValueNetwork`] trained by mini-batch SGD is included
//! - **Deterministic runs**: seed the brain's random source from the config
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use deepq::agent::Brain;
//! use deepq::config::BrainConfigBuilder;
//! use ndarray::array;
//!
//! let config = BrainConfigBuilder::new(3, 2)
//!     .temporal_window(2)
//!     .gamma(0.9)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//! let mut brain = Brain::new(config).unwrap();
//!
//! let action = brain.step_forward(array![0.0, 0.5, 1.0].view()).unwrap();
//! brain.step_backward(if action == 0 { 1.0 } else { 0.0 }).unwrap();
//! println!("{}", brain.stats());
//! ```
//!
//! ## Module Organization
//!
//! - [`activations`] - Activation functions for dense layers
//! - [`agent`] - The learning core ([`agent::Brain`]) and approximator trait
//! - [`config`] - Brain configuration, validation and JSON loading
//! - [`error`] - Error types and result handling
//! - [`layers`] - Layer definitions and the dense layer
//! - [`loss`] - Single-output regression loss
//! - [`metrics`] - Smoothed statistics and brain snapshots
//! - [`network`] - The default value network
//! - [`optimizer`] - Mini-batch SGD with momentum and L2 decay
//! - [`replay_buffer`] - Experience replay memory

pub mod activations;
pub mod agent;
pub mod config;
pub mod error;
pub mod layers;
pub mod loss;
pub mod metrics;
pub mod network;
pub mod optimizer;
pub mod replay_buffer;

pub use agent::Brain;
pub use config::{BrainConfig, BrainConfigBuilder};
pub use error::{DeepQError, Result};

#[cfg(test)]
mod tests;
