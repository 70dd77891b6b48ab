//! # Activation Functions Module
//!
//! Activations available to the fully connected layers of a value network.
//!
//! - **ReLU**: `max(0, x)`, the default for hidden layers
//! - **Sigmoid**: `1 / (1 + e^(-x))`
//! - **Tanh**: hyperbolic tangent
//! - **Linear**: identity, used by the regression output layer
//!
//! In JSON configuration files the variants are written in lowercase
//! (`"relu"`, `"tanh"`, ...).

pub mod functions;

pub use functions::Activation;
