// Test modules for all components
pub mod test_activations;
pub mod test_replay_buffer;
