pub mod window;
pub mod stats;

pub use window::SmoothedWindow;
pub use stats::BrainStats;
