pub mod functions;

pub use functions::{RegressionTarget, SingleDimSquaredLoss};
