pub mod definition;
pub mod dense;

pub use definition::LayerDef;
pub use dense::DenseLayer;
