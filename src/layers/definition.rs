use serde::{Serialize, Deserialize};
use crate::activations::Activation;
use crate::error::{DeepQError, Result};

/// Declarative description of one layer of a value network.
///
/// A valid stack starts with an [`LayerDef::Input`], ends with a
/// [`LayerDef::Regression`] and has only [`LayerDef::Fc`] layers in between.
///
/// ```
/// use deepq::layers::LayerDef;
/// use deepq::activations::Activation;
///
/// let defs = vec![
///     LayerDef::input(12),
///     LayerDef::fc(32, Activation::Relu),
///     LayerDef::regression(2),
/// ];
/// assert_eq!(LayerDef::input_width(&defs), Some(12));
/// assert_eq!(LayerDef::output_width(&defs), Some(2));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LayerDef {
    /// Input volume; its width is `out_sx * out_sy * out_depth`
    Input {
        out_sx: usize,
        out_sy: usize,
        out_depth: usize,
    },
    /// Fully connected hidden layer
    Fc {
        num_neurons: usize,
        #[serde(default)]
        activation: Activation,
    },
    /// Linear output layer trained with a single-dimension squared loss
    Regression {
        num_neurons: usize,
    },
}

impl LayerDef {
    /// A flat input layer of the given width
    pub fn input(width: usize) -> Self {
        LayerDef::Input { out_sx: 1, out_sy: 1, out_depth: width }
    }

    pub fn fc(num_neurons: usize, activation: Activation) -> Self {
        LayerDef::Fc { num_neurons, activation }
    }

    pub fn regression(num_neurons: usize) -> Self {
        LayerDef::Regression { num_neurons }
    }

    /// Number of values this layer emits
    pub fn width(&self) -> usize {
        match self {
            LayerDef::Input { out_sx, out_sy, out_depth } => out_sx * out_sy * out_depth,
            LayerDef::Fc { num_neurons, .. } => *num_neurons,
            LayerDef::Regression { num_neurons } => *num_neurons,
        }
    }

    /// Declared input width of a stack, if it starts with an input layer
    pub fn input_width(defs: &[LayerDef]) -> Option<usize> {
        match defs.first() {
            Some(def @ LayerDef::Input { .. }) => Some(def.width()),
            _ => None,
        }
    }

    /// Declared output width of a stack, if it ends with a regression layer
    pub fn output_width(defs: &[LayerDef]) -> Option<usize> {
        match defs.last() {
            Some(LayerDef::Regression { num_neurons }) => Some(*num_neurons),
            _ => None,
        }
    }

    /// Input, two ReLU hidden layers of `hidden` units, regression output
    pub fn default_stack(inputs: usize, outputs: usize, hidden: usize) -> Vec<LayerDef> {
        vec![
            LayerDef::input(inputs),
            LayerDef::fc(hidden, Activation::Relu),
            LayerDef::fc(hidden, Activation::Relu),
            LayerDef::regression(outputs),
        ]
    }

    /// Check the shape of a layer stack on its own, without reference to the
    /// dimensions a brain expects.
    pub fn validate_stack(defs: &[LayerDef]) -> Result<()> {
        if defs.len() < 2 {
            return Err(DeepQError::invalid_parameter(
                "layer_definitions",
                "must have at least 2 layers",
            ));
        }
        if !matches!(defs[0], LayerDef::Input { .. }) {
            return Err(DeepQError::invalid_parameter(
                "layer_definitions",
                "first layer must be an input layer",
            ));
        }
        if !matches!(defs[defs.len() - 1], LayerDef::Regression { .. }) {
            return Err(DeepQError::invalid_parameter(
                "layer_definitions",
                "last layer must be a regression layer",
            ));
        }
        for (i, def) in defs.iter().enumerate() {
            if i > 0 && i < defs.len() - 1 && !matches!(def, LayerDef::Fc { .. }) {
                return Err(DeepQError::InvalidParameter {
                    name: "layer_definitions".to_string(),
                    reason: format!("layer {} must be a fully connected layer", i),
                });
            }
            if def.width() == 0 {
                return Err(DeepQError::InvalidParameter {
                    name: "layer_definitions".to_string(),
                    reason: format!("layer {} has zero width", i),
                });
            }
        }
        Ok(())
    }
}
