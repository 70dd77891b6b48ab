use thiserror::Error;

/// Result type for deepq operations
pub type Result<T> = std::result::Result<T, DeepQError>;

/// Main error type for the deepq library
#[derive(Error, Debug)]
pub enum DeepQError {
    /// Invalid configuration value, rejected at construction time
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        name: String,
        reason: String,
    },

    /// Invalid dimensions for operations
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        expected: String,
        actual: String,
    },

    /// The approximator failed while training. The brain's counters and
    /// windows have already advanced when this is returned.
    #[error("Training error: {0}")]
    Training(String),

    /// IO errors (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for DeepQError {
    fn from(err: serde_json::Error) -> Self {
        DeepQError::Serialization(err.to_string())
    }
}

impl From<bincode::Error> for DeepQError {
    fn from(err: bincode::Error) -> Self {
        DeepQError::Serialization(err.to_string())
    }
}

impl DeepQError {
    pub fn dimension_mismatch<S: Into<String>>(expected: S, actual: S) -> Self {
        DeepQError::DimensionMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn invalid_parameter<S: Into<String>>(name: S, reason: S) -> Self {
        DeepQError::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// True for the errors a `BrainConfig` or `Brain` constructor can return.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            DeepQError::InvalidParameter { .. } | DeepQError::DimensionMismatch { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DeepQError::invalid_parameter("gamma", "must be in [0, 1]");
        assert_eq!(err.to_string(), "Invalid parameter 'gamma': must be in [0, 1]");

        let err = DeepQError::dimension_mismatch("4", "3");
        assert_eq!(err.to_string(), "Dimension mismatch: expected 4, got 3");
    }

    #[test]
    fn test_config_error_classification() {
        assert!(DeepQError::invalid_parameter("a", "b").is_config_error());
        assert!(DeepQError::dimension_mismatch("1", "2").is_config_error());
        assert!(!DeepQError::Training("diverged".to_string()).is_config_error());
    }
}
