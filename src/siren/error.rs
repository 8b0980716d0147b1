//! Error types for Siren codec operations

use thiserror::Error;

/// Main error type for Siren serialization and deserialization
#[derive(Debug, Error)]
pub enum SirenError {
    /// A required input was missing or unusable (e.g. a class provider returned no classes)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A wire-model or resource-model value violates its own invariant
    #[error("Construction error: {0}")]
    Construction(String),

    /// The document cannot satisfy the requested target shape
    #[error("Shape mismatch at '{path}': {reason}")]
    ShapeMismatch { path: String, reason: String },

    /// An embeddable sub-node has no relation it can be embedded under
    #[error("Missing relation for embedded resource at '{path}'")]
    MissingRelation { path: String },

    /// The resource graph or document nests deeper than the configured limit
    #[error("Nesting depth exceeds the configured maximum of {max}")]
    DepthExceeded { max: usize },

    /// Malformed JSON or a wire document that does not match the Siren model
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SirenError {
    /// Create a shape mismatch error
    pub fn shape_mismatch(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ShapeMismatch {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a missing relation error
    pub fn missing_relation(path: impl Into<String>) -> Self {
        Self::MissingRelation { path: path.into() }
    }
}

/// Result type alias for Siren operations
pub type SirenResult<T> = Result<T, SirenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_mismatch_display() {
        let err = SirenError::shape_mismatch("/entities/0", "expected an embedded link");
        assert_eq!(
            err.to_string(),
            "Shape mismatch at '/entities/0': expected an embedded link"
        );
    }

    #[test]
    fn test_serde_error_conversion() {
        let err: SirenError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, SirenError::Serialization(_)));
    }
}
