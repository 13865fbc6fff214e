use thiserror::Error;

/// Errors raised by the score engine.
///
/// Configuration mistakes (bad operator, unexplainable element, score outside
/// every level) are always errors. Missing inputs are only errors on the
/// strict `try_*` evaluation path; the lenient path lets `NaN` propagate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoreError {
    #[error("Invalid score: {0} is outside every score range")]
    InvalidScore(f64),

    #[error("Unsupported element type for '{name}': {kind}")]
    UnsupportedElementType { name: String, kind: String },

    #[error("Invalid operation: '{0}'")]
    InvalidOperation(String),

    #[error("Unsupported operation '{operation}' in '{name}' with {operands} operand(s)")]
    UnsupportedOperation {
        name: String,
        operation: String,
        operands: usize,
    },

    #[error("Missing input for element '{name}'")]
    MissingInput { name: String },

    #[error("Element '{name}' produced a non-finite score ({value})")]
    NonFiniteScore { name: String, value: f64 },
}
