use thiserror::Error;

/// Failures raised by the network itself.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NetworkError {
    /// An input or target vector does not match the configured layer size.
    /// Raised before any unit state is touched.
    #[error("shape mismatch: {what} has length {actual}, expected {expected}")]
    Shape {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// The network could not be built from the given configuration.
    #[error("invalid configuration: {0}")]
    Configuration(String),
}

/// Failures raised while reading training data or configuration files.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("line {line}: label {label} is outside 0..{n_classes}")]
    Label {
        line: usize,
        label: usize,
        n_classes: usize,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, NetworkError>;
