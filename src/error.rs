use thiserror::Error;

/// Top-level error type for the Profilis curve engine.
#[derive(Debug, Error)]
pub enum ProfilisError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    PathData(#[from] PathDataError),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Errors related to geometric inputs.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

/// Problems found while reading SVG path data.
///
/// The lenient path parser collects these as diagnostics instead of failing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathDataError {
    #[error("malformed path data: {message}")]
    Syntax { message: String },

    #[error("path data must start with a move command, found '{command}'")]
    MissingInitialMoveTo { command: char },
}

/// Errors related to engine operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Convenience type alias for results using [`ProfilisError`].
pub type Result<T> = std::result::Result<T, ProfilisError>;
