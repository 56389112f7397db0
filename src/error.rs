use thiserror::Error;

/// Top-level error type for link routing.
#[derive(Debug, Error)]
pub enum LinkrouteError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Errors related to geometric primitives.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("rectangle has negative extent: width = {width}, height = {height}")]
    NegativeExtent { width: f64, height: f64 },

    #[error("non-finite coordinate: {0}")]
    NonFinite(&'static str),
}

/// Errors related to link style configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("link type not supported: {0}")]
    UnknownLinkType(String),

    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: f64 },

    #[error("invalid path position: {0:?}")]
    InvalidPosition(String),

    #[error("malformed style: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors related to routing operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Convenience type alias for results using [`LinkrouteError`].
pub type Result<T> = std::result::Result<T, LinkrouteError>;
