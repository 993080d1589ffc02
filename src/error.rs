use thiserror::Error;

/// Top-level error type for the geofilter kernel.
#[derive(Debug, Error)]
pub enum GeofilterError {
    #[error(transparent)]
    Numeric(#[from] NumericError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Errors raised by the arithmetic backends.
///
/// These are hard failures: the exact path could not represent a value, so
/// retrying cannot change the outcome.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum NumericError {
    #[error("non-finite coordinate {value} cannot be represented exactly")]
    NonFinite { value: f64 },

    #[error("exact value of {what} does not fit in an f64")]
    Unrepresentable { what: &'static str },

    #[error("predicate {predicate} stayed undecided under exact arithmetic")]
    Undecided { predicate: &'static str },
}

/// Errors related to primitive construction.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,

    #[error("non-finite {parameter}: {value}")]
    NonFinite { parameter: &'static str, value: f64 },

    #[error("invalid bounds: min ({min_x}, {min_y}) exceeds max ({max_x}, {max_y})")]
    InvalidBounds {
        min_x: f64,
        min_y: f64,
        max_x: f64,
        max_y: f64,
    },
}

/// Convenience type alias for results using [`GeofilterError`].
pub type Result<T> = std::result::Result<T, GeofilterError>;
