//! Error types for the growth engine.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid dimension: {0}")]
    InvalidDimension(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Out of bounds: ({x}, {y}) outside {width}x{height} grid")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    },

    #[error("Unknown pattern: {0}")]
    UnknownPattern(String),

    #[error("Engine not initialized: {0}")]
    NotInitialized(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<bincode::Error> for Error {
    fn from(err: bincode::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds_message() {
        let err = Error::OutOfBounds {
            x: 10,
            y: -1,
            width: 10,
            height: 10,
        };
        assert_eq!(err.to_string(), "Out of bounds: (10, -1) outside 10x10 grid");
    }

    #[test]
    fn test_json_error_conversion() {
        let parsed: std::result::Result<u32, _> = serde_json::from_str("not json");
        let err: Error = parsed.unwrap_err().into();
        assert!(matches!(err, Error::Serialization(_)));
    }
}
