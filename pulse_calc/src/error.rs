use std::path::PathBuf;
use thiserror::Error;
use crate::channel::Channel;

#[derive(Debug, Error)]
pub enum PulseCalcError {
    #[error("reference table not found at {0:?}. Run init first")]
    NotFound(PathBuf),
    #[error("reference table already exists at {0:?}")]
    AlreadyExists(PathBuf),
    #[error("invalid {name}: {value} (must be a positive number)")]
    InvalidArgument { name: &'static str, value: f64 },
    #[error("no reference pulse stored for {0}")]
    MissingReference(Channel),
    #[error("reference table is corrupt at line {line}: {reason}")]
    Corrupt { line: usize, reason: String },
    #[error("unknown channel {0:?} (expected one of 1H, 13C, 15N)")]
    UnknownChannel(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PulseCalcError>;

/// checks that a value is finite and strictly positive
pub fn require_positive(name:&'static str,value:f64) -> Result<f64> {
    match value.is_finite() && value > 0.0 {
        true => Ok(value),
        false => Err(PulseCalcError::InvalidArgument { name, value })
    }
}
