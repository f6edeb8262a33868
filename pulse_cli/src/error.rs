use pulse_calc::PulseCalcError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    PulseCalc(#[from] PulseCalcError),
    #[error("settings file is corrupt: {0}")]
    ConfigRead(#[from] toml::de::Error),
    #[error("cannot serialize settings: {0}")]
    ConfigWrite(#[from] toml::ser::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Input(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CliResult<T> = Result<T, CliError>;
