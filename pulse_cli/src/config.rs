use std::fs;
use std::path::Path;
use serde::{Deserialize, Serialize};
use tracing::debug;
use crate::error::CliResult;

pub const SETTINGS_FILE_NAME:&str = "pulsecalc.toml";
pub const DEFAULT_LOG_LEVEL:&str = "warn";

#[derive(Clone,Debug,PartialEq,Serialize,Deserialize)]
#[serde(default)]
pub struct Settings {
    /// tracing filter used when RUST_LOG is not set
    pub log_level:String,
    /// skip overwrite/remove questions
    pub assume_yes:bool,
    /// default spinning frequency (kHz) for HH tables
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spinning_frequency:Option<f64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: String::from(DEFAULT_LOG_LEVEL),
            assume_yes: false,
            spinning_frequency: None,
        }
    }
}

impl Settings {
    /// settings from the working directory, or defaults when there is no settings file
    pub fn load(dir:&Path) -> CliResult<Self> {
        match Self::exists(dir) {
            true => Self::from_file(dir),
            false => Ok(Self::default())
        }
    }
}

impl ConfigFile for Settings {

    fn to_file(&self, dir:&Path) -> CliResult<()> {
        let t = toml::to_string_pretty(&self)?;
        let path = dir.join(Self::file_name());
        debug!("writing settings to {:?}",path);
        fs::write(path,t)?;
        Ok(())
    }

    fn from_file(dir:&Path) -> CliResult<Self> {
        let path = dir.join(Self::file_name());
        debug!("reading settings from {:?}",path);
        let t = fs::read_to_string(path)?;
        Ok(toml::from_str(&t)?)
    }

    fn file_name() -> &'static str {
        SETTINGS_FILE_NAME
    }
}

pub trait ConfigFile: Sized {
    fn to_file(&self, dir:&Path) -> CliResult<()>;
    fn from_file(dir:&Path) -> CliResult<Self>;
    fn file_name() -> &'static str;
    fn exists(dir:&Path) -> bool {
        dir.join(Self::file_name()).exists()
    }
}
