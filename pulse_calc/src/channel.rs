use std::fmt;
use std::str::FromStr;
use serde::Serialize;
use crate::error::PulseCalcError;

/// Spectrometer channels a reference pulse can be stored for
#[derive(Clone,Copy,Debug,PartialEq,Eq,Hash,Serialize)]
pub enum Channel {
    #[serde(rename = "1H")]
    H1,
    #[serde(rename = "13C")]
    C13,
    #[serde(rename = "15N")]
    N15,
}

impl Channel {
    pub const ALL:[Channel;3] = [Channel::H1,Channel::C13,Channel::N15];

    pub fn label(&self) -> &'static str {
        match self {
            Channel::H1 => "1H",
            Channel::C13 => "13C",
            Channel::N15 => "15N",
        }
    }

    pub fn list() -> String {
        Self::ALL.iter().map(|c| c.label()).collect::<Vec<&str>>().join("\n")
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Channel {
    type Err = PulseCalcError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL.iter()
            .find(|c| c.label().eq_ignore_ascii_case(trimmed))
            .copied()
            .ok_or_else(|| PulseCalcError::UnknownChannel(trimmed.to_string()))
    }
}
