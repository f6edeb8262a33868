use serde::Serialize;
use crate::calculator::power_from_frequency;
use crate::channel::Channel;
use crate::error::{require_positive, PulseCalcError, Result};
use crate::reference::ReferencePulse;

/// Hartmann-Hahn matching conditions as multiples of the spinning frequency
pub const HH_CONDITIONS:[(&str,f64);9] = [
    ("1/2",0.5),
    ("1",1.0),
    ("3/2",1.5),
    ("2",2.0),
    ("5/2",2.5),
    ("3",3.0),
    ("7/2",3.5),
    ("4",4.0),
    ("9/2",4.5),
];

#[derive(Clone,Debug,PartialEq,Serialize)]
pub struct HhTarget {
    pub label:String,
    pub ratio:f64,
    pub frequency:f64,
    pub power:f64,
}

pub fn hh_target_frequencies(spinning_frequency:f64,ratios:&[(&str,f64)]) -> Result<Vec<(String,f64)>> {
    let spinning_frequency = require_positive("spinning frequency", spinning_frequency)?;
    Ok(ratios.iter().map(|(label,ratio)| (label.to_string(),ratio * spinning_frequency)).collect())
}

/// powers needed on a channel to hit each HH condition at the given spinning frequency
pub fn hh_target_powers(channel:Channel,reference:Option<&ReferencePulse>,spinning_frequency:f64) -> Result<Vec<HhTarget>> {
    let reference = reference.ok_or(PulseCalcError::MissingReference(channel))?;
    let frequencies = hh_target_frequencies(spinning_frequency,&HH_CONDITIONS)?;
    frequencies.into_iter().zip(HH_CONDITIONS.iter()).map(|((label,frequency),(_,ratio))|{
        let power = power_from_frequency(reference.frequency,reference.power,frequency)?;
        Ok(HhTarget{label,ratio:*ratio,frequency,power})
    }).collect()
}
