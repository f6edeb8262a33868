/*
 Pulse arithmetic. A reference 90 degree pulse of length L (us) nutates at 1/(4L) MHz, so
 lengths and nutation frequencies convert directly. Power is related to frequency through the
 attenuation (dB) of a calibrated reference: amplitude scales with frequency and power with
 amplitude squared, so attenuation moves by 20*log10 of the frequency ratio.

 Units are fixed: lengths in us, powers in W, frequencies in kHz.
 */

use serde::Serialize;
use crate::error::{require_positive, Result};
use crate::reference::ReferencePulse;

/// nutation frequency (kHz) of a 90 degree pulse of the given length (us)
pub fn frequency_from_length(length_us:f64) -> Result<f64> {
    let length_us = require_positive("pulse length", length_us)?;
    Ok(1E3 / (length_us * 4.0))
}

/// length (us) of a 90 degree pulse nutating at the given frequency (kHz)
pub fn length_from_frequency(frequency_khz:f64) -> Result<f64> {
    let frequency_khz = require_positive("pulse frequency", frequency_khz)?;
    Ok(1E3 / (frequency_khz * 4.0))
}

pub fn attenuation_from_power(power_w:f64) -> Result<f64> {
    let power_w = require_positive("pulse power", power_w)?;
    Ok(-10.0 * power_w.log10())
}

pub fn power_from_attenuation(attenuation_db:f64) -> f64 {
    10f64.powf(-attenuation_db / 10.0)
}

/// power needed to reach new_frequency given a calibrated reference frequency/power pair
pub fn power_from_frequency(reference_frequency:f64,reference_power:f64,new_frequency:f64) -> Result<f64> {
    let reference_frequency = require_positive("reference frequency", reference_frequency)?;
    let new_frequency = require_positive("new frequency", new_frequency)?;
    let ref_attenuation = attenuation_from_power(reference_power)?;
    let new_attenuation = ref_attenuation - 20.0 * (new_frequency / reference_frequency).log10();
    Ok(power_from_attenuation(new_attenuation))
}

/// frequency reached with new_power given a calibrated reference frequency/power pair
pub fn frequency_from_power(reference_frequency:f64,reference_power:f64,new_power:f64) -> Result<f64> {
    let reference_frequency = require_positive("reference frequency", reference_frequency)?;
    let ref_attenuation = attenuation_from_power(reference_power)?;
    let new_attenuation = attenuation_from_power(new_power)?;
    Ok(reference_frequency * 10f64.powf((ref_attenuation - new_attenuation) / 20.0))
}

/// The quantity a new pulse is specified by
#[derive(Clone,Copy,Debug,PartialEq)]
pub enum Target {
    Length(f64),
    Power(f64),
    Frequency(f64),
}

#[derive(Clone,Copy,Debug,PartialEq,Serialize)]
pub struct Pulse {
    pub length:f64,
    pub power:f64,
    pub frequency:f64,
}

/// Fill in the remaining pulse parameters for a target, scaled from the channel reference
pub fn derive_pulse(reference:&ReferencePulse,target:Target) -> Result<Pulse> {
    let (ref_freq,ref_power) = (reference.frequency,reference.power);
    let (length,frequency) = match target {
        Target::Length(length) => (length,frequency_from_length(length)?),
        Target::Frequency(frequency) => (length_from_frequency(frequency)?,frequency),
        Target::Power(power) => {
            let frequency = frequency_from_power(ref_freq,ref_power,power)?;
            (length_from_frequency(frequency)?,frequency)
        }
    };
    let power = match target {
        Target::Power(power) => power,
        _=> power_from_frequency(ref_freq,ref_power,frequency)?
    };
    Ok(Pulse{length,power,frequency})
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::Channel;
    use crate::error::PulseCalcError;

    fn close(a:f64,b:f64,tol:f64) -> bool {
        (a - b).abs() <= tol
    }

    fn proton() -> ReferencePulse {
        ReferencePulse { channel: Channel::H1, length: 5.0, power: 100.0, frequency: 50.0 }
    }

    #[test]
    fn frequency_from_length_of_50us_is_5khz() {
        assert_eq!(frequency_from_length(50.0).unwrap(), 5.0);
        assert_eq!(frequency_from_length(5.0).unwrap(), 50.0);
    }

    #[test]
    fn length_and_frequency_are_inverse() {
        for length in [0.5, 2.5, 5.0, 7.3, 50.0] {
            let f = frequency_from_length(length).unwrap();
            assert!(close(length_from_frequency(f).unwrap(), length, 1E-12));
        }
    }

    #[test]
    fn zero_or_negative_length_is_rejected() {
        assert!(matches!(frequency_from_length(0.0), Err(PulseCalcError::InvalidArgument { .. })));
        assert!(matches!(frequency_from_length(-1.0), Err(PulseCalcError::InvalidArgument { .. })));
        assert!(matches!(frequency_from_length(f64::NAN), Err(PulseCalcError::InvalidArgument { .. })));
    }

    #[test]
    fn attenuation_round_trips() {
        let att = attenuation_from_power(100.0).unwrap();
        assert!(close(att, -20.0, 1E-12));
        assert!(close(power_from_attenuation(att), 100.0, 1E-9));
    }

    #[test]
    fn power_scales_with_frequency_squared() {
        assert!(close(power_from_frequency(50.0, 100.0, 50.0).unwrap(), 100.0, 1E-9));
        assert!(close(power_from_frequency(50.0, 100.0, 100.0).unwrap(), 400.0, 1E-9));
        assert!(close(power_from_frequency(50.0, 100.0, 20.0).unwrap(), 16.0, 1E-9));
    }

    #[test]
    fn power_and_frequency_are_inverse() {
        for new_freq in [0.1, 1.0, 2.5, 5.0, 12.0, 83.3] {
            let p = power_from_frequency(5.0, 100.0, new_freq).unwrap();
            let f = frequency_from_power(5.0, 100.0, p).unwrap();
            assert!(close(f, new_freq, 5E-3), "{} != {}", f, new_freq);
        }
    }

    #[test]
    fn log_domain_is_enforced() {
        assert!(matches!(power_from_frequency(50.0, 0.0, 20.0), Err(PulseCalcError::InvalidArgument { name: "pulse power", .. })));
        assert!(matches!(power_from_frequency(0.0, 100.0, 20.0), Err(PulseCalcError::InvalidArgument { name: "reference frequency", .. })));
        assert!(matches!(power_from_frequency(50.0, 100.0, -1.0), Err(PulseCalcError::InvalidArgument { name: "new frequency", .. })));
        assert!(matches!(frequency_from_power(50.0, 100.0, 0.0), Err(PulseCalcError::InvalidArgument { .. })));
    }

    #[test]
    fn derive_by_length() {
        let p = derive_pulse(&proton(), Target::Length(10.0)).unwrap();
        assert_eq!(p.length, 10.0);
        assert_eq!(p.frequency, 25.0);
        assert!(close(p.power, 25.0, 1E-9));
    }

    #[test]
    fn derive_targets_agree() {
        let by_freq = derive_pulse(&proton(), Target::Frequency(25.0)).unwrap();
        let by_power = derive_pulse(&proton(), Target::Power(by_freq.power)).unwrap();
        assert!(close(by_freq.length, 10.0, 1E-9));
        assert!(close(by_power.frequency, 25.0, 1E-9));
        assert!(close(by_power.length, 10.0, 1E-9));
    }
}
