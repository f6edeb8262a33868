use serde::Serialize;
use pulse_calc::{Channel, HhTarget, Pulse, ReferencePulse};
use crate::error::CliResult;

pub fn reference_table(pulses:&[ReferencePulse]) -> String {
    let mut s = String::from("Reference pulses\n");
    s.push_str(&format!("{:<9}{:>13}{:>12}{:>18}\n","Channel","Length (μs)","Power (W)","Frequency (kHz)"));
    pulses.iter().for_each(|p|{
        s.push_str(&format!("{:<9}{:>13.2}{:>12.2}{:>18.2}\n",p.channel.label(),p.length,p.power,p.frequency));
    });
    s
}

pub fn pulse(channel:Channel,pulse:&Pulse) -> String {
    format!("{} pulse: {:.2} μs @ {:.2} W == {:.2} kHz",channel,pulse.length,pulse.power,pulse.frequency)
}

pub fn hh_table(channel:Channel,spinning_frequency:f64,targets:&[HhTarget]) -> String {
    let mut s = format!("{} Hartmann-Hahn conditions @ {:.2} kHz spinning\n",channel,spinning_frequency);
    s.push_str(&format!("{:<7}{:>18}{:>12}\n","n","Frequency (kHz)","Power (W)"));
    targets.iter().for_each(|t|{
        s.push_str(&format!("{:<7}{:>18.2}{:>12.2}\n",t.label,t.frequency,t.power));
    });
    s
}

pub fn json<T:Serialize>(value:&T) -> CliResult<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
