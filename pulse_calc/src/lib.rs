pub mod error;
pub mod channel;
pub mod calculator;
pub mod hh;
pub mod reference;

pub use error::{PulseCalcError, Result};
pub use channel::Channel;
pub use calculator::{derive_pulse, Pulse, Target};
pub use hh::{HhTarget, HH_CONDITIONS};
pub use reference::{ReferencePulse, ReferenceTable};
