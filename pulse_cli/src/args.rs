use pulse_calc::{Channel, Target};

#[derive(clap::Parser,Debug)]
#[command(name = "pulsecalc", about = "NMR pulse calculator")]
pub struct PulseCalcArgs {
    #[command(subcommand)]
    pub action: Action,
}

#[derive(clap::Subcommand,Debug)]
pub enum Action {
    /// create a table containing the reference pulse definitions
    Init(ConfirmArgs),
    /// show the reference pulse definitions
    Show(ShowArgs),
    /// update a given reference pulse definition
    Update(UpdateArgs),
    /// calculate a new pulse from a channel reference
    Calculate(CalculateArgs),
    /// show Hartmann-Hahn matching powers for a spinning frequency
    Hh(HhArgs),
    /// remove the reference pulse definitions
    Reset(ConfirmArgs),
    /// write default settings to pulsecalc.toml
    Config(ConfirmArgs),
    /// list the channels reference pulses can be stored for
    ListChannels,
}

#[derive(clap::Args,Debug,Default)]
pub struct ConfirmArgs {
    /// answer yes to any overwrite/remove question
    #[clap(short, long)]
    pub yes:bool,
}

#[derive(clap::Args,Debug,Default)]
pub struct ShowArgs {
    #[clap(long)]
    pub json:bool,
}

#[derive(clap::Args,Debug,Default)]
pub struct UpdateArgs {
    pub channel:Option<Channel>,
    /// pulse length in us
    #[clap(short, long)]
    pub length:Option<f64>,
    /// pulse power in W
    #[clap(short, long)]
    pub power:Option<f64>,
}

#[derive(clap::Args,Debug)]
#[command(group(clap::ArgGroup::new("target").required(true).args(["length", "power", "frequency"])))]
pub struct CalculateArgs {
    pub channel:Channel,
    /// pulse length in us
    #[clap(short, long)]
    pub length:Option<f64>,
    /// pulse power in W
    #[clap(short, long)]
    pub power:Option<f64>,
    /// pulse frequency in kHz
    #[clap(short, long)]
    pub frequency:Option<f64>,
}

impl CalculateArgs {
    pub fn target(&self) -> Option<Target> {
        match (self.length,self.power,self.frequency) {
            (Some(l),_,_) => Some(Target::Length(l)),
            (_,Some(p),_) => Some(Target::Power(p)),
            (_,_,Some(f)) => Some(Target::Frequency(f)),
            _=> None
        }
    }
}

#[derive(clap::Args,Debug,Default)]
pub struct HhArgs {
    /// spinning frequency in kHz
    #[clap(short, long)]
    pub spinning:Option<f64>,
    /// channels to report (repeatable). All channels when omitted
    #[clap(short, long)]
    pub channel:Vec<Channel>,
}
