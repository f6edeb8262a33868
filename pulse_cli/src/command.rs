use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use pulse_calc::calculator::{derive_pulse, frequency_from_length};
use pulse_calc::hh::hh_target_powers;
use pulse_calc::{Channel, PulseCalcError, ReferencePulse, ReferenceTable};
use crate::args::*;
use crate::config::{ConfigFile, Settings};
use crate::error::{CliError, CliResult};
use crate::prompt::Prompter;
use crate::render;

/// Everything a command needs: where it runs, its settings and a terminal to talk to
pub struct Context<R,W> {
    pub dir:PathBuf,
    pub table:ReferenceTable,
    pub settings:Settings,
    pub io:Prompter<R,W>,
}

impl<R:BufRead,W:Write> Context<R,W> {
    pub fn new(dir:&Path,settings:Settings,io:Prompter<R,W>) -> Self {
        Self {
            dir:dir.to_owned(),
            table:ReferenceTable::in_dir(dir),
            settings,
            io,
        }
    }

    fn confirmed(&mut self,args:&ConfirmArgs,question:&str) -> CliResult<bool> {
        match args.yes || self.settings.assume_yes {
            true => Ok(true),
            false => self.io.confirm(question)
        }
    }
}

pub fn run<R:BufRead,W:Write>(action:&Action,ctx:&mut Context<R,W>) -> CliResult<()> {
    use Action::*;
    match action {
        Init(args) => init(args,ctx),
        Show(args) => show(args,ctx),
        Update(args) => update(args,ctx),
        Calculate(args) => calculate(args,ctx),
        Hh(args) => hh(args,ctx),
        Reset(args) => reset(args,ctx),
        Config(args) => write_config(args,ctx),
        ListChannels => ctx.io.say(&Channel::list()),
    }
}

pub fn init<R:BufRead,W:Write>(args:&ConfirmArgs,ctx:&mut Context<R,W>) -> CliResult<()> {
    let exists = ctx.table.exists();
    let confirmed = match exists {
        true => ctx.confirmed(args,"A reference table already exists. Overwrite it?")?,
        false => false
    };
    if exists && !confirmed {
        return ctx.io.say(&format!("keeping existing reference table {:?}",ctx.table.path()));
    }
    ctx.io.say("Initializing reference pulse table")?;
    // the old table is only replaced once every channel has a valid reference
    let mut pulses = Vec::with_capacity(Channel::ALL.len());
    for channel in Channel::ALL {
        pulses.push(ask_reference(ctx,channel)?);
    }
    ctx.table.create(confirmed)?;
    for p in pulses {
        ctx.table.upsert(p.channel,p.length,p.power,p.frequency)?;
    }
    Ok(())
}

fn ask_reference<R:BufRead,W:Write>(ctx:&mut Context<R,W>,channel:Channel) -> CliResult<ReferencePulse> {
    loop {
        let length:f64 = ctx.io.value(&format!("Enter {} reference pulse length in μs",channel))?;
        let power:f64 = ctx.io.value(&format!("Enter {} reference pulse power in W",channel))?;
        match ReferencePulse::from_length(channel,length,power) {
            Ok(pulse) => return Ok(pulse),
            Err(e @ PulseCalcError::InvalidArgument{..}) => ctx.io.say(&format!("{}. Try again",e))?,
            Err(e) => return Err(e.into())
        }
    }
}

pub fn show<R:BufRead,W:Write>(args:&ShowArgs,ctx:&mut Context<R,W>) -> CliResult<()> {
    let pulses = ctx.table.get_all()?;
    let s = match args.json {
        true => render::json(&pulses)?,
        false => render::reference_table(&pulses)
    };
    ctx.io.say(&s)
}

pub fn update<R:BufRead,W:Write>(args:&UpdateArgs,ctx:&mut Context<R,W>) -> CliResult<()> {
    // fail before asking anything if there is nothing to update
    if !ctx.table.exists() {
        return Err(PulseCalcError::NotFound(ctx.table.path().to_owned()).into());
    }
    let channel = match args.channel {
        Some(channel) => channel,
        None => ctx.io.value("Which channel do you want to update? (1H, 13C, 15N)")?
    };
    let length = match args.length {
        Some(length) => length,
        None => ctx.io.value("What is the reference pulse length in μs?")?
    };
    let power = match args.power {
        Some(power) => power,
        None => ctx.io.value("What is the reference pulse power in W?")?
    };
    let frequency = frequency_from_length(length)?;
    ctx.table.upsert(channel,length,power,frequency)?;
    ctx.io.say(&format!("{} reference pulse updated: {:.2} μs @ {:.2} W == {:.2} kHz",channel,length,power,frequency))
}

pub fn calculate<R:BufRead,W:Write>(args:&CalculateArgs,ctx:&mut Context<R,W>) -> CliResult<()> {
    let target = args.target().ok_or_else(|| CliError::Input(String::from("one of --length, --power or --frequency is required")))?;
    let reference = ctx.table.get(args.channel)?.ok_or(PulseCalcError::MissingReference(args.channel))?;
    let pulse = derive_pulse(&reference,target)?;
    info!("{:?} on {} gives {:?}",target,args.channel,pulse);
    ctx.io.say(&render::pulse(args.channel,&pulse))
}

pub fn hh<R:BufRead,W:Write>(args:&HhArgs,ctx:&mut Context<R,W>) -> CliResult<()> {
    let references = ctx.table.get_all()?;
    let spinning_frequency = match args.spinning.or(ctx.settings.spinning_frequency) {
        Some(f) => f,
        None => ctx.io.value("What is the spinning frequency in kHz?")?
    };
    let channels = match args.channel.is_empty() {
        true => Channel::ALL.to_vec(),
        false => args.channel.clone()
    };
    for channel in channels {
        let reference = references.iter().find(|r| r.channel == channel);
        match hh_target_powers(channel,reference,spinning_frequency) {
            Ok(targets) => ctx.io.say(&render::hh_table(channel,spinning_frequency,&targets))?,
            Err(PulseCalcError::MissingReference(channel)) => {
                warn!("no reference pulse for {}, skipping",channel);
                ctx.io.say(&format!("No {} reference pulse stored. Skipping {}.",channel,channel))?;
            }
            Err(e) => return Err(e.into())
        }
    }
    Ok(())
}

pub fn reset<R:BufRead,W:Write>(args:&ConfirmArgs,ctx:&mut Context<R,W>) -> CliResult<()> {
    let confirmed = match ctx.table.exists() {
        true => ctx.confirmed(args,"Remove all reference pulses?")?,
        false => false
    };
    match ctx.table.reset(confirmed)? {
        true => ctx.io.say("Reference table removed"),
        false => ctx.io.say("Reset aborted. Reference table kept")
    }
}

pub fn write_config<R:BufRead,W:Write>(args:&ConfirmArgs,ctx:&mut Context<R,W>) -> CliResult<()> {
    if Settings::exists(&ctx.dir) && !ctx.confirmed(args,"Settings file already exists. Overwrite it?")? {
        return ctx.io.say("Settings file kept");
    }
    Settings::default().to_file(&ctx.dir)?;
    ctx.io.say(&format!("default settings written to {:?}",ctx.dir.join(Settings::file_name())))
}
