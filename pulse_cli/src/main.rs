use std::process;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};
use pulse_cli::args::PulseCalcArgs;
use pulse_cli::command::{self, Context};
use pulse_cli::config::{Settings, DEFAULT_LOG_LEVEL};
use pulse_cli::error::CliResult;
use pulse_cli::prompt;

fn init_logging(level:&str) {
    let filter_layer = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);
    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}

fn run(args:&PulseCalcArgs) -> CliResult<()> {
    let dir = std::env::current_dir()?;
    let settings = Settings::load(&dir);
    init_logging(settings.as_ref().map(|s| s.log_level.as_str()).unwrap_or(DEFAULT_LOG_LEVEL));
    let mut ctx = Context::new(&dir,settings?,prompt::stdio());
    command::run(&args.action,&mut ctx)
}

fn main(){
    let args = PulseCalcArgs::parse();
    if let Err(e) = run(&args) {
        debug!("{:?}",e);
        eprintln!("error: {}",e);
        process::exit(1);
    }
}
