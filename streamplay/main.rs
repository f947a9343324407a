mod config;
mod console;
mod error;
mod player;

use crate::config::{Args, Config};
use crate::console::Console;
use crate::error::App;
use crate::player::Playbin;
use clap::Parser;
use flexi_logger::{Cleanup, Criterion, Duplicate, FileSpec, Logger, LoggerHandle, Naming};
use log::info;
use std::fs;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse();

    // Failures are already reported on stderr.
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}

fn run(args: Args) -> Result<(), App> {
    let console = Console::stdio();
    let config = Config::load(args).inspect_err(|e| console.eprintln(e))?;
    let _logger = start_logger(&config).inspect_err(|e| console.eprintln(e))?;
    info!("Configuration: {config:?}");

    player::play(&config.uri, Playbin::new, &console, config.quit_on_eos)
}

fn start_logger(config: &Config) -> Result<LoggerHandle, App> {
    fs::create_dir_all(&config.log_dir)?;

    let logger = match &config.log_level {
        Some(spec) => Logger::try_with_str(spec)?,
        None => Logger::try_with_env_or_str("info")?,
    };

    let handle = logger
        .log_to_file(FileSpec::default().directory(&config.log_dir))
        .rotate(
            Criterion::Size(1_000_000),
            Naming::Timestamps,
            Cleanup::KeepLogFiles(3),
        )
        .duplicate_to_stderr(Duplicate::None)
        .start()?;
    Ok(handle)
}
