use clap::Parser;
use log::{error, warn, LevelFilter};
use std::process::ExitCode;

use rusbit_meta::cli::Cli;
use rusbit_meta::config::Config;
use rusbit_meta::engine::use_command;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { LevelFilter::Debug } else { LevelFilter::Warn };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let config = match Config::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            warn!("ignoring config {}: {:#}", cli.config.display(), e);
            Config::default()
        }
    };

    let stdout = std::io::stdout();
    match use_command(&cli.command, &config, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
