use clap::Parser;
use cloudpub_cli::commands::{run, Cli};
use cloudpub_cli::config::Config;
use cloudpub_cli::telemetry::init_tracing;
use colored::*;
use std::io;
use std::process;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = handle(cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

fn handle(cli: Cli) -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    init_tracing(&config.log_filter);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(cli, &config, &mut out)
}
