use std::process::ExitCode;

use clap::Parser;
use console::style;

use crate::cli::{App, Commands};
use crate::config::Config;

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod pipeline;
mod ui;

#[tokio::main]
async fn main() -> ExitCode {
    let app = App::parse();
    logging::init(app.verbose);

    match run(app).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err:#}", style("error:").red().bold());
            ExitCode::FAILURE
        }
    }
}

async fn run(app: App) -> anyhow::Result<()> {
    let config = Config::load(app.config.as_deref())?;
    match app.cmd {
        Commands::Bundle(arg) => commands::bundle(arg, &config).await,
        Commands::Inspect(arg) => commands::inspect(arg, &config).await,
    }
}
