mod config;
mod demo_spec;
mod repl;
mod synthetic;

use anyhow::Result;
use std::process::ExitCode;
use tracing::info;

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt::init();

    info!("starting hybrid-trader...");

    let config = config::Config::load()?;
    info!(environment = ?config.environment, "configuration loaded");

    println!("hybrid-trader - hybrid LLM/deterministic trading pipeline");
    println!("environment: {:?}", config.environment);

    let code = repl::Repl::new(config).run()?;
    Ok(ExitCode::from(code as u8))
}
