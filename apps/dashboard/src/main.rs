mod commands;
mod config;

use clap::Parser;
use sitecam_shared::{telemetry, AppState};

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    let config = Config::parse();

    telemetry::configure(config.log_format)?;
    tracing::info!(env = %config.env, "sitecam starting");

    let mut state = AppState::init();
    let result = commands::run(config.command, &mut state, &config.report_dir).await;
    state.teardown();

    result?;
    Ok(())
}
