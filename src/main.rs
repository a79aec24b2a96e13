use clap::Parser;
use dotenv::dotenv;
use log::info;
use std::io;
use std::process::ExitCode;

mod config;
mod error;
mod handlers;
mod models;
mod services;

use config::{Cli, Config};
use services::ApiClient;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_cli(Cli::parse())?;
    let client = ApiClient::new(&config)?;
    info!("Using endpoint {}", client.url());

    let mut input = io::stdin().lock();
    let mut out = io::stdout().lock();
    let all_ok = handlers::run_session(&client, &config, &mut input, &mut out).await?;

    if !all_ok && config.fail_on_error {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
