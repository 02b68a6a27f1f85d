use anyhow::Result;
use clap::Parser;

mod cache;
mod cli;
mod config;
mod descriptor;
mod lander;
mod ocr2;
mod payees;
mod wallet;

use cli::args::Cli;
use cli::context::{init_tracing, load_configuration};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_configuration(cli.config.clone())?;
    init_tracing(&config.global.logging)?;

    cli::run(cli, config).await
}
