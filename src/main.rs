use anyhow::Context;
use clap::Parser;
use cwa_forecast::cli::{run, Cli};
use cwa_forecast::utils::init_logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_file.as_deref()).context("Failed to set up logging")?;
    run(cli).await.context("cwa-forecast failed")
}
