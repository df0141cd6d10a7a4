use clap::Parser;
use quake_processor::cli::{run, Cli};
use quake_processor::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli).await
}
