//! AWD CLI - render and drive the Australia wildfire dashboard.

use clap::Parser;
use log::debug;

#[derive(Parser)]
#[command(
    name = "awd-cli",
    version,
    about = "Australia wildfire dashboard toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: awd_cmd::Command,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    debug!("awd-cli {}", env!("CARGO_PKG_VERSION"));
    awd_cmd::run(cli.command).await
}
