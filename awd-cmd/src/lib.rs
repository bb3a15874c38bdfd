//! Command implementations for the AWD CLI.
//!
//! Every command loads the wildfire dataset once (from a local file or the
//! remote CSV), then either renders one dashboard view, reacts to a stream of
//! filter events, or reports on the dataset.

use awd_core::region::RegionCode;
use clap::Subcommand;
use std::path::PathBuf;

pub mod dataset;
pub mod render;
pub mod source;
pub mod watch;

pub use source::SourceArgs;

#[derive(Subcommand)]
pub enum Command {
    /// Render one dashboard view to a directory
    Render {
        /// Region code (NSW, NT, QL, SA, TA, VI, WA)
        #[arg(short = 'r', long)]
        region: Option<RegionCode>,

        /// Year to show
        #[arg(short = 'y', long)]
        year: Option<i32>,

        /// Output directory for charts, weather, map and dashboard.html
        #[arg(short = 'o', long)]
        out: PathBuf,

        #[command(flatten)]
        source: SourceArgs,

        /// Skip geolocation and weather lookups (degraded weather panel)
        #[arg(long)]
        offline: bool,
    },

    /// Read filter events from stdin and print a summary per reaction
    Watch {
        #[command(flatten)]
        source: SourceArgs,

        /// Skip geolocation and weather lookups (degraded weather panel)
        #[arg(long)]
        offline: bool,
    },

    /// List the years present in the dataset
    Years {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Download the dataset CSV to a local file
    Fetch {
        /// Output path for the CSV
        #[arg(short = 'o', long)]
        out: PathBuf,

        /// Dataset URL (defaults to the configured one)
        #[arg(long)]
        url: Option<String>,

        /// JSON config file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Render {
            region,
            year,
            out,
            source,
            offline,
        } => render::run_render(&source, region, year, &out, offline).await,
        Command::Watch { source, offline } => watch::run_watch(&source, offline).await,
        Command::Years { source } => dataset::run_years(&source).await,
        Command::Fetch { out, url, config } => {
            dataset::run_fetch(&out, url.as_deref(), config.as_deref()).await
        }
    }
}
