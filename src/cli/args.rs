use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "quake-processor")]
#[command(about = "Earthquake catalogue cleaner and tsunami analysis tool")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Configuration file (TOML)")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Clean an earthquake CSV, print tsunami statistics and export chart data
    Analyze {
        #[arg(short, long, help = "Input CSV file")]
        input: PathBuf,

        #[arg(
            short = 'o',
            long,
            help = "Chart data output path [default: output/quake-charts-{YYMMDD}.json]"
        )]
        charts_out: Option<PathBuf>,

        #[arg(long, help = "Skip writing chart data")]
        no_charts: bool,

        #[arg(short, long, default_value = "0", help = "Number of clean rows to print")]
        sample: usize,
    },

    /// Show how the columns of a CSV map onto semantic roles
    Inspect {
        #[arg(short, long, help = "Input CSV file")]
        input: PathBuf,
    },

    /// Look up the geolocation of this machine's public IP address
    LocateIp {
        #[arg(long, help = "Override the lookup endpoint")]
        endpoint: Option<String>,
    },
}
