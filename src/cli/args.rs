use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cwa-forecast")]
#[command(about = "Fetch, normalize and store CWA weather forecasts")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(
        short,
        long,
        global = true,
        help = "Settings file [default: cwa-forecast.toml if present]"
    )]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download (or reuse the cached) feed and replace the stored forecasts
    Update {
        #[arg(short, long, help = "Discard the cached feed and download again")]
        force: bool,

        #[arg(short, long, help = "SQLite database path")]
        database: Option<PathBuf>,

        #[arg(long, help = "CWA open data API key")]
        api_key: Option<String>,
    },

    /// Process a local JSON payload and replace the stored forecasts
    Process {
        #[arg(short, long, help = "Input JSON file")]
        input: PathBuf,

        #[arg(short, long, help = "SQLite database path")]
        database: Option<PathBuf>,

        #[arg(long, default_value = "false")]
        validate_only: bool,
    },

    /// Print the stored forecasts
    Show {
        #[arg(short, long, help = "SQLite database path")]
        database: Option<PathBuf>,

        #[arg(short, long, default_value = "0", help = "Maximum rows to print (0 = all)")]
        limit: usize,
    },

    /// Export the stored forecasts to CSV or Parquet
    Export {
        #[arg(short, long, help = "SQLite database path")]
        database: Option<PathBuf>,

        #[arg(
            short,
            long,
            help = "Output file path [default: output/cwa-forecast-{YYMMDD}.{format}]"
        )]
        output_file: Option<PathBuf>,

        #[arg(short, long, default_value = "csv", help = "csv or parquet")]
        format: String,

        #[arg(long, default_value = "snappy", help = "Parquet compression")]
        compression: String,
    },

    /// List every location list found in a payload and the one that would be used
    Inspect {
        #[arg(short, long, help = "Input JSON file [default: the feed cache]")]
        input: Option<PathBuf>,
    },
}
