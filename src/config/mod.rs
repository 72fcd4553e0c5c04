pub mod toml_config;

pub use toml_config::JobConfig;

use clap::Parser;

/// One-shot pipeline run; all job parameters live in the TOML config file,
/// so a bare invocation performs exactly one execution and exits.
#[derive(Debug, Parser)]
#[command(name = "mp-etl")]
#[command(about = "Scrapes professor ratings from a web page and loads them into MySQL")]
pub struct Cli {
    #[arg(long, default_value = "mp-etl.toml")]
    pub config: String,

    #[arg(long, help = "Also log to stderr, at debug level")]
    pub verbose: bool,
}
