pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::{Cli, JobConfig};
pub use core::{etl::EtlEngine, pipeline::ScrapePipeline, runner::JobRunner};
pub use domain::model::{JobOutcome, LoadOutcome, Record, RunSummary};
pub use utils::error::{EtlError, Result};
pub use utils::heartbeat::Heartbeat;
