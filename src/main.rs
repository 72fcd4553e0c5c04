use clap::Parser;
use mp_etl::utils::{logger, validation::Validate};
use mp_etl::{Cli, Heartbeat, JobConfig, JobOutcome, JobRunner, ScrapePipeline};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = JobConfig::from_file(&cli.config)?;
    config.validate()?;

    logger::init_file_logger(&config.logging.path, cli.verbose)?;

    tracing::info!("starting the cron job task");

    let heartbeat = Heartbeat::new(config.monitoring.healthchecks_url.clone())?;
    let pipeline = ScrapePipeline::new(config)?;
    let runner = JobRunner::new(pipeline, heartbeat);

    match runner.run().await {
        JobOutcome::Success(_) => Ok(()),
        // A swallowed internal failure still exits nonzero so cron-level
        // tooling can tell the two apart.
        JobOutcome::Failure(_) => std::process::exit(1),
    }
}
