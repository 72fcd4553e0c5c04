use crate::core::etl::EtlEngine;
use crate::domain::model::JobOutcome;
use crate::domain::ports::Pipeline;
use crate::utils::heartbeat::Heartbeat;
use tracing::{error, info, warn};

/// Wraps the orchestrator with liveness reporting: one run, one ping.
pub struct JobRunner<P: Pipeline> {
    engine: EtlEngine<P>,
    heartbeat: Heartbeat,
}

impl<P: Pipeline> JobRunner<P> {
    pub fn new(pipeline: P, heartbeat: Heartbeat) -> Self {
        Self {
            engine: EtlEngine::new(pipeline),
            heartbeat,
        }
    }

    /// Runs the pipeline once and reports the outcome. The ping itself is
    /// best-effort: its failure is logged and never changes the outcome.
    pub async fn run(&self) -> JobOutcome {
        info!("starting scheduled pipeline run");
        match self.engine.run().await {
            Ok(summary) => {
                info!(
                    "run finished: {} extracted, {} kept, {} dropped, outcome {:?}",
                    summary.extracted, summary.kept, summary.dropped, summary.outcome
                );
                match self.heartbeat.ping_success().await {
                    Ok(()) => info!("heartbeat ping successful"),
                    Err(err) => warn!("{err}"),
                }
                JobOutcome::Success(summary)
            }
            Err(err) => {
                error!("pipeline run failed: {err}");
                if let Err(ping_err) = self.heartbeat.ping_failure().await {
                    warn!("{ping_err}");
                }
                JobOutcome::Failure(err)
            }
        }
    }
}
