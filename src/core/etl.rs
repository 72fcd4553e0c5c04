use crate::domain::model::{LoadOutcome, RunSummary, Stage};
use crate::domain::ports::Pipeline;
use crate::utils::error::{EtlError, Result};
use tracing::{error, info, warn};

/// Linear orchestrator: fetch, normalize, then load or skip. No retry, no
/// branching beyond the empty-batch short circuit.
pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Runs one pass. Fetch, extraction and normalization failures are
    /// logged, recorded in the summary and degraded to an empty batch; only
    /// a load failure aborts the run.
    pub async fn run(&self) -> Result<RunSummary> {
        let mut degraded = None;

        info!("fetching source records");
        let raw = match self.pipeline.extract().await {
            Ok(batch) => batch,
            Err(err) => {
                error!("{err}");
                degraded = Some(match err {
                    EtlError::Fetch(_) => Stage::Fetch,
                    _ => Stage::Extract,
                });
                Vec::new()
            }
        };
        let extracted = raw.len();
        info!("extracted {extracted} raw records");

        let normalized = match self.pipeline.transform(raw).await {
            Ok(batch) => batch,
            Err(err) => {
                error!("{err}");
                degraded = Some(Stage::Normalize);
                Vec::new()
            }
        };
        let kept = normalized.len();
        let dropped = extracted.saturating_sub(kept);
        if dropped > 0 {
            info!("dropped {dropped} incomplete records");
        }

        let outcome = if normalized.is_empty() {
            warn!("no records to load, skipping load stage");
            LoadOutcome::Skipped
        } else {
            let rows = self.pipeline.load(normalized).await?;
            info!("inserted {rows} rows");
            LoadOutcome::Loaded(rows)
        };

        Ok(RunSummary {
            extracted,
            kept,
            dropped,
            outcome,
            degraded,
        })
    }
}
