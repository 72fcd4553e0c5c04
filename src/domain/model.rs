use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;

/// Rename table mapping the short keys embedded in the source page to the
/// canonical column names of the destination table. Column identifiers are
/// drawn from this table only, never from network input.
pub const FIELD_RENAMES: [(&str, &str); 6] = [
    ("i", "ID"),
    ("n", "Nombre"),
    ("a", "Apellido"),
    ("d", "Departamento/Facultad"),
    ("m", "# de calif."),
    ("c", "Promedio"),
];

/// Canonical column names in insert order.
pub fn canonical_columns() -> impl Iterator<Item = &'static str> {
    FIELD_RENAMES.iter().map(|(_, name)| *name)
}

/// A single flat record, keyed by short codes before normalization and by
/// canonical column names after.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub data: HashMap<String, serde_json::Value>,
}

impl Record {
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.data.get(key)
    }

    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, serde_json::Value)>,
        K: Into<String>,
    {
        Self {
            data: pairs.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Connection parameters for the destination database. Supplied by
/// configuration, immutable for the run, never persisted.
#[derive(Clone, Deserialize)]
pub struct DatabaseConfig {
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
}

fn default_port() -> u16 {
    3306
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Stage that failed and was degraded to an empty batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Fetch,
    Extract,
    Normalize,
}

/// Final effect of the load step for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded(u64),
    Skipped,
}

/// Per-run report. Distinguishes "no data" from "a stage failed" without
/// requiring log inspection.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub extracted: usize,
    pub kept: usize,
    pub dropped: usize,
    pub outcome: LoadOutcome,
    pub degraded: Option<Stage>,
}

/// Overall job result, reported exactly once per run to the monitoring
/// endpoint.
#[derive(Debug)]
pub enum JobOutcome {
    Success(RunSummary),
    Failure(crate::utils::error::EtlError),
}
