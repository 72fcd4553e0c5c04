use crate::domain::model::DatabaseConfig;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_path, validate_url, Validate};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Job configuration for the one configured source/table pair.
#[derive(Debug, Clone, Deserialize)]
pub struct JobConfig {
    pub source: SourceConfig,
    pub load: LoadConfig,
    pub database: DatabaseConfig,
    pub monitoring: MonitoringConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    pub url: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoadConfig {
    pub table: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MonitoringConfig {
    pub healthchecks_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub path: String,
}

impl JobConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = substitute_env_vars(content);
        toml::from_str(&processed).map_err(|e| EtlError::InvalidConfig {
            field: "config file".to_string(),
            reason: e.to_string(),
        })
    }
}

/// Replaces `${VAR}` markers with environment values. Unknown variables are
/// left in place so validation can flag them.
fn substitute_env_vars(content: &str) -> String {
    let re = regex::Regex::new(r"\$\{([^}]+)\}").unwrap();
    re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
    })
    .to_string()
}

impl Validate for JobConfig {
    fn validate(&self) -> Result<()> {
        validate_url("source.url", &self.source.url)?;
        validate_url("monitoring.healthchecks_url", &self.monitoring.healthchecks_url)?;
        validate_non_empty_string("load.table", &self.load.table)?;
        validate_non_empty_string("database.host", &self.database.host)?;
        validate_non_empty_string("database.database", &self.database.database)?;
        validate_non_empty_string("database.user", &self.database.user)?;
        validate_path("logging.path", &self.logging.path)?;
        Ok(())
    }
}

impl ConfigProvider for JobConfig {
    fn source_url(&self) -> &str {
        &self.source.url
    }

    fn table_name(&self) -> &str {
        &self.load.table
    }

    fn database(&self) -> &DatabaseConfig {
        &self.database
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.source
                .timeout_seconds
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_CONFIG: &str = r#"
        [source]
        url = "https://www.misprofesores.com/escuelas/UANL-FCFM_2263"
        timeout_seconds = 20

        [load]
        table = "fcfm_profesores"

        [database]
        host = "localhost"
        database = "mis_profesores"
        user = "root"
        password = "password"

        [monitoring]
        healthchecks_url = "https://hc.example.com/ping/abc123"

        [logging]
        path = "logs/mp_pipeline.log"
    "#;

    #[test]
    fn parses_a_full_config() {
        let config = JobConfig::from_toml_str(FULL_CONFIG).unwrap();
        assert_eq!(
            config.source_url(),
            "https://www.misprofesores.com/escuelas/UANL-FCFM_2263"
        );
        assert_eq!(config.table_name(), "fcfm_profesores");
        assert_eq!(config.database.port, 3306);
        assert_eq!(config.request_timeout(), Duration::from_secs(20));
        config.validate().unwrap();
    }

    #[test]
    fn request_timeout_defaults_when_unset() {
        let config = JobConfig::from_toml_str(&FULL_CONFIG.replace("timeout_seconds = 20", ""))
            .unwrap();
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn substitutes_environment_variables() {
        std::env::set_var("MP_ETL_TEST_DB_PASSWORD", "secret-from-env");
        let config = JobConfig::from_toml_str(
            &FULL_CONFIG.replace("\"password\"", "\"${MP_ETL_TEST_DB_PASSWORD}\""),
        )
        .unwrap();
        assert_eq!(config.database.password, "secret-from-env");
    }

    #[test]
    fn leaves_unknown_variables_in_place() {
        let config = JobConfig::from_toml_str(
            &FULL_CONFIG.replace("\"password\"", "\"${MP_ETL_TEST_UNSET_VAR}\""),
        )
        .unwrap();
        assert_eq!(config.database.password, "${MP_ETL_TEST_UNSET_VAR}");
    }

    #[test]
    fn missing_section_is_a_config_error() {
        let err = JobConfig::from_toml_str("[source]\nurl = \"https://x.test\"").unwrap_err();
        assert!(matches!(err, EtlError::InvalidConfig { .. }));
    }

    #[test]
    fn validation_rejects_bad_source_url() {
        let config =
            JobConfig::from_toml_str(&FULL_CONFIG.replace(
                "https://www.misprofesores.com/escuelas/UANL-FCFM_2263",
                "ftp://nope",
            ))
            .unwrap();
        assert!(config.validate().is_err());
    }
}
