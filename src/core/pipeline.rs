use crate::core::extract::{collect_script_text, locate_embedded_json, parse_embedded_json};
use crate::core::load;
use crate::domain::model::{Record, FIELD_RENAMES};
use crate::domain::ports::{ConfigProvider, Pipeline};
use crate::utils::error::{EtlError, Result};
use reqwest::Client;
use std::collections::HashMap;

/// The one configured source/table pair: fetches the page, isolates the
/// embedded record payload, normalizes it and bulk-inserts into MySQL.
pub struct ScrapePipeline<C: ConfigProvider> {
    config: C,
    client: Client,
}

impl<C: ConfigProvider> ScrapePipeline<C> {
    pub fn new(config: C) -> Result<Self> {
        // TLS verification stays on; only the timeout deviates from defaults.
        let client = Client::builder().timeout(config.request_timeout()).build()?;
        Ok(Self { config, client })
    }
}

#[async_trait::async_trait]
impl<C: ConfigProvider> Pipeline for ScrapePipeline<C> {
    async fn extract(&self) -> Result<Vec<Record>> {
        tracing::debug!("fetching source page: {}", self.config.source_url());
        let response = self.client.get(self.config.source_url()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;

        let scripts = collect_script_text(&body);
        let payload = locate_embedded_json(&scripts).ok_or_else(|| EtlError::Extraction {
            message: "no embedded record payload found in page scripts".to_string(),
        })?;
        let records = parse_embedded_json(payload)?;
        tracing::debug!("decoded {} raw records from page", records.len());
        Ok(records)
    }

    async fn transform(&self, batch: Vec<Record>) -> Result<Vec<Record>> {
        normalize(batch)
    }

    async fn load(&self, batch: Vec<Record>) -> Result<u64> {
        load::insert_batch(self.config.database(), self.config.table_name(), &batch).await
    }
}

/// Renames short keys to canonical column names and drops every record with a
/// missing or empty field. All-or-nothing: a structurally malformed batch
/// yields an error, never a partially transformed one.
fn normalize(batch: Vec<Record>) -> Result<Vec<Record>> {
    for record in &batch {
        if let Some((key, value)) = record
            .data
            .iter()
            .find(|(_, value)| value.is_object() || value.is_array())
        {
            return Err(EtlError::Normalization {
                message: format!("field {} holds a nested value, expected a flat record: {}", key, value),
            });
        }
    }

    Ok(batch.iter().filter_map(rename_complete).collect())
}

/// Projects one record onto the rename table. Returns `None` when any
/// canonical field is absent, null or blank.
fn rename_complete(record: &Record) -> Option<Record> {
    let mut data = HashMap::with_capacity(FIELD_RENAMES.len());
    for (short, canonical) in FIELD_RENAMES {
        let value = record.get(short)?;
        if value.is_null() {
            return None;
        }
        if let Some(text) = value.as_str() {
            if text.trim().is_empty() {
                return None;
            }
        }
        data.insert(canonical.to_string(), value.clone());
    }
    Some(Record { data })
}
