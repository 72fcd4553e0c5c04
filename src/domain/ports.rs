use crate::domain::model::{DatabaseConfig, Record};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait ConfigProvider: Send + Sync {
    fn source_url(&self) -> &str;
    fn table_name(&self) -> &str;
    fn database(&self) -> &DatabaseConfig;
    fn request_timeout(&self) -> Duration;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<Record>>;
    async fn transform(&self, batch: Vec<Record>) -> Result<Vec<Record>>;
    async fn load(&self, batch: Vec<Record>) -> Result<u64>;
}
