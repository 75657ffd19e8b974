use crate::domain::model::{TaxPayerId, TaxPayerRecord};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// The external system of record for taxpayer data.
#[async_trait]
pub trait RecordService: Send + Sync {
    async fn get_all_tax_payers(&self) -> Result<Vec<TaxPayerRecord>>;
    async fn create_tax_payer(&self, record: &TaxPayerRecord) -> Result<()>;
    /// Zero or one matching record.
    async fn search_tax_payer(&self, tid: &TaxPayerId) -> Result<Vec<TaxPayerRecord>>;
}

pub trait ConfigProvider: Send + Sync {
    fn service_endpoint(&self) -> &str;
    fn request_timeout(&self) -> Option<Duration>;
    fn page_size(&self) -> usize;
}
