use crate::domain::model::{TaxPayerId, TaxPayerRecord};
use crate::domain::ports::{ConfigProvider, RecordService};
use crate::utils::error::{DeskError, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use std::time::Duration;
use url::Url;

const COLLECTION_PATH: &str = "taxpayers";
const SEARCH_PATH: &str = "taxpayers/search";

/// Record service reached over HTTP with JSON bodies.
#[derive(Debug, Clone)]
pub struct HttpRecordService {
    client: Client,
    base: Url,
}

impl HttpRecordService {
    pub fn new(endpoint: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut base = Url::parse(endpoint).map_err(|e| DeskError::InvalidConfigValueError {
            field: "service.endpoint".to_string(),
            value: endpoint.to_string(),
            reason: format!("Invalid URL format: {}", e),
        })?;
        // Url::join replaces the last segment unless the path ends in '/'.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base,
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::new(config.service_endpoint(), config.request_timeout())
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn url(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .map_err(|e| DeskError::ConfigError {
                message: format!("cannot build URL for '{}': {}", path, e),
            })
    }

    async fn ensure_success(operation: &'static str, response: Response) -> Result<Response> {
        let status = response.status();
        tracing::debug!("{} -> {}", operation, status);
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(DeskError::Service {
            operation,
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl RecordService for HttpRecordService {
    async fn get_all_tax_payers(&self) -> Result<Vec<TaxPayerRecord>> {
        let url = self.url(COLLECTION_PATH)?;
        tracing::debug!("Fetching all taxpayers from: {}", url);

        let response = self.client.get(url).send().await?;
        let response = Self::ensure_success("list taxpayers", response).await?;
        let records: Vec<TaxPayerRecord> = response.json().await?;

        tracing::debug!("Received {} taxpayers", records.len());
        Ok(records)
    }

    async fn create_tax_payer(&self, record: &TaxPayerRecord) -> Result<()> {
        let url = self.url(COLLECTION_PATH)?;
        tracing::debug!("Creating taxpayer {} at: {}", record.tid, url);

        let response = self.client.post(url).json(record).send().await?;
        Self::ensure_success("create a taxpayer", response).await?;
        Ok(())
    }

    async fn search_tax_payer(&self, tid: &TaxPayerId) -> Result<Vec<TaxPayerRecord>> {
        let url = self.url(SEARCH_PATH)?;
        tracing::debug!("Searching taxpayer {} at: {}", tid, url);

        let response = self
            .client
            .get(url)
            .query(&[("tid", tid.as_str())])
            .send()
            .await?;
        let response = Self::ensure_success("search taxpayers", response).await?;
        let records: Vec<TaxPayerRecord> = response.json().await?;
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let service = HttpRecordService::new("http://localhost:8000/api", None).unwrap();
        assert_eq!(service.base_url().as_str(), "http://localhost:8000/api/");
        assert_eq!(
            service.url(COLLECTION_PATH).unwrap().as_str(),
            "http://localhost:8000/api/taxpayers"
        );
    }

    #[test]
    fn test_rejects_invalid_endpoint() {
        let err = HttpRecordService::new("not a url", None).unwrap_err();
        assert!(matches!(err, DeskError::InvalidConfigValueError { .. }));
    }

    #[tokio::test]
    async fn test_get_all_tax_payers() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/api/taxpayers");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!([
                    {"tid": "1", "firstName": "Ann", "lastName": "Lee", "address": "1 Main St"},
                    {"tid": 2, "firstName": "Bo", "lastName": "Kim", "address": "2 Main St"}
                ]));
        });

        let service = HttpRecordService::new(&server.url("/api"), None).unwrap();
        let records = service.get_all_tax_payers().await.unwrap();

        api_mock.assert();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].first_name, "Ann");
        assert_eq!(records[1].tid.as_str(), "2");
    }

    #[tokio::test]
    async fn test_non_success_status_is_service_error() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/taxpayers");
            then.status(503).body("maintenance");
        });

        let service = HttpRecordService::new(&server.base_url(), None).unwrap();
        let err = service.get_all_tax_payers().await.unwrap_err();

        api_mock.assert();
        match err {
            DeskError::Service { status, body, .. } => {
                assert_eq!(status, 503);
                assert_eq!(body, "maintenance");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
