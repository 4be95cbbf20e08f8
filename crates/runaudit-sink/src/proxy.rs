//! HTTP audit proxy backend.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use runaudit_core::AuditRecord;

use crate::error::DeliveryError;
use crate::DeliverySink;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Posts the record as a JSON body to `<base_url>/report`.
#[derive(Debug, Clone)]
pub struct ProxySink {
    base_url: String,
}

impl ProxySink {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl DeliverySink for ProxySink {
    async fn deliver(&self, record: &AuditRecord) -> Result<(), DeliveryError> {
        let body = serde_json::to_vec(record)?;

        // Fresh client per attempt: no connection outlives this call.
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        let response = client
            .post(format!("{}/report", self.base_url.trim_end_matches('/')))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let response_body = response.text().await?;

        if status != StatusCode::OK {
            return Err(DeliveryError::UnexpectedStatus {
                status: status.as_u16(),
                body: response_body,
            });
        }

        Ok(())
    }
}
