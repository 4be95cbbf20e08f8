//! Search-index backend.

use std::time::Duration;

use async_trait::async_trait;
use runaudit_core::AuditRecord;
use uuid::Uuid;

use crate::error::DeliveryError;
use crate::DeliverySink;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Indexes the record as one JSON document with immediate-refresh
/// semantics.
///
/// A fresh UUIDv4 document id is minted per delivery attempt — the record
/// itself has no identity, and a half-failed attempt must never collide
/// with its own retry.
#[derive(Debug, Clone)]
pub struct IndexSink {
    url: String,
    index: String,
    username: String,
    password: String,
}

impl IndexSink {
    pub fn new(
        url: impl Into<String>,
        index: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            index: index.into(),
            username: username.into(),
            password: password.into(),
        }
    }
}

#[async_trait]
impl DeliverySink for IndexSink {
    async fn deliver(&self, record: &AuditRecord) -> Result<(), DeliveryError> {
        let body = serde_json::to_vec(record)?;
        let doc_id = Uuid::new_v4();

        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        let url = format!(
            "{}/{}/_doc/{}",
            self.url.trim_end_matches('/'),
            self.index,
            doc_id
        );
        let response = client
            .put(&url)
            .query(&[("refresh", "true")])
            .basic_auth(&self.username, Some(&self.password))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let envelope: serde_json::Value = response.json().await?;

        if !status.is_success() || envelope.get("error").is_some() {
            return Err(DeliveryError::IndexRejected {
                status: status.as_u16(),
                body: envelope.to_string(),
            });
        }

        // The acknowledgement is informational only.
        let result = envelope
            .get("result")
            .and_then(|v| v.as_str())
            .unwrap_or("unknown");
        tracing::info!(doc_id = %doc_id, result, "audit record indexed");

        Ok(())
    }
}
