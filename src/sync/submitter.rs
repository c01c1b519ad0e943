use std::future::Future;

use anyhow::Context;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use thiserror::Error;

use super::record::SyncRecord;
use crate::config::Config;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("failed to encode record: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("HTTP error! status: {status}")]
    Status { status: u16, body: String },
    #[error("response was not JSON: {0}")]
    InvalidResponse(#[source] serde_json::Error),
}

/// Delivers an encoded record and returns the service's JSON reply
pub trait SyncTransport: Send + Sync {
    fn post_json(&self, body: Vec<u8>) -> impl Future<Output = Result<Value, SyncError>> + Send;
}

/// POSTs records to `{base_url}/api/subjects`
#[derive(Clone)]
pub struct HttpSyncTransport {
    client: Client,
    url: String,
}

impl HttpSyncTransport {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(config.sync.timeout())
            .build()
            .context("Failed to build sync HTTP client")?;

        Ok(Self {
            client,
            url: config.sync_url(),
        })
    }
}

impl SyncTransport for HttpSyncTransport {
    async fn post_json(&self, body: Vec<u8>) -> Result<Value, SyncError> {
        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SyncError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(SyncError::InvalidResponse)
    }
}

/// Encodes and submits records. One attempt per call; failures are returned, not retried.
pub struct SyncSubmitter<T> {
    transport: T,
}

impl<T: SyncTransport> SyncSubmitter<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    #[cfg(test)]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn submit(&self, record: &SyncRecord) -> Result<Value, SyncError> {
        let body = record.to_json().map_err(SyncError::Encode)?;
        tracing::debug!(
            "Syncing \"{}\" with {} task(s) ({} bytes)",
            record.title,
            record.tasks.len(),
            body.len()
        );

        match self.transport.post_json(body).await {
            Ok(reply) => {
                tracing::info!("Data synced successfully: {}", reply);
                Ok(reply)
            }
            Err(e) => {
                if let SyncError::Status { ref body, .. } = e {
                    tracing::error!("Error syncing data: {} ({})", e, body);
                } else {
                    tracing::error!("Error syncing data: {}", e);
                }
                Err(e)
            }
        }
    }
}

#[cfg(test)]
pub mod fake {
    use std::sync::Mutex;

    use super::*;

    /// Transport that records posted bodies and answers with a canned result
    pub struct FakeTransport {
        pub status: Option<u16>,
        pub posted: Mutex<Vec<Vec<u8>>>,
    }

    impl FakeTransport {
        pub fn accepting() -> Self {
            Self {
                status: None,
                posted: Mutex::new(Vec::new()),
            }
        }

        pub fn rejecting(status: u16) -> Self {
            Self {
                status: Some(status),
                posted: Mutex::new(Vec::new()),
            }
        }

        pub fn posted_json(&self) -> Vec<Value> {
            self.posted
                .lock()
                .unwrap()
                .iter()
                .map(|body| serde_json::from_slice(body).unwrap())
                .collect()
        }
    }

    impl SyncTransport for FakeTransport {
        async fn post_json(&self, body: Vec<u8>) -> Result<Value, SyncError> {
            self.posted.lock().unwrap().push(body);
            match self.status {
                None => Ok(serde_json::json!({"id": 1})),
                Some(status) => Err(SyncError::Status {
                    status,
                    body: String::new(),
                }),
            }
        }
    }
}
