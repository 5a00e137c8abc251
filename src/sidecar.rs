use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use thiserror::Error;

/// Failure of a single outbound call to the sidecar's publish API.
#[derive(Debug, Error)]
pub enum SidecarError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status: {status} body={body}")]
    UnexpectedStatus {
        status: reqwest::StatusCode,
        body: String,
    },
}

/// A publish failure annotated with the destination it was bound for.
/// The underlying sidecar failure stays reachable through `source()`.
#[derive(Debug, Error)]
#[error("error publishing to {pubsub}/{topic}")]
pub struct PublishError {
    pub pubsub: String,
    pub topic: String,
    #[source]
    pub source: SidecarError,
}

/// Seam over the outbound publish call so handlers can be exercised
/// against substitute clients.
#[async_trait]
pub trait Publisher: Send + Sync {
    async fn publish(&self, pubsub: &str, topic: &str, payload: Bytes)
        -> Result<(), SidecarError>;
}

/// Long-lived handle to the sidecar's HTTP publish endpoint. Created once
/// at startup and shared by all handler invocations; the inner
/// `reqwest::Client` is safe for concurrent use.
#[derive(Clone)]
pub struct SidecarClient {
    http: Client,
    base_url: String,
}

impl SidecarClient {
    pub fn new(sidecar_port: u16) -> Result<Self, SidecarError> {
        Ok(Self::with_base_url(
            format!("http://127.0.0.1:{}", sidecar_port),
            Client::builder().build()?,
        ))
    }

    pub fn with_base_url(base_url: impl Into<String>, http: Client) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { http, base_url }
    }
}

#[async_trait]
impl Publisher for SidecarClient {
    async fn publish(
        &self,
        pubsub: &str,
        topic: &str,
        payload: Bytes,
    ) -> Result<(), SidecarError> {
        let url = format!("{}/v1.0/publish/{}/{}", self.base_url, pubsub, topic);
        let res = self.http.post(url).body(payload).send().await?;

        if res.status().is_success() {
            Ok(())
        } else {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            Err(SidecarError::UnexpectedStatus { status, body })
        }
    }
}
