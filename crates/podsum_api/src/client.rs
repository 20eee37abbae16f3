use std::time::Duration;

use client_logging::client_debug;
use reqwest::multipart;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::types::{ProcessRequest, ProcessResponse, ResultsResponse, UploadResponse};

/// Network-level failure on one of the three operations. Never mixed with
/// backend pipeline errors, which arrive as data in `ProcessingStatus`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out")]
    Timeout,
    #[error("server returned {code}: {message}")]
    Status { code: u16, message: String },
    #[error("invalid response body: {0}")]
    Decode(String),
}

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// The user's input source; exactly one alternative, enforced upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadSource {
    File { file_name: String, bytes: Vec<u8> },
    RemoteUrl { url: String },
}

/// The three backend operations. No operation retries internally; retry
/// policy belongs to the caller.
#[async_trait::async_trait]
pub trait JobApi: Send + Sync {
    async fn submit(&self, source: UploadSource) -> Result<UploadResponse, TransportError>;

    async fn start(
        &self,
        job_id: &str,
        enable_tts: bool,
    ) -> Result<ProcessResponse, TransportError>;

    async fn fetch_status(&self, job_id: &str) -> Result<ResultsResponse, TransportError>;
}

#[derive(Debug, Clone)]
pub struct HttpJobApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpJobApi {
    pub fn new(settings: ApiSettings) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| TransportError::Network(err.to_string()))?;
        Ok(Self {
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn decode<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, TransportError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = if body.trim().is_empty() {
                status.to_string()
            } else {
                body
            };
            return Err(TransportError::Status {
                code: status.as_u16(),
                message,
            });
        }
        response
            .json::<T>()
            .await
            .map_err(|err| TransportError::Decode(err.to_string()))
    }
}

#[async_trait::async_trait]
impl JobApi for HttpJobApi {
    async fn submit(&self, source: UploadSource) -> Result<UploadResponse, TransportError> {
        let form = match source {
            UploadSource::File { file_name, bytes } => {
                client_debug!("upload file name={} bytes={}", file_name, bytes.len());
                multipart::Form::new().part("file", multipart::Part::bytes(bytes).file_name(file_name))
            }
            UploadSource::RemoteUrl { url } => {
                client_debug!("upload url={}", url);
                multipart::Form::new().text("podcast_url", url)
            }
        };
        let response = self
            .client
            .post(self.endpoint("upload"))
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        Self::decode(response).await
    }

    async fn start(
        &self,
        job_id: &str,
        enable_tts: bool,
    ) -> Result<ProcessResponse, TransportError> {
        client_debug!("start job_id={} enable_tts={}", job_id, enable_tts);
        let response = self
            .client
            .post(self.endpoint("process"))
            .json(&ProcessRequest {
                job_id: job_id.to_owned(),
                enable_tts,
            })
            .send()
            .await
            .map_err(map_reqwest_error)?;
        Self::decode(response).await
    }

    async fn fetch_status(&self, job_id: &str) -> Result<ResultsResponse, TransportError> {
        let response = self
            .client
            .get(self.endpoint(&format!("results/{job_id}")))
            .send()
            .await
            .map_err(map_reqwest_error)?;
        Self::decode(response).await
    }
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        return TransportError::Timeout;
    }
    TransportError::Network(err.to_string())
}
