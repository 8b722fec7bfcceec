use async_trait::async_trait;
use bytes::Bytes;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::{UploadError, UploadResult};

pub const HEADER_CONTENT_CRC32: &str = "Content-CRC32";

/// One PUT of a payload to an upload host.
#[derive(Debug, Clone)]
pub struct TosPutRequest {
    pub host: String,
    pub object_id: String,
    /// Per-object credential from the apply step
    pub auth: String,
    /// `Content-CRC32` value for `body`
    pub checksum: String,
    pub body: Bytes,
}

impl TosPutRequest {
    pub fn url(&self, scheme: &str) -> String {
        format!("{}://{}/{}", scheme, self.host, self.object_id)
    }
}

/// Outcome of a transfer, distinguishing the two success layers.
#[derive(Debug, Clone, PartialEq)]
pub enum TosOutcome {
    /// HTTP 200 and `success == 0`
    Success { payload: Value },
    /// Non-200 HTTP status
    TransportError {
        status: u16,
        body: String,
        remote_addr: String,
    },
    /// HTTP 200 but the storage service reported `success != 0`
    ApplicationError { success: i64, payload: Value },
}

#[derive(Debug, Default, Deserialize)]
struct TosEnvelope {
    #[serde(default)]
    success: i64,
    #[serde(default)]
    payload: Value,
}

impl TosOutcome {
    /// Classify a raw transfer response.
    ///
    /// A 200 body of `null` counts as `success == 0`. Any other body that is
    /// not a `{success, payload}` envelope is a decode error, not an outcome.
    pub fn classify(status: u16, body: &[u8], remote_addr: &str) -> UploadResult<Self> {
        if status != 200 {
            return Ok(Self::TransportError {
                status,
                body: String::from_utf8_lossy(body).into_owned(),
                remote_addr: remote_addr.to_string(),
            });
        }

        let envelope = serde_json::from_slice::<Option<TosEnvelope>>(body)?.unwrap_or_default();
        if envelope.success != 0 {
            return Ok(Self::ApplicationError {
                success: envelope.success,
                payload: envelope.payload,
            });
        }
        Ok(Self::Success {
            payload: envelope.payload,
        })
    }

    pub fn into_result(self) -> UploadResult<Value> {
        match self {
            Self::Success { payload } => Ok(payload),
            Self::TransportError {
                status,
                body,
                remote_addr,
            } => Err(UploadError::Transport {
                status,
                body,
                remote_addr,
            }),
            Self::ApplicationError { success, payload } => {
                Err(UploadError::Tos { success, payload })
            }
        }
    }
}

/// Moves payload bytes to an upload host
#[async_trait]
pub trait TosTransport: Send + Sync {
    /// Send one PUT. `Err` only for requests that never produced a response.
    async fn put_object(&self, request: TosPutRequest) -> UploadResult<TosOutcome>;
}

/// reqwest-backed transport; one PUT per call, default client timeouts.
#[derive(Debug, Clone)]
pub struct HttpTosTransport {
    http: reqwest::Client,
    scheme: String,
}

impl HttpTosTransport {
    pub fn new<S: Into<String>>(scheme: S) -> Self {
        Self::with_http_client(reqwest::Client::new(), scheme)
    }

    pub fn with_http_client<S: Into<String>>(http: reqwest::Client, scheme: S) -> Self {
        Self {
            http,
            scheme: scheme.into(),
        }
    }
}

impl Default for HttpTosTransport {
    fn default() -> Self {
        Self::new("http")
    }
}

#[async_trait]
impl TosTransport for HttpTosTransport {
    async fn put_object(&self, request: TosPutRequest) -> UploadResult<TosOutcome> {
        let url = request.url(&self.scheme);
        debug!("PUT {} ({} bytes)", url, request.body.len());

        let resp = self
            .http
            .put(&url)
            .header(HEADER_CONTENT_CRC32, &request.checksum)
            .header(reqwest::header::AUTHORIZATION, &request.auth)
            .body(request.body)
            .send()
            .await?;

        let status = resp.status().as_u16();
        let body = resp.bytes().await?;
        TosOutcome::classify(status, &body, &request.host)
    }
}
