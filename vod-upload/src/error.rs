use thiserror::Error;
use vod_core::VodError;

/// Result type for upload operations
pub type UploadResult<T> = Result<T, UploadError>;

/// Errors that can occur while applying, transferring or committing an upload
#[derive(Error, Debug)]
pub enum UploadError {
    #[error("file size is zero")]
    EmptyPayload,

    #[error("file size {size} exceeds maximum {max}")]
    PayloadTooLarge { size: usize, max: usize },

    #[error("apply upload info failed: {code}: {message}")]
    Api {
        code: String,
        message: String,
        status: u16,
    },

    #[error("upload address not exist")]
    MissingUploadAddress,

    #[error("no tos host found")]
    NoUploadHost,

    #[error("no store info found")]
    NoStoreInfo,

    #[error("http status={status}, body={body}, remote_addr={remote_addr}")]
    Transport {
        status: u16,
        body: String,
        remote_addr: String,
    },

    #[error("tos err: success={success}, payload={payload}")]
    Tos {
        success: i64,
        payload: serde_json::Value,
    },

    #[error("transfer request failed: {source}")]
    Http {
        #[from]
        source: reqwest::Error,
    },

    #[error("undecodable tos response: {source}")]
    Decode {
        #[from]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Remote(#[from] VodError),
}

impl UploadError {
    /// Status code reported alongside the error.
    ///
    /// Local classifications report 400. An embedded apply error reports
    /// the HTTP status of the apply reply, and remote errors keep their own
    /// code.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Api { status, .. } => *status,
            Self::Remote(err) => err.code(),
            _ => 400,
        }
    }

    /// True for failures detected before anything was sent.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::EmptyPayload | Self::PayloadTooLarge { .. })
    }

    /// True when the apply reply broke the API contract.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Self::MissingUploadAddress | Self::NoUploadHost | Self::NoStoreInfo
        )
    }
}
