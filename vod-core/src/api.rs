//! OpenAPI seam and wire models for the upload actions.
//!
//! Every reply is wrapped in a `{"ResponseMetadata": .., "Result": ..}`
//! envelope. A reply may carry HTTP 200 and still report an application
//! error in `ResponseMetadata.Error`; callers check [`ApiResponse::error`].

use async_trait::async_trait;
use http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::errors::VodResult;
use crate::signer::Query;

pub const ACTION_APPLY_UPLOAD_INFO: &str = "ApplyUploadInfo";
pub const ACTION_COMMIT_UPLOAD_INFO: &str = "CommitUploadInfo";
pub const ACTION_GET_PLAY_INFO: &str = "GetPlayInfo";

/// Remote calls backing the two-phase upload.
#[async_trait]
pub trait VodApi: Send + Sync {
    /// Reserve an upload destination in `space_name`.
    async fn apply_upload_info(
        &self,
        request: &ApplyUploadInfoRequest,
    ) -> VodResult<ApiReply<ApplyUploadInfoResult>>;

    /// Finalize an upload and start post-processing.
    async fn commit_upload_info(
        &self,
        request: &CommitUploadInfoRequest,
    ) -> VodResult<ApiReply<CommitUploadInfoResult>>;
}

/// A decoded envelope together with the HTTP status it arrived with.
#[derive(Debug, Clone)]
pub struct ApiReply<T> {
    pub status: StatusCode,
    pub response: ApiResponse<T>,
}

impl<T> ApiReply<T> {
    pub fn new(status: StatusCode, response: ApiResponse<T>) -> Self {
        Self { status, response }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ApiResponse<T> {
    #[serde(rename = "ResponseMetadata", default)]
    pub response_metadata: ResponseMetadata,
    #[serde(rename = "Result", default = "Option::default")]
    pub result: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(result: T) -> Self {
        Self {
            response_metadata: ResponseMetadata::default(),
            result: Some(result),
        }
    }

    pub fn failed(error: ApiError) -> Self {
        Self {
            response_metadata: ResponseMetadata {
                error: Some(error),
                ..ResponseMetadata::default()
            },
            result: None,
        }
    }

    /// The embedded application error, if the reply reports one.
    pub fn error(&self) -> Option<&ApiError> {
        self.response_metadata
            .error
            .as_ref()
            .filter(|e| e.is_failure())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct ResponseMetadata {
    pub request_id: String,
    pub action: String,
    pub version: String,
    pub service: String,
    pub region: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct ApiError {
    pub code: String,
    #[serde(rename = "CodeN")]
    pub code_n: i64,
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            code_n: 0,
            message: message.into(),
        }
    }

    /// `"0"` is the service's success code.
    pub fn is_failure(&self) -> bool {
        self.code != "0"
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "code={} code_n={} message={}", self.code, self.code_n, self.message)
    }
}

// ---- ApplyUploadInfo ----

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyUploadInfoRequest {
    pub space_name: String,
    pub file_type: Option<String>,
    pub file_name: Option<String>,
    pub file_size: Option<u64>,
}

impl ApplyUploadInfoRequest {
    pub fn new(space_name: impl Into<String>) -> Self {
        Self {
            space_name: space_name.into(),
            ..Self::default()
        }
    }

    pub fn with_file_type(mut self, file_type: impl Into<String>) -> Self {
        self.file_type = Some(file_type.into());
        self
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn with_file_size(mut self, size: u64) -> Self {
        self.file_size = Some(size);
        self
    }

    pub fn to_query(&self) -> Query {
        let mut query = Query::new();
        query.insert("SpaceName".to_string(), self.space_name.clone());
        if let Some(file_type) = self.file_type.as_ref().filter(|s| !s.is_empty()) {
            query.insert("FileType".to_string(), file_type.clone());
        }
        if let Some(file_name) = self.file_name.as_ref().filter(|s| !s.is_empty()) {
            query.insert("FileName".to_string(), file_name.clone());
        }
        if let Some(size) = self.file_size {
            query.insert("FileSize".to_string(), size.to_string());
        }
        query
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct ApplyUploadInfoResult {
    pub data: ApplyUploadInfoData,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct ApplyUploadInfoData {
    pub upload_address: Option<UploadAddress>,
}

/// Where and how to transfer one upload.
///
/// Consumed once per attempt; `session_key` must reach the commit call
/// unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct UploadAddress {
    pub store_infos: Vec<StoreInfo>,
    pub upload_hosts: Vec<String>,
    pub session_key: String,
}

/// Object identifier plus the credential authorizing its transfer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct StoreInfo {
    pub store_uri: String,
    pub auth: String,
}

// ---- CommitUploadInfo ----

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitUploadInfoRequest {
    pub space_name: String,
    pub session_key: String,
    pub callback_args: String,
    /// JSON array of post-processing functions.
    pub functions: String,
}

impl CommitUploadInfoRequest {
    pub fn to_query(&self) -> Query {
        let mut query = Query::new();
        query.insert("SpaceName".to_string(), self.space_name.clone());
        query.insert("SessionKey".to_string(), self.session_key.clone());
        if !self.callback_args.is_empty() {
            query.insert("CallbackArgs".to_string(), self.callback_args.clone());
        }
        if !self.functions.is_empty() {
            query.insert("Functions".to_string(), self.functions.clone());
        }
        query
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase", default)]
pub struct CommitUploadInfoResult {
    pub data: CommitUploadInfoData,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase", default)]
pub struct CommitUploadInfoData {
    pub vid: String,
    pub poster_uri: String,
    pub callback_args: String,
    pub source_info: Option<SourceInfo>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase", default)]
pub struct SourceInfo {
    pub file_id: String,
    pub store_uri: String,
    pub md5: String,
    pub file_type: String,
    pub format: String,
    pub codec: String,
    pub width: u32,
    pub height: u32,
    pub duration: f64,
    pub size: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_apply_envelope() {
        let body = json!({
            "ResponseMetadata": {"RequestId": "r-1", "Action": "ApplyUploadInfo"},
            "Result": {"Data": {"UploadAddress": {
                "StoreInfos": [{"StoreUri": "o123", "Auth": "A1"}],
                "UploadHosts": ["h"],
                "SessionKey": "s1"
            }}}
        });

        let resp: ApiResponse<ApplyUploadInfoResult> = serde_json::from_value(body).unwrap();
        assert!(resp.error().is_none());
        let address = resp.result.unwrap().data.upload_address.unwrap();
        assert_eq!(address.upload_hosts, vec!["h".to_string()]);
        assert_eq!(address.store_infos[0].store_uri, "o123");
        assert_eq!(address.session_key, "s1");
    }

    #[test]
    fn zero_error_code_is_not_a_failure() {
        let resp: ApiResponse<ApplyUploadInfoResult> = serde_json::from_value(json!({
            "ResponseMetadata": {"Error": {"Code": "0", "Message": ""}}
        }))
        .unwrap();
        assert!(resp.error().is_none());

        let resp: ApiResponse<ApplyUploadInfoResult> = serde_json::from_value(json!({
            "ResponseMetadata": {"Error": {"Code": "InvalidParameter", "CodeN": 100004, "Message": "bad space"}}
        }))
        .unwrap();
        let err = resp.error().unwrap();
        assert_eq!(err.code_n, 100004);
        assert_eq!(err.message, "bad space");
    }

    #[test]
    fn commit_query_skips_empty_fields() {
        let request = CommitUploadInfoRequest {
            space_name: "space".to_string(),
            session_key: "s1".to_string(),
            callback_args: String::new(),
            functions: "[]".to_string(),
        };
        let query = request.to_query();
        assert_eq!(query.get("SessionKey").map(String::as_str), Some("s1"));
        assert!(!query.contains_key("CallbackArgs"));
        assert_eq!(query.get("Functions").map(String::as_str), Some("[]"));
    }

    #[test]
    fn apply_query_contains_optional_fields_only_when_set() {
        let query = ApplyUploadInfoRequest::new("space").to_query();
        assert_eq!(query.len(), 1);

        let query = ApplyUploadInfoRequest::new("space")
            .with_file_type("media")
            .with_file_size(5)
            .to_query();
        assert_eq!(query.get("FileType").map(String::as_str), Some("media"));
        assert_eq!(query.get("FileSize").map(String::as_str), Some("5"));
    }
}
