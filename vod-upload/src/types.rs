use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use vod_core::CommitUploadInfoResult;

/// Result of a successful transfer, ready to be committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadHandle {
    /// Object identifier (store URI) within the applying session
    pub object_id: String,
    /// Session key that must be passed unchanged to commit
    pub session_key: String,
    /// Always `200 OK`; failures are reported through `UploadError`
    pub status: StatusCode,
}

/// Reply of a successful commit.
#[derive(Debug, Clone)]
pub struct Committed {
    pub response: vod_core::ApiResponse<CommitUploadInfoResult>,
    /// HTTP status of the commit call, as received
    pub status: StatusCode,
}

impl Committed {
    /// Video id assigned by the service, when the reply carries one.
    pub fn vid(&self) -> Option<&str> {
        self.response
            .result
            .as_ref()
            .map(|r| r.data.vid.as_str())
            .filter(|v| !v.is_empty())
    }
}

/// A named post-processing directive attached to a commit.
///
/// Wire form: `{"Name": "...", "Input": {...}}`, `Input` omitted when unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionSpec {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Input", default, skip_serializing_if = "Option::is_none")]
    pub input: Option<Value>,
}

impl FunctionSpec {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            input: None,
        }
    }

    pub fn with_input(mut self, input: Value) -> Self {
        self.input = Some(input);
        self
    }

    /// Probe media metadata after upload.
    pub fn get_meta() -> Self {
        Self::new("GetMeta")
    }

    /// Capture a poster frame at `seconds` into the media.
    pub fn snapshot(seconds: f64) -> Self {
        Self::new("Snapshot").with_input(json!({ "SnapshotTime": seconds }))
    }

    /// Start the transcode workflow `template_id`.
    pub fn start_workflow<S: Into<String>>(template_id: S) -> Self {
        Self::new("StartWorkflow").with_input(json!({ "TemplateId": template_id.into() }))
    }

    /// Attach title, tags and description to the new media.
    pub fn add_option_info(title: &str, tags: &[&str], description: &str) -> Self {
        Self::new("AddOptionInfo").with_input(json!({
            "Title": title,
            "Tags": tags.join(","),
            "Description": description,
        }))
    }
}

/// Serialize `functions` to the JSON array sent as `Functions`.
///
/// `FunctionSpec` holds only strings and JSON values, so serialization
/// cannot fail; a failure here is a broken invariant.
pub fn serialize_functions(functions: &[FunctionSpec]) -> String {
    serde_json::to_string(functions)
        .unwrap_or_else(|e| unreachable!("function specs always serialize to JSON: {e}"))
}
