// Scoped upload credentials.

use std::time::Duration;

use tracing::debug;
use vod_core::{Policy, SecurityToken2, Statement, VodClient, VodResult};

pub const ACTION_APPLY: &str = "vod:ApplyUploadInfo";
pub const ACTION_COMMIT: &str = "vod:CommitUploadInfo";

/// Resource restriction for an upload credential.
///
/// The default scope leaves the resource list empty (unrestricted).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UploadAuthScope {
    pub space_names: Vec<String>,
}

impl UploadAuthScope {
    pub fn open() -> Self {
        Self::default()
    }

    pub fn with_space(mut self, space_name: impl Into<String>) -> Self {
        self.space_names.push(space_name.into());
        self
    }

    pub fn resources(&self) -> Vec<String> {
        self.space_names
            .iter()
            .map(|space| format!("trn:vod::*:space/{space}"))
            .collect()
    }

    /// Allow exactly the apply and commit upload actions.
    pub fn policy(&self) -> Policy {
        Policy::new().with_statement(Statement::allow([ACTION_APPLY, ACTION_COMMIT], self.resources()))
    }
}

/// Issues short-lived credentials that can only upload.
#[derive(Clone, Debug)]
pub struct UploadAuthIssuer {
    client: VodClient,
}

impl UploadAuthIssuer {
    pub fn new(client: VodClient) -> Self {
        Self { client }
    }

    /// Credential with an open resource list. `None` uses the client's
    /// default expiry (one hour unless configured).
    pub fn get_upload_auth(&self, expiry: Option<Duration>) -> VodResult<SecurityToken2> {
        self.get_upload_auth_scoped(&UploadAuthScope::open(), expiry)
    }

    pub fn get_upload_auth_scoped(
        &self,
        scope: &UploadAuthScope,
        expiry: Option<Duration>,
    ) -> VodResult<SecurityToken2> {
        let expiry = expiry.unwrap_or(self.client.options().upload_auth_expiry);
        debug!(
            "Issuing upload credential for {:?} (spaces: {:?})",
            expiry, scope.space_names
        );
        self.client
            .signer()
            .sign_security_token(&scope.policy(), expiry)
    }
}
