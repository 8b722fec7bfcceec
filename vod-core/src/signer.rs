// Signing seam.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::VodResult;

/// Query parameters of an OpenAPI action, kept in key order.
pub type Query = BTreeMap<String, String>;

/// Produces signed requests and scoped security tokens.
///
/// The cryptography lives outside this crate; implementors hold the
/// account credentials.
pub trait Signer: Send + Sync {
    /// Sign `action` with `query` and return the signed query string
    /// (`Action=...&Version=...&X-Signature=...`).
    fn sign_url(&self, action: &str, query: &Query) -> VodResult<String>;

    /// Issue a short-lived credential restricted by `policy`.
    fn sign_security_token(&self, policy: &Policy, expiry: Duration) -> VodResult<SecurityToken2>;
}

/// Inline access policy attached to a security token.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Policy {
    #[serde(rename = "Statement")]
    pub statement: Vec<Statement>,
}

impl Policy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_statement(mut self, statement: Statement) -> Self {
        self.statement.push(statement);
        self
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Statement {
    #[serde(rename = "Effect")]
    pub effect: String,
    #[serde(rename = "Action")]
    pub action: Vec<String>,
    #[serde(rename = "Resource")]
    pub resource: Vec<String>,
    #[serde(rename = "Condition", default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

impl Statement {
    /// An `Allow` statement. An empty resource list leaves resources open.
    pub fn allow<A, R>(actions: A, resources: R) -> Self
    where
        A: IntoIterator,
        A::Item: Into<String>,
        R: IntoIterator,
        R::Item: Into<String>,
    {
        Self {
            effect: "Allow".to_string(),
            action: actions.into_iter().map(Into::into).collect(),
            resource: resources.into_iter().map(Into::into).collect(),
            condition: None,
        }
    }
}

/// Temporary credential returned by [`Signer::sign_security_token`].
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SecurityToken2 {
    #[serde(rename = "AccessKeyID")]
    pub access_key_id: String,
    #[serde(rename = "SecretAccessKey")]
    pub secret_access_key: String,
    #[serde(rename = "SessionToken")]
    pub session_token: String,
    #[serde(rename = "CurrentTime")]
    pub current_time: String,
    #[serde(rename = "ExpiredTime")]
    pub expired_time: String,
}
