use std::sync::{Arc, Mutex};
use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use vod_auth::{PlaybackRequest, PlaybackToken, PlaybackTokenIssuer, UploadAuthIssuer, UploadAuthScope};
use vod_core::api::{ApplyUploadInfoResult, CommitUploadInfoResult};
use vod_core::{
    ApiReply, ApplyUploadInfoRequest, ClientOptions, CommitUploadInfoRequest, Policy, Query,
    SecurityToken2, Signer, VodApi, VodClient, VodError, VodResult,
};

#[derive(Default)]
struct Recorded {
    actions: Vec<(String, Query)>,
    policies: Vec<(Policy, Duration)>,
}

#[derive(Clone, Default)]
struct RecordingSigner {
    recorded: Arc<Mutex<Recorded>>,
    fail: bool,
}

impl Signer for RecordingSigner {
    fn sign_url(&self, action: &str, query: &Query) -> VodResult<String> {
        if self.fail {
            return Err(VodError::not_authenticated("signing key missing"));
        }
        self.recorded
            .lock()
            .unwrap()
            .actions
            .push((action.to_string(), query.clone()));
        Ok(format!("Action={action}&Vid={}&X-Signature=sig", query["Vid"]))
    }

    fn sign_security_token(&self, policy: &Policy, expiry: Duration) -> VodResult<SecurityToken2> {
        self.recorded
            .lock()
            .unwrap()
            .policies
            .push((policy.clone(), expiry));
        Ok(SecurityToken2 {
            access_key_id: "AKTP".to_string(),
            session_token: "STS2".to_string(),
            ..SecurityToken2::default()
        })
    }
}

struct NoApi;

#[async_trait::async_trait]
impl VodApi for NoApi {
    async fn apply_upload_info(
        &self,
        _: &ApplyUploadInfoRequest,
    ) -> VodResult<ApiReply<ApplyUploadInfoResult>> {
        Err(VodError::general_error("not used"))
    }

    async fn commit_upload_info(
        &self,
        _: &CommitUploadInfoRequest,
    ) -> VodResult<ApiReply<CommitUploadInfoResult>> {
        Err(VodError::general_error("not used"))
    }
}

fn client(signer: RecordingSigner) -> VodClient {
    VodClient::with_api(ClientOptions::default(), NoApi, signer)
}

#[test]
fn playback_token_wraps_signed_query() {
    let signer = RecordingSigner::default();
    let issuer = PlaybackTokenIssuer::new(client(signer.clone()));

    let token = issuer
        .get_playback_token(&PlaybackRequest::new("v0d00c"), 0)
        .unwrap();

    let recorded = signer.recorded.lock().unwrap();
    assert_eq!(recorded.actions.len(), 1);
    let (action, query) = &recorded.actions[0];
    assert_eq!(action, "GetPlayInfo");
    assert_eq!(query.len(), 1);
    assert_eq!(query["Vid"], "v0d00c");

    let json: serde_json::Value =
        serde_json::from_slice(&STANDARD.decode(&token).unwrap()).unwrap();
    assert_eq!(json["TokenVersion"], "V2");
    assert_eq!(
        json["GetPlayInfoToken"],
        "Action=GetPlayInfo&Vid=v0d00c&X-Signature=sig"
    );

    let decoded = PlaybackToken::decode(&token).unwrap();
    assert_eq!(decoded.token_version, "V2");
}

#[test]
fn playback_token_validation_happens_before_signing() {
    let signer = RecordingSigner::default();
    let issuer = PlaybackTokenIssuer::new(client(signer.clone()));

    let err = issuer
        .get_playback_token(&PlaybackRequest::new(""), 60)
        .unwrap_err();
    assert_eq!(err.code(), 400);
    assert!(signer.recorded.lock().unwrap().actions.is_empty());
}

#[test]
fn signing_failure_propagates_unchanged() {
    let signer = RecordingSigner {
        fail: true,
        ..RecordingSigner::default()
    };
    let issuer = PlaybackTokenIssuer::new(client(signer));

    let err = issuer
        .get_playback_token(&PlaybackRequest::new("v1"), 0)
        .unwrap_err();
    assert_eq!(err.code(), 401);
    assert_eq!(err.message, "signing key missing");
}

#[test]
fn upload_auth_defaults_to_one_hour() {
    let signer = RecordingSigner::default();
    let issuer = UploadAuthIssuer::new(client(signer.clone()));

    let token = issuer.get_upload_auth(None).unwrap();
    assert_eq!(token.session_token, "STS2");

    let recorded = signer.recorded.lock().unwrap();
    let (policy, expiry) = &recorded.policies[0];
    assert_eq!(*expiry, Duration::from_secs(3600));
    assert_eq!(
        policy.statement[0].action,
        vec!["vod:ApplyUploadInfo", "vod:CommitUploadInfo"]
    );
    assert!(policy.statement[0].resource.is_empty());
}

#[test]
fn upload_auth_honors_explicit_expiry_and_scope() {
    let signer = RecordingSigner::default();
    let issuer = UploadAuthIssuer::new(client(signer.clone()));

    issuer
        .get_upload_auth_scoped(
            &UploadAuthScope::open().with_space("media"),
            Some(Duration::from_secs(300)),
        )
        .unwrap();

    let recorded = signer.recorded.lock().unwrap();
    let (policy, expiry) = &recorded.policies[0];
    assert_eq!(*expiry, Duration::from_secs(300));
    assert_eq!(policy.statement[0].resource, vec!["trn:vod::*:space/media"]);
}
