use std::sync::Arc;

use async_trait::async_trait;
use http::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::api::{
    ApiReply, ApiResponse, ApplyUploadInfoRequest, ApplyUploadInfoResult, CommitUploadInfoRequest,
    CommitUploadInfoResult, VodApi, ACTION_APPLY_UPLOAD_INFO, ACTION_COMMIT_UPLOAD_INFO,
};
use crate::errors::{VodError, VodResult};
use crate::options::ClientOptions;
use crate::signer::{Query, Signer};

/// [`VodApi`] over signed HTTP GET requests.
pub struct HttpVodApi {
    http: reqwest::Client,
    signer: Arc<dyn Signer>,
    options: ClientOptions,
}

impl HttpVodApi {
    pub fn new(options: ClientOptions, signer: Arc<dyn Signer>) -> VodResult<Self> {
        options.validate()?;
        let http = reqwest::Client::builder()
            .timeout(options.timeout)
            .build()?;
        Ok(Self::with_http_client(http, options, signer))
    }

    pub fn with_http_client(
        http: reqwest::Client,
        options: ClientOptions,
        signer: Arc<dyn Signer>,
    ) -> Self {
        Self {
            http,
            signer,
            options,
        }
    }

    /// Sign and send one action. `Version` is added to every query.
    async fn call<T>(&self, action: &str, mut query: Query) -> VodResult<ApiReply<T>>
    where
        T: DeserializeOwned,
    {
        query.insert("Version".to_string(), self.options.version.clone());
        let signed = self.signer.sign_url(action, &query)?;
        let url = format!("{}/?{}", self.options.endpoint(), signed);
        debug!("Calling {} on {}", action, self.options.host);

        let resp = self.http.get(&url).send().await?;
        let status = resp.status();
        let body = resp.bytes().await?;

        if status != StatusCode::OK {
            warn!("{} returned http status {}", action, status);
            let message = match serde_json::from_slice::<ApiResponse<serde_json::Value>>(&body) {
                Ok(envelope) => match envelope.error() {
                    Some(err) => err.to_string(),
                    None => String::from_utf8_lossy(&body).into_owned(),
                },
                Err(_) => String::from_utf8_lossy(&body).into_owned(),
            };
            return Err(VodError::from_status(
                status.as_u16(),
                format!("{action} failed: {message}"),
            ));
        }

        let response: ApiResponse<T> = serde_json::from_slice(&body)
            .map_err(|e| VodError::from(e).with_status(status.as_u16()))?;
        Ok(ApiReply::new(status, response))
    }
}

#[async_trait]
impl VodApi for HttpVodApi {
    async fn apply_upload_info(
        &self,
        request: &ApplyUploadInfoRequest,
    ) -> VodResult<ApiReply<ApplyUploadInfoResult>> {
        self.call(ACTION_APPLY_UPLOAD_INFO, request.to_query()).await
    }

    async fn commit_upload_info(
        &self,
        request: &CommitUploadInfoRequest,
    ) -> VodResult<ApiReply<CommitUploadInfoResult>> {
        self.call(ACTION_COMMIT_UPLOAD_INFO, request.to_query()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::signer::{Policy, SecurityToken2};
    use httptest::{matchers::*, responders::*, Expectation, Server};
    use serde_json::json;
    use std::time::Duration;

    struct QuerySigner;

    impl Signer for QuerySigner {
        fn sign_url(&self, action: &str, query: &Query) -> VodResult<String> {
            let mut parts = vec![format!("Action={action}")];
            parts.extend(query.iter().map(|(k, v)| format!("{k}={v}")));
            parts.push("X-Signature=test".to_string());
            Ok(parts.join("&"))
        }

        fn sign_security_token(&self, _: &Policy, _: Duration) -> VodResult<SecurityToken2> {
            Ok(SecurityToken2::default())
        }
    }

    fn options_for(server: &Server) -> ClientOptions {
        ClientOptions::default()
            .with_scheme("http")
            .with_host(server.addr().to_string())
    }

    fn api_for(server: &Server) -> HttpVodApi {
        HttpVodApi::new(options_for(server), Arc::new(QuerySigner)).unwrap()
    }

    #[tokio::test]
    async fn apply_sends_signed_query() {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method_path("GET", "/"),
                request::query(url_decoded(contains(("Action", "ApplyUploadInfo")))),
                request::query(url_decoded(contains(("SpaceName", "space")))),
                request::query(url_decoded(contains(("Version", "2020-08-01")))),
                request::query(url_decoded(contains(("X-Signature", "test")))),
            ])
            .respond_with(json_encoded(json!({
                "ResponseMetadata": {"RequestId": "r-1"},
                "Result": {"Data": {"UploadAddress": {
                    "StoreInfos": [{"StoreUri": "o123", "Auth": "A1"}],
                    "UploadHosts": ["h"],
                    "SessionKey": "s1"
                }}}
            }))),
        );

        let reply = api_for(&server)
            .apply_upload_info(&ApplyUploadInfoRequest::new("space"))
            .await
            .unwrap();
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(reply.response.response_metadata.request_id, "r-1");
        let address = reply.response.result.unwrap().data.upload_address.unwrap();
        assert_eq!(address.session_key, "s1");
    }

    #[tokio::test]
    async fn non_200_keeps_remote_status_and_message() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/")).respond_with(
                status_code(403).body(
                    json!({
                        "ResponseMetadata": {"Error": {"Code": "AccessDenied", "Message": "no access"}}
                    })
                    .to_string(),
                ),
            ),
        );

        let err = api_for(&server)
            .commit_upload_info(&CommitUploadInfoRequest {
                space_name: "space".to_string(),
                session_key: "s1".to_string(),
                ..CommitUploadInfoRequest::default()
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
        assert_eq!(err.code(), 403);
        assert!(err.message.contains("no access"), "{err}");
    }

    #[tokio::test]
    async fn embedded_error_is_returned_in_envelope() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/")).respond_with(json_encoded(
                json!({"ResponseMetadata": {"Error": {"Code": "InvalidSpace", "Message": "unknown space"}}}),
            )),
        );

        let reply = api_for(&server)
            .apply_upload_info(&ApplyUploadInfoRequest::new("missing"))
            .await
            .unwrap();
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(reply.response.error().unwrap().code, "InvalidSpace");
    }

    #[tokio::test]
    async fn configured_version_is_signed_into_every_action() {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::query(url_decoded(contains(("Action", "CommitUploadInfo")))),
                request::query(url_decoded(contains(("Version", "2023-01-01")))),
            ])
            .respond_with(json_encoded(json!({
                "ResponseMetadata": {"RequestId": "r-2"},
                "Result": {"Data": {"Vid": "v1"}}
            }))),
        );

        let api = HttpVodApi::new(
            options_for(&server).with_version("2023-01-01"),
            Arc::new(QuerySigner),
        )
        .unwrap();
        let reply = api
            .commit_upload_info(&CommitUploadInfoRequest {
                space_name: "space".to_string(),
                session_key: "s1".to_string(),
                ..CommitUploadInfoRequest::default()
            })
            .await
            .unwrap();
        assert_eq!(reply.response.result.unwrap().data.vid, "v1");
    }
}
