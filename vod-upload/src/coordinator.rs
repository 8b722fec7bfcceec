use std::sync::Arc;

use bytes::Bytes;
use http::StatusCode;
use tracing::{debug, info, instrument, warn};
use vod_core::{ApplyUploadInfoRequest, UploadAddress, VodClient};

use crate::checksum::crc32_hex;
use crate::transport::{HttpTosTransport, TosPutRequest, TosTransport};
use crate::{UploadConfig, UploadError, UploadHandle, UploadResult};

/// Runs "apply upload slot, transfer bytes, verify" as one operation.
///
/// Holds no per-call state; concurrent uploads through one coordinator
/// are independent.
#[derive(Clone)]
pub struct UploadCoordinator {
    client: VodClient,
    transport: Arc<dyn TosTransport>,
    config: UploadConfig,
}

impl UploadCoordinator {
    pub fn new(client: VodClient, config: UploadConfig) -> Self {
        let transport = HttpTosTransport::new(config.tos_scheme.clone());
        Self::with_transport(client, transport, config)
    }

    pub fn with_transport<T>(client: VodClient, transport: T, config: UploadConfig) -> Self
    where
        T: TosTransport + 'static,
    {
        Self {
            client,
            transport: Arc::new(transport),
            config,
        }
    }

    pub fn client(&self) -> &VodClient {
        &self.client
    }

    pub fn config(&self) -> &UploadConfig {
        &self.config
    }

    /// Upload `bytes` into `space_name` and return the object id and
    /// session key needed by commit. Single attempt, no retries.
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn upload(&self, bytes: Bytes, space_name: &str) -> UploadResult<UploadHandle> {
        if bytes.is_empty() {
            return Err(UploadError::EmptyPayload);
        }
        if let Some(max) = self.config.max_payload_bytes {
            if bytes.len() > max {
                return Err(UploadError::PayloadTooLarge {
                    size: bytes.len(),
                    max,
                });
            }
        }

        let address = self.apply(space_name).await?;
        let host = address
            .upload_hosts
            .first()
            .ok_or(UploadError::NoUploadHost)?;
        let store = address
            .store_infos
            .first()
            .ok_or(UploadError::NoStoreInfo)?;

        let request = TosPutRequest {
            host: host.clone(),
            object_id: store.store_uri.clone(),
            auth: store.auth.clone(),
            checksum: crc32_hex(&bytes),
            body: bytes,
        };
        debug!(
            "Transferring to {} as {} (crc32 {})",
            request.host, request.object_id, request.checksum
        );

        let payload = self
            .transport
            .put_object(request)
            .await?
            .into_result()
            .inspect_err(|e| warn!("Transfer of {} failed: {}", store.store_uri, e))?;
        debug!("Transfer payload: {}", payload);

        info!("Uploaded object {} to space {}", store.store_uri, space_name);
        Ok(UploadHandle {
            object_id: store.store_uri.clone(),
            session_key: address.session_key.clone(),
            status: StatusCode::OK,
        })
    }

    async fn apply(&self, space_name: &str) -> UploadResult<UploadAddress> {
        let reply = self
            .client
            .api()
            .apply_upload_info(&ApplyUploadInfoRequest::new(space_name))
            .await?;

        if let Some(err) = reply.response.error() {
            warn!("ApplyUploadInfo rejected: {}", err);
            return Err(UploadError::Api {
                code: err.code.clone(),
                message: err.message.clone(),
                status: reply.status.as_u16(),
            });
        }

        reply
            .response
            .result
            .and_then(|r| r.data.upload_address)
            .ok_or(UploadError::MissingUploadAddress)
    }
}
