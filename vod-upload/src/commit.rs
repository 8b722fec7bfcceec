use bytes::Bytes;
use tracing::{info, instrument};
use vod_core::CommitUploadInfoRequest;

use crate::types::serialize_functions;
use crate::{Committed, FunctionSpec, UploadCoordinator, UploadHandle, UploadResult};

/// Commits uploaded objects with callback metadata and post-processing
/// functions.
#[derive(Clone)]
pub struct CommitCoordinator {
    uploads: UploadCoordinator,
}

impl CommitCoordinator {
    pub fn new(uploads: UploadCoordinator) -> Self {
        Self { uploads }
    }

    pub fn uploads(&self) -> &UploadCoordinator {
        &self.uploads
    }

    /// Upload `bytes`, then commit them. An upload failure is returned as
    /// is and commit is never called.
    #[instrument(skip(self, bytes, callback_args, functions), fields(size = bytes.len()))]
    pub async fn upload_with_callback(
        &self,
        bytes: Bytes,
        space_name: &str,
        callback_args: &str,
        functions: &[FunctionSpec],
    ) -> UploadResult<Committed> {
        let handle = self.uploads.upload(bytes, space_name).await?;
        self.commit(&handle, space_name, callback_args, functions).await
    }

    /// Commit a previously uploaded handle.
    pub async fn commit(
        &self,
        handle: &UploadHandle,
        space_name: &str,
        callback_args: &str,
        functions: &[FunctionSpec],
    ) -> UploadResult<Committed> {
        let request = CommitUploadInfoRequest {
            space_name: space_name.to_string(),
            session_key: handle.session_key.clone(),
            callback_args: callback_args.to_string(),
            functions: serialize_functions(functions),
        };

        let reply = self
            .uploads
            .client()
            .api()
            .commit_upload_info(&request)
            .await?;

        info!(
            "Committed session {} in space {} ({})",
            handle.session_key, space_name, reply.status
        );
        Ok(Committed {
            response: reply.response,
            status: reply.status,
        })
    }
}
