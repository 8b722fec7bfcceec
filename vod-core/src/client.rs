use std::sync::Arc;

use crate::api::VodApi;
use crate::errors::VodResult;
use crate::http_api::HttpVodApi;
use crate::options::ClientOptions;
use crate::signer::Signer;

/// Explicitly constructed client shared by the coordinators and issuers.
///
/// Cloning is cheap; clones share the same API and signer.
#[derive(Clone)]
pub struct VodClient {
    options: ClientOptions,
    api: Arc<dyn VodApi>,
    signer: Arc<dyn Signer>,
}

impl VodClient {
    /// Client backed by [`HttpVodApi`].
    pub fn new<S: Signer + 'static>(options: ClientOptions, signer: S) -> VodResult<Self> {
        let signer: Arc<dyn Signer> = Arc::new(signer);
        let api = HttpVodApi::new(options.clone(), signer.clone())?;
        Ok(Self {
            options,
            api: Arc::new(api),
            signer,
        })
    }

    /// Client backed by any [`VodApi`] implementation.
    pub fn with_api<A, S>(options: ClientOptions, api: A, signer: S) -> Self
    where
        A: VodApi + 'static,
        S: Signer + 'static,
    {
        Self {
            options,
            api: Arc::new(api),
            signer: Arc::new(signer),
        }
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    pub fn api(&self) -> &dyn VodApi {
        self.api.as_ref()
    }

    pub fn signer(&self) -> &dyn Signer {
        self.signer.as_ref()
    }
}

impl std::fmt::Debug for VodClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VodClient")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
