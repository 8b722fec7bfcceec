//! vod-core: client, errors, configuration and seams shared by the VOD SDK crates.

pub mod api;
pub mod client;
pub mod config;
pub mod errors;
pub mod http_api;
pub mod options;
pub mod signer;

pub use api::{
    ApiError, ApiReply, ApiResponse, ApplyUploadInfoRequest, ApplyUploadInfoResult,
    CommitUploadInfoRequest, CommitUploadInfoResult, ResponseMetadata, StoreInfo, UploadAddress,
    VodApi,
};
pub use client::VodClient;
pub use config::{VodConfig, VodConfigSnapshot};
pub use errors::{ErrorKind, VodError, VodResult};
pub use http_api::HttpVodApi;
pub use options::ClientOptions;
pub use signer::{Policy, Query, SecurityToken2, Signer, Statement};
