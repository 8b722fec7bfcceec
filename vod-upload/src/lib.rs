//! # vod-upload: apply, transfer and commit for VOD media
//!
//! Uploading media is a two-phase protocol:
//!
//! ```text
//! ┌────────────────────┐
//! │ CommitCoordinator  │  ← commit with callback args + functions
//! ├────────────────────┤
//! │ UploadCoordinator  │  ← apply slot, CRC32, PUT, verify
//! ├────────────────────┤
//! │ VodApi / Transport │  ← OpenAPI calls and the storage PUT
//! └────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use vod_upload::prelude::*;
//!
//! # async fn run(client: vod_core::VodClient) -> UploadResult<()> {
//! let uploads = UploadCoordinator::new(client, UploadConfig::default());
//! let commits = CommitCoordinator::new(uploads);
//!
//! let committed = commits
//!     .upload_with_callback(
//!         bytes::Bytes::from_static(b"..."),
//!         "my-space",
//!         "{\"order\":42}",
//!         &[FunctionSpec::get_meta(), FunctionSpec::snapshot(1.0)],
//!     )
//!     .await?;
//! println!("vid: {:?}", committed.vid());
//! # Ok(())
//! # }
//! ```
//!
//! Errors carry a status code (`UploadError::status_code`), but success
//! should be detected from the `Result` alone.

pub mod checksum;
mod commit;
mod config;
mod coordinator;
mod error;
pub mod transport;
mod types;

pub use commit::CommitCoordinator;
pub use config::UploadConfig;
pub use coordinator::UploadCoordinator;
pub use error::{UploadError, UploadResult};
pub use transport::{HttpTosTransport, TosOutcome, TosPutRequest, TosTransport};
pub use types::{serialize_functions, Committed, FunctionSpec, UploadHandle};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        CommitCoordinator, Committed, FunctionSpec, UploadConfig, UploadCoordinator, UploadError,
        UploadHandle, UploadResult,
    };
}
