//! Playback tokens and scoped upload credentials.
//!
//! Both issuers only sign; neither performs network I/O.

pub mod playback;
pub mod upload_auth;

pub use playback::{PlaybackRequest, PlaybackToken, PlaybackTokenIssuer, TOKEN_VERSION};
pub use upload_auth::{UploadAuthIssuer, UploadAuthScope};
