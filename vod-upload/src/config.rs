use vod_core::VodConfigSnapshot;

/// Configuration for upload operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadConfig {
    /// Scheme used for the transfer PUT (`http` unless overridden)
    pub tos_scheme: String,

    /// Optional safety guard on the size of a single payload
    pub max_payload_bytes: Option<usize>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            tos_scheme: "http".to_string(),
            max_payload_bytes: None,
        }
    }
}

impl UploadConfig {
    /// Create a new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Read `upload.tos_scheme` and `upload.max_payload_bytes`
    pub fn from_config(config: &VodConfigSnapshot) -> Self {
        let mut out = Self::default();
        if let Some(scheme) = config.get_string("upload.tos_scheme") {
            out.tos_scheme = scheme;
        }
        if let Some(max) = config.get_u64("upload.max_payload_bytes") {
            out.max_payload_bytes = usize::try_from(max).ok();
        }
        out
    }

    /// Set the transfer scheme
    pub fn with_tos_scheme<S: Into<String>>(mut self, scheme: S) -> Self {
        self.tos_scheme = scheme.into();
        self
    }

    /// Set max payload size
    pub fn with_max_payload_bytes(mut self, bytes: usize) -> Self {
        self.max_payload_bytes = Some(bytes);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vod_core::VodConfig;

    #[test]
    fn reads_upload_keys() {
        let mut config = VodConfig::new();
        config.set("upload.tos_scheme", "https");
        config.set("upload.max_payload_bytes", "1048576");

        let upload = UploadConfig::from_config(&config.snapshot());
        assert_eq!(upload.tos_scheme, "https");
        assert_eq!(upload.max_payload_bytes, Some(1_048_576));
        assert_eq!(UploadConfig::new().tos_scheme, "http");
    }

    #[test]
    fn payload_cap_beyond_usize_is_ignored() {
        let mut config = VodConfig::new();
        config.set("upload.max_payload_bytes", u64::MAX.to_string());

        let upload = UploadConfig::from_config(&config.snapshot());
        assert_eq!(upload.max_payload_bytes, usize::try_from(u64::MAX).ok());
    }
}
