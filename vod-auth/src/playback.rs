// Playback tokens.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use tracing::debug;
use vod_core::api::ACTION_GET_PLAY_INFO;
use vod_core::{Query, VodClient, VodError, VodResult};

pub const TOKEN_VERSION: &str = "V2";

/// Parameters of a `GetPlayInfo` call embedded in a playback token.
///
/// Only `vid` is required. Optional fields left as `None` (or set to an
/// empty string) are not sent at all.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlaybackRequest {
    pub vid: String,
    pub definition: Option<String>,
    pub file_type: Option<String>,
    pub codec: Option<String>,
    pub format: Option<String>,
    pub base64: Option<bool>,
    pub logo_type: Option<String>,
    pub ssl: Option<bool>,
}

impl PlaybackRequest {
    pub fn new(vid: impl Into<String>) -> Self {
        Self {
            vid: vid.into(),
            ..Self::default()
        }
    }

    pub fn with_definition(mut self, definition: impl Into<String>) -> Self {
        self.definition = Some(definition.into());
        self
    }

    pub fn with_file_type(mut self, file_type: impl Into<String>) -> Self {
        self.file_type = Some(file_type.into());
        self
    }

    pub fn with_codec(mut self, codec: impl Into<String>) -> Self {
        self.codec = Some(codec.into());
        self
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn with_base64(mut self, base64: bool) -> Self {
        self.base64 = Some(base64);
        self
    }

    pub fn with_logo_type(mut self, logo_type: impl Into<String>) -> Self {
        self.logo_type = Some(logo_type.into());
        self
    }

    pub fn with_ssl(mut self, ssl: bool) -> Self {
        self.ssl = Some(ssl);
        self
    }

    /// Build the signed query. `X-Expires` is added only for a positive
    /// `expiry_secs`; otherwise the server default applies.
    pub fn to_query(&self, expiry_secs: i64) -> VodResult<Query> {
        if self.vid.is_empty() {
            return Err(VodError::bad_request("video id (Vid) is required"));
        }

        let mut query = Query::new();
        query.insert("Vid".to_string(), self.vid.clone());

        let text_fields = [
            ("Definition", &self.definition),
            ("FileType", &self.file_type),
            ("Codec", &self.codec),
            ("Format", &self.format),
            ("LogoType", &self.logo_type),
        ];
        for (key, value) in text_fields {
            if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                query.insert(key.to_string(), value.to_string());
            }
        }

        for (key, flag) in [("Base64", self.base64), ("Ssl", self.ssl)] {
            if let Some(flag) = flag {
                query.insert(key.to_string(), if flag { "1" } else { "0" }.to_string());
            }
        }

        if expiry_secs > 0 {
            query.insert("X-Expires".to_string(), expiry_secs.to_string());
        }
        Ok(query)
    }
}

/// Opaque token handed to players; pass it back verbatim.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlaybackToken {
    #[serde(rename = "GetPlayInfoToken")]
    pub get_play_info_token: String,
    #[serde(rename = "TokenVersion")]
    pub token_version: String,
}

impl PlaybackToken {
    pub fn new(signed_query: impl Into<String>) -> Self {
        Self {
            get_play_info_token: signed_query.into(),
            token_version: TOKEN_VERSION.to_string(),
        }
    }

    /// base64(json(token))
    pub fn encode(&self) -> VodResult<String> {
        let json = serde_json::to_vec(self)?;
        Ok(STANDARD.encode(json))
    }

    pub fn decode(token: &str) -> VodResult<Self> {
        let json = STANDARD
            .decode(token.trim())
            .map_err(|e| VodError::bad_request(format!("token is not valid base64: {e}")))?;
        serde_json::from_slice(&json)
            .map_err(|e| VodError::bad_request(format!("token is not valid json: {e}")))
    }
}

/// Issues playback tokens signed for the `GetPlayInfo` action.
#[derive(Clone, Debug)]
pub struct PlaybackTokenIssuer {
    client: VodClient,
}

impl PlaybackTokenIssuer {
    pub fn new(client: VodClient) -> Self {
        Self { client }
    }

    /// Sign `request` and wrap the result into a base64 [`PlaybackToken`].
    pub fn get_playback_token(
        &self,
        request: &PlaybackRequest,
        expiry_secs: i64,
    ) -> VodResult<String> {
        let query = request.to_query(expiry_secs)?;
        let signed = self.client.signer().sign_url(ACTION_GET_PLAY_INFO, &query)?;
        debug!("Issued playback token for vid {}", request.vid);
        PlaybackToken::new(signed).encode()
    }
}
