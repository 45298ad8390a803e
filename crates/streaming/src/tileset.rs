//! Photorealistic 3D basemap tileset reference.

use serde::{Serialize, Serializer};

/// Request header carrying the tileset API key.
pub const API_KEY_HEADER: &str = "X-GOOG-API-KEY";

/// Root descriptor of Google's photorealistic 3D tiles.
pub const GOOGLE_3D_TILES_ROOT: &str = "https://tile.googleapis.com/v1/3dtiles/root.json";

const REDACTED: &str = "<redacted>";

/// Tileset API key. Never printed: `Debug`, `Display` and `Serialize` all
/// redact it; an in-process renderer reads it through [`ApiKey::expose`].
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Result<Self, TilesetError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(TilesetError::MissingApiKey);
        }
        Ok(Self(key))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ApiKey({REDACTED})")
    }
}

impl std::fmt::Display for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(REDACTED)
    }
}

impl Serialize for ApiKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(REDACTED)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TilesetError {
    MissingApiKey,
    InvalidRootUrl(String),
}

impl std::fmt::Display for TilesetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TilesetError::MissingApiKey => write!(f, "tileset API key is missing or empty"),
            TilesetError::InvalidRootUrl(url) => {
                write!(f, "tileset root must be an http(s) URL: {url}")
            }
        }
    }
}

impl std::error::Error for TilesetError {}

/// Where the basemap tiles come from and how requests are authorized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TilesetSource {
    root_url: String,
    api_key: ApiKey,
}

impl TilesetSource {
    pub fn new(root_url: impl Into<String>, api_key: ApiKey) -> Result<Self, TilesetError> {
        let root_url = root_url.into();
        if !(root_url.starts_with("https://") || root_url.starts_with("http://")) {
            return Err(TilesetError::InvalidRootUrl(root_url));
        }
        Ok(Self { root_url, api_key })
    }

    pub fn google(api_key: ApiKey) -> Self {
        Self {
            root_url: GOOGLE_3D_TILES_ROOT.to_string(),
            api_key,
        }
    }

    pub fn root_url(&self) -> &str {
        &self.root_url
    }

    pub fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Headers the renderer must attach to every tile request.
    pub fn request_headers(&self) -> [(&'static str, &str); 1] {
        [(API_KEY_HEADER, self.api_key.expose())]
    }
}
