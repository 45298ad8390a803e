use serde::Serialize;
use streaming::tileset::{API_KEY_HEADER, ApiKey, TilesetSource};

use crate::layer::{Layer, LayerId};

/// Draw the tiles and expose their surface for draped layers.
pub const TERRAIN_OPERATION: &str = "terrain+draw";

/// Photorealistic 3D tiles basemap. Always the first layer of a set: the
/// draped layers attach to the surface it defines.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BasemapLayer {
    id: LayerId,
    /// Tileset root descriptor URL.
    pub data: String,
    pub operation: &'static str,
    pub api_key_header: &'static str,
    /// Serialized redacted; see [`ApiKey`].
    pub api_key: ApiKey,
}

impl BasemapLayer {
    pub fn new(id: LayerId, source: &TilesetSource) -> Self {
        Self {
            id,
            data: source.root_url().to_string(),
            operation: TERRAIN_OPERATION,
            api_key_header: API_KEY_HEADER,
            api_key: source.api_key().clone(),
        }
    }

    pub fn request_headers(&self) -> [(&'static str, &str); 1] {
        [(self.api_key_header, self.api_key.expose())]
    }
}

impl Layer for BasemapLayer {
    fn id(&self) -> &LayerId {
        &self.id
    }
}
