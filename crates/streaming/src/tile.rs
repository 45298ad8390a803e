//! Tile metadata reported by the renderer after a traversal.
//!
//! Only the parts the core reads are modelled: a stable id and, once the
//! payload has loaded, the copyright string from the glTF asset block.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileContent {
    /// `asset.copyright` of the tile's glTF payload; `;`-separated credits.
    #[serde(default)]
    pub copyright: Option<String>,
}

/// One tile selected by a traversal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub id: String,
    /// `None` while the payload is still in flight or failed to load.
    #[serde(default)]
    pub content: Option<TileContent>,
}

impl Tile {
    pub fn loaded(id: impl Into<String>, copyright: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: Some(TileContent {
                copyright: Some(copyright.into()),
            }),
        }
    }

    pub fn pending(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: None,
        }
    }

    pub fn attribution(&self) -> Option<&str> {
        self.content.as_ref()?.copyright.as_deref()
    }
}
