use serde::Serialize;

use crate::terrain::BasemapLayer;
use crate::vector::DrapedLayer;

/// Layer identifier, unique within one layer set.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct LayerId(pub String);

impl LayerId {
    pub fn new(id: impl Into<String>) -> Self {
        LayerId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

pub trait Layer {
    fn id(&self) -> &LayerId;
}

/// Declarative description of one renderer layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum LayerDescriptor {
    #[serde(rename = "tile_3d")]
    Basemap(BasemapLayer),
    #[serde(rename = "geojson")]
    Draped(DrapedLayer),
}

impl LayerDescriptor {
    pub fn as_draped(&self) -> Option<&DrapedLayer> {
        match self {
            LayerDescriptor::Draped(layer) => Some(layer),
            LayerDescriptor::Basemap(_) => None,
        }
    }

    pub fn as_basemap(&self) -> Option<&BasemapLayer> {
        match self {
            LayerDescriptor::Basemap(layer) => Some(layer),
            LayerDescriptor::Draped(_) => None,
        }
    }
}

impl Layer for LayerDescriptor {
    fn id(&self) -> &LayerId {
        match self {
            LayerDescriptor::Basemap(layer) => layer.id(),
            LayerDescriptor::Draped(layer) => layer.id(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LayerConfigError {
    DuplicateLayerId(LayerId),
    InvalidMaxDepth { id: LayerId, value: f64 },
}

impl std::fmt::Display for LayerConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayerConfigError::DuplicateLayerId(id) => write!(f, "duplicate layer id: {id}"),
            LayerConfigError::InvalidMaxDepth { id, value } => {
                write!(f, "layer {id}: max depth must be finite and >= 0, got {value}")
            }
        }
    }
}

impl std::error::Error for LayerConfigError {}
