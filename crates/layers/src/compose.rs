use std::collections::HashSet;

use scene::ui_state::UiState;
use streaming::tileset::TilesetSource;

use crate::layer::{LayerConfigError, LayerDescriptor, LayerId};
use crate::symbology::FLOOD_DEPTH_SCALE;
use crate::terrain::BasemapLayer;
use crate::vector::{DrapedLayer, DrapedLayerConfig};

pub const BASEMAP_LAYER_ID: &str = "google-3d-tiles";

/// Fixed inputs of a layer set: the basemap and the draped layers in draw
/// order.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerSetConfig {
    basemap_id: LayerId,
    tileset: TilesetSource,
    draped: Vec<DrapedLayerConfig>,
}

impl LayerSetConfig {
    pub fn new(
        tileset: TilesetSource,
        draped: Vec<DrapedLayerConfig>,
    ) -> Result<Self, LayerConfigError> {
        let basemap_id = LayerId::new(BASEMAP_LAYER_ID);
        let mut seen: HashSet<&LayerId> = HashSet::new();
        seen.insert(&basemap_id);
        for layer in &draped {
            if !seen.insert(&layer.id) {
                return Err(LayerConfigError::DuplicateLayerId(layer.id.clone()));
            }
        }
        Ok(Self {
            basemap_id,
            tileset,
            draped,
        })
    }

    pub fn tileset(&self) -> &TilesetSource {
        &self.tileset
    }

    pub fn draped(&self) -> &[DrapedLayerConfig] {
        &self.draped
    }
}

/// Builds the full layer list for one frame.
///
/// Pure: the same UI state and config always give the same list. The basemap
/// comes first so the draped layers have a surface to attach to; every draped
/// layer reads the same `ui` snapshot.
pub fn compose_layers(ui: &UiState, config: &LayerSetConfig) -> Vec<LayerDescriptor> {
    let mut out = Vec::with_capacity(config.draped.len() + 1);
    out.push(LayerDescriptor::Basemap(BasemapLayer::new(
        config.basemap_id.clone(),
        &config.tileset,
    )));
    for layer in &config.draped {
        out.push(LayerDescriptor::Draped(DrapedLayer::build(
            layer,
            ui,
            FLOOD_DEPTH_SCALE,
        )));
    }
    out
}
