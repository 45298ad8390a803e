use formats::geojson::{FLOOD_DEPTH_PROPERTY, Feature};
use formats::source::FeatureSource;
use foundation::color::Rgb;
use foundation::range::DepthRange;
use scene::ui_state::UiState;
use serde::Serialize;

use crate::layer::{Layer, LayerConfigError, LayerId};
use crate::symbology::DepthColorScale;

/// Static configuration of one draped flood layer.
///
/// Hazard categories differ only in their source and the upper bound of the
/// depth filter.
#[derive(Debug, Clone, PartialEq)]
pub struct DrapedLayerConfig {
    pub id: LayerId,
    pub source: FeatureSource,
    pub max_depth: f64,
}

impl DrapedLayerConfig {
    pub fn new(
        id: impl Into<String>,
        source: FeatureSource,
        max_depth: f64,
    ) -> Result<Self, LayerConfigError> {
        let id = LayerId::new(id);
        if !max_depth.is_finite() || max_depth < 0.0 {
            return Err(LayerConfigError::InvalidMaxDepth {
                id,
                value: max_depth,
            });
        }
        Ok(Self {
            id,
            source,
            max_depth,
        })
    }
}

/// A feature that passed the filter, with its encoded style.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyledFeature {
    pub feature: Feature,
    pub fill_color: Rgb,
    pub elevation: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerData {
    /// The renderer fetches the collection and applies the accessors itself.
    Url(String),
    /// Already filtered and styled by the core.
    Features(Vec<StyledFeature>),
}

/// GeoJSON polygons draped on the basemap surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrapedLayer {
    id: LayerId,
    pub data: LayerData,
    /// `false` when the threshold is above this layer's max depth.
    pub visible: bool,
    pub opacity: f64,
    pub extruded: bool,
    pub elevation_scale: f64,
    pub filter_range: DepthRange,
    pub depth_property: &'static str,
    pub color_scale: DepthColorScale,
    pub drape_on_terrain: bool,
    /// UI state revision the parameters were taken from.
    pub ui_revision: u64,
}

impl DrapedLayer {
    pub fn build(config: &DrapedLayerConfig, ui: &UiState, scale: DepthColorScale) -> Self {
        let threshold = ui.depth_threshold();
        let visible = threshold <= config.max_depth;
        let filter_range = DepthRange::saturating(threshold, config.max_depth);

        let mut layer = Self {
            id: config.id.clone(),
            data: LayerData::Url(String::new()),
            visible,
            opacity: ui.opacity(),
            extruded: ui.extruded(),
            elevation_scale: ui.elevation_scale(),
            filter_range,
            depth_property: FLOOD_DEPTH_PROPERTY,
            color_scale: scale,
            drape_on_terrain: true,
            ui_revision: ui.revision(),
        };

        layer.data = match &config.source {
            FeatureSource::Url(url) => LayerData::Url(url.clone()),
            FeatureSource::Inline(collection) => LayerData::Features(
                collection
                    .features
                    .iter()
                    .filter_map(|f| layer.style_feature(f))
                    .collect(),
            ),
        };
        layer
    }

    /// Filter predicate. A missing depth never passes.
    pub fn passes_filter(&self, depth: Option<f64>) -> bool {
        match depth {
            Some(d) => self.visible && self.filter_range.contains(d),
            None => false,
        }
    }

    pub fn fill_color(&self, depth: f64) -> Rgb {
        self.color_scale.color_for(depth)
    }

    /// Height in meters; zero when extrusion is off.
    pub fn elevation(&self, depth: f64) -> f64 {
        if self.extruded {
            depth * self.elevation_scale
        } else {
            0.0
        }
    }

    pub fn style_feature(&self, feature: &Feature) -> Option<StyledFeature> {
        let depth = feature.flood_depth();
        if !self.passes_filter(depth) {
            return None;
        }
        let depth = depth?;
        Some(StyledFeature {
            feature: feature.clone(),
            fill_color: self.fill_color(depth),
            elevation: self.elevation(depth),
        })
    }

    pub fn features(&self) -> &[StyledFeature] {
        match &self.data {
            LayerData::Features(features) => features,
            LayerData::Url(_) => &[],
        }
    }
}

impl Layer for DrapedLayer {
    fn id(&self) -> &LayerId {
        &self.id
    }
}

/// Hover label for a picked feature.
pub fn depth_tooltip(feature: &Feature) -> Option<String> {
    feature.flood_depth().map(|d| format!("Flood depth: {d}"))
}
