use serde::Serialize;
use serde_json::{Map, Value};

/// Property carrying the per-feature flood depth.
pub const FLOOD_DEPTH_PROPERTY: &str = "flood_depth";

/// One GeoJSON feature. Geometry is kept opaque; the renderer interprets it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "Feature")]
pub struct Feature {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub properties: Map<String, Value>,
    pub geometry: Value,
}

impl Feature {
    pub fn new(properties: Map<String, Value>, geometry: Value) -> Self {
        Self {
            id: None,
            properties,
            geometry,
        }
    }

    /// Numeric property lookup. Non-numeric values read as absent.
    pub fn number(&self, key: &str) -> Option<f64> {
        self.properties
            .get(key)
            .and_then(|v| v.as_f64())
            .filter(|v| v.is_finite())
    }

    pub fn flood_depth(&self) -> Option<f64> {
        self.number(FLOOD_DEPTH_PROPERTY)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "type", rename = "FeatureCollection")]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

#[derive(Debug)]
pub enum GeoJsonError {
    Parse(serde_json::Error),
    NotAFeatureCollection,
    InvalidFeature { index: usize, reason: String },
}

impl std::fmt::Display for GeoJsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeoJsonError::Parse(e) => write!(f, "JSON parse error: {e}"),
            GeoJsonError::NotAFeatureCollection => {
                write!(f, "expected GeoJSON FeatureCollection")
            }
            GeoJsonError::InvalidFeature { index, reason } => {
                write!(f, "invalid feature at index {index}: {reason}")
            }
        }
    }
}

impl std::error::Error for GeoJsonError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GeoJsonError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl FeatureCollection {
    pub fn from_geojson_str(payload: &str) -> Result<Self, GeoJsonError> {
        let value: Value = serde_json::from_str(payload).map_err(GeoJsonError::Parse)?;
        Self::from_geojson_value(value)
    }

    pub fn from_geojson_value(value: Value) -> Result<Self, GeoJsonError> {
        let Value::Object(mut obj) = value else {
            return Err(GeoJsonError::NotAFeatureCollection);
        };
        if obj.get("type").and_then(|v| v.as_str()) != Some("FeatureCollection") {
            return Err(GeoJsonError::NotAFeatureCollection);
        }
        let Some(Value::Array(raw_features)) = obj.remove("features") else {
            return Err(GeoJsonError::NotAFeatureCollection);
        };

        let mut features = Vec::with_capacity(raw_features.len());
        for (index, raw) in raw_features.into_iter().enumerate() {
            let Value::Object(mut feat) = raw else {
                return Err(GeoJsonError::InvalidFeature {
                    index,
                    reason: "feature must be an object".to_string(),
                });
            };

            match feat.get("type").and_then(|v| v.as_str()) {
                Some("Feature") => {}
                Some(other) => {
                    return Err(GeoJsonError::InvalidFeature {
                        index,
                        reason: format!("unexpected feature type: {other}"),
                    });
                }
                None => {
                    return Err(GeoJsonError::InvalidFeature {
                        index,
                        reason: "feature missing type".to_string(),
                    });
                }
            }

            let id = match feat.remove("id") {
                Some(Value::String(s)) => Some(s),
                Some(Value::Number(n)) => Some(n.to_string()),
                _ => None,
            };

            // Null or missing properties are legal GeoJSON.
            let properties = match feat.remove("properties") {
                Some(Value::Object(map)) => map,
                _ => Map::new(),
            };

            let geometry = feat.remove("geometry").unwrap_or(Value::Null);

            features.push(Feature {
                id,
                properties,
                geometry,
            });
        }

        Ok(Self { features })
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}
