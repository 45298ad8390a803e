use serde::Serialize;

/// Slider/toggle state shared by every draped layer.
///
/// Mutated only through the setters, each of which bumps `revision` when the
/// value actually changes. Composition reads one snapshot per pass, so all
/// layers of a frame carry the same revision.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UiState {
    opacity: f64,
    extruded: bool,
    elevation_scale: f64,
    depth_threshold: f64,
    revision: u64,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UiField {
    Opacity,
    Extruded,
    ElevationScale,
    DepthThreshold,
}

impl UiField {
    pub fn as_str(&self) -> &'static str {
        match self {
            UiField::Opacity => "opacity",
            UiField::Extruded => "extruded",
            UiField::ElevationScale => "elevation_scale",
            UiField::DepthThreshold => "depth_threshold",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiStateError {
    NonFinite { field: UiField, value: f64 },
}

impl std::fmt::Display for UiStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UiStateError::NonFinite { field, value } => {
                write!(f, "{} must be finite, got {value}", field.as_str())
            }
        }
    }
}

impl std::error::Error for UiStateError {}

impl Default for UiState {
    fn default() -> Self {
        Self {
            opacity: 0.8,
            extruded: true,
            elevation_scale: 0.5,
            depth_threshold: 0.0,
            revision: 0,
        }
    }
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn extruded(&self) -> bool {
        self.extruded
    }

    pub fn elevation_scale(&self) -> f64 {
        self.elevation_scale
    }

    pub fn depth_threshold(&self) -> f64 {
        self.depth_threshold
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Clamped to `[0, 1]`. Returns `Ok(true)` if the state changed.
    pub fn set_opacity(&mut self, opacity: f64) -> Result<bool, UiStateError> {
        let v = finite(UiField::Opacity, opacity)?.clamp(0.0, 1.0);
        Ok(self.replace_f64(UiField::Opacity, v))
    }

    pub fn set_extruded(&mut self, extruded: bool) -> bool {
        if self.extruded == extruded {
            return false;
        }
        self.extruded = extruded;
        self.revision += 1;
        true
    }

    /// Clamped to `>= 0`.
    pub fn set_elevation_scale(&mut self, scale: f64) -> Result<bool, UiStateError> {
        let v = finite(UiField::ElevationScale, scale)?.max(0.0);
        Ok(self.replace_f64(UiField::ElevationScale, v))
    }

    /// Clamped to `>= 0`; depths are never negative.
    pub fn set_depth_threshold(&mut self, threshold: f64) -> Result<bool, UiStateError> {
        let v = finite(UiField::DepthThreshold, threshold)?.max(0.0);
        Ok(self.replace_f64(UiField::DepthThreshold, v))
    }

    fn replace_f64(&mut self, field: UiField, value: f64) -> bool {
        let slot = match field {
            UiField::Opacity => &mut self.opacity,
            UiField::ElevationScale => &mut self.elevation_scale,
            UiField::DepthThreshold => &mut self.depth_threshold,
            UiField::Extruded => return false,
        };
        if *slot == value {
            return false;
        }
        *slot = value;
        self.revision += 1;
        true
    }
}

fn finite(field: UiField, value: f64) -> Result<f64, UiStateError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(UiStateError::NonFinite { field, value })
    }
}
