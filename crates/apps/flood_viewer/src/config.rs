use std::path::PathBuf;

use clap::Parser;
use foundation::geo::{GeoError, LatLng};
use formats::source::{FeatureSource, SourceLoadError};
use layers::compose::LayerSetConfig;
use layers::layer::LayerConfigError;
use layers::vector::DrapedLayerConfig;
use scene::view::{FOCUS_TRANSITION_MS, FOCUS_ZOOM, FocusSettings, ViewController, ViewState};
use streaming::tileset::{ApiKey, GOOGLE_3D_TILES_ROOT, TilesetError, TilesetSource};

pub const BOUNDARY_LAYER_ID: &str = "project-boundary";
pub const FLOOD_ZONES_LAYER_ID: &str = "flood-zones";

/// Command line and environment configuration.
///
/// Deliberately not `Debug`: it holds the raw API key.
#[derive(Parser)]
#[command(author, version, about = "Composes flood-depth layers over a 3D basemap")]
pub struct Args {
    /// Tileset root descriptor URL
    #[arg(long, env = "FLOOD_TILESET_URL", default_value = GOOGLE_3D_TILES_ROOT)]
    pub tileset_url: String,

    /// API key sent with every tile request
    #[arg(long, env = "GOOGLE_MAPS_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Project boundary GeoJSON URL (fetched by the renderer)
    #[arg(long, env = "FLOOD_BOUNDARY_URL")]
    pub boundary_url: Option<String>,

    /// Local project boundary GeoJSON, filtered and styled in-process
    #[arg(long, env = "FLOOD_BOUNDARY_FILE")]
    pub boundary_file: Option<PathBuf>,

    /// Flood zone GeoJSON URL (fetched by the renderer)
    #[arg(long, env = "FLOOD_ZONES_URL")]
    pub flood_zones_url: Option<String>,

    /// Local flood zone GeoJSON, filtered and styled in-process
    #[arg(long, env = "FLOOD_ZONES_FILE")]
    pub flood_zones_file: Option<PathBuf>,

    /// Upper depth filter bound of the boundary layer
    #[arg(long, env = "FLOOD_BOUNDARY_MAX_DEPTH", default_value_t = 20.0)]
    pub boundary_max_depth: f64,

    /// Upper depth filter bound of the flood zone layer
    #[arg(long, env = "FLOOD_ZONES_MAX_DEPTH", default_value_t = 120.0)]
    pub flood_zones_max_depth: f64,

    #[arg(long, env = "FLOOD_INITIAL_LAT", default_value_t = ViewState::default().latitude)]
    pub initial_lat: f64,

    #[arg(long, env = "FLOOD_INITIAL_LNG", default_value_t = ViewState::default().longitude)]
    pub initial_lng: f64,

    #[arg(long, env = "FLOOD_INITIAL_ZOOM", default_value_t = ViewState::default().zoom)]
    pub initial_zoom: f64,

    #[arg(long, env = "FLOOD_INITIAL_PITCH", default_value_t = ViewState::default().pitch)]
    pub initial_pitch: f64,

    /// Zoom applied when focusing a searched location
    #[arg(long, env = "FLOOD_FOCUS_ZOOM", default_value_t = FOCUS_ZOOM)]
    pub focus_zoom: f64,

    /// Camera flight duration in milliseconds
    #[arg(long, env = "FLOOD_TRANSITION_MS", default_value_t = FOCUS_TRANSITION_MS)]
    pub transition_ms: u32,
}

#[derive(Debug)]
pub enum ConfigError {
    Tileset(TilesetError),
    MissingSource { layer: &'static str },
    ConflictingSource { layer: &'static str },
    Source(SourceLoadError),
    Layer(LayerConfigError),
    InitialView(GeoError),
    InvalidCamera { option: &'static str, value: f64 },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Tileset(e) => write!(f, "tileset: {e}"),
            ConfigError::MissingSource { layer } => {
                write!(f, "layer {layer}: one of the URL or file options is required")
            }
            ConfigError::ConflictingSource { layer } => {
                write!(f, "layer {layer}: give either a URL or a file, not both")
            }
            ConfigError::Source(e) => write!(f, "{e}"),
            ConfigError::Layer(e) => write!(f, "{e}"),
            ConfigError::InitialView(e) => write!(f, "initial view: {e}"),
            ConfigError::InvalidCamera { option, value } => {
                write!(f, "--{option} {value} is outside the camera's range")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Tileset(e) => Some(e),
            ConfigError::Source(e) => Some(e),
            ConfigError::Layer(e) => Some(e),
            ConfigError::InitialView(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TilesetError> for ConfigError {
    fn from(e: TilesetError) -> Self {
        ConfigError::Tileset(e)
    }
}

impl From<SourceLoadError> for ConfigError {
    fn from(e: SourceLoadError) -> Self {
        ConfigError::Source(e)
    }
}

impl From<LayerConfigError> for ConfigError {
    fn from(e: LayerConfigError) -> Self {
        ConfigError::Layer(e)
    }
}

impl From<GeoError> for ConfigError {
    fn from(e: GeoError) -> Self {
        ConfigError::InitialView(e)
    }
}

impl Args {
    pub fn layer_set(&self) -> Result<LayerSetConfig, ConfigError> {
        let key = ApiKey::new(self.api_key.clone().unwrap_or_default())?;
        let tileset = TilesetSource::new(self.tileset_url.clone(), key)?;

        let boundary = resolve_source(
            BOUNDARY_LAYER_ID,
            self.boundary_url.as_deref(),
            self.boundary_file.as_ref(),
        )?;
        let zones = resolve_source(
            FLOOD_ZONES_LAYER_ID,
            self.flood_zones_url.as_deref(),
            self.flood_zones_file.as_ref(),
        )?;

        let draped = vec![
            DrapedLayerConfig::new(BOUNDARY_LAYER_ID, boundary, self.boundary_max_depth)?,
            DrapedLayerConfig::new(FLOOD_ZONES_LAYER_ID, zones, self.flood_zones_max_depth)?,
        ];
        Ok(LayerSetConfig::new(tileset, draped)?)
    }

    /// Camera controller for the configured initial view, validated the same
    /// way as a searched location.
    pub fn view_controller(&self) -> Result<ViewController, ConfigError> {
        let center = LatLng::new(self.initial_lat, self.initial_lng)?;
        check_camera("initial-zoom", self.initial_zoom, 0.0, MAX_ZOOM)?;
        check_camera("initial-pitch", self.initial_pitch, 0.0, MAX_PITCH)?;
        check_camera("focus-zoom", self.focus_zoom, 0.0, MAX_ZOOM)?;

        let initial = ViewState {
            latitude: center.lat,
            longitude: center.lng,
            zoom: self.initial_zoom,
            pitch: self.initial_pitch,
            ..ViewState::default()
        };
        Ok(ViewController::new(
            initial,
            FocusSettings {
                zoom: self.focus_zoom,
                transition_duration_ms: self.transition_ms,
            },
        ))
    }
}

const MAX_ZOOM: f64 = 24.0;
const MAX_PITCH: f64 = 90.0;

fn check_camera(option: &'static str, value: f64, min: f64, max: f64) -> Result<(), ConfigError> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidCamera { option, value })
    }
}

fn resolve_source(
    layer: &'static str,
    url: Option<&str>,
    file: Option<&PathBuf>,
) -> Result<FeatureSource, ConfigError> {
    match (url, file) {
        (Some(_), Some(_)) => Err(ConfigError::ConflictingSource { layer }),
        (Some(url), None) => Ok(FeatureSource::url(url)),
        (None, Some(path)) => Ok(FeatureSource::load_file(path)?),
        (None, None) => Err(ConfigError::MissingSource { layer }),
    }
}
