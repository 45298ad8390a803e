use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::geojson::{FeatureCollection, GeoJsonError};

/// Where a draped layer gets its features from.
///
/// URL sources are fetched by the renderer; inline sources are filtered and
/// styled by the core before they are handed over.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureSource {
    Url(String),
    Inline(FeatureCollection),
}

impl FeatureSource {
    pub fn url(url: impl Into<String>) -> Self {
        FeatureSource::Url(url.into())
    }

    pub fn load_file(path: impl AsRef<Path>) -> Result<Self, SourceLoadError> {
        load_feature_collection(path).map(FeatureSource::Inline)
    }
}

#[derive(Debug)]
pub enum SourceLoadError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: GeoJsonError,
    },
}

impl std::fmt::Display for SourceLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceLoadError::Io { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            }
            SourceLoadError::Parse { path, source } => {
                write!(f, "failed to parse {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for SourceLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SourceLoadError::Io { source, .. } => Some(source),
            SourceLoadError::Parse { source, .. } => Some(source),
        }
    }
}

pub fn load_feature_collection(
    path: impl AsRef<Path>,
) -> Result<FeatureCollection, SourceLoadError> {
    let path = path.as_ref();
    let payload = fs::read_to_string(path).map_err(|e| SourceLoadError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    FeatureCollection::from_geojson_str(&payload).map_err(|e| SourceLoadError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}
