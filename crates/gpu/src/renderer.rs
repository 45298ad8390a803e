//! Boundary to the external scene renderer.
//!
//! The core hands over one [`RenderFrame`] per tick and receives nothing back
//! except traversal callbacks, which enter through the viewer's dispatch
//! point rather than through this trait.

use std::io::Write;

use layers::LayerDescriptor;
use scene::view::ViewState;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderFrame {
    pub frame_index: u64,
    /// Basemap first, then draped layers in draw order.
    pub layers: Vec<LayerDescriptor>,
    pub view_state: ViewState,
    /// Flight the renderer reports back on completion, if one is running.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transition_id: Option<u64>,
    /// Attribution line for the current basemap tiles.
    pub credits: String,
}

#[derive(Debug)]
pub enum RenderError {
    Encode(serde_json::Error),
    Io(std::io::Error),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::Encode(e) => write!(f, "failed to encode frame: {e}"),
            RenderError::Io(e) => write!(f, "failed to write frame: {e}"),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Encode(e) => Some(e),
            RenderError::Io(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for RenderError {
    fn from(e: std::io::Error) -> Self {
        RenderError::Io(e)
    }
}

impl From<serde_json::Error> for RenderError {
    fn from(e: serde_json::Error) -> Self {
        RenderError::Encode(e)
    }
}

/// Draws declarative frames. Implemented outside the core.
pub trait SceneRenderer {
    fn draw(&mut self, frame: &RenderFrame) -> Result<(), RenderError>;
}

/// Writes each frame as one JSON line, for an out-of-process renderer.
#[derive(Debug)]
pub struct JsonLinesRenderer<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> SceneRenderer for JsonLinesRenderer<W> {
    fn draw(&mut self, frame: &RenderFrame) -> Result<(), RenderError> {
        serde_json::to_writer(&mut self.out, frame)?;
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        Ok(())
    }
}
