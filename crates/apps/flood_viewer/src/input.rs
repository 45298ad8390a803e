//! Newline-delimited JSON input events from the UI and the renderer.

use foundation::geo::LatLng;
use scene::view::TransitionId;
use serde::Deserialize;
use streaming::tile::Tile;

use crate::app::{FloodViewer, UiAction};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    SetOpacity { value: f64 },
    SetExtruded { value: bool },
    SetElevationScale { value: f64 },
    SetDepthThreshold { value: f64 },
    /// Location picked in the address search.
    FocusOn { lat: f64, lng: f64 },
    /// The renderer finished the camera flight with this id.
    TransitionFinished { id: u64 },
    /// The renderer finished selecting tiles for the current view.
    TraversalComplete { tiles: Vec<Tile> },
}

impl InputEvent {
    pub fn parse_line(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }
}

impl FloodViewer {
    /// Routes one input event. Invalid values are recorded and dropped;
    /// returns whether the event was accepted. A finished flight that was
    /// already superseded counts as not accepted.
    pub fn handle(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::SetOpacity { value } => self.apply_ui(UiAction::SetOpacity(value)).is_ok(),
            InputEvent::SetExtruded { value } => {
                self.apply_ui(UiAction::SetExtruded(value)).is_ok()
            }
            InputEvent::SetElevationScale { value } => {
                self.apply_ui(UiAction::SetElevationScale(value)).is_ok()
            }
            InputEvent::SetDepthThreshold { value } => {
                self.apply_ui(UiAction::SetDepthThreshold(value)).is_ok()
            }
            InputEvent::FocusOn { lat, lng } => match LatLng::new(lat, lng) {
                Ok(target) => {
                    self.focus_on(target);
                    true
                }
                Err(err) => {
                    self.reject(format!("focus_on: {err}"));
                    false
                }
            },
            InputEvent::TransitionFinished { id } => self.transition_finished(TransitionId(id)),
            InputEvent::TraversalComplete { tiles } => {
                self.on_traversal_complete(&tiles);
                true
            }
        }
    }
}
