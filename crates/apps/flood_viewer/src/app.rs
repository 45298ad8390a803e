use foundation::geo::LatLng;
use gpu::renderer::{RenderError, RenderFrame, SceneRenderer};
use layers::compose::{LayerSetConfig, compose_layers};
use runtime::event_bus::{Event, EventBus, EventKind};
use runtime::frame::Frame;
use scene::ui_state::{UiState, UiStateError};
use scene::view::{TransitionId, ViewController, ViewState};
use streaming::credits::CreditAggregator;
use streaming::tile::Tile;
use tracing::{debug, info, warn};

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum UiAction {
    SetOpacity(f64),
    SetExtruded(bool),
    SetElevationScale(f64),
    SetDepthThreshold(f64),
}

/// Owns all mutable visualization state and is the only place it changes.
///
/// UI state flows one way into the layer list at render time; the camera and
/// the credit line are separate slices with their own update paths. Nothing
/// here blocks: every render recomputes the layer list from current state.
#[derive(Debug)]
pub struct FloodViewer {
    layers: LayerSetConfig,
    ui: UiState,
    view: ViewController,
    credits: CreditAggregator,
    bus: EventBus,
    frame: Frame,
}

impl FloodViewer {
    pub fn new(layers: LayerSetConfig, view: ViewController) -> Self {
        Self {
            layers,
            ui: UiState::new(),
            view,
            credits: CreditAggregator::new(),
            bus: EventBus::new(),
            frame: Frame::default(),
        }
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn view_state(&self) -> &ViewState {
        self.view.current()
    }

    pub fn credits(&self) -> &str {
        self.credits.display()
    }

    pub fn frame(&self) -> Frame {
        self.frame
    }

    pub fn events(&self) -> &[Event] {
        self.bus.events()
    }

    pub fn drain_events(&mut self) -> Vec<Event> {
        self.bus.drain()
    }

    /// Applies one slider/toggle change. Returns `Ok(false)` when the value
    /// was already current.
    pub fn apply_ui(&mut self, action: UiAction) -> Result<bool, UiStateError> {
        let changed = match action {
            UiAction::SetOpacity(v) => self.ui.set_opacity(v),
            UiAction::SetExtruded(v) => Ok(self.ui.set_extruded(v)),
            UiAction::SetElevationScale(v) => self.ui.set_elevation_scale(v),
            UiAction::SetDepthThreshold(v) => self.ui.set_depth_threshold(v),
        };

        let changed = match changed {
            Ok(changed) => changed,
            Err(err) => {
                self.reject(err.to_string());
                return Err(err);
            }
        };
        if changed {
            debug!(?action, revision = self.ui.revision(), "ui state changed");
            self.bus.emit(
                self.frame,
                EventKind::UiStateChanged,
                format!("{action:?} -> revision {}", self.ui.revision()),
            );
        }
        Ok(changed)
    }

    pub fn focus_on(&mut self, target: LatLng) -> ViewState {
        let view = self.view.focus_on(target);
        info!(lat = target.lat, lng = target.lng, "focus committed");
        self.bus.emit(
            self.frame,
            EventKind::FocusCommitted,
            format!("{},{} zoom {}", view.latitude, view.longitude, view.zoom),
        );
        view
    }

    pub fn transition_finished(&mut self, id: TransitionId) -> bool {
        let settled = self.view.transition_finished(id);
        if settled {
            self.bus
                .emit(self.frame, EventKind::TransitionFinished, format!("{}", id.0));
        } else {
            debug!(id = id.0, "ignoring superseded transition");
        }
        settled
    }

    /// Single update path for tile credits. Replaces the previous credit line
    /// with the one for `tiles`.
    pub fn on_traversal_complete(&mut self, tiles: &[Tile]) {
        let shown = self.credits.on_traversal_complete(tiles).to_string();
        debug!(
            tiles = tiles.len(),
            credits = self.credits.credits().len(),
            "traversal complete"
        );
        self.bus.emit(self.frame, EventKind::CreditsReplaced, shown);
    }

    /// Composes the frame for the current state and advances the tick.
    pub fn render_frame(&mut self) -> RenderFrame {
        let layers = compose_layers(&self.ui, &self.layers);
        let frame = RenderFrame {
            frame_index: self.frame.index,
            layers,
            view_state: *self.view.current(),
            transition_id: self.view.in_flight().map(|id| id.0),
            credits: self.credits.display().to_string(),
        };
        self.bus.emit(
            self.frame,
            EventKind::FrameComposed,
            format!("{} layers", frame.layers.len()),
        );
        self.frame = self.frame.next();
        frame
    }

    pub fn render<R: SceneRenderer>(&mut self, renderer: &mut R) -> Result<(), RenderError> {
        let frame = self.render_frame();
        renderer.draw(&frame)
    }

    pub(crate) fn reject(&mut self, reason: String) {
        warn!(%reason, "input rejected");
        self.bus.emit(self.frame, EventKind::InputRejected, reason);
    }
}

#[cfg(test)]
mod tests {
    use super::{FloodViewer, UiAction};
    use crate::config::{BOUNDARY_LAYER_ID, FLOOD_ZONES_LAYER_ID};
    use foundation::geo::LatLng;
    use formats::source::FeatureSource;
    use gpu::renderer::{RenderError, RenderFrame, SceneRenderer};
    use layers::compose::LayerSetConfig;
    use layers::layer::Layer;
    use layers::vector::DrapedLayerConfig;
    use pretty_assertions::assert_eq;
    use runtime::event_bus::EventKind;
    use scene::view::{TransitionId, ViewController};
    use streaming::tile::Tile;
    use streaming::tileset::{ApiKey, TilesetSource};

    fn assets() -> std::path::PathBuf {
        std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets")
    }

    fn viewer() -> FloodViewer {
        let boundary = FeatureSource::load_file(assets().join("project_boundary.geojson")).unwrap();
        let zones = FeatureSource::load_file(assets().join("flood_zones.geojson")).unwrap();
        let layers = LayerSetConfig::new(
            TilesetSource::google(ApiKey::new("test-key").unwrap()),
            vec![
                DrapedLayerConfig::new(BOUNDARY_LAYER_ID, boundary, 20.0).unwrap(),
                DrapedLayerConfig::new(FLOOD_ZONES_LAYER_ID, zones, 120.0).unwrap(),
            ],
        )
        .unwrap();
        FloodViewer::new(layers, ViewController::default())
    }

    fn depths(frame: &RenderFrame, layer: usize) -> Vec<f64> {
        frame.layers[layer]
            .as_draped()
            .unwrap()
            .features()
            .iter()
            .filter_map(|f| f.feature.flood_depth())
            .collect()
    }

    #[derive(Default)]
    struct RecordingRenderer {
        frames: Vec<RenderFrame>,
    }

    impl SceneRenderer for RecordingRenderer {
        fn draw(&mut self, frame: &RenderFrame) -> Result<(), RenderError> {
            self.frames.push(frame.clone());
            Ok(())
        }
    }

    #[test]
    fn initial_frame_drapes_layers_over_basemap() {
        let mut v = viewer();
        let frame = v.render_frame();
        assert_eq!(frame.frame_index, 0);
        assert_eq!(frame.credits, "");
        assert_eq!(frame.transition_id, None);
        let ids: Vec<&str> = frame.layers.iter().map(|l| l.id().as_str()).collect();
        assert_eq!(
            ids,
            vec!["google-3d-tiles", BOUNDARY_LAYER_ID, FLOOD_ZONES_LAYER_ID]
        );
        // Missing depth and depths above each layer's bound are excluded.
        assert_eq!(depths(&frame, 1), vec![5.0, 12.0, 20.0]);
        assert_eq!(depths(&frame, 2), vec![0.0, 10.0, 45.0, 60.0, 90.0, 120.0]);
        assert_eq!(v.frame().index, 1);
    }

    #[test]
    fn threshold_change_refilters_every_draped_layer_on_next_frame() {
        let mut v = viewer();
        let before = v.render_frame();
        assert!(v.apply_ui(UiAction::SetDepthThreshold(50.0)).unwrap());
        let after = v.render_frame();

        assert_eq!(depths(&after, 2), vec![60.0, 90.0, 120.0]);
        // Boundary layer tops out at 20, so nothing of it survives.
        assert!(depths(&after, 1).is_empty());
        assert!(!after.layers[1].as_draped().unwrap().visible);

        let zb = before.layers[2].as_draped().unwrap();
        let za = after.layers[2].as_draped().unwrap();
        assert_eq!(za.opacity, zb.opacity);
        assert_eq!(za.extruded, zb.extruded);
        assert_eq!(za.elevation_scale, zb.elevation_scale);
        assert_eq!(
            after.layers[1].as_draped().unwrap().ui_revision,
            za.ui_revision
        );
    }

    #[test]
    fn traversal_replaces_credits_and_is_idempotent() {
        let mut v = viewer();
        let tiles = vec![Tile::loaded("a", "A;B"), Tile::loaded("b", "B;C")];
        v.on_traversal_complete(&tiles);
        assert_eq!(v.credits(), "A; B; C");
        v.on_traversal_complete(&tiles);
        assert_eq!(v.credits(), "A; B; C");

        v.on_traversal_complete(&[Tile::loaded("c", "C"), Tile::pending("d")]);
        assert_eq!(v.credits(), "C");
        assert_eq!(v.render_frame().credits, "C");
        assert_eq!(
            v.events()
                .iter()
                .filter(|e| e.kind == EventKind::CreditsReplaced)
                .count(),
            3
        );
    }

    #[test]
    fn focus_and_transition_flow_into_frames() {
        let mut v = viewer();
        let view = v.focus_on(LatLng::new(34.0, -118.0).unwrap());
        assert_eq!(view.latitude, 34.0);
        assert_eq!(view.longitude, -118.0);
        assert_eq!(view.zoom, 17.5);
        assert_eq!(view.pitch, 0.0);
        assert_eq!(view.bearing, 0.0);
        assert_eq!(view.transition_duration_ms, Some(1000));

        let frame = v.render_frame();
        let id = frame.transition_id.unwrap();
        assert_eq!(frame.view_state, view);

        assert!(v.transition_finished(TransitionId(id)));
        let settled = v.render_frame();
        assert_eq!(settled.transition_id, None);
        assert_eq!(settled.view_state.transition_duration_ms, None);
        assert_eq!(settled.view_state.latitude, 34.0);
    }

    #[test]
    fn rejected_ui_input_is_recorded_and_ignored() {
        let mut v = viewer();
        let before = *v.ui();
        assert!(v.apply_ui(UiAction::SetOpacity(f64::NAN)).is_err());
        assert_eq!(*v.ui(), before);
        assert_eq!(v.events().last().unwrap().kind, EventKind::InputRejected);
    }

    #[test]
    fn render_hands_frames_to_the_renderer() {
        let mut v = viewer();
        let mut r = RecordingRenderer::default();
        v.render(&mut r).unwrap();
        v.apply_ui(UiAction::SetOpacity(0.4)).unwrap();
        v.render(&mut r).unwrap();
        assert_eq!(r.frames.len(), 2);
        assert_eq!(r.frames[1].frame_index, 1);
        assert_eq!(r.frames[1].layers[2].as_draped().unwrap().opacity, 0.4);
        let drained = v.drain_events();
        assert_eq!(
            drained.iter().filter(|e| e.kind == EventKind::FrameComposed).count(),
            2
        );
        assert!(v.events().is_empty());
    }
}
