use foundation::geo::LatLng;
use serde::Serialize;

/// Zoom applied when the camera focuses on a searched location.
pub const FOCUS_ZOOM: f64 = 17.5;
/// Camera flight duration for a focus change.
pub const FOCUS_TRANSITION_MS: u32 = 1000;

/// Camera state handed to the renderer.
///
/// Replaced wholesale on every focus change, never merged field by field.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: f64,
    pub bearing: f64,
    pub pitch: f64,
    /// When set, the renderer animates from its current camera to this state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transition_duration_ms: Option<u32>,
}

impl Default for ViewState {
    fn default() -> Self {
        // Downtown Houston, tilted to show the 3D basemap.
        Self {
            latitude: 29.7604,
            longitude: -95.3698,
            zoom: 15.0,
            bearing: 0.0,
            pitch: 60.0,
            transition_duration_ms: None,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FocusSettings {
    pub zoom: f64,
    pub transition_duration_ms: u32,
}

impl Default for FocusSettings {
    fn default() -> Self {
        Self {
            zoom: FOCUS_ZOOM,
            transition_duration_ms: FOCUS_TRANSITION_MS,
        }
    }
}

/// Identifies one focus request so stale completions can be told apart.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TransitionId(pub u64);

/// Owns the camera state.
///
/// Focus requests follow "last one wins": each call replaces the target and
/// restarts the transition; a completion for an older request is ignored.
#[derive(Debug, Clone)]
pub struct ViewController {
    current: ViewState,
    settings: FocusSettings,
    next_id: u64,
    in_flight: Option<TransitionId>,
}

impl Default for ViewController {
    fn default() -> Self {
        Self::new(ViewState::default(), FocusSettings::default())
    }
}

impl ViewController {
    pub fn new(initial: ViewState, settings: FocusSettings) -> Self {
        Self {
            current: initial,
            settings: FocusSettings {
                // A zero duration would jump-cut.
                transition_duration_ms: settings.transition_duration_ms.max(1),
                ..settings
            },
            next_id: 1,
            in_flight: None,
        }
    }

    pub fn current(&self) -> &ViewState {
        &self.current
    }

    pub fn in_flight(&self) -> Option<TransitionId> {
        self.in_flight
    }

    pub fn focus_on(&mut self, target: LatLng) -> ViewState {
        let id = TransitionId(self.next_id);
        self.next_id += 1;
        self.current = ViewState {
            latitude: target.lat,
            longitude: target.lng,
            zoom: self.settings.zoom,
            bearing: 0.0,
            pitch: 0.0,
            transition_duration_ms: Some(self.settings.transition_duration_ms),
        };
        self.in_flight = Some(id);
        self.current
    }

    /// Called by the renderer when a flight ends. Returns `false` for a
    /// superseded or unknown transition.
    pub fn transition_finished(&mut self, id: TransitionId) -> bool {
        if self.in_flight != Some(id) {
            return false;
        }
        self.in_flight = None;
        // Settled: later frames must not restart the animation.
        self.current.transition_duration_ms = None;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::{FOCUS_ZOOM, FocusSettings, TransitionId, ViewController, ViewState};
    use foundation::geo::LatLng;
    use pretty_assertions::assert_eq;

    #[test]
    fn starts_at_default_view_without_transition() {
        let vc = ViewController::default();
        assert_eq!(*vc.current(), ViewState::default());
        assert_eq!(vc.current().transition_duration_ms, None);
        assert_eq!(vc.in_flight(), None);
    }

    #[test]
    fn focus_on_builds_fresh_view_state() {
        let mut vc = ViewController::default();
        let v = vc.focus_on(LatLng::new(34.0, -118.0).unwrap());
        assert_eq!(
            v,
            ViewState {
                latitude: 34.0,
                longitude: -118.0,
                zoom: FOCUS_ZOOM,
                bearing: 0.0,
                pitch: 0.0,
                transition_duration_ms: Some(1000),
            }
        );
        assert_eq!(*vc.current(), v);
    }

    #[test]
    fn latest_focus_wins() {
        let mut vc = ViewController::default();
        vc.focus_on(LatLng::new(10.0, 10.0).unwrap());
        let first = vc.in_flight().unwrap();
        let second_view = vc.focus_on(LatLng::new(20.0, 20.0).unwrap());
        let second = vc.in_flight().unwrap();
        assert_ne!(first, second);

        // The superseded flight finishing must not settle the new one.
        assert!(!vc.transition_finished(first));
        assert_eq!(*vc.current(), second_view);
        assert_eq!(vc.current().transition_duration_ms, Some(1000));

        assert!(vc.transition_finished(second));
        assert_eq!(vc.current().latitude, 20.0);
        assert_eq!(vc.current().transition_duration_ms, None);
        assert!(!vc.transition_finished(TransitionId(99)));
    }

    #[test]
    fn zero_duration_is_raised_to_keep_the_flight_animated() {
        let mut vc = ViewController::new(
            ViewState::default(),
            FocusSettings {
                zoom: 16.0,
                transition_duration_ms: 0,
            },
        );
        let v = vc.focus_on(LatLng::new(1.0, 2.0).unwrap());
        assert_eq!(v.zoom, 16.0);
        assert!(v.transition_duration_ms.unwrap() > 0);
    }

    #[test]
    fn serializes_camel_case_for_the_renderer() {
        let json = serde_json::to_value(ViewState::default()).unwrap();
        assert!(json.get("latitude").is_some());
        assert!(json.get("transitionDurationMs").is_none());
    }
}
