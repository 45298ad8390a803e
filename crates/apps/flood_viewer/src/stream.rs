//! Drives a viewer from a newline-delimited JSON input stream.

use std::io::BufRead;

use gpu::renderer::{RenderError, SceneRenderer};
use tracing::{debug, warn};

use crate::app::FloodViewer;
use crate::input::InputEvent;

#[derive(Debug)]
pub enum StreamError {
    Io(std::io::Error),
    Render(RenderError),
}

impl std::fmt::Display for StreamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StreamError::Io(e) => write!(f, "failed to read input: {e}"),
            StreamError::Render(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for StreamError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StreamError::Io(e) => Some(e),
            StreamError::Render(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for StreamError {
    fn from(e: std::io::Error) -> Self {
        StreamError::Io(e)
    }
}

impl From<RenderError> for StreamError {
    fn from(e: RenderError) -> Self {
        StreamError::Render(e)
    }
}

/// Draws the initial frame, then one frame per parsed input line until the
/// input closes. Blank and malformed lines are skipped without a frame.
///
/// The viewer's event log is flushed to `tracing` after every frame, so a
/// long-running stream retains no history. Returns the number of frames drawn.
pub fn run_stream<I: BufRead, R: SceneRenderer>(
    viewer: &mut FloodViewer,
    input: I,
    renderer: &mut R,
) -> Result<u64, StreamError> {
    draw(viewer, renderer)?;
    let mut drawn = 1;

    for (line_no, line) in input.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match InputEvent::parse_line(&line) {
            Ok(event) => {
                viewer.handle(event);
            }
            Err(e) => {
                warn!(line = line_no + 1, "skipping malformed input event: {e}");
                continue;
            }
        }
        draw(viewer, renderer)?;
        drawn += 1;
    }
    Ok(drawn)
}

fn draw<R: SceneRenderer>(viewer: &mut FloodViewer, renderer: &mut R) -> Result<(), StreamError> {
    viewer.render(renderer)?;
    for event in viewer.drain_events() {
        debug!(
            frame = event.frame_index,
            kind = event.kind.as_str(),
            message = %event.message,
            "event"
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::run_stream;
    use crate::app::FloodViewer;
    use formats::source::FeatureSource;
    use gpu::renderer::{JsonLinesRenderer, RenderError, RenderFrame, SceneRenderer};
    use layers::compose::LayerSetConfig;
    use layers::vector::DrapedLayerConfig;
    use pretty_assertions::assert_eq;
    use scene::view::ViewController;
    use serde_json::Value;
    use streaming::tileset::{ApiKey, TilesetSource};

    fn viewer() -> FloodViewer {
        let layers = LayerSetConfig::new(
            TilesetSource::google(ApiKey::new("k").unwrap()),
            vec![
                DrapedLayerConfig::new("zones", FeatureSource::url("https://x/z.geojson"), 120.0)
                    .unwrap(),
            ],
        )
        .unwrap();
        FloodViewer::new(layers, ViewController::default())
    }

    #[derive(Default)]
    struct CountingRenderer {
        frames: u64,
        last_credits: String,
    }

    impl SceneRenderer for CountingRenderer {
        fn draw(&mut self, frame: &RenderFrame) -> Result<(), RenderError> {
            self.frames += 1;
            self.last_credits = frame.credits.clone();
            Ok(())
        }
    }

    #[test]
    fn skips_blank_and_malformed_lines_and_keeps_going() {
        let input = [
            r#"{"type":"set_opacity","value":0.4}"#,
            "",
            "not json",
            "   ",
            r#"{"type":"explode"}"#,
            r#"{"type":"traversal_complete","tiles":[{"id":"1","content":{"copyright":"A;B"}}]}"#,
            r#"{"type":"set_opacity","value":"NaN"}"#,
            r#"{"type":"set_depth_threshold","value":50}"#,
        ]
        .join("\n");

        let mut v = viewer();
        let mut renderer = JsonLinesRenderer::new(Vec::new());
        let drawn = run_stream(&mut v, Cursor::new(input), &mut renderer).unwrap();
        assert_eq!(drawn, 4);

        let out = String::from_utf8(renderer.into_inner()).unwrap();
        let frames: Vec<Value> = out.lines().map(|l| serde_json::from_str(l).unwrap()).collect();
        assert_eq!(frames.len(), 4);

        let last = &frames[3];
        assert_eq!(last["frameIndex"], 3);
        assert_eq!(last["credits"], "A; B");
        assert_eq!(last["layers"][0]["type"], "tile_3d");
        let zones = &last["layers"][1];
        assert_eq!(zones["opacity"], 0.4);
        assert_eq!(
            zones["filterRange"],
            serde_json::json!({"low": 50.0, "high": 120.0})
        );
    }

    #[test]
    fn event_log_stays_empty_across_many_traversals() {
        let input: String = (0..2_000)
            .map(|i| {
                format!(
                    r#"{{"type":"traversal_complete","tiles":[{{"id":"t","content":{{"copyright":"Credit {i};Google"}}}}]}}"#
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        let mut v = viewer();
        let mut renderer = CountingRenderer::default();
        let drawn = run_stream(&mut v, Cursor::new(input), &mut renderer).unwrap();

        assert_eq!(drawn, 2_001);
        assert_eq!(renderer.frames, 2_001);
        assert_eq!(renderer.last_credits, "Credit 1999; Google");
        assert!(v.events().is_empty());
        assert_eq!(v.credits(), "Credit 1999; Google");
    }
}
