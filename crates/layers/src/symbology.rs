//! Depth → color encoding shared by every draped layer.

use foundation::color::Rgb;
use serde::Serialize;

/// Depth breakpoints of the flood scale. The first eight anchor a color; the
/// last closes the domain.
pub const DEPTH_BREAKPOINTS: [f64; 9] = [0.0, 15.0, 30.0, 45.0, 60.0, 75.0, 90.0, 105.0, 120.0];

/// Shallow (pale) to deep (dark blue).
pub const DEPTH_COLORS: [Rgb; 8] = [
    Rgb::new(247, 251, 255),
    Rgb::new(222, 235, 247),
    Rgb::new(198, 219, 239),
    Rgb::new(158, 202, 225),
    Rgb::new(107, 174, 214),
    Rgb::new(66, 146, 198),
    Rgb::new(33, 113, 181),
    Rgb::new(8, 69, 148),
];

pub const FLOOD_DEPTH_SCALE: DepthColorScale = DepthColorScale {
    domain: &DEPTH_BREAKPOINTS,
    colors: &DEPTH_COLORS,
};

/// Clamped piecewise-linear color scale.
///
/// Color `i` sits on breakpoint `i`. Breakpoints beyond the last color (here
/// the 9th) only extend the clamp domain, so depths between the last anchored
/// breakpoint and the domain max render in the last color.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct DepthColorScale {
    domain: &'static [f64],
    colors: &'static [Rgb],
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct LegendStop {
    pub depth: f64,
    pub color: Rgb,
}

impl DepthColorScale {
    pub fn min(&self) -> f64 {
        self.domain[0]
    }

    pub fn max(&self) -> f64 {
        self.domain[self.domain.len() - 1]
    }

    /// Total over all reals: out-of-domain depths saturate, NaN reads as the
    /// domain minimum.
    pub fn color_for(&self, depth: f64) -> Rgb {
        let d = if depth.is_nan() {
            self.min()
        } else {
            depth.clamp(self.min(), self.max())
        };

        let anchors = self.anchors();
        if d <= self.domain[0] {
            return self.colors[0];
        }
        for i in 0..anchors - 1 {
            let (lo, hi) = (self.domain[i], self.domain[i + 1]);
            if d <= hi {
                let t = (d - lo) / (hi - lo);
                return self.colors[i].lerp(self.colors[i + 1], t);
            }
        }
        self.colors[anchors - 1]
    }

    /// Stops for the on-screen legend, shallowest first.
    pub fn legend(&self) -> Vec<LegendStop> {
        (0..self.anchors())
            .map(|i| LegendStop {
                depth: self.domain[i],
                color: self.colors[i],
            })
            .collect()
    }

    fn anchors(&self) -> usize {
        self.domain.len().min(self.colors.len())
    }
}
