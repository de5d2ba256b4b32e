use crate::error::{MotionError, MotionResult};

pub use kurbo::{Insets, Point, Rect, Size, Vec2};

/// Visible viewport dimensions in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> MotionResult<Self> {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(MotionError::validation(
                "Viewport dimensions must be finite and > 0",
            ));
        }
        Ok(Self { width, height })
    }

    /// The viewport as a rect anchored at the scroll origin.
    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

/// True when a measured rect is usable as transition geometry: all finite
/// coordinates and a strictly positive area. A rect measured before layout
/// (or from a detached element) fails this and must be treated as "not
/// ready" rather than animated from.
pub fn is_measurable(rect: Rect) -> bool {
    [rect.x0, rect.y0, rect.x1, rect.y1]
        .iter()
        .all(|v| v.is_finite())
        && rect.width() > 0.0
        && rect.height() > 0.0
}

/// A rectangular clip mask expressed as offsets from each viewport edge,
/// the geometry behind `clip-path: inset(...)`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ClipInset {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl ClipInset {
    /// Inset that makes exactly `source` visible inside `viewport`.
    pub fn from_source(source: Rect, viewport: Viewport) -> Self {
        Self {
            top: source.y0,
            right: viewport.width - source.x0 - source.width(),
            bottom: viewport.height - source.y0 - source.height(),
            left: source.x0,
        }
    }

    /// Zero inset on all sides: the clip covers the whole viewport.
    pub fn full_bleed() -> Self {
        Self {
            top: 0.0,
            right: 0.0,
            bottom: 0.0,
            left: 0.0,
        }
    }

    pub fn is_full_bleed(self) -> bool {
        self == Self::full_bleed()
    }

    /// CSS `clip-path` value for DOM hosts, edges in the canonical
    /// top/right/bottom/left order.
    pub fn css_clip_path(self) -> String {
        format!(
            "inset({:.0}px {:.0}px {:.0}px {:.0}px)",
            self.top, self.right, self.bottom, self.left
        )
    }
}
