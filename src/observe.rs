//! Headless viewport intersection.
//!
//! Browsers hand intersection ratios to an observer callback; a headless
//! host instead reports element geometry, and [`IntersectionObserver`]
//! derives the same `ratio` / `is_intersecting` pair from rect math. Hosts
//! with a native observer can skip the geometry path and feed
//! [`IntersectionRecord`]s directly to the consuming primitive.

use crate::{
    error::{MotionError, MotionResult},
    geometry::{Insets, Rect, Viewport},
};

/// One margin component of a root margin, CSS-style.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum MarginValue {
    Px(f64),
    /// Percentage of the viewport dimension on the matching axis.
    Percent(f64),
}

impl MarginValue {
    fn resolve(self, axis_len: f64) -> f64 {
        match self {
            Self::Px(v) => v,
            Self::Percent(v) => axis_len * v / 100.0,
        }
    }

    pub fn is_finite(self) -> bool {
        match self {
            Self::Px(v) | Self::Percent(v) => v.is_finite(),
        }
    }
}

/// Margins applied to the viewport before intersection is computed.
/// Positive values grow the observation root, negative values shrink it
/// (the usual way to fire a reveal only once an element is well inside
/// the viewport).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RootMargin {
    pub top: MarginValue,
    pub right: MarginValue,
    pub bottom: MarginValue,
    pub left: MarginValue,
}

impl RootMargin {
    pub fn zero() -> Self {
        Self {
            top: MarginValue::Px(0.0),
            right: MarginValue::Px(0.0),
            bottom: MarginValue::Px(0.0),
            left: MarginValue::Px(0.0),
        }
    }

    /// Margins built through [`parse_root_margin`] are always finite; this
    /// covers the struct-literal and deserialization paths.
    pub fn validate(self) -> MotionResult<()> {
        let finite = [self.top, self.right, self.bottom, self.left]
            .iter()
            .all(|v| v.is_finite());
        if !finite {
            return Err(MotionError::validation(
                "root margin components must be finite",
            ));
        }
        Ok(())
    }

    /// The observation root: the viewport rect grown by these margins.
    pub fn root_rect(self, viewport: Viewport) -> Rect {
        let insets = Insets::new(
            self.left.resolve(viewport.width),
            self.top.resolve(viewport.height),
            self.right.resolve(viewport.width),
            self.bottom.resolve(viewport.height),
        );
        viewport.rect().inset(insets)
    }
}

impl Default for RootMargin {
    fn default() -> Self {
        Self::zero()
    }
}

fn parse_margin_value(s: &str) -> MotionResult<MarginValue> {
    let s = s.trim();
    let (num, ctor): (&str, fn(f64) -> MarginValue) = if let Some(n) = s.strip_suffix("px") {
        (n, MarginValue::Px)
    } else if let Some(n) = s.strip_suffix('%') {
        (n, MarginValue::Percent)
    } else if s == "0" {
        ("0", MarginValue::Px)
    } else {
        return Err(MotionError::parse(format!(
            "root margin value '{s}' must end in 'px' or '%'"
        )));
    };

    let v: f64 = num
        .parse()
        .map_err(|_| MotionError::parse(format!("root margin value '{s}' is not a number")))?;
    if !v.is_finite() {
        return Err(MotionError::parse("root margin value must be finite"));
    }
    Ok(ctor(v))
}

/// Parse a CSS-shorthand root margin string, e.g. `"0px 0px -100px 0px"`.
/// One to four space-separated values; `px` and `%` units only.
pub fn parse_root_margin(s: &str) -> MotionResult<RootMargin> {
    let parts: Vec<MarginValue> = s
        .split_whitespace()
        .map(parse_margin_value)
        .collect::<MotionResult<_>>()?;

    let margin = match parts.as_slice() {
        [all] => RootMargin {
            top: *all,
            right: *all,
            bottom: *all,
            left: *all,
        },
        [vertical, horizontal] => RootMargin {
            top: *vertical,
            right: *horizontal,
            bottom: *vertical,
            left: *horizontal,
        },
        [top, horizontal, bottom] => RootMargin {
            top: *top,
            right: *horizontal,
            bottom: *bottom,
            left: *horizontal,
        },
        [top, right, bottom, left] => RootMargin {
            top: *top,
            right: *right,
            bottom: *bottom,
            left: *left,
        },
        _ => {
            return Err(MotionError::parse(
                "root margin must have between one and four values",
            ));
        }
    };
    Ok(margin)
}

/// What a single observation saw.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct IntersectionRecord {
    /// Fraction of the target's area inside the observation root, `[0,1]`.
    pub ratio: f64,
    pub is_intersecting: bool,
}

/// Computes [`IntersectionRecord`]s from target geometry.
#[derive(Clone, Copy, Debug)]
pub struct IntersectionObserver {
    pub root_margin: RootMargin,
}

impl IntersectionObserver {
    pub fn new(root_margin: RootMargin) -> Self {
        Self { root_margin }
    }

    pub fn observe(&self, target: Rect, viewport: Viewport) -> IntersectionRecord {
        let target_area = target.area();
        if !target_area.is_finite() || target_area <= 0.0 {
            // Element not laid out yet: report nothing visible.
            return IntersectionRecord {
                ratio: 0.0,
                is_intersecting: false,
            };
        }

        let root = self.root_margin.root_rect(viewport);
        let visible = root.intersect(target).area();
        let ratio = (visible / target_area).clamp(0.0, 1.0);
        IntersectionRecord {
            ratio,
            is_intersecting: visible > 0.0,
        }
    }
}

/// A one-shot state transition: `Unresolved -> Resolved`, never back.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Latch {
    #[default]
    Unresolved,
    Resolved,
}

impl Latch {
    /// Resolve the latch. Returns `true` only on the transition itself;
    /// resolving an already-resolved latch is a no-op.
    pub fn fire(&mut self) -> bool {
        match self {
            Self::Unresolved => {
                *self = Self::Resolved;
                true
            }
            Self::Resolved => false,
        }
    }

    pub fn is_resolved(self) -> bool {
        self == Self::Resolved
    }
}
