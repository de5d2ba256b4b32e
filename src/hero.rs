//! Scroll-bound size interpolation for a fixed-position hero layer.
//!
//! The hero image shrinks continuously as the page scrolls: scroll offset
//! is normalized over a fixed distance, eased with a cubic ease-out so the
//! shrink decelerates instead of stopping abruptly, and mapped onto a pixel
//! height between the configured initial and final sizes. Unlike the reveal
//! and indicator latches this is fully reversible; scrolling back up grows
//! the hero again.

use tracing::trace;

use crate::{
    ease::{Ease, interpolate},
    error::{MotionError, MotionResult},
    geometry::Viewport,
};

/// Scroll distance over which the hero travels from initial to final size.
pub const HERO_MAX_SCROLL_PX: f64 = 1000.0;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HeroSizeOptions {
    /// Height at `scroll_top = 0`, in pixels.
    pub initial_height: f64,
    /// Height at and past [`HERO_MAX_SCROLL_PX`], in pixels.
    pub final_height: f64,
}

impl HeroSizeOptions {
    pub fn validate(&self) -> MotionResult<()> {
        if !(self.initial_height.is_finite() && self.final_height.is_finite()) {
            return Err(MotionError::validation("hero heights must be finite"));
        }
        if self.final_height <= 0.0 {
            return Err(MotionError::validation("hero final height must be > 0"));
        }
        if self.final_height > self.initial_height {
            return Err(MotionError::validation(
                "hero final height must not exceed initial height",
            ));
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct HeroSizeInterpolator {
    initial_px: f64,
    final_px: f64,
    height_px: f64,
}

impl HeroSizeInterpolator {
    /// The initial height is capped at the viewport height at mount time;
    /// a "full viewport" hero can simply pass a large initial height.
    pub fn new(options: HeroSizeOptions, viewport: Viewport) -> MotionResult<Self> {
        options.validate()?;
        let initial_px = options.initial_height.min(viewport.height);
        let final_px = options.final_height.min(initial_px);
        Ok(Self {
            initial_px,
            final_px,
            height_px: initial_px,
        })
    }

    /// Pure form of the mapping.
    pub fn height_at(&self, scroll_top: f64) -> f64 {
        let s = (scroll_top / HERO_MAX_SCROLL_PX).clamp(0.0, 1.0);
        interpolate(self.initial_px, self.final_px, s, Ease::OutCubic).max(self.final_px)
    }

    /// Recompute the stored height from one scroll event.
    pub fn on_scroll(&mut self, scroll_top: f64) {
        self.height_px = self.height_at(scroll_top);
        trace!(scroll_top, height_px = self.height_px, "hero resized");
    }

    pub fn height_px(&self) -> f64 {
        self.height_px
    }

    pub fn initial_px(&self) -> f64 {
        self.initial_px
    }

    pub fn final_px(&self) -> f64 {
        self.final_px
    }
}
