//! Page scroll progress and the auto-hiding scroll indicator.

use tracing::{debug, trace};

use crate::{
    error::{MotionError, MotionResult},
    observe::{IntersectionRecord, Latch},
    scroll::ScrollSample,
};

/// Scroll distance past which the indicator hides, shared by the whole
/// system.
pub const INDICATOR_HIDE_SCROLL_PX: f64 = 400.0;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ProgressOptions {
    #[serde(default = "default_hide_after_px")]
    pub hide_after_px: f64,
    /// Whether a downstream sections container is being observed; when
    /// `false` only the scroll-distance path can hide the indicator.
    #[serde(default)]
    pub watch_sections: bool,
}

fn default_hide_after_px() -> f64 {
    INDICATOR_HIDE_SCROLL_PX
}

impl ProgressOptions {
    pub fn validate(&self) -> MotionResult<()> {
        if !self.hide_after_px.is_finite() || self.hide_after_px <= 0.0 {
            return Err(MotionError::validation(
                "indicator hide threshold must be finite and > 0",
            ));
        }
        Ok(())
    }
}

impl Default for ProgressOptions {
    fn default() -> Self {
        Self {
            hide_after_px: INDICATOR_HIDE_SCROLL_PX,
            watch_sections: false,
        }
    }
}

/// Tracks global scroll offset as a `[0,100]` percentage, plus a one-shot
/// visibility flag for an auxiliary indicator widget.
#[derive(Debug)]
pub struct ScrollProgressMonitor {
    options: ProgressOptions,
    progress_percent: f64,
    hidden: Latch,
}

impl ScrollProgressMonitor {
    pub fn new(options: ProgressOptions) -> MotionResult<Self> {
        options.validate()?;
        Ok(Self {
            options,
            progress_percent: 0.0,
            hidden: Latch::Unresolved,
        })
    }

    /// Recompute progress from one scroll event. Also hides the indicator
    /// once the scroll distance passes the configured threshold.
    pub fn on_scroll(&mut self, sample: ScrollSample) {
        let max = sample.max_scroll();
        self.progress_percent = if max > 0.0 {
            (sample.scroll_top / max * 100.0).clamp(0.0, 100.0)
        } else {
            // Document no taller than the viewport: nothing to measure.
            0.0
        };
        trace!(percent = self.progress_percent, "scroll progress");

        if sample.scroll_top > self.options.hide_after_px && self.hidden.fire() {
            debug!(
                scroll_top = sample.scroll_top,
                "indicator hidden by scroll distance"
            );
        }
    }

    /// Feed an intersection record for the sections container. The first
    /// intersecting record hides the indicator; ignored when the monitor
    /// was built without a sections container.
    pub fn on_sections_intersection(&mut self, record: IntersectionRecord) {
        if self.options.watch_sections && record.is_intersecting && self.hidden.fire() {
            debug!("indicator hidden by sections container");
        }
    }

    pub fn progress_percent(&self) -> f64 {
        self.progress_percent
    }

    pub fn indicator_visible(&self) -> bool {
        !self.hidden.is_resolved()
    }
}
