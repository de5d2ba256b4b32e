//! One-shot visibility reveal.
//!
//! A [`RevealTracker`] watches a single element and latches `is_visible`
//! the first time the element's intersection ratio reaches the configured
//! threshold. The latch never reverts; after it fires the tracker detaches
//! itself and ignores further records.

use tracing::debug;

use crate::{
    error::{MotionError, MotionResult},
    geometry::{Rect, Viewport},
    observe::{IntersectionObserver, IntersectionRecord, Latch, RootMargin},
};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RevealOptions {
    /// Intersection ratio at which the reveal fires, `[0,1]`.
    pub threshold: f64,
    #[serde(default)]
    pub root_margin: RootMargin,
}

impl RevealOptions {
    pub fn validate(&self) -> MotionResult<()> {
        if !self.threshold.is_finite() || !(0.0..=1.0).contains(&self.threshold) {
            return Err(MotionError::validation(
                "reveal threshold must be within [0, 1]",
            ));
        }
        self.root_margin.validate()
    }
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin: RootMargin::zero(),
        }
    }
}

#[derive(Debug)]
pub struct RevealTracker {
    options: RevealOptions,
    observer: IntersectionObserver,
    observing: bool,
    revealed: Latch,
}

impl RevealTracker {
    pub fn new(options: RevealOptions) -> MotionResult<Self> {
        options.validate()?;
        Ok(Self {
            observer: IntersectionObserver::new(options.root_margin),
            options,
            observing: false,
            revealed: Latch::Unresolved,
        })
    }

    /// Begin observing. The host calls this once the element is mounted;
    /// an element that never mounts simply never attaches, and
    /// [`is_visible`](Self::is_visible) stays `false`. Attaching after the
    /// latch has fired is a no-op.
    pub fn attach(&mut self) {
        if !self.revealed.is_resolved() {
            self.observing = true;
        }
    }

    /// Stop observing. Idempotent, and legal whether or not the latch has
    /// fired; the host must call it (or drop the tracker) on unmount.
    pub fn detach(&mut self) {
        self.observing = false;
    }

    /// Feed one intersection record, e.g. from a host-native observer.
    pub fn on_intersection(&mut self, record: IntersectionRecord) {
        if !self.observing {
            return;
        }
        if record.ratio >= self.options.threshold && self.revealed.fire() {
            debug!(
                ratio = record.ratio,
                threshold = self.options.threshold,
                "reveal latched"
            );
            // One-shot: no further callbacks are needed once revealed.
            self.detach();
        }
    }

    /// Feed element geometry; the tracker computes the intersection itself.
    pub fn observe_rect(&mut self, target: Rect, viewport: Viewport) {
        if !self.observing {
            return;
        }
        let record = self.observer.observe(target, viewport);
        self.on_intersection(record);
    }

    pub fn is_visible(&self) -> bool {
        self.revealed.is_resolved()
    }

    pub fn is_observing(&self) -> bool {
        self.observing
    }
}
