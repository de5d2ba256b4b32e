//! Geometry-captured page transition.
//!
//! On activation the controller measures a source element, mounts an
//! overlay model clipped to exactly that rectangle, and lets the host
//! animate the clip out to the full viewport while a fixed-delay navigation
//! deadline counts down. The two effects deliberately share only the
//! duration constant: navigation is time-triggered, never
//! completion-triggered, so a stalled animation cannot stall navigation.
//!
//! The controller owns no clock. The host drives it with a monotonic
//! timeline (any `Duration` since an arbitrary epoch) through
//! [`GeometryTransition::trigger`] and [`GeometryTransition::tick`], and a
//! controller dropped before its deadline never navigates.

use std::time::Duration;

use tracing::debug;

use crate::{
    error::{MotionError, MotionResult},
    geometry::{ClipInset, Rect, Viewport, is_measurable},
};

/// Shared by the overlay expansion and the navigation deadline.
pub const TRANSITION_DURATION_MS: u64 = 600;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TransitionOptions {
    /// Location pushed to the host router when the deadline fires.
    pub destination: String,
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u64,
}

fn default_duration_ms() -> u64 {
    TRANSITION_DURATION_MS
}

impl TransitionOptions {
    pub fn new(destination: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            duration_ms: TRANSITION_DURATION_MS,
        }
    }

    pub fn validate(&self) -> MotionResult<()> {
        if self.destination.trim().is_empty() {
            return Err(MotionError::validation(
                "transition destination must be non-empty",
            ));
        }
        if self.duration_ms == 0 {
            return Err(MotionError::validation("transition duration must be > 0"));
        }
        Ok(())
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TransitionPhase {
    Idle,
    Capturing,
    Animating,
}

/// The full-viewport overlay mounted outside the normal layout tree.
///
/// Starts clipped to the captured source rectangle; when the host reports
/// the expansion animation finished, the clip collapses to full bleed.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OverlayLayer {
    clip: ClipInset,
    expanded: bool,
}

impl OverlayLayer {
    fn new(clip: ClipInset) -> Self {
        Self {
            clip,
            expanded: false,
        }
    }

    pub fn clip_inset(&self) -> ClipInset {
        self.clip
    }

    pub fn css_clip_path(&self) -> String {
        self.clip.css_clip_path()
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    fn expand(&mut self) {
        self.clip = ClipInset::full_bleed();
        self.expanded = true;
    }
}

type NavigateFn = Box<dyn FnMut(&str)>;

/// Click-triggered geometry transition with a decoupled, cancelable
/// navigation timer.
pub struct GeometryTransition {
    options: TransitionOptions,
    navigate: NavigateFn,
    phase: TransitionPhase,
    source_rect: Option<Rect>,
    overlay: Option<OverlayLayer>,
    deadline: Option<Duration>,
}

impl GeometryTransition {
    pub fn new(options: TransitionOptions, navigate: impl FnMut(&str) + 'static) -> MotionResult<Self> {
        options.validate()?;
        Ok(Self {
            options,
            navigate: Box::new(navigate),
            phase: TransitionPhase::Idle,
            source_rect: None,
            overlay: None,
            deadline: None,
        })
    }

    /// Activate the transition. Suppressing the default activation
    /// behavior of the wrapped element is the host's job.
    ///
    /// An unmeasurable source, meaning `None`, non-finite, or zero-area
    /// (the element was not laid out yet), produces no action at all: no
    /// overlay, no deadline, phase stays `Idle`, and `false` is returned.
    /// Re-triggering while a transition is in flight is also a no-op; a
    /// controller navigates at most once.
    #[tracing::instrument(skip(self), fields(destination = %self.options.destination))]
    pub fn trigger(&mut self, source: Option<Rect>, viewport: Viewport, now: Duration) -> bool {
        if self.phase != TransitionPhase::Idle {
            return false;
        }
        self.phase = TransitionPhase::Capturing;
        let Some(rect) = source.filter(|r| is_measurable(*r)) else {
            debug!("source not measurable, transition skipped");
            self.phase = TransitionPhase::Idle;
            return false;
        };

        self.source_rect = Some(rect);
        self.overlay = Some(OverlayLayer::new(ClipInset::from_source(rect, viewport)));
        // Navigation is scheduled at trigger time, independent of how far
        // the overlay animation gets.
        self.deadline = Some(now + self.options.duration());
        self.phase = TransitionPhase::Animating;
        debug!(?rect, "transition started");
        true
    }

    /// Host-reported completion of the overlay expansion: the clip
    /// collapses to full bleed. Never touches the navigation deadline.
    pub fn on_animation_complete(&mut self) {
        if let Some(overlay) = self.overlay.as_mut()
            && !overlay.is_expanded()
        {
            overlay.expand();
            debug!("overlay expanded to full bleed");
        }
    }

    /// Advance the timeline; dispatches the navigation exactly once when
    /// `now` reaches the deadline.
    pub fn tick(&mut self, now: Duration) {
        if let Some(deadline) = self.deadline
            && now >= deadline
        {
            self.deadline = None;
            debug!(destination = %self.options.destination, "navigation dispatched");
            (self.navigate)(&self.options.destination);
        }
    }

    pub fn phase(&self) -> TransitionPhase {
        self.phase
    }

    /// The rectangle captured at trigger time; owned by this controller,
    /// nothing else reads it.
    pub fn source_rect(&self) -> Option<Rect> {
        self.source_rect
    }

    pub fn overlay(&self) -> Option<&OverlayLayer> {
        self.overlay.as_ref()
    }

    pub fn is_navigation_pending(&self) -> bool {
        self.deadline.is_some()
    }
}

impl Drop for GeometryTransition {
    fn drop(&mut self) {
        // The deadline dies with the controller, so an unmounted view can
        // never receive a stale navigation.
        if self.deadline.take().is_some() {
            debug!(destination = %self.options.destination, "pending navigation canceled");
        }
    }
}
