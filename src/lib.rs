//! Headless scroll-coordinated motion primitives.
//!
//! Four independent primitives sit behind a portfolio-style page: a
//! one-shot visibility reveal ([`RevealTracker`]), a scroll progress
//! indicator with auto-hide ([`ScrollProgressMonitor`]), a scroll-bound
//! hero size interpolator ([`HeroSizeInterpolator`]), and a
//! geometry-captured page transition ([`GeometryTransition`]).
//!
//! The crate owns no event loop, DOM, or clock. A host UI layer feeds it
//! scroll samples, element rectangles, and a monotonic timeline, and binds
//! the returned plain values (`is_visible`, `progress_percent`,
//! `height_px`, clip insets) into its own rendering. Every registered
//! resource is scoped to its owner: subscriptions are RAII guards and
//! dropping a controller cancels its pending navigation.
#![forbid(unsafe_code)]

pub mod ease;
pub mod error;
pub mod geometry;
pub mod hero;
pub mod observe;
pub mod progress;
pub mod reveal;
pub mod scroll;
pub mod transition;

pub use ease::{Ease, interpolate};
pub use error::{MotionError, MotionResult};
pub use geometry::{ClipInset, Viewport, is_measurable};
pub use hero::{HERO_MAX_SCROLL_PX, HeroSizeInterpolator, HeroSizeOptions};
pub use observe::{
    IntersectionObserver, IntersectionRecord, Latch, MarginValue, RootMargin, parse_root_margin,
};
pub use progress::{INDICATOR_HIDE_SCROLL_PX, ProgressOptions, ScrollProgressMonitor};
pub use reveal::{RevealOptions, RevealTracker};
pub use scroll::{ScrollHub, ScrollSample, ScrollSubscription};
pub use transition::{
    GeometryTransition, OverlayLayer, TRANSITION_DURATION_MS, TransitionOptions, TransitionPhase,
};
