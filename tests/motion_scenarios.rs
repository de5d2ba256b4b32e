use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use scrollmotion::geometry::Rect;
use scrollmotion::{
    GeometryTransition, HERO_MAX_SCROLL_PX, HeroSizeInterpolator, HeroSizeOptions,
    IntersectionRecord, ProgressOptions, RevealOptions, RevealTracker, ScrollHub,
    ScrollProgressMonitor, ScrollSample, TransitionOptions, TransitionPhase, Viewport,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn viewport() -> Viewport {
    Viewport::new(1200.0, 800.0).unwrap()
}

fn rect(left: f64, top: f64, width: f64, height: f64) -> Rect {
    Rect::new(left, top, left + width, top + height)
}

fn sample(scroll_top: f64) -> ScrollSample {
    ScrollSample {
        scroll_top,
        viewport: viewport(),
        document_height: 3200.0,
    }
}

#[test]
fn scenario_a_reveal_latches_once_at_low_threshold() {
    init_tracing();
    let mut tracker = RevealTracker::new(RevealOptions {
        threshold: 0.1,
        ..Default::default()
    })
    .unwrap();
    tracker.attach();

    tracker.on_intersection(IntersectionRecord {
        ratio: 0.15,
        is_intersecting: true,
    });
    assert!(tracker.is_visible());
    assert!(!tracker.is_observing());

    // Any later record, including leaving the viewport, changes nothing.
    tracker.on_intersection(IntersectionRecord {
        ratio: 0.0,
        is_intersecting: false,
    });
    assert!(tracker.is_visible());
}

#[test]
fn scenario_b_indicator_hide_is_permanent() {
    init_tracing();
    let mut monitor = ScrollProgressMonitor::new(ProgressOptions::default()).unwrap();

    monitor.on_scroll(sample(401.0));
    assert!(!monitor.indicator_visible());

    monitor.on_scroll(sample(0.0));
    assert!(!monitor.indicator_visible());
    assert_eq!(monitor.progress_percent(), 0.0);
}

#[test]
fn scenario_c_hero_clamps_at_the_floor() {
    init_tracing();
    let mut hero = HeroSizeInterpolator::new(
        HeroSizeOptions {
            initial_height: 800.0,
            final_height: 200.0,
        },
        viewport(),
    )
    .unwrap();

    hero.on_scroll(0.0);
    assert_eq!(hero.height_px(), 800.0);
    hero.on_scroll(HERO_MAX_SCROLL_PX);
    assert_eq!(hero.height_px(), 200.0);
    hero.on_scroll(2000.0);
    assert_eq!(hero.height_px(), 200.0);
}

#[test]
fn scenario_d_transition_inset_and_single_navigation() {
    init_tracing();
    let navigations = Rc::new(RefCell::new(Vec::new()));
    let sink = navigations.clone();
    let mut controller = GeometryTransition::new(
        TransitionOptions::new("/work/case-study"),
        move |dest: &str| sink.borrow_mut().push(dest.to_string()),
    )
    .unwrap();

    let source = rect(50.0, 100.0, 300.0, 200.0);
    assert!(controller.trigger(Some(source), viewport(), Duration::ZERO));
    assert_eq!(controller.phase(), TransitionPhase::Animating);

    let inset = controller.overlay().unwrap().clip_inset();
    assert_eq!((inset.top, inset.left, inset.right, inset.bottom), (100.0, 50.0, 850.0, 500.0));

    controller.tick(Duration::from_millis(599));
    assert!(navigations.borrow().is_empty());
    controller.tick(Duration::from_millis(600));
    controller.tick(Duration::from_millis(601));
    assert_eq!(*navigations.borrow(), ["/work/case-study"]);
}

#[test]
fn unmount_before_deadline_navigates_nowhere() {
    init_tracing();
    let navigations = Rc::new(RefCell::new(Vec::new()));
    let sink = navigations.clone();
    let mut controller = GeometryTransition::new(
        TransitionOptions::new("/work/case-study"),
        move |dest: &str| sink.borrow_mut().push(dest.to_string()),
    )
    .unwrap();

    controller.trigger(
        Some(rect(50.0, 100.0, 300.0, 200.0)),
        viewport(),
        Duration::ZERO,
    );
    controller.tick(Duration::from_millis(300));
    drop(controller);
    assert!(navigations.borrow().is_empty());
}

/// The consolidated wiring from the design notes: one scroll listener on
/// the host side, one hub dispatch, every primitive recomputing from the
/// same sample.
#[test]
fn one_hub_drives_the_whole_cluster() {
    init_tracing();
    let hub = ScrollHub::new();

    let monitor = Rc::new(RefCell::new(
        ScrollProgressMonitor::new(ProgressOptions::default()).unwrap(),
    ));
    let hero = Rc::new(RefCell::new(
        HeroSizeInterpolator::new(
            HeroSizeOptions {
                initial_height: 800.0,
                final_height: 200.0,
            },
            viewport(),
        )
        .unwrap(),
    ));

    let m = monitor.clone();
    let _monitor_sub = hub.subscribe(move |s| m.borrow_mut().on_scroll(s));
    let h = hero.clone();
    let hero_sub = hub.subscribe(move |s| h.borrow_mut().on_scroll(s.scroll_top));

    hub.dispatch(sample(600.0));
    assert_eq!(monitor.borrow().progress_percent(), 25.0);
    assert!(!monitor.borrow().indicator_visible());
    assert!(hero.borrow().height_px() < 800.0);

    // The hero's component unmounts; only the monitor keeps updating.
    drop(hero_sub);
    let frozen = hero.borrow().height_px();
    hub.dispatch(sample(2400.0));
    assert_eq!(hero.borrow().height_px(), frozen);
    assert_eq!(monitor.borrow().progress_percent(), 100.0);
}

/// Reveal driven end to end from geometry: the host reports the element
/// rect on every scroll tick until the latch fires and detaches.
#[test]
fn reveal_from_scrolling_geometry() {
    init_tracing();
    let mut tracker = RevealTracker::new(RevealOptions {
        threshold: 0.5,
        ..Default::default()
    })
    .unwrap();
    tracker.attach();

    // Element authored 1000px below the fold, 200px tall.
    let element_top = 1800.0;
    let mut scroll_top = 0.0;
    while scroll_top <= 1200.0 && !tracker.is_visible() {
        let top = element_top - scroll_top;
        tracker.observe_rect(rect(100.0, top, 400.0, 200.0), viewport());
        scroll_top += 50.0;
    }

    assert!(tracker.is_visible());
    // Latched before the element fully entered, once half was visible.
    assert!(scroll_top < 1200.0);
}
