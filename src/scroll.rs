//! Shared scroll signal.
//!
//! Every primitive in this crate reads the same global scroll position, so
//! a host only needs one scroll listener: it builds a [`ScrollSample`] per
//! event and pushes it through a [`ScrollHub`], which broadcasts to every
//! live subscription. Subscriptions are RAII guards; dropping one (when its
//! component unmounts) deregisters it. Hosts with a single consumer can
//! skip the hub and call the primitive's `on_scroll` directly.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::{debug, trace};

use crate::geometry::Viewport;

/// A snapshot of global scroll state at one scroll event.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrollSample {
    /// Scroll offset from the top of the document, in pixels.
    pub scroll_top: f64,
    pub viewport: Viewport,
    /// Full scrollable height of the document, in pixels.
    pub document_height: f64,
}

impl ScrollSample {
    /// How far past the document the viewport can still travel.
    pub fn max_scroll(self) -> f64 {
        (self.document_height - self.viewport.height).max(0.0)
    }
}

type Callback = Box<dyn FnMut(ScrollSample)>;

struct HubInner {
    next_id: u64,
    subscribers: Vec<(u64, Callback)>,
    /// Ids unsubscribed while a dispatch had the list checked out.
    dead: Vec<u64>,
    last: Option<ScrollSample>,
}

/// Single-dispatch fan-out for scroll events.
///
/// Single-threaded by design; the whole cluster runs on the host's UI
/// event loop.
#[derive(Clone)]
pub struct ScrollHub {
    inner: Rc<RefCell<HubInner>>,
}

impl ScrollHub {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(HubInner {
                next_id: 0,
                subscribers: Vec::new(),
                dead: Vec::new(),
                last: None,
            })),
        }
    }

    /// Register a subscriber. It is invoked for every subsequent
    /// [`dispatch`](Self::dispatch), in registration order, until the
    /// returned guard is dropped.
    pub fn subscribe(&self, callback: impl FnMut(ScrollSample) + 'static) -> ScrollSubscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.subscribers.push((id, Box::new(callback)));
        debug!(id, count = inner.subscribers.len(), "scroll subscriber added");
        ScrollSubscription {
            hub: Rc::downgrade(&self.inner),
            id,
        }
    }

    /// Broadcast one scroll event to all live subscribers.
    pub fn dispatch(&self, sample: ScrollSample) {
        trace!(scroll_top = sample.scroll_top, "scroll dispatch");
        // Callbacks may subscribe or drop guards reentrantly, so the list
        // is taken out for the duration of the walk and merged back after.
        let mut current = {
            let mut inner = self.inner.borrow_mut();
            inner.last = Some(sample);
            std::mem::take(&mut inner.subscribers)
        };
        for (id, callback) in current.iter_mut() {
            // A guard dropped by an earlier callback lands on the dead
            // list; its subscriber must not see the in-flight sample.
            let unsubscribed = self.inner.borrow().dead.contains(id);
            if !unsubscribed {
                callback(sample);
            }
        }
        let mut inner = self.inner.borrow_mut();
        let added = std::mem::replace(&mut inner.subscribers, current);
        inner.subscribers.extend(added);
        if !inner.dead.is_empty() {
            let dead = std::mem::take(&mut inner.dead);
            inner.subscribers.retain(|(id, _)| !dead.contains(id));
        }
    }

    /// The most recently dispatched sample, if any.
    pub fn last_sample(&self) -> Option<ScrollSample> {
        self.inner.borrow().last
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }
}

impl Default for ScrollHub {
    fn default() -> Self {
        Self::new()
    }
}

/// Guard for one hub registration; dropping it removes the subscriber.
pub struct ScrollSubscription {
    hub: Weak<RefCell<HubInner>>,
    id: u64,
}

impl Drop for ScrollSubscription {
    fn drop(&mut self) {
        if let Some(inner) = self.hub.upgrade()
            && let Ok(mut inner) = inner.try_borrow_mut()
        {
            // During a dispatch the list is checked out of the hub, so the
            // retain below may find nothing; the dead list lets the merge
            // step drop this subscriber instead.
            inner.subscribers.retain(|(id, _)| *id != self.id);
            inner.dead.push(self.id);
            debug!(id = self.id, "scroll subscriber removed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(scroll_top: f64) -> ScrollSample {
        ScrollSample {
            scroll_top,
            viewport: Viewport::new(1200.0, 800.0).unwrap(),
            document_height: 3000.0,
        }
    }

    #[test]
    fn dispatch_reaches_all_subscribers() {
        let hub = ScrollHub::new();
        let seen_a = Rc::new(RefCell::new(Vec::new()));
        let seen_b = Rc::new(RefCell::new(Vec::new()));

        let a = seen_a.clone();
        let _sub_a = hub.subscribe(move |s| a.borrow_mut().push(s.scroll_top));
        let b = seen_b.clone();
        let _sub_b = hub.subscribe(move |s| b.borrow_mut().push(s.scroll_top));

        hub.dispatch(sample(10.0));
        hub.dispatch(sample(20.0));

        assert_eq!(*seen_a.borrow(), vec![10.0, 20.0]);
        assert_eq!(*seen_b.borrow(), vec![10.0, 20.0]);
    }

    #[test]
    fn dropping_guard_deregisters() {
        let hub = ScrollHub::new();
        let seen = Rc::new(RefCell::new(0u32));

        let s = seen.clone();
        let sub = hub.subscribe(move |_| *s.borrow_mut() += 1);
        hub.dispatch(sample(10.0));
        assert_eq!(hub.subscriber_count(), 1);

        drop(sub);
        assert_eq!(hub.subscriber_count(), 0);
        hub.dispatch(sample(20.0));
        assert_eq!(*seen.borrow(), 1);
    }

    #[test]
    fn last_sample_is_retained() {
        let hub = ScrollHub::new();
        assert!(hub.last_sample().is_none());
        hub.dispatch(sample(42.0));
        assert_eq!(hub.last_sample().unwrap().scroll_top, 42.0);
    }

    #[test]
    fn max_scroll_clamps_at_zero() {
        let short = ScrollSample {
            scroll_top: 0.0,
            viewport: Viewport::new(1200.0, 800.0).unwrap(),
            document_height: 500.0,
        };
        assert_eq!(short.max_scroll(), 0.0);
        assert_eq!(sample(0.0).max_scroll(), 2200.0);
    }

    #[test]
    fn unsubscribed_by_earlier_callback_misses_the_sample() {
        let hub = ScrollHub::new();
        let seen = Rc::new(RefCell::new(0u32));

        let victim_guard: Rc<RefCell<Option<ScrollSubscription>>> =
            Rc::new(RefCell::new(None));
        let slot = victim_guard.clone();
        let _dropper = hub.subscribe(move |_| {
            slot.borrow_mut().take();
        });

        let s = seen.clone();
        *victim_guard.borrow_mut() = Some(hub.subscribe(move |_| *s.borrow_mut() += 1));

        // The dropper runs first and unmounts the victim; the victim must
        // not receive this dispatch or any later one.
        hub.dispatch(sample(10.0));
        hub.dispatch(sample(20.0));
        assert_eq!(*seen.borrow(), 0);
        assert_eq!(hub.subscriber_count(), 1);
    }

    #[test]
    fn subscribing_from_inside_a_callback_does_not_panic() {
        let hub = ScrollHub::new();
        let hub2 = hub.clone();
        let held: Rc<RefCell<Vec<ScrollSubscription>>> = Rc::new(RefCell::new(Vec::new()));
        let held2 = held.clone();
        let _sub = hub.subscribe(move |_| {
            let guard = hub2.subscribe(|_| {});
            held2.borrow_mut().push(guard);
        });
        hub.dispatch(sample(1.0));
        assert_eq!(hub.subscriber_count(), 2);
    }
}
