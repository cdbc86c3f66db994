//! Per-frame update broadcast
//!
//! Listeners are plain `FnMut(f32)` closures receiving the frame's delta time
//! in seconds. Closures have no equality, so each registration returns a
//! [`ListenerId`] that later identifies it for removal.
//!
//! Dispatch iterates a snapshot taken when the tick starts:
//! - listeners added during a tick first run on the next tick
//! - listeners removed during a tick still finish the current one
//!
//! A listener must not tick the same broadcaster re-entrantly; doing so
//! panics on the listener's own `RefCell` borrow.

use slotmap::{new_key_type, SlotMap};
use std::cell::RefCell;
use std::rc::Rc;

new_key_type! {
    /// Identity of a registered frame listener
    pub struct ListenerId;
}

type Listener = Rc<RefCell<dyn FnMut(f32)>>;

#[derive(Default)]
struct ListenerSet {
    listeners: SlotMap<ListenerId, Listener>,
    order: Vec<ListenerId>,
}

/// Ordered multicast of frame callbacks
///
/// Cloning yields another handle to the same listener set, so a driver can
/// tick while the owning registry is borrowed elsewhere, and listeners can
/// capture a handle to register or unregister others.
#[derive(Clone, Default)]
pub struct FrameBroadcaster {
    inner: Rc<RefCell<ListenerSet>>,
}

impl FrameBroadcaster {
    /// Create a broadcaster with no listeners
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener at the end of the invocation order
    pub fn add_listener<F>(&self, listener: F) -> ListenerId
    where
        F: FnMut(f32) + 'static,
    {
        let listener: Listener = Rc::new(RefCell::new(listener));
        let mut set = self.inner.borrow_mut();
        let id = set.listeners.insert(listener);
        set.order.push(id);
        id
    }

    /// Unregister a listener
    ///
    /// Unknown or already removed ids are ignored; returns whether a listener
    /// was removed.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut set = self.inner.borrow_mut();
        if set.listeners.remove(id).is_none() {
            return false;
        }
        set.order.retain(|other| *other != id);
        true
    }

    /// Whether `id` is still registered
    pub fn contains(&self, id: ListenerId) -> bool {
        self.inner.borrow().listeners.contains_key(id)
    }

    /// Number of registered listeners
    pub fn len(&self) -> usize {
        self.inner.borrow().order.len()
    }

    /// Whether no listeners are registered
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().order.is_empty()
    }

    /// Unregister every listener
    pub fn clear(&self) {
        let mut set = self.inner.borrow_mut();
        set.listeners.clear();
        set.order.clear();
    }

    /// Invoke every listener once, in registration order
    pub fn broadcast(&self, delta_time: f32) {
        // Release the set borrow before calling out so listeners may mutate it
        let snapshot: Vec<Listener> = {
            let set = self.inner.borrow();
            set.order
                .iter()
                .filter_map(|id| set.listeners.get(*id).cloned())
                .collect()
        };

        for listener in snapshot {
            let mut callback = listener.borrow_mut();
            (&mut *callback)(delta_time);
        }
    }
}

impl std::fmt::Debug for FrameBroadcaster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameBroadcaster")
            .field("listeners", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn recorder(log: &Rc<RefCell<Vec<(&'static str, f32)>>>, tag: &'static str) -> impl FnMut(f32) {
        let log = Rc::clone(log);
        move |dt| log.borrow_mut().push((tag, dt))
    }

    #[test]
    fn test_broadcast_without_listeners() {
        let frames = FrameBroadcaster::new();
        frames.broadcast(0.016);
        assert!(frames.is_empty());
    }

    #[test]
    fn test_remove_unknown_listener() {
        let frames = FrameBroadcaster::new();
        let id = frames.add_listener(|_| {});
        assert!(frames.remove_listener(id));
        assert!(!frames.remove_listener(id));
        assert!(!frames.contains(id));
    }

    #[test]
    fn test_clones_share_listeners() {
        let frames = FrameBroadcaster::new();
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        frames.clone().add_listener(move |_| counter.set(counter.get() + 1));

        frames.broadcast(0.5);
        assert_eq!(hits.get(), 1);
        assert_eq!(frames.len(), 1);
    }

    #[test]
    fn test_listener_added_mid_tick_runs_next_tick() {
        let frames = FrameBroadcaster::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let handle = frames.clone();
        let late = Rc::new(RefCell::new(Some(recorder(&log, "late"))));
        frames.add_listener(move |_| {
            if let Some(listener) = late.borrow_mut().take() {
                handle.add_listener(listener);
            }
        });

        frames.broadcast(1.0);
        assert!(log.borrow().is_empty());

        frames.broadcast(2.0);
        assert_eq!(*log.borrow(), vec![("late", 2.0)]);
    }

    #[test]
    fn test_listener_can_remove_itself() {
        let frames = FrameBroadcaster::new();
        let hits = Rc::new(Cell::new(0));

        let own_id: Rc<Cell<Option<ListenerId>>> = Rc::new(Cell::new(None));
        let handle = frames.clone();
        let id_slot = Rc::clone(&own_id);
        let counter = Rc::clone(&hits);
        let id = frames.add_listener(move |_| {
            counter.set(counter.get() + 1);
            if let Some(id) = id_slot.get() {
                handle.remove_listener(id);
            }
        });
        own_id.set(Some(id));

        frames.broadcast(0.1);
        frames.broadcast(0.1);
        assert_eq!(hits.get(), 1);
        assert!(frames.is_empty());
    }

    #[test]
    fn test_listener_removed_mid_tick_finishes_current_tick() {
        let frames = FrameBroadcaster::new();
        let hits = Rc::new(Cell::new(0));

        let victim: Rc<Cell<Option<ListenerId>>> = Rc::new(Cell::new(None));
        let handle = frames.clone();
        let target = Rc::clone(&victim);
        frames.add_listener(move |_| {
            if let Some(id) = target.get() {
                handle.remove_listener(id);
            }
        });

        let counter = Rc::clone(&hits);
        let second = frames.add_listener(move |_| counter.set(counter.get() + 1));
        victim.set(Some(second));

        frames.broadcast(0.1);
        assert_eq!(hits.get(), 1);
        assert!(!frames.contains(second));

        frames.broadcast(0.1);
        assert_eq!(hits.get(), 1);
        assert_eq!(frames.len(), 1);
    }
}
