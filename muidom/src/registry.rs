//! Listener bookkeeping keyed by `(Target, EventType)`.
//!
//! The registry is the only place listeners live: dispatch reads it, and
//! removal matches on listener identity plus the capture flag, so callers
//! only need to keep the [`Listener`] handle they subscribed with.

use std::cell::{Cell, OnceCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::event::{DomEvent, EventType, Target};
use crate::host::Host;

type Callback = dyn Fn(&Host, &mut DomEvent);

/// A cloneable handle to an event callback. Equality is identity.
#[derive(Clone)]
pub struct Listener(Rc<Callback>);

impl Listener {
    pub fn new(f: impl Fn(&Host, &mut DomEvent) + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn call(&self, host: &Host, event: &mut DomEvent) {
        (self.0)(host, event)
    }

    /// Whether both handles refer to the same callback.
    pub fn same(&self, other: &Listener) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Listener {
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}

impl Eq for Listener {}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Listener({:p})", Rc::as_ptr(&self.0) as *const ())
    }
}

#[derive(Debug, Clone)]
struct Entry {
    listener: Listener,
    use_capture: bool,
}

/// Per-target listener cache.
#[derive(Debug, Default)]
pub struct EventRegistry {
    cache: HashMap<(Target, EventType), Vec<Entry>>,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `listener`. Duplicate registrations are kept and tracked
    /// independently.
    pub fn subscribe(
        &mut self,
        target: Target,
        event_type: EventType,
        listener: Listener,
        use_capture: bool,
    ) {
        log::trace!(
            "[registry] subscribe {:?} {:?} {:?} capture={}",
            target,
            event_type,
            listener,
            use_capture
        );
        self.cache
            .entry((target, event_type))
            .or_default()
            .push(Entry {
                listener,
                use_capture,
            });
    }

    /// Detach listeners from `(target, event_type)`.
    ///
    /// With `Some(listener)`, every entry matching both the listener and
    /// `use_capture` is removed; with `None`, every entry for the pair is.
    /// Entries are visited newest first. Returns the number removed.
    pub fn unsubscribe(
        &mut self,
        target: Target,
        event_type: EventType,
        listener: Option<&Listener>,
        use_capture: bool,
    ) -> usize {
        let Some(entries) = self.cache.get_mut(&(target, event_type)) else {
            return 0;
        };

        let mut removed = 0;
        let mut i = entries.len();
        while i > 0 {
            i -= 1;
            let matches = match listener {
                None => true,
                Some(l) => entries[i].listener.same(l) && entries[i].use_capture == use_capture,
            };
            if matches {
                entries.remove(i);
                removed += 1;
            }
        }

        if entries.is_empty() {
            self.cache.remove(&(target, event_type));
        }

        log::trace!(
            "[registry] unsubscribe {:?} {:?} removed={}",
            target,
            event_type,
            removed
        );
        removed
    }

    /// Attach a wrapper that runs `listener` on the first matching event and
    /// then detaches itself. The wrapper is returned so it can be removed
    /// before it ever fires.
    pub fn subscribe_once(
        &mut self,
        target: Target,
        event_type: EventType,
        listener: Listener,
        use_capture: bool,
    ) -> Listener {
        let slot: Rc<OnceCell<Weak<Callback>>> = Rc::new(OnceCell::new());
        let fired = Cell::new(false);

        let wrapper_slot = slot.clone();
        let wrapper: Rc<Callback> = Rc::new(move |host: &Host, event: &mut DomEvent| {
            if fired.replace(true) {
                return;
            }
            listener.call(host, event);
            if let Some(me) = wrapper_slot.get().and_then(Weak::upgrade) {
                host.unsubscribe(target, event_type, Some(&Listener(me)), use_capture);
            }
        });
        let _ = slot.set(Rc::downgrade(&wrapper));

        let wrapper = Listener(wrapper);
        self.subscribe(target, event_type, wrapper.clone(), use_capture);
        wrapper
    }

    /// Drop every entry for `target`, whatever the event type.
    pub fn forget(&mut self, target: Target) {
        self.cache.retain(|(t, _), _| *t != target);
    }

    /// Snapshot of the listeners for one phase, in registration order.
    pub fn listeners(&self, target: Target, event_type: EventType, use_capture: bool) -> Vec<Listener> {
        self.cache
            .get(&(target, event_type))
            .map(|entries| {
                entries
                    .iter()
                    .filter(|e| e.use_capture == use_capture)
                    .map(|e| e.listener.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn is_subscribed(
        &self,
        target: Target,
        event_type: EventType,
        listener: &Listener,
        use_capture: bool,
    ) -> bool {
        self.cache.get(&(target, event_type)).is_some_and(|entries| {
            entries
                .iter()
                .any(|e| e.listener.same(listener) && e.use_capture == use_capture)
        })
    }

    /// Number of entries (both phases) for the pair.
    pub fn listener_count(&self, target: Target, event_type: EventType) -> usize {
        self.cache
            .get(&(target, event_type))
            .map(Vec::len)
            .unwrap_or(0)
    }
}
