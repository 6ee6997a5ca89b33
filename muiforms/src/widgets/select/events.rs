//! Event handling for the select control.

use std::rc::{Rc, Weak};

use muidom::{DomEvent, Event, EventType, Host, Key, Listener, Target};

use super::render::SelectElements;
use super::state::FocusOwner;
use super::{Select, SelectHandlers, SelectShared};

/// Wrap a select handler so the listener holds only a weak reference.
fn bind(weak: &Weak<SelectShared>, f: fn(&Select, &Host, &mut DomEvent)) -> Listener {
    let weak = weak.clone();
    Listener::new(move |host, ev| {
        if let Some(shared) = weak.upgrade() {
            f(&Select { shared }, host, ev);
        }
    })
}

impl SelectHandlers {
    pub(super) fn new(weak: &Weak<SelectShared>) -> Self {
        Self {
            dismiss: bind(weak, Select::on_dismiss),
            keydown: bind(weak, Select::on_keydown),
            outer_focus: bind(weak, Select::on_outer_focus),
            outer_blur: bind(weak, Select::on_outer_blur),
            inner_focus: bind(weak, Select::on_inner_focus),
            inner_mouse_down: bind(weak, Select::on_inner_mouse_down),
            inner_click: bind(weak, Select::on_inner_click),
            inner_change: bind(weak, Select::on_inner_change),
        }
    }
}

impl Select {
    /// Open from inside a listener. Errors have no caller to go to, so
    /// they are logged and kept for [`Select::take_error`].
    fn open_from_event(&self, host: &Host) {
        if let Err(err) = self.open(host) {
            log::error!("[select] {} failed to open: {}", self.wrapper(), err);
            self.shared.state.borrow_mut().last_error = Some(err);
        }
    }

    fn on_outer_focus(&self, host: &Host, ev: &mut DomEvent) {
        let SelectElements { wrapper, inner, .. } = self.shared.elements;
        if ev.target_element() != Some(wrapper) {
            return;
        }

        let disabled = {
            let mut document = host.document_mut();
            let saved = document.get(inner).and_then(|node| node.tab_index);
            document.set_tab_index(inner, Some(-1));
            let mut state = self.shared.state.borrow_mut();
            state.saved_tab_index.get_or_insert(saved);
            state.focus_owner = Some(FocusOwner::Outer);
            document.get(inner).is_none_or(|node| node.disabled)
        };

        if disabled {
            host.blur(wrapper);
            return;
        }

        let keydown = &self.shared.handlers.keydown;
        host.unsubscribe(Target::Document, EventType::KeyDown, Some(keydown), false);
        host.subscribe(Target::Document, EventType::KeyDown, keydown.clone(), false);
    }

    fn on_outer_blur(&self, host: &Host, ev: &mut DomEvent) {
        let SelectElements { wrapper, inner, .. } = self.shared.elements;
        if ev.target_element() != Some(wrapper) {
            return;
        }

        let saved = {
            let mut state = self.shared.state.borrow_mut();
            if state.focus_owner == Some(FocusOwner::Outer) {
                state.focus_owner = None;
            }
            state.saved_tab_index.take()
        };
        if let Some(saved) = saved {
            host.document_mut().set_tab_index(inner, saved);
        }

        let keydown = &self.shared.handlers.keydown;
        host.unsubscribe(Target::Document, EventType::KeyDown, Some(keydown), false);
    }

    fn on_keydown(&self, host: &Host, ev: &mut DomEvent) {
        if !matches!(ev.key(), Some(Key::Char(' ') | Key::Up | Key::Down)) {
            return;
        }
        ev.prevent_default();
        if !self.is_disabled(host) {
            self.open_from_event(host);
        }
    }

    fn on_inner_mouse_down(&self, _host: &Host, ev: &mut DomEvent) {
        if self.shared.use_default {
            return;
        }
        if ev.button().is_some_and(|b| b.is_primary()) {
            // Keeps the native list closed and focus where it is.
            ev.prevent_default();
        }
    }

    fn on_inner_click(&self, host: &Host, ev: &mut DomEvent) {
        if ev.button().is_some_and(|b| b.is_primary()) {
            self.open_from_event(host);
        }
    }

    fn on_inner_focus(&self, host: &Host, ev: &mut DomEvent) {
        let SelectElements { wrapper, inner, .. } = self.shared.elements;
        if ev.target_element() != Some(inner) {
            return;
        }
        self.shared.state.borrow_mut().focus_owner = Some(FocusOwner::Inner);

        if self.shared.use_default {
            return;
        }

        // Hand focus to the wrapper once the current turn is over.
        let weak = Rc::downgrade(&self.shared);
        host.defer(move |host| {
            let Some(shared) = weak.upgrade() else {
                return;
            };
            if host.active_element() != Some(inner) || !host.document().is_attached(wrapper) {
                return;
            }
            if shared.state.borrow().is_open() {
                return;
            }
            let _ = host.focus(wrapper);
        });
    }

    fn on_inner_change(&self, host: &Host, ev: &mut DomEvent) {
        let Event::Change { value } = &ev.event else {
            return;
        };
        let value = value.clone();
        self.set_value(host, Some(value.clone()));
        if !self.shared.read_only {
            self.notify_change(&value);
        }
    }

    fn on_dismiss(&self, host: &Host, ev: &mut DomEvent) {
        if ev.event_type() == EventType::Click {
            let wrapper = self.shared.elements.wrapper;
            let inside = ev
                .target_element()
                .is_some_and(|target| host.document().contains(wrapper, target));
            if inside {
                return;
            }
        }
        self.close(host);
    }
}
