//! Event handling for the overlay menu.

use muidom::{DomEvent, Host};

use super::{MenuAction, OverlayMenu};

impl OverlayMenu {
    pub(super) fn on_keydown(&self, host: &Host, ev: &mut DomEvent) {
        if self.is_destroyed() {
            return;
        }
        let Some(action) = ev.key().and_then(MenuAction::from_key) else {
            return;
        };

        if action.prevents_default() {
            ev.prevent_default();
        }

        log::trace!("[menu] key action {:?}", action);
        match action {
            MenuAction::Dismiss | MenuAction::TabAway => self.destroy(host),
            MenuAction::Next => self.increment(host),
            MenuAction::Previous => self.decrement(host),
            MenuAction::Commit => self.commit(host, None),
        }
    }

    pub(super) fn on_row_click(&self, host: &Host, index: usize, ev: &mut DomEvent) {
        // Keep the click away from outside-click handlers.
        ev.stop_propagation();
        self.commit(host, Some(index));
    }
}
