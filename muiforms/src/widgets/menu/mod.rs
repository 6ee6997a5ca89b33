//! Overlay menu: the transient list shown while a select is open.
//!
//! The menu owns keyboard input until it commits or is dismissed, then
//! signals its owner through [`MenuSignals`]. The owner is responsible for
//! unmounting it and for whatever it set up when opening (scroll lock,
//! window listeners).

pub mod events;
pub mod render;
pub mod state;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use muidom::{ElementId, EventType, Host, HostError, Listener, Target};

use crate::layers::overlay::{compute_layout, MenuGeometry, MenuLayout};
use crate::widgets::option::{selected_index, SelectOption};

pub use render::{MenuElements, MENU_CLASS, SELECTED_CLASS};
pub use state::{MenuAction, MenuState};

/// Callbacks from a menu to its owner.
#[derive(Clone)]
pub struct MenuSignals {
    /// A different option was committed.
    pub on_change: Rc<dyn Fn(&Host, &str)>,
    /// The menu wants to go away.
    pub on_close: Rc<dyn Fn(&Host)>,
}

pub struct OverlayMenu {
    state: RefCell<MenuState>,
    options: Vec<SelectOption>,
    geometry: MenuGeometry,
    layout: MenuLayout,
    elements: MenuElements,
    keydown: Listener,
    row_clicks: Vec<Listener>,
    signals: MenuSignals,
}

impl OverlayMenu {
    /// Mount a menu for `options` inside `parent`, positioned against
    /// `anchor`. The highlighted option starts at the selected one (see
    /// [`selected_index`]).
    pub fn mount(
        host: &Host,
        parent: ElementId,
        anchor: ElementId,
        options: Vec<SelectOption>,
        geometry: MenuGeometry,
        signals: MenuSignals,
    ) -> Result<Rc<Self>, HostError> {
        let origin = selected_index(&options, None);
        let state = MenuState::new(origin, options.len());

        let (anchor_page, anchor_client, viewport_height) = {
            let document = host.document();
            let anchor_page = document.node(anchor)?.rect;
            let anchor_client = document
                .bounding_client_rect(anchor)
                .ok_or(HostError::UnknownElement(anchor))?;
            (anchor_page, anchor_client, document.viewport().1)
        };

        let layout = compute_layout(
            &geometry,
            anchor_client,
            viewport_height,
            options.len(),
            state.current_index(),
        );
        let elements = render::build(
            host,
            parent,
            anchor_page,
            &options,
            &layout,
            &geometry,
            state.current_index(),
        )?;

        let menu = Rc::new_cyclic(|weak: &Weak<OverlayMenu>| {
            let keydown = {
                let weak = weak.clone();
                Listener::new(move |host, ev| {
                    if let Some(menu) = weak.upgrade() {
                        menu.on_keydown(host, ev);
                    }
                })
            };

            let row_clicks = (0..options.len())
                .map(|i| {
                    let weak = weak.clone();
                    Listener::new(move |host, ev| {
                        if let Some(menu) = weak.upgrade() {
                            menu.on_row_click(host, i, ev);
                        }
                    })
                })
                .collect();

            OverlayMenu {
                state: RefCell::new(state),
                options,
                geometry,
                layout,
                elements,
                keydown,
                row_clicks,
                signals,
            }
        });

        host.subscribe(Target::Document, EventType::KeyDown, menu.keydown.clone(), false);
        for (row, listener) in menu.elements.rows.iter().zip(&menu.row_clicks) {
            host.subscribe(Target::Element(*row), EventType::Click, listener.clone(), false);
        }

        // Drop focus from whatever opened the menu once this turn is over.
        let weak = Rc::downgrade(&menu);
        host.defer(move |host| {
            let Some(menu) = weak.upgrade() else {
                return;
            };
            if menu.is_destroyed() {
                return;
            }
            if let Some(active) = host.active_element() {
                host.blur(active);
            }
        });

        log::debug!(
            "[menu] mounted in {} with {} options, origin={}",
            parent,
            menu.options.len(),
            origin
        );
        Ok(menu)
    }

    pub fn origin_index(&self) -> usize {
        self.state.borrow().origin_index()
    }

    pub fn current_index(&self) -> usize {
        self.state.borrow().current_index()
    }

    pub fn is_destroyed(&self) -> bool {
        self.state.borrow().is_destroyed()
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn layout(&self) -> MenuLayout {
        self.layout
    }

    pub fn elements(&self) -> &MenuElements {
        &self.elements
    }

    /// Move the highlight down one option, stopping at the last.
    pub fn increment(&self, host: &Host) {
        let moved = {
            let mut state = self.state.borrow_mut();
            let previous = state.current_index();
            state.increment().then_some((previous, state.current_index()))
        };
        if let Some((previous, current)) = moved {
            self.show_highlight(host, previous, current);
        }
    }

    /// Move the highlight up one option, stopping at the first.
    pub fn decrement(&self, host: &Host) {
        let moved = {
            let mut state = self.state.borrow_mut();
            let previous = state.current_index();
            state.decrement().then_some((previous, state.current_index()))
        };
        if let Some((previous, current)) = moved {
            self.show_highlight(host, previous, current);
        }
    }

    fn show_highlight(&self, host: &Host, previous: usize, current: usize) {
        render::highlight(host, &self.elements, previous, current);
        render::scroll_into_view(host, &self.elements, &self.geometry, current);
    }

    /// Commit the option at `index` (the highlighted one when `None`), then
    /// destroy. The owner hears about the value only if it differs from
    /// the option selected at mount.
    pub fn commit(&self, host: &Host, index: Option<usize>) {
        let change = {
            let state = self.state.borrow();
            if state.is_destroyed() {
                return;
            }
            state.change_for(index.unwrap_or(state.current_index()))
        };

        if let Some(i) = change {
            let value = self.options[i].value.clone();
            log::debug!("[menu] commit {} ({})", i, value);
            (self.signals.on_change)(host, &value);
        }

        self.destroy(host);
    }

    /// Stop handling keys and ask the owner to unmount. Idempotent.
    pub fn destroy(&self, host: &Host) {
        if !self.state.borrow_mut().mark_destroyed() {
            return;
        }
        host.unsubscribe(Target::Document, EventType::KeyDown, Some(&self.keydown), false);
        (self.signals.on_close)(host);
    }

    /// Remove the menu's elements and listeners. Idempotent; called by the
    /// owner when it closes.
    pub fn unmount(&self, host: &Host) {
        self.state.borrow_mut().mark_destroyed();
        host.unsubscribe(Target::Document, EventType::KeyDown, Some(&self.keydown), false);
        if host.document().is_attached(self.elements.root) {
            host.remove_element(self.elements.root);
            log::debug!("[menu] unmounted {}", self.elements.root);
        }
    }
}

impl std::fmt::Debug for OverlayMenu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverlayMenu")
            .field("state", &self.state)
            .field("options", &self.options.len())
            .field("layout", &self.layout)
            .field("root", &self.elements.root)
            .finish()
    }
}
