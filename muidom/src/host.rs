//! The page: document, listeners, focus, scroll lock and deferred tasks.
//!
//! Everything runs on one thread and every handler runs to completion
//! before the next one starts, so state lives in `RefCell`s that are only
//! borrowed for the duration of a single host call. Listeners receive
//! `&Host` and may call back into any host method; callers must not hold a
//! [`Host::document`] borrow across a dispatch.

use std::cell::{Ref, RefCell, RefMut};
use std::collections::VecDeque;

use crossterm::event::{Event as CrosstermEvent, KeyEventKind, MouseEventKind};

use crate::element::{Document, ElementId, ElementKind};
use crate::error::HostError;
use crate::event::{DomEvent, Event, EventType, Key, Modifiers, MouseButton, Target};
use crate::focus::FocusState;
use crate::hit::{hit_test, hit_test_focusable};
use crate::layout::Rect;
use crate::registry::{EventRegistry, Listener};
use crate::scroll::{ScrollHost, ScrollLock, ScrollPosition};

type Task = Box<dyn FnOnce(&Host)>;

/// Host-wide settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostConfig {
    /// Distance scrolled by one arrow key press or wheel notch.
    pub line_scroll: i32,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self { line_scroll: 40 }
    }
}

impl HostConfig {
    /// Settings for a character-cell surface.
    pub fn terminal() -> Self {
        Self { line_scroll: 1 }
    }
}

pub struct Host {
    config: HostConfig,
    document: RefCell<Document>,
    focus: RefCell<FocusState>,
    events: RefCell<EventRegistry>,
    scroll_lock: RefCell<ScrollLock>,
    tasks: RefCell<VecDeque<Task>>,
}

impl Host {
    pub fn new(width: i32, height: i32) -> Self {
        Self::with_config(width, height, HostConfig::default())
    }

    pub fn with_config(width: i32, height: i32, config: HostConfig) -> Self {
        Self {
            config,
            document: RefCell::new(Document::new(width, height)),
            focus: RefCell::new(FocusState::new()),
            events: RefCell::new(EventRegistry::new()),
            scroll_lock: RefCell::new(ScrollLock::new()),
            tasks: RefCell::new(VecDeque::new()),
        }
    }

    pub fn config(&self) -> HostConfig {
        self.config
    }

    pub fn document(&self) -> Ref<'_, Document> {
        self.document.borrow()
    }

    /// Mutable access to the document.
    ///
    /// The borrow must end before any other `Host` call: arguments such as
    /// `host.body()` inside the same expression panic. Prefer the narrow
    /// mutators ([`Host::set_rect`]) where one exists.
    pub fn document_mut(&self) -> RefMut<'_, Document> {
        self.document.borrow_mut()
    }

    pub fn body(&self) -> ElementId {
        self.document.borrow().body()
    }

    // =========================================================================
    // Elements
    // =========================================================================

    pub fn create_element(&self, kind: ElementKind, parent: ElementId) -> Result<ElementId, HostError> {
        self.document.borrow_mut().create(kind, parent)
    }

    /// Move or resize an element. Unknown ids are ignored.
    pub fn set_rect(&self, id: ElementId, rect: Rect) {
        self.document.borrow_mut().set_rect(id, rect);
    }

    /// Remove an element subtree along with every listener attached to it.
    pub fn remove_element(&self, id: ElementId) {
        let removed = self.document.borrow_mut().remove(id);
        {
            let mut events = self.events.borrow_mut();
            for gone in &removed {
                events.forget(Target::Element(*gone));
            }
        }
        let document = self.document.borrow();
        self.focus.borrow_mut().prune(&document);
    }

    // =========================================================================
    // Listeners
    // =========================================================================

    pub fn subscribe(&self, target: Target, event_type: EventType, listener: Listener, use_capture: bool) {
        self.events
            .borrow_mut()
            .subscribe(target, event_type, listener, use_capture);
    }

    pub fn unsubscribe(
        &self,
        target: Target,
        event_type: EventType,
        listener: Option<&Listener>,
        use_capture: bool,
    ) -> usize {
        self.events
            .borrow_mut()
            .unsubscribe(target, event_type, listener, use_capture)
    }

    pub fn subscribe_once(
        &self,
        target: Target,
        event_type: EventType,
        listener: Listener,
        use_capture: bool,
    ) -> Listener {
        self.events
            .borrow_mut()
            .subscribe_once(target, event_type, listener, use_capture)
    }

    pub fn listener_count(&self, target: Target, event_type: EventType) -> usize {
        self.events.borrow().listener_count(target, event_type)
    }

    // =========================================================================
    // Scrolling
    // =========================================================================

    pub fn scroll_position(&self) -> ScrollPosition {
        self.document.borrow().scroll_position()
    }

    pub fn scroll_to(&self, position: ScrollPosition) {
        self.document.borrow_mut().scroll_to(position);
    }

    pub fn acquire_scroll_lock(&self) {
        let mut document = self.document.borrow_mut();
        self.scroll_lock.borrow_mut().acquire(&mut *document);
    }

    pub fn release_scroll_lock(&self) {
        let mut document = self.document.borrow_mut();
        self.scroll_lock.borrow_mut().release(&mut *document);
    }

    pub fn scroll_lock_count(&self) -> usize {
        self.scroll_lock.borrow().ref_count()
    }

    pub fn saved_scroll_position(&self) -> Option<ScrollPosition> {
        self.scroll_lock.borrow().saved_position()
    }

    // =========================================================================
    // Focus
    // =========================================================================

    /// The focused element, or `None` when focus rests on the body.
    pub fn active_element(&self) -> Option<ElementId> {
        self.focus.borrow().focused()
    }

    /// Move focus to `id`, dispatching `Blur` on the previous element and
    /// `Focus` on the new one. Returns whether focus changed.
    pub fn focus(&self, id: ElementId) -> Result<bool, HostError> {
        {
            let document = self.document.borrow();
            if !document.node(id)?.is_focusable() {
                return Err(HostError::NotFocusable(id));
            }
        }

        let changed = self.focus.borrow_mut().focus(id);
        let Some(previous) = changed else {
            return Ok(false);
        };

        log::debug!("[focus] {:?} -> {}", previous, id);
        if let Some(previous) = previous {
            self.dispatch(Target::Element(previous), Event::Blur);
        }
        // A blur handler may already have moved focus elsewhere.
        if self.focus.borrow().is_focused(id) {
            self.dispatch(Target::Element(id), Event::Focus);
        }
        Ok(true)
    }

    /// Blur `id` if it is the focused element. Returns whether it was.
    pub fn blur(&self, id: ElementId) -> bool {
        let was_focused = {
            let mut focus = self.focus.borrow_mut();
            if focus.is_focused(id) {
                focus.blur();
                true
            } else {
                false
            }
        };

        if was_focused {
            log::debug!("[focus] blur {}", id);
            self.dispatch(Target::Element(id), Event::Blur);
        }
        was_focused
    }

    // =========================================================================
    // Deferred tasks
    // =========================================================================

    /// Queue a single-shot task to run after the current handler finishes.
    /// Tasks cannot be cancelled; they must check state before acting.
    pub fn defer(&self, task: impl FnOnce(&Host) + 'static) {
        self.tasks.borrow_mut().push_back(Box::new(task));
    }

    /// Run queued tasks, including ones queued while running. Returns how
    /// many ran.
    pub fn run_pending(&self) -> usize {
        let mut ran = 0;
        loop {
            let task = self.tasks.borrow_mut().pop_front();
            let Some(task) = task else {
                break;
            };
            task(self);
            ran += 1;
        }
        ran
    }

    pub fn pending_tasks(&self) -> usize {
        self.tasks.borrow().len()
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Deliver `event` to `target`: capture listeners from the window down,
    /// then the target's own listeners, then bubble listeners back up.
    pub fn dispatch(&self, target: Target, event: Event) -> DomEvent {
        let event_type = event.event_type();
        let bubbles = event.bubbles();
        let path = self.propagation_path(target);
        let mut ev = DomEvent::new(event, target);

        log::trace!("[dispatch] {:?} at {:?}", event_type, target);

        let ancestors = &path[..path.len().saturating_sub(1)];

        for node in ancestors {
            self.invoke(*node, event_type, true, &mut ev);
            if ev.propagation_stopped() {
                return ev;
            }
        }

        self.invoke(target, event_type, true, &mut ev);
        self.invoke(target, event_type, false, &mut ev);

        if bubbles {
            for node in ancestors.iter().rev() {
                if ev.propagation_stopped() {
                    break;
                }
                self.invoke(*node, event_type, false, &mut ev);
            }
        }

        ev
    }

    fn propagation_path(&self, target: Target) -> Vec<Target> {
        match target {
            Target::Window => vec![Target::Window],
            Target::Document => vec![Target::Window, Target::Document],
            Target::Element(id) => {
                let chain = self.document.borrow().ancestors(id);
                if chain.is_empty() {
                    return vec![target];
                }
                let mut path = vec![Target::Window, Target::Document];
                path.extend(chain.into_iter().map(Target::Element));
                path
            }
        }
    }

    fn invoke(&self, node: Target, event_type: EventType, use_capture: bool, ev: &mut DomEvent) {
        let listeners = self.events.borrow().listeners(node, event_type, use_capture);
        if listeners.is_empty() {
            return;
        }

        ev.set_current_target(node);
        for listener in listeners {
            // Skip listeners removed by an earlier listener in this pass.
            let live = self
                .events
                .borrow()
                .is_subscribed(node, event_type, &listener, use_capture);
            if live {
                listener.call(self, ev);
            }
        }
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Key press at the focused element (or the body), followed by the
    /// default action unless a listener prevented it.
    pub fn key_down(&self, key: Key, modifiers: Modifiers) -> DomEvent {
        let target = self.active_element().unwrap_or_else(|| self.body());
        let ev = self.dispatch(Target::Element(target), Event::Key { key, modifiers });
        if !ev.default_prevented() {
            self.default_key_action(key, modifiers);
        }
        ev
    }

    fn default_key_action(&self, key: Key, modifiers: Modifiers) {
        let line = self.config.line_scroll;
        let page = self.document.borrow().viewport().1;

        match key {
            Key::Tab | Key::BackTab => {
                let reverse = key == Key::BackTab || modifiers.shift;
                let next = {
                    let document = self.document.borrow();
                    let focus = self.focus.borrow();
                    if reverse {
                        focus.prev_in(&document)
                    } else {
                        focus.next_in(&document)
                    }
                };
                if let Some(next) = next {
                    let _ = self.focus(next);
                }
            }
            Key::Up => {
                self.document.borrow_mut().scroll_by(0, -line);
            }
            Key::Down => {
                self.document.borrow_mut().scroll_by(0, line);
            }
            Key::PageUp => {
                self.document.borrow_mut().scroll_by(0, -page);
            }
            Key::PageDown | Key::Char(' ') => {
                self.document.borrow_mut().scroll_by(0, page);
            }
            _ => {}
        }
    }

    /// Pointer press and click at a page point. The press focuses the
    /// focusable element under the pointer (or blurs the active element)
    /// unless a listener prevented it. Returns the element hit.
    pub fn click_at(&self, x: i32, y: i32, button: MouseButton) -> ElementId {
        let (target, focus_target) = {
            let document = self.document.borrow();
            (
                hit_test(&document, x, y).unwrap_or_else(|| document.body()),
                hit_test_focusable(&document, x, y),
            )
        };

        let down = self.dispatch(Target::Element(target), Event::MouseDown { button, x, y });
        if !down.default_prevented() {
            match focus_target {
                Some(id) => {
                    let _ = self.focus(id);
                }
                None => {
                    if let Some(active) = self.active_element() {
                        self.blur(active);
                    }
                }
            }
        }

        self.dispatch(Target::Element(target), Event::Click { button, x, y });
        target
    }

    /// Click the centre of an element.
    pub fn click(&self, id: ElementId, button: MouseButton) -> Result<ElementId, HostError> {
        let rect = self.document.borrow().node(id)?.rect;
        let (x, y) = (rect.x + rect.width / 2, rect.y + rect.height / 2);
        let scroll = self.visible_offset(id);
        Ok(self.click_at(x, y - scroll, button))
    }

    /// Total `scroll_top` of the clipping ancestors of `id`.
    fn visible_offset(&self, id: ElementId) -> i32 {
        let document = self.document.borrow();
        document
            .ancestors(id)
            .iter()
            .filter(|a| **a != id)
            .filter_map(|a| document.get(*a))
            .map(|n| n.scroll_top)
            .sum()
    }

    /// Wheel scroll at a page point: scrolls the innermost overflowing
    /// clipping element under the pointer, else the window.
    pub fn wheel_at(&self, x: i32, y: i32, delta_y: i32) {
        let target = {
            let document = self.document.borrow();
            hit_test(&document, x, y).unwrap_or_else(|| document.body())
        };

        let ev = self.dispatch(Target::Element(target), Event::Scroll { delta_x: 0, delta_y });
        if ev.default_prevented() {
            return;
        }

        let step = delta_y * self.config.line_scroll;
        let mut document = self.document.borrow_mut();
        let scrollable = document.ancestors(target).into_iter().rev().find(|id| {
            document
                .get(*id)
                .is_some_and(|n| n.clips_children && n.scroll_height > n.rect.height)
        });

        match scrollable {
            Some(id) => {
                if let Some(node) = document.get_mut(id) {
                    let max = node.scroll_height - node.rect.height;
                    node.scroll_top = (node.scroll_top + step).clamp(0, max);
                }
            }
            None => {
                document.scroll_by(0, step);
            }
        }
    }

    /// Resize the viewport and notify window listeners.
    pub fn resize(&self, width: i32, height: i32) {
        self.document.borrow_mut().set_viewport(width, height);
        self.dispatch(Target::Window, Event::Resize { width, height });
    }

    /// Viewport rectangle in page space.
    pub fn viewport_rect(&self) -> Rect {
        let document = self.document.borrow();
        let (width, height) = document.viewport();
        let scroll = document.scroll_position();
        Rect::new(scroll.left, scroll.top, width, height)
    }

    /// Feed raw terminal events through the host, then run deferred tasks.
    /// Terminal coordinates are viewport-relative.
    pub fn process_events(&self, raw: &[CrosstermEvent]) {
        for raw_event in raw {
            match raw_event {
                CrosstermEvent::Key(key_event) => {
                    // Only process key press events (not release/repeat on some terminals)
                    if key_event.kind != KeyEventKind::Press {
                        continue;
                    }
                    self.key_down(key_event.code.into(), key_event.modifiers.into());
                }

                CrosstermEvent::Mouse(mouse_event) => {
                    let scroll = self.scroll_position();
                    let x = mouse_event.column as i32 + scroll.left;
                    let y = mouse_event.row as i32 + scroll.top;

                    match mouse_event.kind {
                        MouseEventKind::Down(button) => {
                            self.click_at(x, y, button.into());
                        }
                        MouseEventKind::ScrollUp => self.wheel_at(x, y, -1),
                        MouseEventKind::ScrollDown => self.wheel_at(x, y, 1),
                        _ => {}
                    }
                }

                CrosstermEvent::Resize(width, height) => {
                    self.resize(*width as i32, *height as i32);
                }

                _ => {}
            }
            self.run_pending();
        }
    }
}
