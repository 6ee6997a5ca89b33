use std::collections::BTreeSet;

use muidom::{
    ElementKind, Host, Key, Modifiers, ScrollHost, ScrollLock, ScrollPosition, SCROLL_LOCK_CLASS,
};

/// In-memory window that records every scroll_to call.
#[derive(Default)]
struct MockWindow {
    position: ScrollPosition,
    classes: BTreeSet<String>,
    scroll_calls: Vec<ScrollPosition>,
}

impl ScrollHost for MockWindow {
    fn scroll_position(&self) -> ScrollPosition {
        self.position
    }

    fn scroll_to(&mut self, position: ScrollPosition) {
        self.position = position;
        self.scroll_calls.push(position);
    }

    fn add_body_class(&mut self, class: &str) {
        self.classes.insert(class.to_string());
    }

    fn remove_body_class(&mut self, class: &str) {
        self.classes.remove(class);
    }
}

fn tall_host() -> Host {
    let host = Host::new(80, 24);
    {
        let mut document = host.document_mut();
        let body = document.body();
        document.node_mut(body).unwrap().rect.height = 200;
    }
    host
}

// ============================================================================
// ScrollLock against a mock window
// ============================================================================

#[test]
fn test_first_acquire_captures_and_marks_body() {
    let mut window = MockWindow {
        position: ScrollPosition::new(0, 37),
        ..Default::default()
    };
    let mut lock = ScrollLock::new();

    lock.acquire(&mut window);

    assert!(lock.is_locked());
    assert_eq!(lock.ref_count(), 1);
    assert_eq!(lock.saved_position(), Some(ScrollPosition::new(0, 37)));
    assert!(window.classes.contains(SCROLL_LOCK_CLASS));
    assert_eq!(window.scroll_calls, vec![ScrollPosition::new(0, 37)]);
}

#[test]
fn test_nested_acquire_leaves_window_alone() {
    let mut window = MockWindow {
        position: ScrollPosition::new(0, 10),
        ..Default::default()
    };
    let mut lock = ScrollLock::new();

    lock.acquire(&mut window);
    window.position = ScrollPosition::new(0, 99);
    lock.acquire(&mut window);

    assert_eq!(lock.ref_count(), 2);
    // Still the position from the first acquire
    assert_eq!(lock.saved_position(), Some(ScrollPosition::new(0, 10)));
    assert_eq!(window.scroll_calls.len(), 1);

    lock.release(&mut window);
    assert!(lock.is_locked());
    assert!(window.classes.contains(SCROLL_LOCK_CLASS));
    assert_eq!(window.scroll_calls.len(), 1);

    lock.release(&mut window);
    assert!(!lock.is_locked());
    assert!(!window.classes.contains(SCROLL_LOCK_CLASS));
    assert_eq!(window.position, ScrollPosition::new(0, 10));
    assert_eq!(lock.saved_position(), None);
}

#[test]
fn test_release_when_unheld_is_noop() {
    let mut window = MockWindow::default();
    let mut lock = ScrollLock::new();

    lock.release(&mut window);

    assert_eq!(lock.ref_count(), 0);
    assert!(window.scroll_calls.is_empty());
}

#[test]
fn test_interleaved_cycles_restore_their_own_position() {
    let mut window = MockWindow::default();
    let mut lock = ScrollLock::new();

    for top in [5, 50, 0, 120] {
        window.position = ScrollPosition::new(0, top);
        lock.acquire(&mut window);
        lock.acquire(&mut window);
        window.position = ScrollPosition::new(0, top + 7);
        lock.release(&mut window);
        lock.release(&mut window);
        lock.release(&mut window);

        assert_eq!(lock.ref_count(), 0);
        assert_eq!(window.position, ScrollPosition::new(0, top));
        assert!(window.classes.is_empty());
    }
}

// ============================================================================
// Host window scrolling
// ============================================================================

#[test]
fn test_keyboard_scrolls_window() {
    let host = tall_host();

    host.key_down(Key::Down, Modifiers::new());
    assert_eq!(host.scroll_position().top, 40);

    host.key_down(Key::PageDown, Modifiers::new());
    assert_eq!(host.scroll_position().top, 64);

    host.key_down(Key::SPACE, Modifiers::new());
    assert_eq!(host.scroll_position().top, 88);

    for _ in 0..10 {
        host.key_down(Key::PageDown, Modifiers::new());
    }
    // Clamped to body height - viewport height
    assert_eq!(host.scroll_position().top, 176);
}

#[test]
fn test_lock_blocks_user_scrolling() {
    let host = tall_host();
    host.scroll_to(ScrollPosition::new(0, 30));

    host.acquire_scroll_lock();
    assert!(host.document().is_scroll_locked());
    assert_eq!(host.saved_scroll_position(), Some(ScrollPosition::new(0, 30)));

    host.key_down(Key::Down, Modifiers::new());
    host.key_down(Key::PageDown, Modifiers::new());
    host.wheel_at(10, 10, 3);
    assert_eq!(host.scroll_position().top, 30);

    host.release_scroll_lock();
    assert!(!host.document().is_scroll_locked());
    host.key_down(Key::Down, Modifiers::new());
    assert_eq!(host.scroll_position().top, 70);
}

#[test]
fn test_release_restores_programmatic_scroll() {
    let host = tall_host();
    host.scroll_to(ScrollPosition::new(0, 12));

    host.acquire_scroll_lock();
    host.scroll_to(ScrollPosition::new(0, 90));
    host.release_scroll_lock();

    assert_eq!(host.scroll_position(), ScrollPosition::new(0, 12));
    assert_eq!(host.scroll_lock_count(), 0);
}

#[test]
fn test_wheel_scrolls_clipping_element_first() {
    let host = tall_host();
    let list = host.create_element(ElementKind::Div, host.body()).unwrap();
    {
        let mut document = host.document_mut();
        let node = document.node_mut(list).unwrap();
        node.rect = muidom::Rect::new(0, 0, 20, 5);
        node.clips_children = true;
        node.scroll_height = 12;
    }

    host.wheel_at(2, 2, 1);
    assert_eq!(host.document().node(list).unwrap().scroll_top, 7);
    assert_eq!(host.scroll_position().top, 0);
}
