use std::cell::RefCell;
use std::rc::Rc;

use muidom::{
    hit_test, hit_test_focusable, ElementId, ElementKind, Event, EventType, Host, HostError, Key,
    Listener, Modifiers, MouseButton, Rect, Target,
};

type Log = Rc<RefCell<Vec<String>>>;

fn tracer(log: &Log, name: &str) -> Listener {
    let log = log.clone();
    let name = name.to_string();
    Listener::new(move |_, ev| {
        log.borrow_mut()
            .push(format!("{}:{:?}", name, ev.current_target()));
    })
}

/// body > outer(div) > inner(select), plus a second select beside it.
fn tree(host: &Host) -> (ElementId, ElementId, ElementId) {
    let outer = host.create_element(ElementKind::Div, host.body()).unwrap();
    let inner = host.create_element(ElementKind::Select, outer).unwrap();
    let other = host.create_element(ElementKind::Select, host.body()).unwrap();

    let mut document = host.document_mut();
    document.set_rect(outer, Rect::new(0, 0, 20, 4));
    document.set_rect(inner, Rect::new(0, 1, 20, 2));
    document.set_rect(other, Rect::new(0, 10, 20, 2));
    (outer, inner, other)
}

// ============================================================================
// Propagation
// ============================================================================

#[test]
fn test_capture_target_bubble_order() {
    let log: Log = Rc::default();
    let host = Host::new(80, 24);
    let (outer, inner, _) = tree(&host);

    host.subscribe(Target::Window, EventType::Click, tracer(&log, "win-bubble"), false);
    host.subscribe(Target::Window, EventType::Click, tracer(&log, "win-capture"), true);
    host.subscribe(Target::Document, EventType::Click, tracer(&log, "doc-bubble"), false);
    host.subscribe(Target::Element(outer), EventType::Click, tracer(&log, "outer-capture"), true);
    host.subscribe(Target::Element(inner), EventType::Click, tracer(&log, "inner-bubble"), false);
    host.subscribe(Target::Element(inner), EventType::Click, tracer(&log, "inner-capture"), true);

    host.dispatch(
        Target::Element(inner),
        Event::Click { button: MouseButton::Left, x: 0, y: 0 },
    );

    let names: Vec<String> = log
        .borrow()
        .iter()
        .map(|entry| entry.split(':').next().unwrap().to_string())
        .collect();
    assert_eq!(
        names,
        vec![
            "win-capture",
            "outer-capture",
            "inner-capture",
            "inner-bubble",
            "doc-bubble",
            "win-bubble",
        ]
    );
}

#[test]
fn test_stop_propagation_halts_bubbling() {
    let log: Log = Rc::default();
    let host = Host::new(80, 24);
    let (outer, inner, _) = tree(&host);

    host.subscribe(
        Target::Element(inner),
        EventType::Click,
        Listener::new(|_, ev| ev.stop_propagation()),
        false,
    );
    host.subscribe(Target::Element(outer), EventType::Click, tracer(&log, "outer"), false);
    host.subscribe(Target::Document, EventType::Click, tracer(&log, "doc"), false);

    let ev = host.dispatch(
        Target::Element(inner),
        Event::Click { button: MouseButton::Left, x: 0, y: 0 },
    );

    assert!(ev.propagation_stopped());
    assert!(log.borrow().is_empty());
}

#[test]
fn test_resize_does_not_bubble() {
    let log: Log = Rc::default();
    let host = Host::new(80, 24);
    host.subscribe(Target::Window, EventType::Resize, tracer(&log, "win"), false);

    host.resize(100, 40);

    assert_eq!(*log.borrow(), vec!["win:Window".to_string()]);
    assert_eq!(host.document().viewport(), (100, 40));
}

#[test]
fn test_prevent_default_suppresses_key_action() {
    let host = Host::new(80, 24);
    host.set_rect(host.body(), Rect::new(0, 0, 80, 100));
    host.subscribe(
        Target::Document,
        EventType::KeyDown,
        Listener::new(|_, ev| ev.prevent_default()),
        false,
    );

    let ev = host.key_down(Key::Down, Modifiers::new());

    assert!(ev.default_prevented());
    assert_eq!(host.scroll_position().top, 0);
}

// ============================================================================
// Geometry
// ============================================================================

#[test]
fn test_set_rect_with_nested_host_call() {
    let host = Host::new(80, 24);
    host.set_rect(host.body(), Rect::new(0, 0, 80, 100));

    assert_eq!(
        host.document().node(host.body()).unwrap().rect,
        Rect::new(0, 0, 80, 100)
    );

    host.key_down(Key::PageDown, Modifiers::new());
    assert_eq!(host.viewport_rect(), Rect::new(0, 24, 80, 24));
}

#[test]
fn test_set_rect_ignores_removed_element() {
    let host = Host::new(80, 24);
    let gone = host.create_element(ElementKind::Div, host.body()).unwrap();
    host.remove_element(gone);

    host.set_rect(gone, Rect::new(1, 1, 1, 1));

    assert_eq!(host.document().node(gone).unwrap_err(), HostError::UnknownElement(gone));
}

// ============================================================================
// Focus
// ============================================================================

#[test]
fn test_focus_dispatches_blur_then_focus() {
    let log: Log = Rc::default();
    let host = Host::new(80, 24);
    let (_, inner, other) = tree(&host);

    host.subscribe(Target::Element(inner), EventType::Blur, tracer(&log, "blur"), false);
    host.subscribe(Target::Element(other), EventType::Focus, tracer(&log, "focus"), false);

    assert_eq!(host.focus(inner), Ok(true));
    assert_eq!(host.focus(inner), Ok(false));
    assert_eq!(host.focus(other), Ok(true));

    assert_eq!(host.active_element(), Some(other));
    assert_eq!(
        *log.borrow(),
        vec![
            format!("blur:{:?}", Target::Element(inner)),
            format!("focus:{:?}", Target::Element(other)),
        ]
    );
}

#[test]
fn test_focus_bubbles_to_ancestors() {
    let log: Log = Rc::default();
    let host = Host::new(80, 24);
    let (outer, inner, _) = tree(&host);
    host.subscribe(Target::Element(outer), EventType::Focus, tracer(&log, "outer"), false);

    host.focus(inner).unwrap();

    assert_eq!(log.borrow().len(), 1);
}

#[test]
fn test_focus_rejects_unfocusable_elements() {
    let host = Host::new(80, 24);
    let (outer, inner, _) = tree(&host);

    assert_eq!(host.focus(outer), Err(HostError::NotFocusable(outer)));

    host.document_mut().get_mut(inner).unwrap().disabled = true;
    assert_eq!(host.focus(inner), Err(HostError::NotFocusable(inner)));
    assert_eq!(host.active_element(), None);
}

#[test]
fn test_tab_cycles_through_tab_order() {
    let host = Host::new(80, 24);
    let (outer, inner, other) = tree(&host);
    // Negative index: focusable, but skipped by Tab
    host.document_mut().set_tab_index(outer, Some(-1));

    assert_eq!(host.document().tab_order(), vec![inner, other]);

    host.key_down(Key::Tab, Modifiers::new());
    assert_eq!(host.active_element(), Some(inner));
    host.key_down(Key::Tab, Modifiers::new());
    assert_eq!(host.active_element(), Some(other));
    host.key_down(Key::Tab, Modifiers::new());
    assert_eq!(host.active_element(), Some(inner));
    host.key_down(Key::BackTab, Modifiers::shift());
    assert_eq!(host.active_element(), Some(other));
}

#[test]
fn test_removing_focused_element_clears_focus() {
    let host = Host::new(80, 24);
    let (outer, inner, _) = tree(&host);
    host.focus(inner).unwrap();

    host.remove_element(outer);

    assert_eq!(host.active_element(), None);
    assert!(!host.document().is_attached(inner));
}

// ============================================================================
// Pointer input
// ============================================================================

#[test]
fn test_hit_test_prefers_deepest_and_last() {
    let host = Host::new(80, 24);
    let (outer, inner, _) = tree(&host);
    let overlay = host.create_element(ElementKind::Div, outer).unwrap();
    host.set_rect(overlay, Rect::new(0, 2, 20, 10));

    let document = host.document();
    assert_eq!(hit_test(&document, 1, 1), Some(inner));
    // Overlay was added after inner, so it sits on top
    assert_eq!(hit_test(&document, 1, 2), Some(overlay));
    // Overlay overflows its non-clipping parent
    assert_eq!(hit_test(&document, 1, 8), Some(overlay));
    assert_eq!(hit_test(&document, 1, 20), Some(document.body()));
    assert_eq!(hit_test_focusable(&document, 1, 1), Some(inner));
    assert_eq!(hit_test_focusable(&document, 1, 20), None);
}

#[test]
fn test_hit_test_respects_clipping_and_scroll() {
    let host = Host::new(80, 24);
    let list = host.create_element(ElementKind::Div, host.body()).unwrap();
    let rows: Vec<ElementId> = (0..6)
        .map(|_| host.create_element(ElementKind::Div, list).unwrap())
        .collect();
    {
        let mut document = host.document_mut();
        let node = document.node_mut(list).unwrap();
        node.rect = Rect::new(0, 0, 10, 3);
        node.clips_children = true;
        node.scroll_height = 6;
        node.scroll_top = 2;
        for (i, row) in rows.iter().enumerate() {
            document.set_rect(*row, Rect::new(0, i as i32, 10, 1));
        }
    }

    let document = host.document();
    // Scrolled by two rows
    assert_eq!(hit_test(&document, 1, 0), Some(rows[2]));
    assert_eq!(hit_test(&document, 1, 2), Some(rows[4]));
    // Clipped rows are not hit
    assert_eq!(hit_test(&document, 1, 4), Some(document.body()));
}

#[test]
fn test_click_focuses_target_unless_prevented() {
    let host = Host::new(80, 24);
    let (_, inner, other) = tree(&host);

    host.click(inner, MouseButton::Left).unwrap();
    assert_eq!(host.active_element(), Some(inner));

    host.subscribe(
        Target::Element(other),
        EventType::MouseDown,
        Listener::new(|_, ev| ev.prevent_default()),
        false,
    );
    host.click(other, MouseButton::Left).unwrap();
    assert_eq!(host.active_element(), Some(inner));

    // Empty space blurs
    host.click_at(70, 20, MouseButton::Left);
    assert_eq!(host.active_element(), None);
}

#[test]
fn test_click_dispatches_mousedown_then_click() {
    let log: Log = Rc::default();
    let host = Host::new(80, 24);
    let (_, inner, _) = tree(&host);
    host.subscribe(Target::Document, EventType::MouseDown, tracer(&log, "down"), false);
    host.subscribe(Target::Document, EventType::Click, tracer(&log, "click"), false);

    let hit = host.click(inner, MouseButton::Left).unwrap();

    assert_eq!(hit, inner);
    assert_eq!(
        *log.borrow(),
        vec!["down:Document".to_string(), "click:Document".to_string()]
    );
}

// ============================================================================
// Deferred tasks
// ============================================================================

#[test]
fn test_deferred_tasks_run_in_order_including_nested() {
    let log: Log = Rc::default();
    let host = Host::new(80, 24);

    let first = log.clone();
    host.defer(move |host| {
        first.borrow_mut().push("first".into());
        let nested = first.clone();
        host.defer(move |_| nested.borrow_mut().push("nested".into()));
    });
    let second = log.clone();
    host.defer(move |_| second.borrow_mut().push("second".into()));

    assert_eq!(host.pending_tasks(), 2);
    assert_eq!(host.run_pending(), 3);
    assert_eq!(*log.borrow(), vec!["first", "second", "nested"]);
    assert_eq!(host.pending_tasks(), 0);
}
