use std::cell::RefCell;
use std::rc::Rc;

use muidom::{ElementId, ElementKind, EventType, Host, Key, Modifiers, MouseButton, Rect, Target};
use muiforms::widgets::menu::{MenuSignals, OverlayMenu, MENU_CLASS, SELECTED_CLASS};
use muiforms::{MenuAction, MenuGeometry, MenuState, SelectOption};

#[derive(Default)]
struct Calls {
    changes: Vec<String>,
    closes: usize,
}

/// Mount a menu over an anchor at page y=100, wiring `on_close` to unmount
/// it the way an owner would.
fn mount(host: &Host, options: Vec<SelectOption>) -> (Rc<OverlayMenu>, Rc<RefCell<Calls>>, ElementId) {
    let anchor = host.create_element(ElementKind::Div, host.body()).unwrap();
    host.set_rect(anchor, Rect::new(20, 100, 300, 47));

    let calls: Rc<RefCell<Calls>> = Rc::default();
    let slot: Rc<RefCell<Option<Rc<OverlayMenu>>>> = Rc::default();

    let signals = {
        let on_change_calls = calls.clone();
        let on_close_calls = calls.clone();
        let slot = slot.clone();
        MenuSignals {
            on_change: Rc::new(move |_: &Host, value: &str| {
                on_change_calls.borrow_mut().changes.push(value.to_string())
            }),
            on_close: Rc::new(move |host: &Host| {
                on_close_calls.borrow_mut().closes += 1;
                if let Some(menu) = slot.borrow_mut().take() {
                    menu.unmount(host);
                }
            }),
        }
    };

    let menu = OverlayMenu::mount(host, anchor, anchor, options, MenuGeometry::default(), signals)
        .unwrap();
    *slot.borrow_mut() = Some(menu.clone());
    (menu, calls, anchor)
}

fn fruits() -> Vec<SelectOption> {
    vec![
        SelectOption::new("a", "Apple"),
        SelectOption::new("b", "Banana").selected(),
        SelectOption::new("c", "Cherry"),
    ]
}

fn press(host: &Host, key: Key) -> bool {
    host.key_down(key, Modifiers::new()).default_prevented()
}

// ============================================================================
// State
// ============================================================================

#[test]
fn test_state_saturates_at_both_ends() {
    let mut state = MenuState::new(1, 3);
    assert!(state.increment());
    assert!(!state.increment());
    assert_eq!(state.current_index(), 2);

    assert!(state.decrement());
    assert!(state.decrement());
    assert!(!state.decrement());
    assert_eq!(state.current_index(), 0);
    assert_eq!(state.origin_index(), 1);
}

#[test]
fn test_state_change_only_for_other_index() {
    let state = MenuState::new(1, 3);
    assert_eq!(state.change_for(1), None);
    assert_eq!(state.change_for(2), Some(2));
    assert_eq!(state.change_for(7), None);
}

#[test]
fn test_state_origin_clamped_to_options() {
    let state = MenuState::new(9, 3);
    assert_eq!(state.origin_index(), 2);
}

#[test]
fn test_key_actions() {
    assert_eq!(MenuAction::from_key(Key::Escape), Some(MenuAction::Dismiss));
    assert_eq!(MenuAction::from_key(Key::Tab), Some(MenuAction::TabAway));
    assert_eq!(MenuAction::from_key(Key::Down), Some(MenuAction::Next));
    assert_eq!(MenuAction::from_key(Key::Up), Some(MenuAction::Previous));
    assert_eq!(MenuAction::from_key(Key::Enter), Some(MenuAction::Commit));
    assert_eq!(MenuAction::from_key(Key::Char('x')), None);
    assert!(!MenuAction::TabAway.prevents_default());
    assert!(MenuAction::Commit.prevents_default());
}

// ============================================================================
// Mounting
// ============================================================================

#[test]
fn test_mount_starts_at_selected_option() {
    let host = Host::new(800, 600);
    let (menu, _, anchor) = mount(&host, fruits());

    assert_eq!(menu.origin_index(), 1);
    assert_eq!(menu.current_index(), 1);

    let document = host.document();
    let root = menu.elements().root;
    assert!(document.has_class(root, MENU_CLASS));
    assert!(document.contains(anchor, root));
    assert_eq!(menu.elements().rows.len(), 3);
    assert!(document.has_class(menu.elements().rows[1], SELECTED_CLASS));
    assert!(!document.has_class(menu.elements().rows[0], SELECTED_CLASS));
    assert_eq!(document.node(menu.elements().rows[2]).unwrap().text, "Cherry");

    // Shifted up one row so the selected option lands on the anchor
    assert_eq!(menu.layout().top, 3 - 42);
    let row = document.node(menu.elements().rows[1]).unwrap().rect;
    assert_eq!(row.y, 100 + 3 + 8);
    assert_eq!(row.height, 42);
}

#[test]
fn test_mount_defers_blur_of_active_element() {
    let host = Host::new(800, 600);
    let field = host.create_element(ElementKind::Select, host.body()).unwrap();
    host.focus(field).unwrap();

    let (_menu, _, _) = mount(&host, fruits());
    assert_eq!(host.active_element(), Some(field));

    host.run_pending();
    assert_eq!(host.active_element(), None);
}

#[test]
fn test_deferred_blur_skipped_after_destroy() {
    let host = Host::new(800, 600);
    let field = host.create_element(ElementKind::Select, host.body()).unwrap();
    host.focus(field).unwrap();

    let (menu, _, _) = mount(&host, fruits());
    menu.destroy(&host);
    host.run_pending();

    assert_eq!(host.active_element(), Some(field));
}

// ============================================================================
// Keyboard
// ============================================================================

#[test]
fn test_arrows_move_highlight_and_suppress_scrolling() {
    let host = Host::new(800, 600);
    host.set_rect(host.body(), Rect::new(0, 0, 800, 2000));
    let (menu, calls, _) = mount(&host, fruits());

    assert!(press(&host, Key::Down));
    assert_eq!(menu.current_index(), 2);
    assert!(press(&host, Key::Down));
    assert_eq!(menu.current_index(), 2);
    assert!(press(&host, Key::Up));
    assert!(press(&host, Key::Up));
    assert!(press(&host, Key::Up));
    assert_eq!(menu.current_index(), 0);

    let document = host.document();
    assert!(document.has_class(menu.elements().rows[0], SELECTED_CLASS));
    assert!(!document.has_class(menu.elements().rows[1], SELECTED_CLASS));
    drop(document);

    assert_eq!(host.scroll_position().top, 0);
    assert!(calls.borrow().changes.is_empty());
}

#[test]
fn test_enter_commits_changed_option() {
    let host = Host::new(800, 600);
    let (menu, calls, _) = mount(&host, fruits());

    press(&host, Key::Down);
    assert!(press(&host, Key::Enter));

    assert_eq!(calls.borrow().changes, vec!["c"]);
    assert_eq!(calls.borrow().closes, 1);
    assert!(menu.is_destroyed());
    assert!(!host.document().is_attached(menu.elements().root));
    assert_eq!(host.listener_count(Target::Document, EventType::KeyDown), 0);
}

#[test]
fn test_enter_on_origin_closes_without_change() {
    let host = Host::new(800, 600);
    let (menu, calls, _) = mount(&host, fruits());

    press(&host, Key::Down);
    press(&host, Key::Up);
    press(&host, Key::Enter);

    assert!(calls.borrow().changes.is_empty());
    assert_eq!(calls.borrow().closes, 1);
    assert!(menu.is_destroyed());
}

#[test]
fn test_escape_dismisses() {
    let host = Host::new(800, 600);
    let (menu, calls, _) = mount(&host, fruits());

    press(&host, Key::Down);
    assert!(press(&host, Key::Escape));

    assert!(calls.borrow().changes.is_empty());
    assert_eq!(calls.borrow().closes, 1);
    assert!(menu.is_destroyed());
}

#[test]
fn test_tab_dismisses_and_lets_focus_move() {
    let host = Host::new(800, 600);
    let next = host.create_element(ElementKind::Select, host.body()).unwrap();
    let (menu, calls, _) = mount(&host, fruits());

    assert!(!press(&host, Key::Tab));

    assert_eq!(calls.borrow().closes, 1);
    assert!(menu.is_destroyed());
    assert_eq!(host.active_element(), Some(next));
}

#[test]
fn test_keys_after_destroy_are_ignored() {
    let host = Host::new(800, 600);
    let (menu, calls, _) = mount(&host, fruits());

    press(&host, Key::Escape);
    press(&host, Key::Down);
    press(&host, Key::Enter);
    menu.destroy(&host);

    assert!(calls.borrow().changes.is_empty());
    assert_eq!(calls.borrow().closes, 1);
}

// ============================================================================
// Pointer
// ============================================================================

#[test]
fn test_row_click_commits_that_row() {
    let host = Host::new(800, 600);
    let outside_clicks = Rc::new(RefCell::new(0));
    {
        let outside_clicks = outside_clicks.clone();
        host.subscribe(
            Target::Document,
            EventType::Click,
            muidom::Listener::new(move |_, _| *outside_clicks.borrow_mut() += 1),
            false,
        );
    }
    let (menu, calls, _) = mount(&host, fruits());

    let row = menu.elements().rows[0];
    assert_eq!(host.click(row, MouseButton::Left).unwrap(), row);

    assert_eq!(calls.borrow().changes, vec!["a"]);
    assert!(menu.is_destroyed());
    // Propagation stopped at the row
    assert_eq!(*outside_clicks.borrow(), 0);
}

#[test]
fn test_clicking_selected_row_closes_without_change() {
    let host = Host::new(800, 600);
    let (menu, calls, _) = mount(&host, fruits());

    host.click(menu.elements().rows[1], MouseButton::Left).unwrap();

    assert!(calls.borrow().changes.is_empty());
    assert_eq!(calls.borrow().closes, 1);
}

// ============================================================================
// Long lists
// ============================================================================

#[test]
fn test_highlight_stays_visible_in_scrolled_menu() {
    let host = Host::new(800, 300);
    let options: Vec<SelectOption> = (0..20)
        .map(|i| SelectOption::new(format!("v{i}"), format!("Option {i}")))
        .collect();
    let (menu, _, _) = mount(&host, options);
    let geometry = MenuGeometry::default();
    let root = menu.elements().root;

    assert_eq!(menu.layout().height, 300);

    let visible = |index: usize| {
        let document = host.document();
        let node = document.node(root).unwrap();
        let top = geometry.row_top(index);
        top >= node.scroll_top && top + geometry.option_height <= node.scroll_top + node.rect.height
    };

    assert!(visible(0));
    for i in 1..20 {
        menu.increment(&host);
        assert!(visible(i), "row {i} scrolled out of view");
    }
    for i in (0..19).rev() {
        menu.decrement(&host);
        assert!(visible(i), "row {i} scrolled out of view");
    }
}

#[test]
fn test_click_on_scrolled_row() {
    let host = Host::new(800, 300);
    let options: Vec<SelectOption> = (0..20)
        .map(|i| SelectOption::new(format!("v{i}"), format!("Option {i}")))
        .collect();
    let (menu, calls, _) = mount(&host, options);

    for _ in 0..12 {
        menu.increment(&host);
    }
    host.click(menu.elements().rows[12], MouseButton::Left).unwrap();

    assert_eq!(calls.borrow().changes, vec!["v12"]);
}
