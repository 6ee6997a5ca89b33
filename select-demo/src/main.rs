//! Interactive select controls in the terminal.
//!
//! Tab/Shift-Tab to move between controls, Space or arrows to open,
//! arrows and Enter to pick, Esc to dismiss, mouse to click, q to quit.
//! The page is taller than the screen: scroll it with the wheel or
//! PageDown and note that it stays put while a menu is open.

mod terminal;

use std::cell::RefCell;
use std::fs::File;
use std::io;
use std::rc::Rc;

use crossterm::event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind};
use log::LevelFilter;
use muidom::{ElementId, ElementKind, Host, HostConfig, Rect};
use muiforms::{FormsConfig, MenuGeometry, Select, SelectOption, SelectProps};
use simplelog::{Config, WriteLogger};

use crate::terminal::Terminal;

const LABEL_WIDTH: i32 = 12;
const FIELD_WIDTH: i32 = 28;

const COUNTRIES: &[(&str, &str)] = &[
    ("ar", "Argentina"),
    ("au", "Australia"),
    ("br", "Brazil"),
    ("ca", "Canada"),
    ("de", "Germany"),
    ("fr", "France"),
    ("in", "India"),
    ("jp", "Japan"),
    ("mx", "Mexico"),
    ("nl", "Netherlands"),
    ("no", "Norway"),
    ("us", "United States"),
];

fn main() -> io::Result<()> {
    let log_file = File::create("select-demo.log")?;
    let _ = WriteLogger::init(LevelFilter::Debug, Config::default(), log_file);

    let mut term = Terminal::new()?;
    let (width, height) = term.size()?;
    let host = Host::with_config(width, height, HostConfig::terminal());

    // Three screens of page so the scroll lock has something to hold still.
    host.set_rect(host.body(), Rect::new(0, 0, width, height * 3));

    let status = Rc::new(RefCell::new(String::from("Nothing picked yet")));
    let status_line = text(&host, Rect::new(2, 1, width - 4, 1), "")?;
    let selects = build_form(&host, &status)?;
    for y in (12..height * 3).step_by(4) {
        text(&host, Rect::new(2, y, width - 4, 1), &format!("· filler line {y}"))?;
    }

    log::info!("select-demo started with {} controls", selects.len());

    loop {
        if let Some(node) = host.document_mut().get_mut(status_line) {
            node.text = status.borrow().clone();
        }
        term.draw(&host)?;

        let events = term.poll()?;
        if events.iter().any(is_quit) {
            break;
        }
        host.process_events(&events);

        for select in &selects {
            if let Some(err) = select.take_error() {
                *status.borrow_mut() = format!("error: {err}");
            }
        }
    }

    log::info!("select-demo exiting");
    Ok(())
}

fn build_form(host: &Host, status: &Rc<RefCell<String>>) -> io::Result<Vec<Select>> {
    let config = FormsConfig::new().geometry(MenuGeometry::cells());
    let reporter = |name: &'static str| {
        let status = status.clone();
        move |value: &str| *status.borrow_mut() = format!("{name} -> {value}")
    };

    let sizes: Vec<SelectOption> = (1..=40)
        .map(|n| SelectOption::new(n.to_string(), format!("Size {n}")))
        .collect();

    let forms = [
        (
            "Country",
            SelectProps::new(COUNTRIES.iter().copied())
                .default_value("de")
                .name("country")
                .on_change(reporter("country"))
                .auto_focus(),
        ),
        (
            "Fruit",
            SelectProps::new([("apple", "Apple"), ("banana", "Banana"), ("cherry", "Cherry")])
                .value("banana")
                .on_change(reporter("fruit")),
        ),
        (
            "Size",
            SelectProps::new(sizes)
                .default_value("30")
                .on_change(reporter("size")),
        ),
        (
            "Locked",
            SelectProps::new([("x", "Read only")])
                .value("x")
                .read_only(),
        ),
        (
            "Disabled",
            SelectProps::new([("off", "Unavailable")]).disabled(),
        ),
    ];

    let mut selects = Vec::new();
    for (row, (label, props)) in forms.into_iter().enumerate() {
        let y = 3 + row as i32 * 2;
        text(host, Rect::new(2, y, LABEL_WIDTH, 1), label)?;
        let rect = Rect::new(2 + LABEL_WIDTH, y, FIELD_WIDTH, 1);
        let select = Select::mount(host, host.body(), rect, props.config(config))
            .map_err(io::Error::other)?;
        selects.push(select);
    }
    Ok(selects)
}

fn text(host: &Host, rect: Rect, content: &str) -> io::Result<ElementId> {
    let id = host
        .create_element(ElementKind::Text, host.body())
        .map_err(io::Error::other)?;
    if let Some(node) = host.document_mut().get_mut(id) {
        node.rect = rect;
        node.text = content.to_string();
    }
    Ok(id)
}

fn is_quit(event: &CrosstermEvent) -> bool {
    matches!(
        event,
        CrosstermEvent::Key(KeyEvent {
            code: KeyCode::Char('q'),
            kind: KeyEventKind::Press,
            ..
        })
    )
}
