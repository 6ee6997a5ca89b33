use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event as CrosstermEvent},
    queue,
    style::{Attribute, Print, SetAttribute},
    terminal,
};
use muidom::{Document, ElementId, ElementKind, Host, Rect};
use muiforms::widgets::menu::{MENU_CLASS, SELECTED_CLASS};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub struct Terminal {
    stdout: io::Stdout,
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        let mut stdout = io::stdout();

        terminal::enable_raw_mode()?;
        crossterm::execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            event::EnableMouseCapture
        )?;

        Ok(Self { stdout })
    }

    pub fn size(&self) -> io::Result<(i32, i32)> {
        let (width, height) = terminal::size()?;
        Ok((width as i32, height as i32))
    }

    /// Block for the next event, then drain whatever else is queued.
    pub fn poll(&self) -> io::Result<Vec<CrosstermEvent>> {
        let mut events = vec![event::read()?];
        while event::poll(Duration::ZERO)? {
            events.push(event::read()?);
        }
        Ok(events)
    }

    /// Repaint the whole viewport from the host's document.
    pub fn draw(&mut self, host: &Host) -> io::Result<()> {
        queue!(self.stdout, terminal::Clear(terminal::ClearType::All))?;

        let view = host.viewport_rect();
        let screen = Rect::from_size(view.width, view.height);
        let document = host.document();
        let painter = Painter {
            document: &document,
            focused: host.active_element(),
        };
        painter.node(&mut self.stdout, document.body(), -view.x, -view.y, screen)?;

        queue!(self.stdout, SetAttribute(Attribute::Reset))?;
        self.stdout.flush()
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = crossterm::execute!(
            self.stdout,
            event::DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

struct Painter<'a> {
    document: &'a Document,
    focused: Option<ElementId>,
}

impl Painter<'_> {
    /// Paint `id` and its subtree. `dx`/`dy` map page space to the screen.
    fn node(&self, out: &mut impl Write, id: ElementId, dx: i32, dy: i32, clip: Rect) -> io::Result<()> {
        let Some(node) = self.document.get(id) else {
            return Ok(());
        };
        let rect = node.rect.translate(dx, dy);

        let is_menu = node.has_class(MENU_CLASS);
        if is_menu {
            let area = rect.intersect(&clip);
            for y in area.top()..area.bottom() {
                self.line(out, area.x, y, &" ".repeat(area.width as usize), false, area)?;
            }
        }

        match node.kind {
            ElementKind::Select => {
                let marker = if node.disabled { ' ' } else { '▾' };
                let text = format!("[ {} {} ]", node.text, marker);
                let focused = self.focused == Some(id);
                self.line(out, rect.x, rect.y, &text, focused, clip)?;
            }
            ElementKind::Label | ElementKind::Text | ElementKind::Div if !node.text.is_empty() => {
                let highlighted = node.has_class(SELECTED_CLASS);
                let text = format!(" {}", node.text);
                let fill = rect.width.max(0) as usize;
                let padded = pad(&text, fill);
                self.line(out, rect.x, rect.y, &padded, highlighted, clip)?;
            }
            _ => {}
        }

        let child_clip = if node.clips_children { rect.intersect(&clip) } else { clip };
        let child_dy = dy - node.scroll_top;
        for child in &node.children {
            self.node(out, *child, dx, child_dy, child_clip)?;
        }
        Ok(())
    }

    fn line(
        &self,
        out: &mut impl Write,
        x: i32,
        y: i32,
        text: &str,
        reverse: bool,
        clip: Rect,
    ) -> io::Result<()> {
        if y < clip.top() || y >= clip.bottom() {
            return Ok(());
        }

        // Skip cells left of the clip, then stop at its right edge.
        let mut column = x;
        let mut visible = String::new();
        let mut start = None;
        for ch in text.chars() {
            let w = ch.width().unwrap_or(0) as i32;
            if column >= clip.left() && column + w <= clip.right() {
                start.get_or_insert(column);
                visible.push(ch);
            }
            column += w;
        }
        let Some(start) = start else {
            return Ok(());
        };

        queue!(out, cursor::MoveTo(start as u16, y as u16))?;
        if reverse {
            queue!(out, SetAttribute(Attribute::Reverse))?;
        }
        queue!(out, Print(visible))?;
        if reverse {
            queue!(out, SetAttribute(Attribute::NoReverse))?;
        }
        Ok(())
    }
}

/// Pad or truncate `text` to exactly `width` terminal cells.
fn pad(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    if out.width() < width {
        out.push_str(&" ".repeat(width - out.width()));
    }
    out
}
