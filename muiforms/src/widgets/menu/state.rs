//! Navigation state for an open menu.

use muidom::Key;

/// Highlight position and origin of a mounted menu.
///
/// `current_index` saturates at both ends; it never wraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuState {
    origin_index: usize,
    current_index: usize,
    option_count: usize,
    destroyed: bool,
}

impl MenuState {
    pub fn new(origin_index: usize, option_count: usize) -> Self {
        let origin_index = origin_index.min(option_count.saturating_sub(1));
        Self {
            origin_index,
            current_index: origin_index,
            option_count,
            destroyed: false,
        }
    }

    /// Index selected when the menu opened.
    pub fn origin_index(&self) -> usize {
        self.origin_index
    }

    /// Index currently highlighted.
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn option_count(&self) -> usize {
        self.option_count
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Mark destroyed. Returns false if it already was.
    pub fn mark_destroyed(&mut self) -> bool {
        !std::mem::replace(&mut self.destroyed, true)
    }

    /// Move the highlight down. Returns whether it moved.
    pub fn increment(&mut self) -> bool {
        if self.current_index + 1 >= self.option_count {
            return false;
        }
        self.current_index += 1;
        true
    }

    /// Move the highlight up. Returns whether it moved.
    pub fn decrement(&mut self) -> bool {
        if self.current_index == 0 {
            return false;
        }
        self.current_index -= 1;
        true
    }

    /// The index to report for a commit at `index`, or `None` when it is
    /// the option that was already selected.
    pub fn change_for(&self, index: usize) -> Option<usize> {
        (index != self.origin_index && index < self.option_count).then_some(index)
    }
}

/// What a key press does to an open menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// Close without committing.
    Dismiss,
    /// Close without committing and let focus move on.
    TabAway,
    Next,
    Previous,
    /// Commit the highlighted option and close.
    Commit,
}

impl MenuAction {
    pub fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::Escape => Some(MenuAction::Dismiss),
            Key::Tab | Key::BackTab => Some(MenuAction::TabAway),
            Key::Down => Some(MenuAction::Next),
            Key::Up => Some(MenuAction::Previous),
            Key::Enter => Some(MenuAction::Commit),
            _ => None,
        }
    }

    /// Whether the host's default handling of the key is suppressed.
    /// Tab is left alone so focus navigation still happens.
    pub fn prevents_default(&self) -> bool {
        !matches!(self, MenuAction::TabAway)
    }
}
