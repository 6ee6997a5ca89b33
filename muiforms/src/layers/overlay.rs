//! Overlay positioning for option menus.
//!
//! The menu opens over its anchor so that the selected option lands where
//! the closed control shows it, then gets pushed back inside the viewport.
//! When the options do not fit, the menu is capped at the viewport height
//! and scrolled so the selected option is still visible on open.

use muidom::Rect;
use serde::{Deserialize, Serialize};

/// Fixed metrics the layout is computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuGeometry {
    /// Height of one option row.
    pub option_height: i32,
    /// Padding above the first and below the last row.
    pub menu_padding: i32,
    /// Space between the top of the anchor and its input surface.
    pub wrapper_padding: i32,
    /// Height of the anchor's input surface.
    pub input_height: i32,
}

impl Default for MenuGeometry {
    fn default() -> Self {
        Self {
            option_height: 42,
            menu_padding: 8,
            wrapper_padding: 15,
            input_height: 32,
        }
    }
}

impl MenuGeometry {
    /// Metrics for a character-cell surface: one row per option, the menu
    /// opening directly over the control's single line.
    pub fn cells() -> Self {
        Self {
            option_height: 1,
            menu_padding: 0,
            wrapper_padding: 0,
            input_height: 1,
        }
    }

    /// Offset of the menu's top edge from the anchor's top edge when the
    /// first option is the one being aligned.
    pub fn alignment_offset(&self) -> i32 {
        self.menu_padding + self.option_height - (self.wrapper_padding + self.input_height)
    }

    /// Height of the menu if every option were shown.
    pub fn natural_height(&self, option_count: usize) -> i32 {
        option_count as i32 * self.option_height + 2 * self.menu_padding
    }

    /// Top of row `index`, relative to the menu's unscrolled content.
    pub fn row_top(&self, index: usize) -> i32 {
        self.menu_padding + index as i32 * self.option_height
    }
}

/// Result of [`compute_layout`]. `top` is relative to the anchor's top edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MenuLayout {
    pub height: i32,
    pub top: i32,
    pub scroll_offset: i32,
}

impl MenuLayout {
    /// Smallest `top` that keeps the menu below the viewport's top edge.
    pub fn min_top(anchor: Rect) -> i32 {
        -anchor.y
    }

    /// Largest `top` that keeps the menu above the viewport's bottom edge.
    pub fn max_top(anchor: Rect, viewport_height: i32, height: i32) -> i32 {
        viewport_height - height + Self::min_top(anchor)
    }
}

/// Compute the menu's height, offset and initial scroll.
///
/// `anchor` is measured relative to the viewport. `visible_index` is the
/// option that must be in view when the menu opens.
pub fn compute_layout(
    geometry: &MenuGeometry,
    anchor: Rect,
    viewport_height: i32,
    option_count: usize,
    visible_index: usize,
) -> MenuLayout {
    let natural = geometry.natural_height(option_count);
    let height = natural.min(viewport_height);

    let ideal_top = geometry.alignment_offset() - visible_index as i32 * geometry.option_height;
    let min_top = MenuLayout::min_top(anchor);
    let max_top = MenuLayout::max_top(anchor, viewport_height, height);
    let top = ideal_top.max(min_top).min(max_top);

    let mut scroll_offset = 0;
    if natural > viewport_height {
        let ideal = geometry.menu_padding + (visible_index as i32 + 1) * geometry.option_height
            - (-top + geometry.wrapper_padding + geometry.input_height);
        let max_scroll = natural - height;
        scroll_offset = ideal.min(max_scroll).max(0);
    }

    log::debug!(
        "[overlay] layout options={} index={} anchor_top={} -> height={} top={} scroll={}",
        option_count,
        visible_index,
        anchor.y,
        height,
        top,
        scroll_offset
    );

    MenuLayout {
        height,
        top,
        scroll_offset,
    }
}
