/// Class applied to the body while background scrolling is suppressed.
pub const SCROLL_LOCK_CLASS: &str = "mui-body--scroll-lock";

/// Window scroll position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollPosition {
    pub left: i32,
    pub top: i32,
}

impl ScrollPosition {
    pub fn new(left: i32, top: i32) -> Self {
        Self { left, top }
    }
}

/// The window surface a [`ScrollLock`] operates on.
pub trait ScrollHost {
    fn scroll_position(&self) -> ScrollPosition;
    fn scroll_to(&mut self, position: ScrollPosition);
    fn add_body_class(&mut self, class: &str);
    fn remove_body_class(&mut self, class: &str);
}

/// Reference-counted suppression of background scrolling.
///
/// Every open overlay acquires the lock once and releases it once. The
/// window position is captured on the first acquire and restored on the
/// last release; nested acquire/release pairs in between leave both the
/// saved position and the window alone.
#[derive(Debug, Default)]
pub struct ScrollLock {
    ref_count: usize,
    saved: Option<ScrollPosition>,
}

impl ScrollLock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ref_count(&self) -> usize {
        self.ref_count
    }

    pub fn is_locked(&self) -> bool {
        self.ref_count > 0
    }

    /// Position captured on the 0 -> 1 transition. `None` while unlocked.
    pub fn saved_position(&self) -> Option<ScrollPosition> {
        self.saved
    }

    pub fn acquire(&mut self, host: &mut dyn ScrollHost) {
        self.ref_count += 1;

        if self.ref_count == 1 {
            let position = host.scroll_position();
            self.saved = Some(position);
            host.add_body_class(SCROLL_LOCK_CLASS);
            // Toggling the class can shift layout; pin the window back.
            host.scroll_to(position);
            log::debug!("[scroll_lock] locked at {:?}", position);
        }
    }

    /// Release one hold. Releasing an unheld lock is a no-op.
    pub fn release(&mut self, host: &mut dyn ScrollHost) {
        if self.ref_count == 0 {
            log::trace!("[scroll_lock] release ignored, not held");
            return;
        }

        self.ref_count -= 1;

        if self.ref_count == 0 {
            host.remove_body_class(SCROLL_LOCK_CLASS);
            if let Some(position) = self.saved.take() {
                host.scroll_to(position);
                log::debug!("[scroll_lock] unlocked, restored {:?}", position);
            }
        }
    }
}
