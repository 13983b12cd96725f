//! Navigation sidebar.

/// Widest viewport, in CSS pixels, treated as a narrow screen.
pub const NARROW_VIEWPORT_MAX: u32 = 768;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sidebar {
    shown: bool,
}

impl Default for Sidebar {
    fn default() -> Self {
        Self { shown: true }
    }
}

impl Sidebar {
    pub fn is_shown(&self) -> bool {
        self.shown
    }

    pub fn toggle(&mut self) -> bool {
        self.shown = !self.shown;
        self.shown
    }

    /// A navigation link was followed. Narrow screens hide the sidebar.
    pub fn link_followed(&mut self, viewport_width: u32) {
        if viewport_width <= NARROW_VIEWPORT_MAX {
            self.shown = false;
        }
    }
}
