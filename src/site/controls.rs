//! Hamburger menu and info-card selection state.

pub const MENU_OPEN_LABEL: &str = "☰ Menu";
pub const MENU_CLOSE_LABEL: &str = "✕ Close Menu";
pub const FEEDBACK_THANKS: &str = "Thanks for your feedback!";

#[derive(Debug, Default)]
pub struct MenuState {
    open: bool,
}

impl MenuState {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    /// Navigation closes the menu on narrow (mobile) viewports only.
    /// Returns whether the menu needs re-rendering.
    pub fn close_on_navigate(&mut self, viewport_width: f64, breakpoint: f64) -> bool {
        if viewport_width <= breakpoint {
            self.open = false;
            true
        } else {
            false
        }
    }

    pub fn label(&self) -> &'static str {
        if self.open { MENU_CLOSE_LABEL } else { MENU_OPEN_LABEL }
    }
}

/// At most one `.info-card` is highlighted.
#[derive(Debug, Default)]
pub struct CardSelection {
    selected: Option<usize>,
}

impl CardSelection {
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Clicking the selected card clears it; any other card takes over.
    pub fn click(&mut self, index: usize) -> Option<usize> {
        self.selected = if self.selected == Some(index) { None } else { Some(index) };
        self.selected
    }
}
