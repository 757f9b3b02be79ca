//! Click-to-zoom image containers that close themselves after a while.

/// Image containers with a zoom overlay, one per content page.
pub const OVERLAY_CONTAINERS: [&str; 3] = [
    "intro-image-container",
    "habitat-image-container",
    "diet-image-container",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayChange {
    /// Now zoomed; arm an auto-close carrying `token`.
    Opened { token: u32 },
    /// No longer zoomed; drop the auto-close for `cancelled`, if one was armed.
    Closed { cancelled: Option<u32> },
}

/// Zoom state of one container. Each opening gets a fresh token so an
/// auto-close armed for an earlier opening can never close a later one.
#[derive(Debug, Default)]
pub struct OverlayState {
    zoomed: bool,
    pending: Option<u32>,
    next_token: u32,
}

impl OverlayState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_zoomed(&self) -> bool {
        self.zoomed
    }

    pub fn toggle(&mut self) -> OverlayChange {
        if self.zoomed {
            self.zoomed = false;
            OverlayChange::Closed { cancelled: self.pending.take() }
        } else {
            self.zoomed = true;
            let token = self.next_token;
            self.next_token = self.next_token.wrapping_add(1);
            self.pending = Some(token);
            OverlayChange::Opened { token }
        }
    }

    /// Timer callback. Closes only if `token` is still the armed one.
    pub fn auto_close(&mut self, token: u32) -> bool {
        if self.zoomed && self.pending == Some(token) {
            self.zoomed = false;
            self.pending = None;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_then_auto_close() {
        let mut o = OverlayState::new();
        let OverlayChange::Opened { token } = o.toggle() else {
            panic!("expected open");
        };
        assert!(o.is_zoomed());
        assert!(o.auto_close(token));
        assert!(!o.is_zoomed());
        assert!(!o.auto_close(token));
    }

    #[test]
    fn manual_close_cancels_pending_auto_close() {
        let mut o = OverlayState::new();
        let OverlayChange::Opened { token } = o.toggle() else {
            panic!("expected open");
        };
        assert_eq!(o.toggle(), OverlayChange::Closed { cancelled: Some(token) });
        // Reopen, then the stale timer from the first opening fires.
        let OverlayChange::Opened { token: fresh } = o.toggle() else {
            panic!("expected open");
        };
        assert_ne!(token, fresh);
        assert!(!o.auto_close(token));
        assert!(o.is_zoomed());
        assert!(o.auto_close(fresh));
    }

    #[test]
    fn click_after_auto_close_reopens() {
        let mut o = OverlayState::new();
        let OverlayChange::Opened { token } = o.toggle() else {
            panic!("expected open");
        };
        assert!(o.auto_close(token));
        let OverlayChange::Opened { token: fresh } = o.toggle() else {
            panic!("expected reopen");
        };
        assert_eq!(o.toggle(), OverlayChange::Closed { cancelled: Some(fresh) });
        assert_eq!(o.toggle(), OverlayChange::Opened { token: fresh + 1 });
    }
}
