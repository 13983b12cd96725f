//! Page alerts (flash messages) and their automatic dismissal.

use std::time::Duration;

use crate::chrome::ToastLevel;

/// Delay before an alert starts fading in.
pub const ALERT_FADE_IN_DELAY: Duration = Duration::from_millis(100);
/// Fade animation length, both ways.
pub const ALERT_FADE: Duration = Duration::from_millis(500);
/// How long a success alert stays before being dismissed.
pub const ALERT_AUTO_DISMISS: Duration = Duration::from_secs(5);

/// A flash message rendered by the server into the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub level: ToastLevel,
    /// Permanent alerts are left alone.
    pub permanent: bool,
}

/// What the page does with an alert after load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertSchedule {
    /// Start of the fade-in.
    pub fade_in_at: Duration,
    /// Start of the fade-out, if the alert dismisses itself.
    pub fade_out_at: Option<Duration>,
    /// Removal from the page, if the alert dismisses itself.
    pub remove_at: Option<Duration>,
}

impl Alert {
    pub fn new(level: ToastLevel) -> Self {
        Self {
            level,
            permanent: false,
        }
    }

    pub fn permanent(mut self) -> Self {
        self.permanent = true;
        self
    }

    /// Timeline for this alert, measured from page load.
    ///
    /// Returns `None` for permanent alerts.
    pub fn schedule(&self) -> Option<AlertSchedule> {
        if self.permanent {
            return None;
        }
        let dismiss = self.level == ToastLevel::Success;
        Some(AlertSchedule {
            fade_in_at: ALERT_FADE_IN_DELAY,
            fade_out_at: dismiss.then_some(ALERT_AUTO_DISMISS),
            remove_at: dismiss.then_some(ALERT_AUTO_DISMISS + ALERT_FADE),
        })
    }
}
