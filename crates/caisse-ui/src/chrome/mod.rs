//! Page-wide conveniences shared by every screen.

mod alerts;
mod confirm;
mod forms;
mod shortcuts;
mod sidebar;
mod toast;

pub use alerts::{Alert, AlertSchedule, ALERT_AUTO_DISMISS, ALERT_FADE, ALERT_FADE_IN_DELAY};
pub use confirm::{
    confirm_destructive, confirm_logout, confirmation_message, DEFAULT_CONFIRM_MESSAGE,
    LOGOUT_CONFIRM_MESSAGE,
};
pub use forms::{validate, Field, FormValidation};
pub use shortcuts::{help_text, render_help, resolve, Key, KeyChord, ShellAction, SHORTCUTS};
pub use sidebar::{Sidebar, NARROW_VIEWPORT_MAX};
pub use toast::{Toast, ToastHandle, ToastLevel, ToastStack};
