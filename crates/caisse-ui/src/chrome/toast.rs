//! Toast notifications.

use serde::Serialize;

use crate::render::escape_html;

/// Visual level of a toast or alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToastLevel {
    Success,
    Danger,
    Warning,
    #[default]
    Info,
    Primary,
}

impl ToastLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToastLevel::Success => "success",
            ToastLevel::Danger => "danger",
            ToastLevel::Warning => "warning",
            ToastLevel::Info => "info",
            ToastLevel::Primary => "primary",
        }
    }

    /// Parse a level name, e.g. the `toast_type` of a server reply.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "success" => Some(ToastLevel::Success),
            "danger" | "error" => Some(ToastLevel::Danger),
            "warning" => Some(ToastLevel::Warning),
            "info" => Some(ToastLevel::Info),
            "primary" => Some(ToastLevel::Primary),
            _ => None,
        }
    }
}

/// A transient notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub message: String,
    pub level: ToastLevel,
}

impl Toast {
    pub fn new(message: impl Into<String>, level: ToastLevel) -> Self {
        Self {
            message: message.into(),
            level,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, ToastLevel::Success)
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self::new(message, ToastLevel::Danger)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, ToastLevel::Info)
    }

    /// Markup of a single toast.
    pub fn to_html(&self) -> String {
        format!(
            r#"<div class="toast align-items-center text-white bg-{level} border-0" role="alert">
    <div class="d-flex">
        <div class="toast-body">{message}</div>
        <button type="button" class="btn-close btn-close-white me-2 m-auto" data-bs-dismiss="toast"></button>
    </div>
</div>"#,
            level = self.level.as_str(),
            message = escape_html(&self.message),
        )
    }
}

/// Handle of a toast shown in a [`ToastStack`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ToastHandle(u64);

/// The toast container: toasts stack in arrival order and are dropped once
/// hidden.
#[derive(Debug, Default)]
pub struct ToastStack {
    next: u64,
    shown: Vec<(ToastHandle, Toast)>,
}

impl ToastStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a toast at the end of the stack.
    pub fn push(&mut self, toast: Toast) -> ToastHandle {
        let handle = ToastHandle(self.next);
        self.next += 1;
        self.shown.push((handle, toast));
        handle
    }

    /// Remove a toast once it has been hidden.
    pub fn hidden(&mut self, handle: ToastHandle) -> Option<Toast> {
        let pos = self.shown.iter().position(|(h, _)| *h == handle)?;
        Some(self.shown.remove(pos).1)
    }

    /// Toasts currently on screen, oldest first.
    pub fn visible(&self) -> impl Iterator<Item = &Toast> {
        self.shown.iter().map(|(_, t)| t)
    }

    pub fn len(&self) -> usize {
        self.shown.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shown.is_empty()
    }

    /// Markup of the whole container.
    pub fn to_html(&self) -> String {
        let toasts: Vec<String> = self.visible().map(Toast::to_html).collect();
        format!(
            r#"<div id="toast-container" class="toast-container position-fixed top-0 end-0 p-3">{}</div>"#,
            toasts.join("\n")
        )
    }
}
