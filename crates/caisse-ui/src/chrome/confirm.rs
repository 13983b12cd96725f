//! Confirmation prompts for destructive actions.

/// Prompt used when a destructive control carries no message of its own.
pub const DEFAULT_CONFIRM_MESSAGE: &str = "Êtes-vous sûr de vouloir effectuer cette action ?";

/// Prompt shown before logging out.
pub const LOGOUT_CONFIRM_MESSAGE: &str = "Êtes-vous sûr de vouloir vous déconnecter ?";

/// Message for a destructive control, falling back to the default prompt.
pub fn confirmation_message(custom: Option<&str>) -> &str {
    match custom {
        Some(message) if !message.trim().is_empty() => message,
        _ => DEFAULT_CONFIRM_MESSAGE,
    }
}

/// Ask before running a destructive action.
///
/// Returns true when the action may proceed.
pub fn confirm_destructive(custom: Option<&str>, ask: impl FnOnce(&str) -> bool) -> bool {
    ask(confirmation_message(custom))
}

/// Ask before logging out.
pub fn confirm_logout(ask: impl FnOnce(&str) -> bool) -> bool {
    ask(LOGOUT_CONFIRM_MESSAGE)
}
