//! Application-wide keyboard shortcuts.

use crate::render::escape_html;

/// A key as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Function(u8),
    Escape,
    Enter,
}

/// A key press with its modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyChord {
    pub key: Key,
    pub ctrl: bool,
}

impl KeyChord {
    pub fn plain(key: Key) -> Self {
        Self { key, ctrl: false }
    }

    pub fn ctrl(key: Key) -> Self {
        Self { key, ctrl: true }
    }
}

/// What a shortcut does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShellAction {
    ShowHelp,
    CloseModals,
    FocusSearch,
    FinalizeSale,
}

impl ShellAction {
    pub fn description(&self) -> &'static str {
        match self {
            ShellAction::ShowHelp => "Afficher l'aide",
            ShellAction::CloseModals => "Fermer les fenêtres",
            ShellAction::FocusSearch => "Recherche rapide",
            ShellAction::FinalizeSale => "Finaliser la vente",
        }
    }
}

/// The shortcut table, in help order.
pub const SHORTCUTS: [(&str, ShellAction); 4] = [
    ("Ctrl + /", ShellAction::ShowHelp),
    ("Échap", ShellAction::CloseModals),
    ("F4", ShellAction::FocusSearch),
    ("F12", ShellAction::FinalizeSale),
];

/// Map a key press to its action.
pub fn resolve(chord: KeyChord) -> Option<ShellAction> {
    match (chord.key, chord.ctrl) {
        (Key::Char('/'), true) => Some(ShellAction::ShowHelp),
        (Key::Escape, _) => Some(ShellAction::CloseModals),
        (Key::Function(4), false) => Some(ShellAction::FocusSearch),
        (Key::Function(12), false) => Some(ShellAction::FinalizeSale),
        _ => None,
    }
}

/// Help listing, one shortcut per line.
pub fn help_text() -> String {
    SHORTCUTS
        .iter()
        .map(|(keys, action)| format!("{keys}: {}", action.description()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Help listing as a definition list.
pub fn render_help() -> String {
    let entries: Vec<String> = SHORTCUTS
        .iter()
        .map(|(keys, action)| {
            format!(
                "<dt><kbd>{}</kbd></dt><dd>{}</dd>",
                escape_html(keys),
                escape_html(action.description())
            )
        })
        .collect();
    format!(r#"<dl class="shortcut-help">{}</dl>"#, entries.join(""))
}
