//! Keybinding definitions for the TUI.

use crate::intent::{EditTarget, Intent};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What class of input the app is currently accepting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Table,
    Picker,
    Editing(EditTarget),
}

pub fn map_key(mode: InputMode, event: KeyEvent) -> Option<Intent> {
    match mode {
        InputMode::Table => map_table_key(event),
        InputMode::Picker => map_picker_key(event),
        InputMode::Editing(_) => map_editing_key(event),
    }
}

fn map_table_key(event: KeyEvent) -> Option<Intent> {
    let KeyEvent { code, modifiers, .. } = event;

    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c') => Some(Intent::Quit),
            KeyCode::Char('r') => Some(Intent::ApplyFilters),
            _ => None,
        };
    }

    match code {
        KeyCode::Char('q') => Some(Intent::Quit),
        KeyCode::Char('?') => Some(Intent::OpenHelp),
        KeyCode::Char('a') | KeyCode::Enter => Some(Intent::ApplyFilters),
        KeyCode::Char('c') => Some(Intent::ClearFilters),
        KeyCode::Char('d') => Some(Intent::CyclePreset),
        KeyCode::Char('s') => Some(Intent::CycleStatus),
        KeyCode::Char('f') => Some(Intent::CycleDynamicField),
        KeyCode::Char('v') => Some(Intent::BeginEdit(EditTarget::DynamicValue)),
        KeyCode::Char('[') => Some(Intent::BeginEdit(EditTarget::StartDate)),
        KeyCode::Char(']') => Some(Intent::BeginEdit(EditTarget::EndDate)),
        KeyCode::Char('o') => Some(Intent::TogglePicker),
        KeyCode::Up | KeyCode::Char('k') => Some(Intent::MoveUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Intent::MoveDown),
        KeyCode::Esc => Some(Intent::CloseOverlay),
        _ => None,
    }
}

fn map_picker_key(event: KeyEvent) -> Option<Intent> {
    match event.code {
        KeyCode::Char('q') | KeyCode::Esc | KeyCode::Char('o') => Some(Intent::CloseOverlay),
        KeyCode::Up | KeyCode::Char('k') => Some(Intent::PickerUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Intent::PickerDown),
        KeyCode::Char(' ') | KeyCode::Enter => Some(Intent::PickerToggle),
        _ => None,
    }
}

fn map_editing_key(event: KeyEvent) -> Option<Intent> {
    if event.modifiers.contains(KeyModifiers::CONTROL) {
        return match event.code {
            KeyCode::Char('c') => Some(Intent::CancelEdit),
            _ => None,
        };
    }
    match event.code {
        KeyCode::Enter => Some(Intent::CommitEdit),
        KeyCode::Esc => Some(Intent::CancelEdit),
        KeyCode::Backspace => Some(Intent::EditBackspace),
        KeyCode::Char(c) => Some(Intent::EditInput(c)),
        _ => None,
    }
}
