//! User intents.
//!
//! Keyboard and mouse input are translated into these and fed to the single
//! `App::apply` update step. Nothing mutates state anywhere else.

use ordex_core::DropSide;

/// Which filter field a text edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    DynamicValue,
    StartDate,
    EndDate,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    Quit,

    // Filters
    ApplyFilters,
    ClearFilters,
    CyclePreset,
    CycleStatus,
    CycleDynamicField,
    BeginEdit(EditTarget),
    EditInput(char),
    EditBackspace,
    CommitEdit,
    CancelEdit,

    // Column picker
    TogglePicker,
    PickerUp,
    PickerDown,
    PickerToggle,
    ToggleColumn { id: String, visible: bool },

    // Table
    MoveUp,
    MoveDown,
    ReorderColumn { from: usize, to: usize, side: DropSide },
    ResizeColumn { visible_index: usize, width: u16 },

    // Overlays
    OpenHelp,
    CloseOverlay,
}
