use chrono::NaiveDate;
use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ordex_core::{DropSide, ANCHOR_COLUMN};
use ordex_tui::config::TuiConfig;
use ordex_tui::intent::{EditTarget, Intent};
use ordex_tui::interaction::{DragState, HeaderCell, HeaderInteraction, HeaderLayout, MIN_COLUMN_WIDTH};
use ordex_tui::keys::{map_key, InputMode};
use ordex_tui::state::App;
use proptest::prelude::*;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
}

fn test_app() -> App {
    let mut config = TuiConfig::offline_defaults();
    config.prefs_path = std::env::temp_dir()
        .join(format!("ordex-proptest-{}", uuid::Uuid::now_v7()))
        .join("prefs.json");
    App::new(config, None, today())
}

fn layout(cell_count: usize, cell_width: u16) -> HeaderLayout {
    HeaderLayout {
        y: 4,
        cells: (0..cell_count)
            .map(|i| HeaderCell {
                visible_index: i,
                x: i as u16 * cell_width,
                width: cell_width,
            })
            .collect(),
    }
}

fn arb_intent() -> impl Strategy<Value = Intent> {
    prop_oneof![
        Just(Intent::ApplyFilters),
        Just(Intent::ClearFilters),
        Just(Intent::CyclePreset),
        Just(Intent::CycleStatus),
        Just(Intent::CycleDynamicField),
        Just(Intent::BeginEdit(EditTarget::DynamicValue)),
        Just(Intent::BeginEdit(EditTarget::StartDate)),
        Just(Intent::BeginEdit(EditTarget::EndDate)),
        "[a-z0-9/]{0,3}".prop_map(|s| match s.chars().next() {
            Some(c) => Intent::EditInput(c),
            None => Intent::EditBackspace,
        }),
        Just(Intent::CommitEdit),
        Just(Intent::CancelEdit),
        Just(Intent::TogglePicker),
        Just(Intent::PickerUp),
        Just(Intent::PickerDown),
        Just(Intent::PickerToggle),
        Just(Intent::MoveUp),
        Just(Intent::MoveDown),
        (0usize..25, 0usize..25, any::<bool>()).prop_map(|(from, to, right)| {
            Intent::ReorderColumn {
                from,
                to,
                side: if right { DropSide::Right } else { DropSide::Left },
            }
        }),
        (0usize..25, 0u16..200).prop_map(|(visible_index, width)| Intent::ResizeColumn {
            visible_index,
            width,
        }),
        Just(Intent::OpenHelp),
        Just(Intent::CloseOverlay),
    ]
}

proptest! {
    /// Any intent stream leaves the anchor column visible and the column id
    /// set intact.
    #[test]
    fn intent_stream_preserves_registry_invariants(
        intents in prop::collection::vec(arb_intent(), 0..60),
    ) {
        let mut app = test_app();
        let default_ids = {
            let mut ids: Vec<&str> = app.registry.columns().iter().map(|c| c.id).collect();
            ids.sort_unstable();
            ids
        };

        for intent in intents {
            app.apply(intent, today());
        }

        prop_assert!(app.registry.descriptor(ANCHOR_COLUMN).unwrap().visible);
        let mut ids: Vec<&str> = app.registry.columns().iter().map(|c| c.id).collect();
        ids.sort_unstable();
        prop_assert_eq!(ids, default_ids);
    }

    /// Resize overrides never go below the minimum width.
    #[test]
    fn resize_respects_width_floor(
        intents in prop::collection::vec(
            (0usize..25, 0u16..200).prop_map(|(visible_index, width)| Intent::ResizeColumn {
                visible_index,
                width,
            }),
            1..40,
        ),
    ) {
        let mut app = test_app();
        for intent in intents {
            app.apply(intent, today());
        }
        prop_assert!(app.table.widths.values().all(|w| *w >= MIN_COLUMN_WIDTH));
    }

    /// Every mouse gesture ends Idle after the button is released, wherever
    /// the pointer went in between.
    #[test]
    fn mouse_release_always_returns_to_idle(
        down in (0u16..80, 0u16..30),
        moves in prop::collection::vec((0u16..80, 0u16..30), 0..10),
        up in (0u16..80, 0u16..30),
    ) {
        let layout = layout(5, 12);
        let mut interaction = HeaderInteraction::default();

        interaction.on_mouse_down(&layout, down.0, down.1);
        for (x, y) in moves {
            let _ = interaction.on_mouse_drag(&layout, x, y);
        }
        let _ = interaction.on_mouse_up(&layout, up.0, up.1);

        prop_assert_eq!(interaction.state(), DragState::Idle);
    }

    /// Resize intents coming out of a drag never violate the width floor.
    #[test]
    fn drag_resize_intents_respect_floor(
        moves in prop::collection::vec(0u16..200, 1..20),
    ) {
        let layout = layout(3, 10);
        let mut interaction = HeaderInteraction::default();
        // Grab the right edge of the first cell.
        interaction.on_mouse_down(&layout, 9, 4);

        for x in moves {
            if let Some(Intent::ResizeColumn { width, .. }) =
                interaction.on_mouse_drag(&layout, x, 4)
            {
                prop_assert!(width >= MIN_COLUMN_WIDTH);
            }
        }
    }

    /// Key events never panic the mapper in any mode.
    #[test]
    fn key_mapping_is_total(code in any::<u8>(), ctrl in any::<bool>()) {
        let event = KeyEvent {
            code: KeyCode::Char(char::from(code.clamp(32, 126))),
            modifiers: if ctrl { KeyModifiers::CONTROL } else { KeyModifiers::NONE },
            kind: KeyEventKind::Press,
            state: KeyEventState::empty(),
        };
        let _ = map_key(InputMode::Table, event);
        let _ = map_key(InputMode::Picker, event);
        let _ = map_key(InputMode::Editing(EditTarget::DynamicValue), event);
    }
}

#[test]
fn mouse_drag_on_header_reorders_via_app() {
    let mut app = test_app();
    app.header_layout = layout(5, 12);
    let before: Vec<&str> = app.registry.visible().map(|c| c.id).collect();

    let press = MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column: 2,
        row: 4,
        modifiers: KeyModifiers::NONE,
    };
    let drag = MouseEvent {
        kind: MouseEventKind::Drag(MouseButton::Left),
        column: 27,
        row: 4,
        modifiers: KeyModifiers::NONE,
    };
    let release = MouseEvent {
        kind: MouseEventKind::Up(MouseButton::Left),
        column: 27,
        row: 4,
        modifiers: KeyModifiers::NONE,
    };

    app.handle_mouse(press, today());
    app.handle_mouse(drag, today());
    app.handle_mouse(release, today());

    let after: Vec<&str> = app.registry.visible().map(|c| c.id).collect();
    // Cell 0 dropped on the left half of cell 2: it now sits after cell 1.
    assert_eq!(after[0], before[1]);
    assert_eq!(after[1], before[0]);
    assert_eq!(after[2], before[2]);
}
