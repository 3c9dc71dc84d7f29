//! Application state and the single intent update step.

use crate::api_client::{ApiClient, ApiClientError};
use crate::config::TuiConfig;
use crate::intent::{EditTarget, Intent};
use crate::interaction::{HeaderInteraction, HeaderLayout, MIN_COLUMN_WIDTH};
use crate::keys::InputMode;
use crate::notifications::{Notification, NotificationLevel};
use crate::persistence;
use crate::theme::Theme;
use chrono::NaiveDate;
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ordex_core::{ColumnRegistry, FilterState, ServiceOrder, Totals};
use std::collections::HashMap;

/// Status values the `s` key cycles through. Empty means no status filter.
pub const STATUS_OPTIONS: [&str; 5] = [
    "",
    "Em andamento",
    "Finalizada",
    "Aprovada",
    "Cancelada",
];

/// Columns the dynamic substring search can target. Empty disables it.
pub const DYNAMIC_FIELDS: [&str; 6] = [
    "",
    "tecnico",
    "equipamento",
    "numero_ordem_servico",
    "descricao_problema",
    "nome_cliente",
];

/// Where the table is in its load lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TablePhase {
    /// No fetch has been requested yet this session.
    NotApplied,
    Loading,
    Loaded,
    Error(String),
}

#[derive(Debug, Clone)]
pub struct TableViewState {
    pub rows: Vec<ServiceOrder>,
    pub phase: TablePhase,
    pub selected: usize,
    /// Per-column width overrides from resize gestures, keyed by column id.
    pub widths: HashMap<String, u16>,
}

impl TableViewState {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            phase: TablePhase::NotApplied,
            selected: 0,
            widths: HashMap::new(),
        }
    }

    pub fn totals(&self) -> Totals {
        Totals::compute(&self.rows)
    }
}

impl Default for TableViewState {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything a background fetch task needs, detached from `App`.
pub struct FetchJob {
    pub seq: u64,
    pub api: ApiClient,
    pub filter: FilterState,
    pub registry: ColumnRegistry,
}

pub struct App {
    pub config: TuiConfig,
    pub theme: Theme,
    pub api: Option<ApiClient>,
    /// Set when the client could not be built; fetches report it instead.
    pub config_error: Option<String>,

    pub registry: ColumnRegistry,
    pub filter: FilterState,
    pub table: TableViewState,
    pub interaction: HeaderInteraction,
    /// Header placement from the last draw; mouse hits resolve against it.
    pub header_layout: HeaderLayout,

    pub mode: InputMode,
    pub edit_buffer: String,
    pub picker_index: usize,
    pub help_visible: bool,
    pub notifications: Vec<Notification>,

    fetch_seq: u64,
    fetch_requested: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: TuiConfig, api: Option<ApiClient>, today: NaiveDate) -> Self {
        let filter = FilterState::new(config.default_preset, today);
        Self {
            config,
            theme: Theme::default(),
            api,
            config_error: None,
            registry: ColumnRegistry::with_defaults(),
            filter,
            table: TableViewState::new(),
            interaction: HeaderInteraction::default(),
            header_layout: HeaderLayout::default(),
            mode: InputMode::Table,
            edit_buffer: String::new(),
            picker_index: 0,
            help_visible: false,
            notifications: Vec::new(),
            fetch_seq: 0,
            fetch_requested: false,
            should_quit: false,
        }
    }

    pub fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        self.notifications.push(Notification::new(level, message));
    }

    /// The one place state changes in response to user input.
    pub fn apply(&mut self, intent: Intent, today: NaiveDate) {
        match intent {
            Intent::Quit => self.should_quit = true,

            Intent::ApplyFilters => {
                self.fetch_requested = true;
            }
            Intent::ClearFilters => {
                self.filter.clear(self.config.default_preset, today);
                self.table.rows.clear();
                self.table.selected = 0;
                self.table.phase = TablePhase::NotApplied;
                self.notify(NotificationLevel::Info, "Filtros limpos.");
            }
            Intent::CyclePreset => {
                self.filter.set_preset(self.filter.preset.next(), today);
            }
            Intent::CycleStatus => {
                self.filter.status = cycle(&STATUS_OPTIONS, &self.filter.status).to_string();
            }
            Intent::CycleDynamicField => {
                let next = cycle(&DYNAMIC_FIELDS, &self.filter.dynamic_field).to_string();
                self.filter.set_dynamic_field(&next);
            }

            Intent::BeginEdit(target) => self.begin_edit(target),
            Intent::EditInput(c) => self.edit_buffer.push(c),
            Intent::EditBackspace => {
                self.edit_buffer.pop();
            }
            Intent::CommitEdit => self.commit_edit(),
            Intent::CancelEdit => {
                self.edit_buffer.clear();
                self.mode = InputMode::Table;
            }

            Intent::TogglePicker => {
                self.mode = match self.mode {
                    InputMode::Picker => InputMode::Table,
                    _ => InputMode::Picker,
                };
            }
            Intent::PickerUp => {
                self.picker_index = self.picker_index.saturating_sub(1);
            }
            Intent::PickerDown => {
                let last = self.registry.columns().len().saturating_sub(1);
                self.picker_index = (self.picker_index + 1).min(last);
            }
            Intent::PickerToggle => {
                if let Some(column) = self.registry.columns().get(self.picker_index) {
                    let intent = Intent::ToggleColumn {
                        id: column.id.to_string(),
                        visible: !column.visible,
                    };
                    self.apply(intent, today);
                }
            }
            Intent::ToggleColumn { id, visible } => {
                if id == ordex_core::ANCHOR_COLUMN {
                    self.notify(
                        NotificationLevel::Warning,
                        "A coluna Número OS é fixa e não pode ser ocultada.",
                    );
                } else if self.registry.set_visible(&id, visible) {
                    self.persist_prefs();
                }
            }

            Intent::MoveUp => {
                self.table.selected = self.table.selected.saturating_sub(1);
            }
            Intent::MoveDown => {
                let last = self.table.rows.len().saturating_sub(1);
                self.table.selected = (self.table.selected + 1).min(last);
            }
            Intent::ReorderColumn { from, to, side } => {
                if self.registry.reorder(from, to, side) {
                    self.persist_prefs();
                }
            }
            Intent::ResizeColumn { visible_index, width } => {
                let id = self
                    .registry
                    .visible()
                    .nth(visible_index)
                    .map(|c| c.id.to_string());
                if let Some(id) = id {
                    self.table.widths.insert(id, width.max(MIN_COLUMN_WIDTH));
                }
            }

            Intent::OpenHelp => self.help_visible = true,
            Intent::CloseOverlay => {
                self.help_visible = false;
                if self.mode == InputMode::Picker {
                    self.mode = InputMode::Table;
                }
            }
        }
    }

    fn begin_edit(&mut self, target: EditTarget) {
        self.edit_buffer = match target {
            EditTarget::DynamicValue => {
                if self.filter.dynamic_field.is_empty() {
                    self.notify(
                        NotificationLevel::Warning,
                        "Selecione um campo de busca antes de digitar o valor (tecla f).",
                    );
                    return;
                }
                self.filter.dynamic_value.clone()
            }
            EditTarget::StartDate => self.filter.start_date.format("%d/%m/%Y").to_string(),
            EditTarget::EndDate => self.filter.end_date.format("%d/%m/%Y").to_string(),
        };
        self.mode = InputMode::Editing(target);
    }

    fn commit_edit(&mut self) {
        let InputMode::Editing(target) = self.mode else {
            return;
        };
        let input = std::mem::take(&mut self.edit_buffer);
        match target {
            EditTarget::DynamicValue => {
                self.filter.dynamic_value = input.trim().to_string();
            }
            EditTarget::StartDate | EditTarget::EndDate => match parse_date(&input) {
                Some(date) => {
                    let (start, end) = match target {
                        EditTarget::StartDate => (date, self.filter.end_date),
                        _ => (self.filter.start_date, date),
                    };
                    self.filter.set_custom_range(start, end);
                }
                None => {
                    self.notify(
                        NotificationLevel::Error,
                        format!("Data inválida: {} (use DD/MM/AAAA)", input.trim()),
                    );
                }
            },
        }
        self.mode = InputMode::Table;
    }

    fn persist_prefs(&mut self) {
        let snapshot = self.registry.snapshot();
        if let Err(err) = persistence::save(&self.config.prefs_path, &snapshot) {
            tracing::warn!(error = %err, path = %self.config.prefs_path.display(), "failed to persist column preferences");
            self.notify(
                NotificationLevel::Warning,
                "Não foi possível salvar as preferências de colunas.",
            );
        }
    }

    /// Hand out the pending fetch, if one was requested. Each job gets a
    /// fresh sequence number; only the newest number is accepted back.
    pub fn take_fetch_job(&mut self) -> Option<FetchJob> {
        if !self.fetch_requested {
            return None;
        }
        self.fetch_requested = false;

        let Some(api) = self.api.clone() else {
            let reason = self
                .config_error
                .clone()
                .unwrap_or_else(|| "cliente remoto não configurado".to_string());
            self.table.phase = TablePhase::Error(reason.clone());
            self.notify(NotificationLevel::Error, reason);
            return None;
        };

        self.fetch_seq += 1;
        self.table.phase = TablePhase::Loading;
        Some(FetchJob {
            seq: self.fetch_seq,
            api,
            filter: self.filter.clone(),
            registry: self.registry.clone(),
        })
    }

    /// Accept a finished fetch. Results from superseded requests are
    /// discarded so a slow early query can never overwrite a newer one.
    pub fn finish_fetch(&mut self, seq: u64, outcome: Result<Vec<ServiceOrder>, ApiClientError>) {
        if seq != self.fetch_seq {
            tracing::debug!(seq, current = self.fetch_seq, "discarding stale fetch result");
            return;
        }
        match outcome {
            Ok(rows) => {
                self.table.selected = self.table.selected.min(rows.len().saturating_sub(1));
                self.table.rows = rows;
                self.table.phase = TablePhase::Loaded;
            }
            Err(err) => {
                let message = format!("Erro ao buscar dados: {}", err);
                self.table.phase = TablePhase::Error(message.clone());
                self.notify(NotificationLevel::Error, message);
            }
        }
    }

    /// The zero-state text for the table body, `None` while rows are shown.
    pub fn table_message(&self) -> Option<String> {
        match &self.table.phase {
            TablePhase::NotApplied => {
                Some("Ajuste os filtros e pressione Enter para buscar.".to_string())
            }
            TablePhase::Loading => Some("Carregando dados...".to_string()),
            TablePhase::Loaded if self.table.rows.is_empty() => {
                Some("Nenhum resultado encontrado para os filtros atuais.".to_string())
            }
            TablePhase::Loaded => None,
            TablePhase::Error(message) => Some(message.clone()),
        }
    }

    /// Translate a raw mouse event against the last header layout.
    pub fn handle_mouse(&mut self, event: MouseEvent, today: NaiveDate) {
        let intent = match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.interaction
                    .on_mouse_down(&self.header_layout, event.column, event.row);
                None
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                self.interaction
                    .on_mouse_drag(&self.header_layout, event.column, event.row)
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.interaction
                    .on_mouse_up(&self.header_layout, event.column, event.row)
            }
            _ => None,
        };
        if let Some(intent) = intent {
            self.apply(intent, today);
        }
    }

    /// Effective width for a visible column: resize override or a default
    /// sized to its label.
    pub fn column_width(&self, id: &str, label: &str) -> u16 {
        self.table
            .widths
            .get(id)
            .copied()
            .unwrap_or_else(|| (label.chars().count() as u16 + 4).max(12))
            .max(MIN_COLUMN_WIDTH)
    }
}

fn cycle<'a>(options: &'a [&'a str], current: &str) -> &'a str {
    let index = options.iter().position(|o| *o == current).unwrap_or(0);
    options[(index + 1) % options.len()]
}

fn parse_date(input: &str) -> Option<NaiveDate> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, "%d/%m/%Y")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%Y-%m-%d"))
        .ok()
}
