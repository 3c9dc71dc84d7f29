//! Filter state and date-preset resolution.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Relative date-range presets for the emission-date filter.
///
/// Every preset except `Custom` resolves against "today" at apply time, so a
/// session left open overnight still queries the right window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatePreset {
    /// Today only.
    Day,
    /// The last 7 days.
    Week,
    /// The last 30 days.
    Month,
    /// From the first day of the current month.
    CurrentMonth,
    /// From January 1st of the current year.
    CurrentYear,
    /// The whole previous calendar year.
    LastYear,
    /// User-entered start and end dates.
    Custom,
}

impl DatePreset {
    pub const fn all() -> [DatePreset; 7] {
        [
            DatePreset::Day,
            DatePreset::Week,
            DatePreset::Month,
            DatePreset::CurrentMonth,
            DatePreset::CurrentYear,
            DatePreset::LastYear,
            DatePreset::Custom,
        ]
    }

    /// Parse a configured preset name. Unknown values fall back to `Week`,
    /// the default window of the original export UI.
    pub fn parse(value: &str) -> Self {
        match value {
            "day" => DatePreset::Day,
            "week" => DatePreset::Week,
            "month" => DatePreset::Month,
            "current_month" => DatePreset::CurrentMonth,
            "current_year" => DatePreset::CurrentYear,
            "last_year" => DatePreset::LastYear,
            "custom" => DatePreset::Custom,
            _ => DatePreset::Week,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DatePreset::Day => "Hoje",
            DatePreset::Week => "Últimos 7 dias",
            DatePreset::Month => "Últimos 30 dias",
            DatePreset::CurrentMonth => "Mês atual",
            DatePreset::CurrentYear => "Ano atual",
            DatePreset::LastYear => "Ano anterior",
            DatePreset::Custom => "Personalizado",
        }
    }

    /// The preset after this one, wrapping around.
    pub fn next(&self) -> Self {
        let all = Self::all();
        let index = all.iter().position(|p| p == self).unwrap_or(0);
        all[(index + 1) % all.len()]
    }

    /// Resolve to an inclusive `(start, end)` range. `Custom` resolves to
    /// `None`: its range lives in the filter state, not the preset.
    pub fn resolve(&self, today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
        match self {
            DatePreset::Day => Some((today, today)),
            DatePreset::Week => {
                Some((today.checked_sub_days(Days::new(7)).unwrap_or(today), today))
            }
            DatePreset::Month => {
                Some((today.checked_sub_days(Days::new(30)).unwrap_or(today), today))
            }
            DatePreset::CurrentMonth => Some((
                today.with_day(1).unwrap_or(today),
                today,
            )),
            DatePreset::CurrentYear => Some((
                NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today),
                today,
            )),
            DatePreset::LastYear => {
                let year = today.year() - 1;
                let start = NaiveDate::from_ymd_opt(year, 1, 1)?;
                let end = NaiveDate::from_ymd_opt(year, 12, 31)?;
                Some((start, end))
            }
            DatePreset::Custom => None,
        }
    }
}

/// Everything the user can constrain a fetch by.
///
/// Mutations go through the setters so derived state (resolved dates, the
/// dynamic search value) stays consistent with its inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub preset: DatePreset,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Exact-match status filter; empty means all statuses.
    pub status: String,
    /// Column id for the substring search; empty means disabled.
    pub dynamic_field: String,
    pub dynamic_value: String,
}

impl FilterState {
    pub fn new(preset: DatePreset, today: NaiveDate) -> Self {
        let (start_date, end_date) = preset.resolve(today).unwrap_or((today, today));
        Self {
            preset,
            start_date,
            end_date,
            status: String::new(),
            dynamic_field: String::new(),
            dynamic_value: String::new(),
        }
    }

    /// Switch presets, re-resolving the range. Switching to `Custom` keeps
    /// the current range as the starting point for manual edits.
    pub fn set_preset(&mut self, preset: DatePreset, today: NaiveDate) {
        self.preset = preset;
        if let Some((start, end)) = preset.resolve(today) {
            self.start_date = start;
            self.end_date = end;
        }
    }

    /// Set an explicit range, switching to `Custom`. An inverted range is
    /// normalized by swapping the endpoints.
    pub fn set_custom_range(&mut self, start: NaiveDate, end: NaiveDate) {
        self.preset = DatePreset::Custom;
        if start <= end {
            self.start_date = start;
            self.end_date = end;
        } else {
            self.start_date = end;
            self.end_date = start;
        }
    }

    /// Change the dynamic-search column. Changing fields discards the old
    /// search text, which belonged to the previous field.
    pub fn set_dynamic_field(&mut self, field: &str) {
        if self.dynamic_field != field {
            self.dynamic_field = field.to_string();
            self.dynamic_value.clear();
        }
    }

    /// Reset everything to the default preset's state.
    pub fn clear(&mut self, default_preset: DatePreset, today: NaiveDate) {
        *self = FilterState::new(default_preset, today);
    }

    /// The dynamic filter as `(field, value)`, only when both are non-empty.
    pub fn dynamic_pair(&self) -> Option<(&str, &str)> {
        if self.dynamic_field.is_empty() || self.dynamic_value.is_empty() {
            None
        } else {
            Some((&self.dynamic_field, &self.dynamic_value))
        }
    }
}
