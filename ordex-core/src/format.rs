//! pt-BR cell rendering helpers.
//!
//! These are the `render` functions wired into the default column registry.
//! The shapes intentionally match what the Tiny export UI always showed:
//! `DD/MM/YYYY` dates, `R$ 1234,56` currency (comma decimal separator, no
//! thousands grouping), and a dash for absent or falsy values.

use chrono::NaiveDate;
use serde_json::Value;

/// Placeholder for absent/falsy cell values.
pub const EMPTY_CELL: &str = "-";

/// Format an amount as `R$ <int>,<2dp>`.
pub fn format_brl(amount: f64) -> String {
    format!("R$ {:.2}", amount).replace('.', ",")
}

/// Currency cell: zero and non-numeric values render as `R$ 0,00`.
pub fn render_currency(value: &Value) -> String {
    match value.as_f64() {
        Some(amount) if amount != 0.0 => format_brl(amount),
        _ => "R$ 0,00".to_string(),
    }
}

/// Date cell: ISO calendar dates (optionally with a trailing time component)
/// render as `DD/MM/YYYY`; anything unparseable renders as the placeholder.
pub fn render_date(value: &Value) -> String {
    value
        .as_str()
        .and_then(|s| NaiveDate::parse_from_str(s.get(..10).unwrap_or(s), "%Y-%m-%d").ok())
        .map(|date| date.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| EMPTY_CELL.to_string())
}

/// Tag-list cell: comma-joined tag names, placeholder when empty.
pub fn render_tags(value: &Value) -> String {
    match value {
        Value::Array(items) => {
            let names: Vec<&str> = items.iter().filter_map(|v| v.as_str()).collect();
            if names.is_empty() {
                EMPTY_CELL.to_string()
            } else {
                names.join(", ")
            }
        }
        _ => EMPTY_CELL.to_string(),
    }
}

/// Fallback cell text for columns without a render function.
pub fn render_plain(value: &Value) -> String {
    match value {
        Value::String(s) if !s.is_empty() => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => EMPTY_CELL.to_string(),
    }
}
