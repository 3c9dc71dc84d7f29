//! Persisted column preferences.
//!
//! The registry is the single source of truth for display order and
//! visibility; `ColumnPrefs` is its passive durable mirror, written on every
//! toggle or reorder and consulted only at startup.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnPrefs {
    /// Column id -> visibility flag.
    #[serde(default)]
    pub visibility: BTreeMap<String, bool>,
    /// Column ids in display order.
    #[serde(default)]
    pub order: Vec<String>,
}
