//! Core data types for the ordex service-order explorer.
//!
//! Everything in this crate is pure state and logic: the column registry,
//! filter state with date-preset resolution, the service-order row model,
//! the persisted column preferences, and aggregate totals. All I/O (remote
//! queries, preference files, terminal rendering) lives in `ordex-tui`.

pub mod column;
pub mod filter;
pub mod format;
pub mod order;
pub mod prefs;
pub mod totals;

pub use column::{ColumnDescriptor, ColumnRegistry, DropSide, ANCHOR_COLUMN};
pub use filter::{DatePreset, FilterState};
pub use order::{Contact, ServiceOrder};
pub use prefs::ColumnPrefs;
pub use totals::Totals;
