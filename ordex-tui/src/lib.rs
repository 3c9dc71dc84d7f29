//! ordex TUI library exports.

pub mod api_client;
pub mod config;
pub mod error;
pub mod events;
pub mod intent;
pub mod interaction;
pub mod keys;
pub mod notifications;
pub mod persistence;
pub mod query;
pub mod state;
pub mod theme;
pub mod views;
