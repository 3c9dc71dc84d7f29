//! Event types for the TUI event loop.

use crate::api_client::ApiClientError;
use crossterm::event::{KeyEvent, MouseEvent};
use ordex_core::ServiceOrder;

#[derive(Debug)]
pub enum TuiEvent {
    Input(KeyEvent),
    Mouse(MouseEvent),
    Resize { width: u16, height: u16 },
    /// A background fetch finished. `seq` identifies which request this
    /// answers; stale sequence numbers are dropped by the state layer.
    FetchFinished {
        seq: u64,
        outcome: Result<Vec<ServiceOrder>, ApiClientError>,
    },
}
