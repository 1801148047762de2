//! Terminal User Interface for beyond-consent using ratatui.
//!
//! The terminal stands in for the single-page site: a nav bar across the
//! top, one page body at a time, a persistent player bar and toast overlay.

mod render;
mod state;
mod types;

pub use render::draw;
pub use state::App;
pub use types::{Action, InputMode};

use crossterm::event::{self, Event};
use std::io;
use std::time::Duration;

/// Poll for terminal events with a timeout.
pub fn poll_event(timeout: Duration) -> io::Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}
