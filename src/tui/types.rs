//! TUI type definitions for input modes and actions.

/// Where typed characters go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Keys are commands
    Normal,
    /// Typing into the episode search box
    Search,
    /// Typing into the active contact form
    Contact,
    /// Typing into the newsletter address field
    Newsletter,
}

/// Actions that need the event loop to act outside the app state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// No action, continue running
    None,
    /// Quit the application
    Quit,
    /// Share the episode with the given id
    Share(u32),
}
