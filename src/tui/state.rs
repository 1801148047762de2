//! Application state management and input handling.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::widgets::ListState;
use std::time::Instant;

use crate::cards::{CardRenderer, EpisodeGrid};
use crate::catalog::Catalog;
use crate::config::{Config, Keybindings};
use crate::filter::FilterEngine;
use crate::forms::Forms;
use crate::notify::{Notification, Notifier};
use crate::player::{ProgressSimulator, TickOutcome};
use crate::router::{Page, Router};

use super::types::{Action, InputMode};

/// Application state for the TUI.
pub struct App {
    /// Current page and nav menu
    pub router: Router,
    /// Episode catalog, filters and the card renderer
    pub engine: FilterEngine<CardRenderer>,
    /// Simulated audio player
    pub player: ProgressSimulator,
    /// Contact and newsletter forms
    pub forms: Forms,
    /// Visible toast, if any
    pub notifier: Notifier,
    /// Where typed characters currently go
    pub input_mode: InputMode,
    /// Text in the episode search box
    pub search_input: String,
    /// Selected card on the episodes page
    pub episode_list_state: ListState,
    /// Highlighted entry in the nav menu popup
    pub menu_selection: usize,
    /// Whether the help modal is shown
    pub show_help: bool,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Base URL for shared episode links
    pub share_url: String,
    /// Custom keybindings
    pub keybindings: Keybindings,
}

impl App {
    /// Create the app from config. Must be called inside a tokio runtime
    /// before any playback starts.
    pub fn new(config: &Config, catalog: Catalog) -> Self {
        let engine = FilterEngine::new(catalog, config.page_size, CardRenderer::new());
        Self {
            router: Router::new(),
            engine,
            player: ProgressSimulator::new(config.track_length_secs, config.tick_period()),
            forms: Forms::new(),
            notifier: Notifier::new(config.notification_lifetime()),
            input_mode: InputMode::Normal,
            search_input: String::new(),
            episode_list_state: ListState::default(),
            menu_selection: 0,
            show_help: false,
            should_quit: false,
            share_url: config.share_url.clone(),
            keybindings: config.keybindings.clone(),
        }
    }

    /// The grid most recently produced by the renderer.
    pub fn grid(&self) -> &EpisodeGrid {
        self.engine.renderer().grid()
    }

    /// Show a page and run its page-specific setup.
    pub fn show_page(&mut self, page: Page) {
        self.router.navigate(page);
        self.input_mode = InputMode::Normal;
        if page == Page::Episodes {
            self.engine.refresh();
            self.reset_selection();
        }
    }

    pub fn notify(&mut self, notification: Notification) {
        self.notifier.show(notification);
    }

    /// Periodic housekeeping: apply player ticks and expire the toast.
    pub fn on_tick(&mut self, now: Instant) {
        if self.player.drain_ticks() == TickOutcome::Finished {
            self.notify(Notification::info("Episode finished"));
        }
        self.notifier.expire(now);
    }

    pub fn on_resize(&mut self, width: u16) {
        self.router.resize(width);
    }

    /// Navigate to the episodes page and start the newest episode.
    pub fn play_latest(&mut self) {
        self.show_page(Page::Episodes);
        if let Some(id) = self.engine.catalog().latest().map(|e| e.id) {
            self.player.play_episode(id);
        }
    }

    /// Id of the highlighted card on the episodes page.
    pub fn selected_episode_id(&self) -> Option<u32> {
        let i = self.episode_list_state.selected()?;
        self.grid().cards.get(i).map(|c| c.id)
    }

    fn reset_selection(&mut self) {
        if self.grid().is_empty() {
            self.episode_list_state.select(None);
        } else {
            self.episode_list_state.select(Some(0));
        }
    }

    fn apply_search(&mut self) {
        self.engine.set_search_term(&self.search_input);
        self.reset_selection();
    }

    /// Handle keyboard input and return an action.
    pub fn handle_input(&mut self, key: KeyEvent) -> Action {
        // Global quit with Ctrl+C or Ctrl+Q
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') | KeyCode::Char('q') => {
                    self.should_quit = true;
                    return Action::Quit;
                }
                _ => {}
            }
        }

        // Handle help modal
        if self.show_help {
            if key.code == KeyCode::Esc
                || self.keybindings.matches(&self.keybindings.help, &key)
                || self.keybindings.matches(&self.keybindings.quit, &key)
            {
                self.show_help = false;
            }
            return Action::None;
        }

        match self.input_mode {
            InputMode::Search => return self.handle_search_input(key),
            InputMode::Contact => return self.handle_contact_form_input(key),
            InputMode::Newsletter => return self.handle_newsletter_input(key),
            InputMode::Normal => {}
        }

        if self.router.menu_open() {
            return self.handle_menu_input(key);
        }

        if self.keybindings.matches(&self.keybindings.help, &key) {
            self.show_help = true;
            return Action::None;
        }
        if self.keybindings.matches(&self.keybindings.quit, &key) {
            self.should_quit = true;
            return Action::Quit;
        }
        if self.keybindings.matches(&self.keybindings.menu, &key) {
            self.router.toggle_menu();
            self.menu_selection = self.router.current().index();
            return Action::None;
        }
        if self.keybindings.matches(&self.keybindings.back, &key) {
            self.notifier.dismiss();
            return Action::None;
        }
        if self.keybindings.matches(&self.keybindings.next_page, &key) {
            let page = self.router.next_page();
            self.show_page(page);
            return Action::None;
        }
        if self.keybindings.matches(&self.keybindings.prev_page, &key) {
            let page = self.router.prev_page();
            self.show_page(page);
            return Action::None;
        }
        if let KeyCode::Char(c @ '1'..='4') = key.code {
            let idx = c as usize - '1' as usize;
            self.show_page(Page::ALL[idx]);
            return Action::None;
        }

        match self.router.current() {
            Page::Home => self.handle_home_input(key),
            Page::Episodes => self.handle_episodes_input(key),
            Page::About => self.handle_about_input(key),
            Page::Contact => self.handle_contact_input(key),
        }
    }

    fn handle_menu_input(&mut self, key: KeyEvent) -> Action {
        if self.keybindings.matches(&self.keybindings.up, &key) {
            self.menu_selection = self.menu_selection.saturating_sub(1);
        } else if self.keybindings.matches(&self.keybindings.down, &key) {
            if self.menu_selection + 1 < Page::ALL.len() {
                self.menu_selection += 1;
            }
        } else if self.keybindings.matches(&self.keybindings.select, &key) {
            // Navigating closes the menu.
            self.show_page(Page::ALL[self.menu_selection]);
        } else if key.code == KeyCode::Esc
            || self.keybindings.matches(&self.keybindings.menu, &key)
        {
            self.router.escape();
        }
        Action::None
    }

    fn handle_home_input(&mut self, key: KeyEvent) -> Action {
        if self.keybindings.matches(&self.keybindings.select, &key)
            || self.keybindings.matches(&self.keybindings.play, &key)
        {
            self.play_latest();
        } else if self.keybindings.matches(&self.keybindings.edit, &key) {
            self.input_mode = InputMode::Newsletter;
        }
        Action::None
    }

    fn handle_about_input(&mut self, key: KeyEvent) -> Action {
        if self.keybindings.matches(&self.keybindings.down, &key) {
            self.router.scroll_by(1);
        } else if self.keybindings.matches(&self.keybindings.up, &key) {
            self.router.scroll_by(-1);
        }
        Action::None
    }

    fn handle_episodes_input(&mut self, key: KeyEvent) -> Action {
        let shown = self.grid().cards.len();

        if self.keybindings.matches(&self.keybindings.up, &key) {
            let i = self.episode_list_state.selected().unwrap_or(0);
            if i > 0 {
                self.episode_list_state.select(Some(i - 1));
            }
        } else if self.keybindings.matches(&self.keybindings.down, &key) {
            let i = self.episode_list_state.selected().unwrap_or(0);
            if i < shown.saturating_sub(1) {
                self.episode_list_state.select(Some(i + 1));
            }
        } else if self.keybindings.matches(&self.keybindings.search, &key) {
            self.input_mode = InputMode::Search;
        } else if self.keybindings.matches(&self.keybindings.category, &key) {
            let next = self.engine.state().category().cycle_next();
            self.engine.set_category_filter(next);
            self.reset_selection();
        } else if self.keybindings.matches(&self.keybindings.load_more, &key) {
            self.engine.load_more();
            if self.episode_list_state.selected().is_none() {
                self.reset_selection();
            }
        } else if self.keybindings.matches(&self.keybindings.select, &key) {
            if let Some(id) = self.selected_episode_id() {
                self.player.play_episode(id);
            }
        } else if self.keybindings.matches(&self.keybindings.play, &key) {
            self.player.toggle();
        } else if self.keybindings.matches(&self.keybindings.share, &key) {
            if let Some(id) = self.selected_episode_id() {
                return Action::Share(id);
            }
        }
        Action::None
    }

    fn handle_contact_input(&mut self, key: KeyEvent) -> Action {
        if self.keybindings.matches(&self.keybindings.category, &key) {
            self.forms.toggle_tab();
        } else if self.keybindings.matches(&self.keybindings.edit, &key)
            || self.keybindings.matches(&self.keybindings.select, &key)
        {
            self.input_mode = InputMode::Contact;
        }
        Action::None
    }

    fn handle_search_input(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Enter | KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Char(c) => {
                self.search_input.push(c);
                self.apply_search();
            }
            KeyCode::Backspace => {
                self.search_input.pop();
                self.apply_search();
            }
            _ => {}
        }
        Action::None
    }

    fn handle_contact_form_input(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Esc => self.input_mode = InputMode::Normal,
            KeyCode::Tab | KeyCode::Down => self.forms.active_form_mut().focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.forms.active_form_mut().focus_prev(),
            KeyCode::Enter => {
                let ack = self.forms.submit_contact();
                self.notify(ack);
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Char(c) => self.forms.active_form_mut().push_char(c),
            KeyCode::Backspace => self.forms.active_form_mut().pop_char(),
            _ => {}
        }
        Action::None
    }

    fn handle_newsletter_input(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Esc => self.input_mode = InputMode::Normal,
            KeyCode::Enter => {
                if let Some(notification) = self.forms.submit_newsletter() {
                    let accepted = self.forms.newsletter.value("Email") == Some("");
                    self.notify(notification);
                    if accepted {
                        self.input_mode = InputMode::Normal;
                    }
                }
            }
            KeyCode::Char(c) => self.forms.newsletter.push_char(c),
            KeyCode::Backspace => self.forms.newsletter.pop_char(),
            _ => {}
        }
        Action::None
    }
}
