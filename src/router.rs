//! Page routing.
//!
//! The site is one document with several logical pages; exactly one is
//! visible at a time. The router also owns the collapsible navigation menu
//! used on narrow screens.

use log::{debug, info};
use std::fmt;

/// Width above which the collapsible menu is always closed.
pub const MOBILE_BREAKPOINT: u16 = 768;

/// The site's logical pages, in navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Home,
    Episodes,
    About,
    Contact,
}

impl Page {
    pub const ALL: [Page; 4] = [Page::Home, Page::Episodes, Page::About, Page::Contact];

    pub fn name(self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::Episodes => "episodes",
            Page::About => "about",
            Page::Contact => "contact",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Episodes => "Episodes",
            Page::About => "About",
            Page::Contact => "Contact",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    /// Position in the nav bar.
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|p| *p == self).unwrap_or(0)
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Current page, scroll position and nav menu state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Router {
    current: Page,
    menu_open: bool,
    scroll: u16,
}

impl Router {
    pub fn new() -> Self {
        Self {
            current: Page::Home,
            menu_open: false,
            scroll: 0,
        }
    }

    pub fn current(&self) -> Page {
        self.current
    }

    pub fn menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    pub fn scroll_by(&mut self, delta: i32) {
        let next = (i32::from(self.scroll) + delta).clamp(0, i32::from(u16::MAX));
        self.scroll = next as u16;
    }

    /// Show the page with the given name. Unknown names leave everything
    /// untouched and return `None`.
    pub fn show_page(&mut self, name: &str) -> Option<Page> {
        match Page::from_name(name) {
            Some(page) => {
                self.navigate(page);
                Some(page)
            }
            None => {
                debug!("no page named {:?}", name);
                None
            }
        }
    }

    /// Make `page` current, close the menu and scroll to the top.
    pub fn navigate(&mut self, page: Page) {
        info!("showing page {}", page);
        self.current = page;
        self.menu_open = false;
        self.scroll = 0;
    }

    /// Move to the next page in nav order, wrapping around.
    pub fn next_page(&mut self) -> Page {
        let next = Page::ALL[(self.current.index() + 1) % Page::ALL.len()];
        self.navigate(next);
        next
    }

    pub fn prev_page(&mut self) -> Page {
        let len = Page::ALL.len();
        let prev = Page::ALL[(self.current.index() + len - 1) % len];
        self.navigate(prev);
        prev
    }

    pub fn toggle_menu(&mut self) -> bool {
        self.menu_open = !self.menu_open;
        self.menu_open
    }

    /// Escape closes the menu.
    pub fn escape(&mut self) {
        self.menu_open = false;
    }

    /// Widening past the breakpoint closes the menu.
    pub fn resize(&mut self, width: u16) {
        if width > MOBILE_BREAKPOINT {
            self.menu_open = false;
        }
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}
