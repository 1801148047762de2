//! Contact and newsletter forms, plus episode sharing.
//!
//! Nothing is actually sent anywhere: submitting a form clears it and yields
//! an acknowledgment [`Notification`] for the caller to display.

use log::{debug, info, warn};
use regex::Regex;
use std::sync::LazyLock;

use crate::error::{AppError, Result};
use crate::notify::Notification;

pub const GENERAL_ACK: &str = "Thank you for your message! We'll get back to you soon.";
pub const CONFIDENTIAL_ACK: &str = "Your confidential submission has been received securely.";
pub const NEWSLETTER_ACK: &str = "Thank you for subscribing!";
pub const LINK_COPIED_ACK: &str = "Episode link copied to clipboard!";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Loose address-shape check for the newsletter field.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// One labelled text input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub label: &'static str,
    pub value: String,
}

/// An ordered set of text inputs with one focused field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    fields: Vec<FormField>,
    focused: usize,
}

impl Form {
    pub fn new(labels: &[&'static str]) -> Self {
        Self {
            fields: labels
                .iter()
                .map(|label| FormField {
                    label: *label,
                    value: String::new(),
                })
                .collect(),
            focused: 0,
        }
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn focused(&self) -> usize {
        self.focused
    }

    pub fn value(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.label == label)
            .map(|f| f.value.as_str())
    }

    pub fn set_value(&mut self, label: &str, value: &str) {
        if let Some(field) = self.fields.iter_mut().find(|f| f.label == label) {
            field.value = value.to_string();
        }
    }

    pub fn push_char(&mut self, c: char) {
        if let Some(field) = self.fields.get_mut(self.focused) {
            field.value.push(c);
        }
    }

    pub fn pop_char(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focused) {
            field.value.pop();
        }
    }

    pub fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focused = (self.focused + 1) % self.fields.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.fields.is_empty() {
            self.focused = (self.focused + self.fields.len() - 1) % self.fields.len();
        }
    }

    /// Clear every field and focus the first one.
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.value.clear();
        }
        self.focused = 0;
    }
}

/// The two tabs on the contact page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactTab {
    General,
    Confidential,
}

impl ContactTab {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "general" => Some(ContactTab::General),
            "confidential" => Some(ContactTab::Confidential),
            _ => None,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ContactTab::General => "General Inquiry",
            ContactTab::Confidential => "Confidential Submission",
        }
    }
}

/// All forms on the site.
#[derive(Debug, Clone)]
pub struct Forms {
    active_tab: ContactTab,
    pub general: Form,
    pub confidential: Form,
    pub newsletter: Form,
}

impl Forms {
    pub fn new() -> Self {
        Self {
            active_tab: ContactTab::General,
            general: Form::new(&["Name", "Email", "Subject", "Message"]),
            confidential: Form::new(&["Alias", "Message"]),
            newsletter: Form::new(&["Email"]),
        }
    }

    pub fn active_tab(&self) -> ContactTab {
        self.active_tab
    }

    /// Switch tabs by name. Unknown names are ignored.
    pub fn show_tab(&mut self, name: &str) -> bool {
        match ContactTab::from_name(name) {
            Some(tab) => {
                self.active_tab = tab;
                true
            }
            None => {
                debug!("no contact tab named {:?}", name);
                false
            }
        }
    }

    pub fn toggle_tab(&mut self) {
        self.active_tab = match self.active_tab {
            ContactTab::General => ContactTab::Confidential,
            ContactTab::Confidential => ContactTab::General,
        };
    }

    pub fn active_form(&self) -> &Form {
        match self.active_tab {
            ContactTab::General => &self.general,
            ContactTab::Confidential => &self.confidential,
        }
    }

    pub fn active_form_mut(&mut self) -> &mut Form {
        match self.active_tab {
            ContactTab::General => &mut self.general,
            ContactTab::Confidential => &mut self.confidential,
        }
    }

    /// Submit the form on the active tab: acknowledge and clear it.
    pub fn submit_contact(&mut self) -> Notification {
        let tab = self.active_tab;
        self.active_form_mut().reset();
        info!("{} submitted", tab.title());
        match tab {
            ContactTab::General => Notification::success(GENERAL_ACK),
            ContactTab::Confidential => Notification::success(CONFIDENTIAL_ACK),
        }
    }

    /// Submit the newsletter form.
    ///
    /// An empty address is ignored (`None`, form untouched). A malformed one
    /// yields an error notification and keeps the input for correction.
    pub fn submit_newsletter(&mut self) -> Option<Notification> {
        let email = self.newsletter.value("Email").unwrap_or("").trim().to_string();
        if email.is_empty() {
            return None;
        }
        if !is_valid_email(&email) {
            debug!("rejected newsletter address {:?}", email);
            return Some(Notification::error(
                AppError::InvalidInput(format!("'{}' is not an email address", email)).to_string(),
            ));
        }
        self.newsletter.reset();
        info!("newsletter subscription recorded");
        Some(Notification::success(NEWSLETTER_ACK))
    }
}

impl Default for Forms {
    fn default() -> Self {
        Self::new()
    }
}

/// Where a shared link goes.
pub trait ShareTarget {
    /// Whether a native share sheet is available.
    fn can_share(&self) -> bool;

    fn share(&mut self, title: &str, text: &str, url: &str) -> Result<()>;

    fn copy_to_clipboard(&mut self, text: &str) -> Result<()>;
}

/// The system clipboard. Terminals have no share sheet, so this always
/// takes the clipboard path.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl ShareTarget for SystemClipboard {
    fn can_share(&self) -> bool {
        false
    }

    fn share(&mut self, _title: &str, _text: &str, _url: &str) -> Result<()> {
        Err(AppError::Clipboard("no native share available".to_string()))
    }

    fn copy_to_clipboard(&mut self, text: &str) -> Result<()> {
        arboard::Clipboard::new()
            .and_then(|mut cb| cb.set_text(text.to_string()))
            .map_err(|e| AppError::Clipboard(e.to_string()))
    }
}

/// Link to a single episode on the site.
pub fn episode_link(base_url: &str, episode_id: u32) -> String {
    format!("{}#episode-{}", base_url.trim_end_matches('/'), episode_id)
}

/// Share an episode, falling back to the clipboard.
///
/// Returns the notification to show, if any. A successful native share needs
/// no acknowledgment; a clipboard failure reports the link so it can still be
/// copied by hand.
pub fn share_episode(
    target: &mut dyn ShareTarget,
    base_url: &str,
    episode_id: u32,
) -> Option<Notification> {
    let url = episode_link(base_url, episode_id);

    if target.can_share() {
        match target.share("Beyond Consent Podcast", "Check out this episode!", &url) {
            Ok(()) => return None,
            Err(e) => warn!("native share failed: {}", e),
        }
    }

    match target.copy_to_clipboard(&url) {
        Ok(()) => Some(Notification::success(LINK_COPIED_ACK)),
        Err(e) => {
            warn!("{}", e);
            Some(Notification::error(format!("Could not copy link. Share this URL: {}", url)))
        }
    }
}
