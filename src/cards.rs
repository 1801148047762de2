//! Episode card rendering.
//!
//! [`CardRenderer`] is the renderer collaborator of the filter engine: it
//! turns each [`FilteredView`] into display-ready cards, the match counter and
//! the "load more" flag. The TUI draws from it and `--list` mode prints it.

use crate::filter::{FilteredView, Renderer};
use crate::types::Episode;

/// Display data for one episode card.
#[derive(Clone, Debug, PartialEq)]
pub struct EpisodeCard {
    pub id: u32,
    /// "Episode 15"
    pub number_label: String,
    /// Badge text: the episode's first tag.
    pub badge: String,
    /// Human label of the episode's category.
    pub category_label: String,
    pub title: String,
    pub description: String,
    pub date: String,
    pub duration: String,
    pub downloads: String,
    pub featured: bool,
}

impl EpisodeCard {
    pub fn from_episode(episode: &Episode) -> Self {
        Self {
            id: episode.id,
            number_label: format!("Episode {}", episode.id),
            badge: episode.badge().to_string(),
            category_label: episode.category.label().to_string(),
            title: episode.title.clone(),
            description: episode.description.clone(),
            date: episode.date.clone(),
            duration: episode.duration_label.clone(),
            downloads: episode.downloads_label.clone(),
            featured: episode.featured,
        }
    }

    /// The meta line under the description.
    ///
    /// # Examples
    ///
    /// ```
    /// use beyond_consent::cards::EpisodeCard;
    /// use beyond_consent::catalog::Catalog;
    ///
    /// let catalog = Catalog::seeded();
    /// let card = EpisodeCard::from_episode(catalog.latest().unwrap());
    /// assert_eq!(card.meta_line(), "March 15, 2024 | 45 min | 12.5K downloads");
    /// ```
    pub fn meta_line(&self) -> String {
        format!("{} | {} | {} downloads", self.date, self.duration, self.downloads)
    }

    /// Card header: number, badge and a star for featured episodes.
    pub fn header_line(&self) -> String {
        if self.featured {
            format!("{}  [{}]  * featured", self.number_label, self.badge)
        } else {
            format!("{}  [{}]", self.number_label, self.badge)
        }
    }
}

/// Everything the episodes page shows for one view.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EpisodeGrid {
    pub cards: Vec<EpisodeCard>,
    /// Value of the visible match counter.
    pub count: usize,
    /// Whether the "load more" affordance is shown.
    pub load_more_visible: bool,
}

impl EpisodeGrid {
    pub fn from_view(view: &FilteredView<'_>) -> Self {
        Self {
            cards: view.episodes.iter().map(|e| EpisodeCard::from_episode(e)).collect(),
            count: view.total_matches,
            load_more_visible: view.has_more,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Counter text, e.g. "3 episodes".
    pub fn count_label(&self) -> String {
        match self.count {
            1 => "1 episode".to_string(),
            n => format!("{} episodes", n),
        }
    }
}

/// Keeps the latest [`EpisodeGrid`] materialized from engine notifications.
#[derive(Debug, Default)]
pub struct CardRenderer {
    grid: EpisodeGrid,
    renders: usize,
}

impl CardRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grid(&self) -> &EpisodeGrid {
        &self.grid
    }

    /// Number of views received so far.
    pub fn renders(&self) -> usize {
        self.renders
    }
}

impl Renderer for CardRenderer {
    fn on_view_changed(&mut self, view: &FilteredView<'_>) {
        self.grid = EpisodeGrid::from_view(view);
        self.renders += 1;
    }
}

/// Plain-text rendering of a grid for non-interactive output.
pub fn format_grid(grid: &EpisodeGrid) -> String {
    let mut out = format!("{}\n", grid.count_label());

    if grid.is_empty() {
        out.push_str("\nNo episodes match your search.\n");
        return out;
    }

    for card in &grid.cards {
        out.push('\n');
        out.push_str(&card.header_line());
        out.push('\n');
        out.push_str(&card.title);
        out.push('\n');
        out.push_str(&card.description);
        out.push('\n');
        out.push_str(&card.meta_line());
        out.push('\n');
    }

    if grid.load_more_visible {
        out.push_str("\n[ Load more episodes ]\n");
    }
    out
}
