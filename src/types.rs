//! Type definitions for the beyond-consent application.
//!
//! This module contains the catalog data structures: episodes, their fixed
//! set of categories, and the category selector used by the filter engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed set of episode categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    LegalAdvice,
    SurvivorStories,
    Prevention,
    DigitalHarassment,
}

impl Category {
    /// Every category, in selector order.
    pub const ALL: [Category; 4] = [
        Category::LegalAdvice,
        Category::SurvivorStories,
        Category::Prevention,
        Category::DigitalHarassment,
    ];

    /// The machine value used by the category selector (e.g. `legal-advice`).
    pub fn as_str(self) -> &'static str {
        match self {
            Category::LegalAdvice => "legal-advice",
            Category::SurvivorStories => "survivor-stories",
            Category::Prevention => "prevention",
            Category::DigitalHarassment => "digital-harassment",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Category::LegalAdvice => "Legal Advice",
            Category::SurvivorStories => "Survivor Stories",
            Category::Prevention => "Prevention",
            Category::DigitalHarassment => "Digital Harassment",
        }
    }

    /// Look up a category by its machine value. Matching is exact.
    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == value)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category selector: either every category or exactly one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Parse a selector value. Anything other than a known category value
    /// (including `"all"`) collapses to [`CategoryFilter::All`].
    ///
    /// # Examples
    ///
    /// ```
    /// use beyond_consent::types::{Category, CategoryFilter};
    ///
    /// assert_eq!(CategoryFilter::parse("prevention"), CategoryFilter::Only(Category::Prevention));
    /// assert_eq!(CategoryFilter::parse("all"), CategoryFilter::All);
    /// assert_eq!(CategoryFilter::parse("podcasts"), CategoryFilter::All);
    /// ```
    pub fn parse(value: &str) -> Self {
        match Category::from_value(value) {
            Some(category) => CategoryFilter::Only(category),
            None => CategoryFilter::All,
        }
    }

    pub fn matches(self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(selected) => selected == category,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Only(category) => category.as_str(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CategoryFilter::All => "All Categories",
            CategoryFilter::Only(category) => category.label(),
        }
    }

    /// Next selector option, wrapping from the last category back to `All`.
    pub fn cycle_next(self) -> Self {
        match self {
            CategoryFilter::All => CategoryFilter::Only(Category::ALL[0]),
            CategoryFilter::Only(current) => {
                let idx = Category::ALL.iter().position(|c| *c == current).unwrap_or(0);
                match Category::ALL.get(idx + 1) {
                    Some(next) => CategoryFilter::Only(*next),
                    None => CategoryFilter::All,
                }
            }
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A podcast episode. Immutable once seeded into the catalog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    /// Unique episode number; also the display and sort key.
    pub id: u32,

    pub title: String,

    pub description: String,

    /// Display date, not machine-parseable.
    pub date: String,

    /// Display duration (e.g. "45 min").
    #[serde(rename = "duration")]
    pub duration_label: String,

    pub category: Category,

    /// Ordered tags. The first one is shown as the card badge.
    pub tags: Vec<String>,

    #[serde(default)]
    pub featured: bool,

    /// Display download count (e.g. "12.5K").
    #[serde(rename = "downloads")]
    pub downloads_label: String,
}

impl Episode {
    /// The badge shown on the episode card: the first tag.
    ///
    /// # Examples
    ///
    /// ```
    /// use beyond_consent::types::{Category, Episode};
    ///
    /// let ep = Episode {
    ///     id: 1,
    ///     title: "Pilot".to_string(),
    ///     description: String::new(),
    ///     date: "January 1, 2024".to_string(),
    ///     duration_label: "30 min".to_string(),
    ///     category: Category::Prevention,
    ///     tags: vec!["Prevention".to_string(), "Basics".to_string()],
    ///     featured: false,
    ///     downloads_label: "1K".to_string(),
    /// };
    /// assert_eq!(ep.badge(), "Prevention");
    /// ```
    pub fn badge(&self) -> &str {
        self.tags.first().map(String::as_str).unwrap_or("")
    }

    /// Case-insensitive substring match against title, description or any tag.
    /// `needle` must already be lowercase; an empty needle matches everything.
    pub fn matches_text(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self.tags.iter().any(|tag| tag.to_lowercase().contains(needle))
    }

    /// Format the episode for one-line display.
    pub fn to_display(&self) -> String {
        format!("Episode {} - {}", self.id, self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn episode(tags: &[&str]) -> Episode {
        Episode {
            id: 3,
            title: "Know Your Rights".to_string(),
            description: "Talking about Reporting channels.".to_string(),
            date: "May 1, 2024".to_string(),
            duration_label: "30 min".to_string(),
            category: Category::LegalAdvice,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            featured: false,
            downloads_label: "1.0K".to_string(),
        }
    }

    #[test]
    fn test_category_round_trips_through_value() {
        for category in Category::ALL {
            assert_eq!(Category::from_value(category.as_str()), Some(category));
        }
        assert_eq!(Category::from_value("Legal-Advice"), None);
    }

    #[test]
    fn test_category_serde_uses_kebab_case() {
        let json = serde_json::to_string(&Category::DigitalHarassment).unwrap();
        assert_eq!(json, "\"digital-harassment\"");
    }

    #[test]
    fn test_filter_parse_unknown_is_all() {
        assert_eq!(CategoryFilter::parse(""), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse("ALL"), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::parse("survivor-stories"),
            CategoryFilter::Only(Category::SurvivorStories)
        );
    }

    #[test]
    fn test_filter_matches() {
        assert!(CategoryFilter::All.matches(Category::Prevention));
        assert!(CategoryFilter::Only(Category::Prevention).matches(Category::Prevention));
        assert!(!CategoryFilter::Only(Category::Prevention).matches(Category::LegalAdvice));
    }

    #[test]
    fn test_filter_cycle_visits_every_option() {
        let mut filter = CategoryFilter::All;
        let mut seen = Vec::new();
        for _ in 0..5 {
            filter = filter.cycle_next();
            seen.push(filter);
        }
        assert_eq!(seen[0], CategoryFilter::Only(Category::LegalAdvice));
        assert_eq!(seen[3], CategoryFilter::Only(Category::DigitalHarassment));
        assert_eq!(seen[4], CategoryFilter::All);
    }

    #[test]
    fn test_matches_text_fields() {
        let ep = episode(&["Legal Advice", "Reporting"]);
        assert!(ep.matches_text(""));
        assert!(ep.matches_text("rights"));
        assert!(ep.matches_text("channels"));
        assert!(ep.matches_text("legal adv"));
        assert!(!ep.matches_text("stalking"));
    }

    #[test]
    fn test_badge_with_no_tags() {
        let ep = episode(&[]);
        assert_eq!(ep.badge(), "");
    }

    #[test]
    fn test_episode_to_display() {
        let ep = episode(&["Legal Advice"]);
        assert_eq!(ep.to_display(), "Episode 3 - Know Your Rights");
    }
}
