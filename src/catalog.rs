//! The static episode catalog.
//!
//! Episodes are seeded once at startup, newest first, and never mutated.

use crate::types::{Category, Episode};

/// A fixed, ordered sequence of episodes.
#[derive(Clone, Debug, PartialEq)]
pub struct Catalog {
    episodes: Vec<Episode>,
}

impl Catalog {
    /// Build a catalog from an already ordered list.
    pub fn new(episodes: Vec<Episode>) -> Self {
        Self { episodes }
    }

    /// The show's published episodes (ids 15 down to 8).
    pub fn seeded() -> Self {
        Self::new(seed_episodes())
    }

    pub fn episodes(&self) -> &[Episode] {
        &self.episodes
    }

    pub fn len(&self) -> usize {
        self.episodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.episodes.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&Episode> {
        self.episodes.iter().find(|e| e.id == id)
    }

    /// The most recent episode (first in catalog order).
    pub fn latest(&self) -> Option<&Episode> {
        self.episodes.first()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::seeded()
    }
}

#[allow(clippy::too_many_arguments)]
fn episode(
    id: u32,
    title: &str,
    description: &str,
    date: &str,
    duration: &str,
    category: Category,
    tags: [&str; 2],
    featured: bool,
    downloads: &str,
) -> Episode {
    Episode {
        id,
        title: title.to_string(),
        description: description.to_string(),
        date: date.to_string(),
        duration_label: duration.to_string(),
        category,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        featured,
        downloads_label: downloads.to_string(),
    }
}

fn seed_episodes() -> Vec<Episode> {
    vec![
        episode(
            15,
            "Understanding Digital Consent Laws",
            "In this episode, we explore the evolving landscape of digital consent laws and how they protect individuals from online harassment and exploitation.",
            "March 15, 2024",
            "45 min",
            Category::LegalAdvice,
            ["Legal Advice", "Digital Rights"],
            true,
            "12.5K",
        ),
        episode(
            14,
            "Survivor Stories: Finding Strength",
            "Hear powerful stories from survivors who have overcome digital harassment and found ways to rebuild their lives.",
            "March 8, 2024",
            "38 min",
            Category::SurvivorStories,
            ["Survivor Stories", "Healing"],
            false,
            "9.2K",
        ),
        episode(
            13,
            "Preventing Online Harassment",
            "Practical tips and strategies for protecting yourself and others from digital harassment and maintaining online safety.",
            "March 1, 2024",
            "42 min",
            Category::Prevention,
            ["Prevention", "Digital Safety"],
            false,
            "11.8K",
        ),
        episode(
            12,
            "Legal Remedies for Digital Harassment",
            "Understanding your legal options when facing online harassment, including restraining orders and criminal charges.",
            "February 22, 2024",
            "50 min",
            Category::LegalAdvice,
            ["Legal Advice", "Remedies"],
            false,
            "15.3K",
        ),
        episode(
            11,
            "Platform Accountability and User Rights",
            "Examining how social media platforms handle harassment reports and what users can do to protect themselves.",
            "February 15, 2024",
            "35 min",
            Category::DigitalHarassment,
            ["Digital Harassment", "Platform Policy"],
            false,
            "8.7K",
        ),
        episode(
            10,
            "Supporting Survivors: A Community Approach",
            "How communities, families, and friends can better support survivors of digital harassment and consent violations.",
            "February 8, 2024",
            "40 min",
            Category::SurvivorStories,
            ["Support", "Community"],
            false,
            "10.1K",
        ),
        episode(
            9,
            "Digital Evidence Collection",
            "A comprehensive guide on how to properly collect and preserve digital evidence for legal proceedings.",
            "February 1, 2024",
            "47 min",
            Category::LegalAdvice,
            ["Legal Advice", "Evidence"],
            false,
            "13.6K",
        ),
        episode(
            8,
            "Cyberstalking: Recognition and Response",
            "Understanding the signs of cyberstalking and effective strategies for protection and legal recourse.",
            "January 25, 2024",
            "43 min",
            Category::DigitalHarassment,
            ["Digital Harassment", "Cyberstalking"],
            false,
            "12.9K",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seeded_catalog_is_newest_first() {
        let catalog = Catalog::seeded();
        let ids: Vec<u32> = catalog.episodes().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![15, 14, 13, 12, 11, 10, 9, 8]);
    }

    #[test]
    fn test_seeded_ids_unique_and_tags_present() {
        let catalog = Catalog::seeded();
        let ids: HashSet<u32> = catalog.episodes().iter().map(|e| e.id).collect();
        assert_eq!(ids.len(), catalog.len());
        assert!(catalog.episodes().iter().all(|e| !e.tags.is_empty()));
        assert!(catalog.episodes().iter().all(|e| !e.title.is_empty()));
    }

    #[test]
    fn test_only_latest_is_featured() {
        let catalog = Catalog::seeded();
        let featured: Vec<u32> = catalog
            .episodes()
            .iter()
            .filter(|e| e.featured)
            .map(|e| e.id)
            .collect();
        assert_eq!(featured, vec![15]);
        assert_eq!(catalog.latest().map(|e| e.id), Some(15));
    }

    #[test]
    fn test_get_by_id() {
        let catalog = Catalog::seeded();
        assert_eq!(
            catalog.get(9).map(|e| e.title.as_str()),
            Some("Digital Evidence Collection")
        );
        assert!(catalog.get(1).is_none());
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::new(Vec::new());
        assert!(catalog.is_empty());
        assert!(catalog.latest().is_none());
    }
}
