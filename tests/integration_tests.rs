//! Integration tests for beyond-consent.
//!
//! These tests drive the public library API the way the front end does:
//! catalog, filter engine and renderer together, plus the collaborators.

use beyond_consent::cards::CardRenderer;
use beyond_consent::catalog::Catalog;
use beyond_consent::config::Config;
use beyond_consent::filter::{DEFAULT_PAGE_SIZE, FilterEngine, FilteredView, NullRenderer, Renderer};
use beyond_consent::forms::{Forms, GENERAL_ACK};
use beyond_consent::notify::Notifier;
use beyond_consent::player::{PlayerState, TickOutcome};
use beyond_consent::router::{Page, Router};
use beyond_consent::types::{Category, CategoryFilter};

fn engine() -> FilterEngine<NullRenderer> {
    FilterEngine::new(Catalog::seeded(), DEFAULT_PAGE_SIZE, NullRenderer)
}

/// Every search term worth probing: words, fragments, tag text, nonsense.
const TERMS: &[&str] = &[
    "digital", "legal", "evidence", "survivor", "rights", "harassment", "community", "tips",
    "stalk", "platform", "consent", "e", "  ", "xyz", "Legal Advice",
];

/// Empty search with all categories shows the whole catalog.
#[test]
fn test_defaults_match_whole_catalog() {
    let mut engine = engine();
    engine.set_search_term("");
    engine.set_category("all");
    assert_eq!(engine.view().total_matches, engine.catalog().len());
    assert_eq!(engine.match_count(), 8);
}

/// Matches are exactly the episodes with the term in title, description or a tag.
#[test]
fn test_search_is_sound_and_complete() {
    for term in TERMS {
        let mut engine = engine();
        engine.set_search_term(term);
        engine.load_more();
        let needle = term.to_lowercase();
        let hit_ids: Vec<u32> = engine.view().ids();

        for episode in engine.catalog().episodes() {
            let expected = episode.title.to_lowercase().contains(&needle)
                || episode.description.to_lowercase().contains(&needle)
                || episode.tags.iter().any(|t| t.to_lowercase().contains(&needle));
            assert_eq!(
                hit_ids.contains(&episode.id),
                expected,
                "term {:?}, episode {}",
                term,
                episode.id
            );
        }
    }
}

/// Every result of a category filter carries that category.
#[test]
fn test_category_results_all_match() {
    for category in Category::ALL {
        let mut engine = engine();
        engine.set_category(category.as_str());
        let view = engine.view();
        assert!(view.total_matches > 0);
        assert!(view.episodes.iter().all(|e| e.category == category));
    }
}

/// Filtering subsets the catalog without reordering it.
#[test]
fn test_results_preserve_catalog_order() {
    let mut engine = engine();
    engine.set_search_term("harassment");
    let ids = engine.view().ids();
    let mut sorted = ids.clone();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    assert_eq!(ids, sorted);
}

/// Two "load more" presses from fresh: three pages allowed, capped by matches.
#[test]
fn test_load_more_twice() {
    let mut engine = FilterEngine::new(Catalog::seeded(), 2, NullRenderer);
    engine.load_more();
    engine.load_more();
    assert_eq!(engine.state().visible_count(), 6);
    let view = engine.view();
    assert_eq!(view.episodes.len(), 6.min(view.total_matches));
    assert!(view.has_more);

    let mut engine = crate::engine();
    engine.load_more();
    engine.load_more();
    assert_eq!(engine.state().visible_count(), 3 * DEFAULT_PAGE_SIZE);
    assert_eq!(engine.view().episodes.len(), 8);
}

/// Repeating the same search is indistinguishable from doing it once.
#[test]
fn test_repeated_search_is_idempotent() {
    let mut once = engine();
    once.set_search_term("legal");

    let mut twice = engine();
    twice.load_more();
    twice.set_search_term("legal");
    twice.set_search_term("legal");

    assert_eq!(once.view(), twice.view());
    assert_eq!(once.state(), twice.state());
    assert_eq!(twice.state().visible_count(), DEFAULT_PAGE_SIZE);
}

/// Legal-advice category, then a search within it.
#[test]
fn test_legal_advice_then_evidence() {
    let mut engine = engine();
    engine.set_category("legal-advice");
    let view = engine.view();
    assert_eq!(view.total_matches, 3);
    assert_eq!(view.ids(), vec![15, 12, 9]);
    assert!(!view.has_more);

    engine.set_search_term("evidence");
    let view = engine.view();
    assert_eq!(view.total_matches, 1);
    assert_eq!(view.ids(), vec![9]);
    assert_eq!(engine.state().category(), CategoryFilter::Only(Category::LegalAdvice));
}

/// "digital" appears in every seeded episode's title, description or tags,
/// so the first page is full and more remain.
#[test]
fn test_digital_search_over_seeded_catalog() {
    let mut engine = engine();
    engine.set_search_term("digital");
    let view = engine.view();
    assert_eq!(view.total_matches, 8);
    assert_eq!(view.ids(), vec![15, 14, 13, 12, 11, 10]);
    assert!(view.has_more);

    // Narrowing by tag text only
    engine.set_search_term("digital harassment");
    assert_eq!(engine.view().total_matches, 6);
}

/// Past the end, load more grows the counter but not the list.
#[test]
fn test_load_more_past_end() {
    let mut engine = engine();
    engine.set_category("prevention");
    let before = engine.view().ids();
    engine.load_more();
    assert_eq!(engine.state().visible_count(), 2 * DEFAULT_PAGE_SIZE);
    assert_eq!(engine.view().ids(), before);
    assert!(!engine.view().has_more);
}

/// The renderer sees the same view the engine reports after each change.
#[test]
fn test_renderer_is_notified_with_current_view() {
    struct Check {
        seen: Vec<usize>,
    }
    impl Renderer for Check {
        fn on_view_changed(&mut self, view: &FilteredView<'_>) {
            assert!(view.episodes.len() <= view.total_matches);
            assert_eq!(view.has_more, view.total_matches > view.episodes.len());
            self.seen.push(view.total_matches);
        }
    }

    let mut engine = FilterEngine::new(Catalog::seeded(), 6, Check { seen: Vec::new() });
    engine.set_category("survivor-stories");
    engine.set_search_term("community");
    engine.set_category("nonsense");
    engine.load_more();
    assert_eq!(engine.renderer().seen, vec![2, 1, 1, 1]);
}

/// Card renderer hides "load more" on an empty result.
#[test]
fn test_card_grid_empty_state() {
    let mut engine = FilterEngine::new(Catalog::seeded(), 6, CardRenderer::new());
    engine.set_search_term("podcast about cooking");
    let grid = engine.renderer().grid();
    assert!(grid.is_empty());
    assert_eq!(grid.count, 0);
    assert!(!grid.load_more_visible);
}

/// The player and the filter engine do not share state.
#[test]
fn test_player_independent_of_filter() {
    let mut engine = engine();
    let mut player = PlayerState::new(2);
    player.toggle();
    engine.set_search_term("legal");
    assert_eq!(player.tick(), TickOutcome::Advanced);
    engine.load_more();
    assert_eq!(player.tick(), TickOutcome::Advanced);
    assert_eq!(player.tick(), TickOutcome::Finished);
    assert_eq!(engine.view().total_matches, 4);
}

/// Router, forms and notifier work together as the contact flow does.
#[test]
fn test_contact_flow() {
    let mut router = Router::new();
    let mut forms = Forms::new();
    let mut notifier = Notifier::default();

    assert_eq!(router.show_page("contact"), Some(Page::Contact));
    assert!(forms.show_tab("general"));
    forms.general.set_value("Message", "Hello there");
    notifier.show(forms.submit_contact());
    assert_eq!(notifier.current().map(|n| n.message.as_str()), Some(GENERAL_ACK));
    assert_eq!(forms.general.value("Message"), Some(""));
}

/// Config page size feeds the engine.
#[test]
fn test_config_page_size_drives_engine() {
    let config: Config = toml::from_str("page_size = 3").unwrap();
    let engine = FilterEngine::new(Catalog::seeded(), config.page_size, NullRenderer);
    assert_eq!(engine.view().episodes.len(), 3);
    assert!(engine.view().has_more);
}
