//! Episode filter engine.
//!
//! Owns the search/category/pagination state and derives the visible episode
//! list from the catalog. Every state change is pushed synchronously to a
//! [`Renderer`]; the engine itself never touches the display.

use log::debug;
use serde::Serialize;

use crate::catalog::Catalog;
use crate::types::{CategoryFilter, Episode};

/// Episodes revealed per "load more" step unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 6;

/// Mutable search, category and pagination state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterState {
    search_term: String,
    category: CategoryFilter,
    page_size: usize,
    visible_count: usize,
}

impl FilterState {
    /// Fresh state: empty search, all categories, one page visible.
    /// A page size of zero is bumped to one so "load more" always progresses.
    pub fn new(page_size: usize) -> Self {
        let page_size = page_size.max(1);
        Self {
            search_term: String::new(),
            category: CategoryFilter::All,
            page_size,
            visible_count: page_size,
        }
    }

    /// Lowercased search term.
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn category(&self) -> CategoryFilter {
        self.category
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    /// Text match AND category match.
    pub fn matches(&self, episode: &Episode) -> bool {
        episode.matches_text(&self.search_term) && self.category.matches(episode.category)
    }

    fn reset_pagination(&mut self) {
        self.visible_count = self.page_size;
    }
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

/// The filtered, truncated list handed to the renderer.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FilteredView<'a> {
    /// Matching episodes in catalog order, at most `visible_count` of them.
    pub episodes: Vec<&'a Episode>,
    /// Number of matches before truncation.
    pub total_matches: usize,
    /// Whether more matches exist beyond the visible ones.
    pub has_more: bool,
}

impl FilteredView<'_> {
    pub fn is_empty(&self) -> bool {
        self.episodes.is_empty()
    }

    pub fn ids(&self) -> Vec<u32> {
        self.episodes.iter().map(|e| e.id).collect()
    }
}

/// Apply `state` to `catalog`. Never reorders; only subsets and truncates.
pub fn derive_view<'a>(catalog: &'a Catalog, state: &FilterState) -> FilteredView<'a> {
    let mut episodes: Vec<&Episode> = catalog
        .episodes()
        .iter()
        .filter(|e| state.matches(e))
        .collect();

    let total_matches = episodes.len();
    episodes.truncate(state.visible_count);

    FilteredView {
        episodes,
        total_matches,
        has_more: total_matches > state.visible_count,
    }
}

/// Receives every view the engine produces.
pub trait Renderer {
    fn on_view_changed(&mut self, view: &FilteredView<'_>);
}

impl<F> Renderer for F
where
    F: FnMut(&FilteredView<'_>),
{
    fn on_view_changed(&mut self, view: &FilteredView<'_>) {
        self(view)
    }
}

/// A renderer that discards every view.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn on_view_changed(&mut self, _view: &FilteredView<'_>) {}
}

/// Catalog plus filter state, notifying a renderer after each mutation.
pub struct FilterEngine<R> {
    catalog: Catalog,
    state: FilterState,
    renderer: R,
}

impl<R: Renderer> FilterEngine<R> {
    /// Create an engine. The renderer is not notified until the first
    /// mutation or an explicit [`FilterEngine::refresh`].
    pub fn new(catalog: Catalog, page_size: usize, renderer: R) -> Self {
        Self {
            catalog,
            state: FilterState::new(page_size),
            renderer,
        }
    }

    /// Set the search term (stored lowercase) and go back to the first page.
    pub fn set_search_term(&mut self, term: &str) {
        self.state.search_term = term.to_lowercase();
        self.state.reset_pagination();
        debug!("search term set to {:?}", self.state.search_term);
        self.notify();
    }

    /// Set the category from a selector value. Unknown values mean "all".
    pub fn set_category(&mut self, value: &str) {
        let filter = CategoryFilter::parse(value);
        if filter == CategoryFilter::All && value != "all" {
            debug!("unrecognized category {:?}, showing all", value);
        }
        self.set_category_filter(filter);
    }

    /// Typed variant of [`FilterEngine::set_category`].
    pub fn set_category_filter(&mut self, filter: CategoryFilter) {
        self.state.category = filter;
        self.state.reset_pagination();
        debug!("category set to {}", filter);
        self.notify();
    }

    /// Reveal one more page. Past the end this only grows `visible_count`.
    pub fn load_more(&mut self) {
        self.state.visible_count = self.state.visible_count.saturating_add(self.state.page_size);
        debug!("visible count now {}", self.state.visible_count);
        self.notify();
    }

    /// Re-send the current view to the renderer without changing state.
    pub fn refresh(&mut self) {
        self.notify();
    }

    pub fn view(&self) -> FilteredView<'_> {
        derive_view(&self.catalog, &self.state)
    }

    pub fn match_count(&self) -> usize {
        self.catalog
            .episodes()
            .iter()
            .filter(|e| self.state.matches(e))
            .count()
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    fn notify(&mut self) {
        let view = derive_view(&self.catalog, &self.state);
        self.renderer.on_view_changed(&view);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;

    /// Records the ids and counts of every view it receives.
    #[derive(Default)]
    struct Recorder {
        views: Vec<(Vec<u32>, usize, bool)>,
    }

    impl Renderer for Recorder {
        fn on_view_changed(&mut self, view: &FilteredView<'_>) {
            self.views.push((view.ids(), view.total_matches, view.has_more));
        }
    }

    fn engine() -> FilterEngine<Recorder> {
        FilterEngine::new(Catalog::seeded(), DEFAULT_PAGE_SIZE, Recorder::default())
    }

    #[test]
    fn test_initial_view_first_page_of_all() {
        let engine = engine();
        let view = engine.view();
        assert_eq!(view.total_matches, 8);
        assert_eq!(view.ids(), vec![15, 14, 13, 12, 11, 10]);
        assert!(view.has_more);
        assert!(engine.renderer().views.is_empty());
    }

    #[test]
    fn test_search_is_case_insensitive_and_stored_lowercase() {
        let mut engine = engine();
        engine.set_search_term("EVIDENCE");
        assert_eq!(engine.state().search_term(), "evidence");
        assert_eq!(engine.view().ids(), vec![9]);
    }

    #[test]
    fn test_search_matches_tags() {
        let mut engine = engine();
        engine.set_search_term("cyberstalking");
        assert_eq!(engine.view().ids(), vec![8]);
        engine.set_search_term("healing");
        assert_eq!(engine.view().ids(), vec![14]);
    }

    #[test]
    fn test_search_does_not_match_category_value() {
        let mut engine = engine();
        engine.set_search_term("survivor-stories");
        assert_eq!(engine.match_count(), 0);
    }

    #[test]
    fn test_category_and_search_combine() {
        let mut engine = engine();
        engine.set_category("legal-advice");
        assert_eq!(engine.view().ids(), vec![15, 12, 9]);
        assert!(!engine.view().has_more);
        engine.set_search_term("evidence");
        assert_eq!(engine.view().ids(), vec![9]);
        engine.set_category("survivor-stories");
        assert_eq!(engine.match_count(), 0);
    }

    #[test]
    fn test_unknown_category_collapses_to_all() {
        let mut engine = engine();
        engine.set_category("prevention");
        assert_eq!(engine.match_count(), 1);
        engine.set_category("bogus");
        assert_eq!(engine.state().category(), CategoryFilter::All);
        assert_eq!(engine.match_count(), 8);
    }

    #[test]
    fn test_load_more_reveals_rest() {
        let mut engine = engine();
        engine.load_more();
        let view = engine.view();
        assert_eq!(engine.state().visible_count(), 12);
        assert_eq!(view.episodes.len(), 8);
        assert!(!view.has_more);
    }

    #[test]
    fn test_load_more_past_end_keeps_content() {
        let mut engine = engine();
        engine.set_search_term("legal");
        let before = engine.view().ids();
        assert_eq!(before, vec![15, 12, 9, 8]);
        engine.load_more();
        engine.load_more();
        assert_eq!(engine.state().visible_count(), 18);
        assert_eq!(engine.view().ids(), before);
        assert!(!engine.view().has_more);
    }

    #[test]
    fn test_filter_change_resets_pagination() {
        let mut engine = engine();
        engine.load_more();
        engine.set_category_filter(CategoryFilter::Only(Category::DigitalHarassment));
        assert_eq!(engine.state().visible_count(), DEFAULT_PAGE_SIZE);
        engine.load_more();
        engine.set_search_term("");
        assert_eq!(engine.state().visible_count(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_every_mutation_notifies() {
        let mut engine = engine();
        engine.set_search_term("legal");
        engine.set_category("all");
        engine.load_more();
        engine.refresh();
        assert_eq!(engine.renderer().views.len(), 4);
        let (ids, total, has_more) = &engine.renderer().views[0];
        assert_eq!(ids, &vec![15, 12, 9, 8]);
        assert_eq!(*total, 4);
        assert!(!has_more);
    }

    #[test]
    fn test_empty_result_view() {
        let mut engine = engine();
        engine.set_search_term("zzz-no-such-episode");
        let view = engine.view();
        assert!(view.is_empty());
        assert_eq!(view.total_matches, 0);
        assert!(!view.has_more);
    }

    #[test]
    fn test_small_page_size_has_more() {
        let mut engine = FilterEngine::new(Catalog::seeded(), 2, NullRenderer);
        engine.set_category("legal-advice");
        let view = engine.view();
        assert_eq!(view.ids(), vec![15, 12]);
        assert!(view.has_more);
        engine.load_more();
        assert_eq!(engine.view().ids(), vec![15, 12, 9]);
        assert!(!engine.view().has_more);
    }

    #[test]
    fn test_zero_page_size_is_bumped() {
        let state = FilterState::new(0);
        assert_eq!(state.page_size(), 1);
        assert_eq!(state.visible_count(), 1);
    }

    #[test]
    fn test_closure_renderer() {
        let mut counts = Vec::new();
        {
            let mut engine = FilterEngine::new(
                Catalog::seeded(),
                DEFAULT_PAGE_SIZE,
                |view: &FilteredView<'_>| counts.push(view.total_matches),
            );
            engine.set_search_term("survivor");
            engine.set_category("prevention");
        }
        assert_eq!(counts, vec![2, 0]);
    }
}
