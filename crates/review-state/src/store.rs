//! Selection Store
//!
//! Page-scoped selection state shared by the grid, toolbar and sidebar.

use crate::selection::{Selection, SelectionChange};

/// Default items per page (5 columns x 10 rows)
pub const DEFAULT_PAGE_SIZE: u32 = 50;
/// Upper bound for items per page (10 columns x 10 rows)
pub const MAX_PAGE_SIZE: u32 = 100;

/// Current selection, page and totals.
///
/// `revision` counts user-driven changes of the selection; hydration
/// compares it to detect interaction that happened while it was in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    selected: Selection,
    anchor: Option<usize>,
    page: u32,
    page_size: u32,
    total: u64,
    total_pages: u32,
    revision: u64,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            selected: Selection::new(),
            anchor: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            total: 0,
            total_pages: 0,
            revision: 0,
        }
    }
}

impl SelectionState {
    pub fn new(page_size: u32) -> Self {
        Self {
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
            ..Default::default()
        }
    }

    pub fn selected(&self) -> &Selection {
        &self.selected
    }

    /// Selected identifiers in emission order
    pub fn selected_ids(&self) -> Vec<String> {
        self.selected.ids()
    }

    pub fn anchor(&self) -> Option<usize> {
        self.anchor
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    // ========================
    // Selection mutators
    // ========================

    pub fn toggle(&mut self, id: &str) {
        self.selected.toggle(id);
        if self.selected.is_empty() {
            self.anchor = None;
        }
        self.revision += 1;
    }

    pub fn clear(&mut self) {
        if self.selected.is_empty() && self.anchor.is_none() {
            return;
        }
        self.selected.clear();
        self.anchor = None;
        self.revision += 1;
    }

    pub fn replace(&mut self, ids: impl IntoIterator<Item = String>) {
        self.selected = ids.into_iter().collect();
        self.anchor = None;
        self.revision += 1;
    }

    /// Apply the output of the selection algebra
    pub fn apply(&mut self, change: SelectionChange) {
        self.anchor = if change.selection.is_empty() { None } else { change.anchor };
        self.selected = change.selection;
        self.revision += 1;
    }

    /// Initial assignment from hydration; does not count as a user change
    pub fn adopt_hydrated(&mut self, ids: impl IntoIterator<Item = String>) {
        self.selected = ids.into_iter().collect();
        self.anchor = None;
    }

    // ========================
    // Paging
    // ========================

    /// Set the 1-based page, clamped to the known page count
    pub fn set_page(&mut self, page: u32) {
        let mut page = page.max(1);
        if self.total_pages > 0 {
            page = page.min(self.total_pages);
        }
        self.page = page;
    }

    pub fn next_page(&mut self) {
        self.set_page(self.page.saturating_add(1));
    }

    pub fn prev_page(&mut self) {
        self.set_page(self.page.saturating_sub(1));
    }

    /// Returns true when the page size actually changed
    pub fn set_page_size(&mut self, page_size: u32) -> bool {
        let page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        if page_size == self.page_size {
            return false;
        }
        self.page_size = page_size;
        true
    }

    /// Totals as reported by the screenshot query
    pub fn set_totals(&mut self, total: u64, total_pages: u32) {
        self.total = total;
        self.total_pages = total_pages;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::{click, ClickModifier};

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_defaults() {
        let state = SelectionState::default();
        assert_eq!(state.page(), 1);
        assert_eq!(state.page_size(), DEFAULT_PAGE_SIZE);
        assert!(state.selected().is_empty());
        assert_eq!(state.anchor(), None);
    }

    #[test]
    fn test_page_size_is_bounded() {
        assert_eq!(SelectionState::new(0).page_size(), 1);
        assert_eq!(SelectionState::new(500).page_size(), MAX_PAGE_SIZE);

        let mut state = SelectionState::default();
        assert!(!state.set_page_size(DEFAULT_PAGE_SIZE));
        assert!(state.set_page_size(12));
        assert_eq!(state.page_size(), 12);
    }

    #[test]
    fn test_toggle_clears_anchor_when_empty() {
        let visible = ids(&["a", "b", "c"]);
        let mut state = SelectionState::default();
        let change = click(&visible, state.selected(), state.anchor(), "b", ClickModifier::Plain).unwrap();
        state.apply(change);
        assert_eq!(state.anchor(), Some(1));

        state.toggle("b");
        assert!(state.selected().is_empty());
        assert_eq!(state.anchor(), None);
    }

    #[test]
    fn test_revision_tracks_user_changes_only() {
        let mut state = SelectionState::default();
        state.adopt_hydrated(ids(&["x", "y"]));
        assert_eq!(state.revision(), 0);
        assert_eq!(state.selected_ids(), ids(&["x", "y"]));

        state.toggle("z");
        assert_eq!(state.revision(), 1);
        state.replace(ids(&["a"]));
        assert_eq!(state.revision(), 2);
        state.clear();
        assert_eq!(state.revision(), 3);

        // clearing an already empty selection changes nothing
        state.clear();
        assert_eq!(state.revision(), 3);
    }

    #[test]
    fn test_set_page_clamps_to_known_pages() {
        let mut state = SelectionState::default();
        state.set_page(0);
        assert_eq!(state.page(), 1);

        state.set_page(9);
        assert_eq!(state.page(), 9);

        state.set_totals(120, 3);
        state.set_page(9);
        assert_eq!(state.page(), 3);

        state.next_page();
        assert_eq!(state.page(), 3);
        state.prev_page();
        state.prev_page();
        state.prev_page();
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn test_paging_keeps_selection() {
        let mut state = SelectionState::default();
        state.replace(ids(&["a"]));
        state.set_page(2);
        assert_eq!(state.selected_ids(), ids(&["a"]));
    }
}
