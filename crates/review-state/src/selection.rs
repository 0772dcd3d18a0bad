//! Selection Algebra
//!
//! Pure functions computing the next selection of the grid from the visible
//! page, the current selection and the modifiers of a click.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Insertion-ordered set of item identifiers.
///
/// Serializes as a plain JSON array, which is also the local cache format.
/// Equality is order-sensitive.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection {
    ids: IndexSet<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Identifiers in insertion order
    pub fn ids(&self) -> Vec<String> {
        self.ids.iter().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.ids.iter()
    }

    /// Append `id` unless already present. Returns true when inserted.
    pub fn insert(&mut self, id: impl Into<String>) -> bool {
        self.ids.insert(id.into())
    }

    /// Remove `id`, keeping the order of the rest. Returns true when removed.
    pub fn remove(&mut self, id: &str) -> bool {
        self.ids.shift_remove(id)
    }

    /// Flip membership of `id`. Returns true when `id` is selected afterwards.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string())
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn into_vec(self) -> Vec<String> {
        self.ids.into_iter().collect()
    }
}

impl PartialEq for Selection {
    fn eq(&self, other: &Self) -> bool {
        self.ids.len() == other.ids.len() && self.ids.iter().eq(other.ids.iter())
    }
}

impl Eq for Selection {}

impl FromIterator<String> for Selection {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<String>> for Selection {
    fn from(ids: Vec<String>) -> Self {
        ids.into_iter().collect()
    }
}

impl From<Selection> for Vec<String> {
    fn from(selection: Selection) -> Self {
        selection.into_vec()
    }
}

/// How a click on a grid card should combine with the current selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClickModifier {
    /// Replace the selection with the clicked item
    #[default]
    Plain,
    /// Ctrl/Cmd: add or remove the clicked item
    Toggle,
    /// Shift: select the range between anchor and clicked item
    Range,
}

impl ClickModifier {
    /// Ctrl/Cmd wins over Shift when both are held.
    pub fn from_keys(ctrl: bool, meta: bool, shift: bool) -> Self {
        if ctrl || meta {
            ClickModifier::Toggle
        } else if shift {
            ClickModifier::Range
        } else {
            ClickModifier::Plain
        }
    }
}

/// Next selection together with the next range anchor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionChange {
    pub selection: Selection,
    pub anchor: Option<usize>,
}

/// Compute the selection after clicking `clicked` on the visible page.
///
/// Returns `None` when `clicked` is not part of `visible`.
pub fn click(
    visible: &[String],
    current: &Selection,
    anchor: Option<usize>,
    clicked: &str,
    modifier: ClickModifier,
) -> Option<SelectionChange> {
    let index = visible.iter().position(|id| id == clicked)?;

    let change = match modifier {
        ClickModifier::Plain => single(visible, index),
        ClickModifier::Toggle => {
            let mut selection = current.clone();
            selection.toggle(clicked);
            let anchor = if selection.is_empty() {
                None
            } else {
                anchor.or(Some(index))
            };
            SelectionChange { selection, anchor }
        }
        ClickModifier::Range if current.is_empty() => single(visible, index),
        ClickModifier::Range => {
            let origin = resolve_anchor(visible, current, anchor, index);
            let (start, end) = if origin <= index { (origin, index) } else { (index, origin) };
            SelectionChange {
                selection: visible[start..=end].iter().cloned().collect(),
                anchor: Some(origin),
            }
        }
    };

    Some(change)
}

/// Select every visible item, anchored on the last one.
pub fn select_all(visible: &[String]) -> SelectionChange {
    let selection: Selection = visible.iter().cloned().collect();
    let anchor = if selection.is_empty() { None } else { Some(visible.len() - 1) };
    SelectionChange { selection, anchor }
}

fn single(visible: &[String], index: usize) -> SelectionChange {
    let mut selection = Selection::new();
    selection.insert(visible[index].clone());
    SelectionChange { selection, anchor: Some(index) }
}

/// Stored anchor if it still points at a selected item of the page, else the
/// last selected visible index, else the clicked index itself.
fn resolve_anchor(visible: &[String], current: &Selection, anchor: Option<usize>, clicked: usize) -> usize {
    anchor
        .filter(|&a| visible.get(a).is_some_and(|id| current.contains(id)))
        .or_else(|| visible.iter().rposition(|id| current.contains(id)))
        .unwrap_or(clicked)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("id-{}", i)).collect()
    }

    fn apply(
        visible: &[String],
        state: &mut (Selection, Option<usize>),
        id: &str,
        modifier: ClickModifier,
    ) {
        if let Some(change) = click(visible, &state.0, state.1, id, modifier) {
            *state = (change.selection, change.anchor);
        }
    }

    #[test]
    fn test_click_then_toggle_keeps_insertion_order() {
        let visible = page(5);
        let mut state = (Selection::new(), None);

        apply(&visible, &mut state, "id-0", ClickModifier::Plain);
        assert_eq!(state.0.ids(), ["id-0"]);

        apply(&visible, &mut state, "id-1", ClickModifier::Toggle);
        assert_eq!(state.0.ids(), ["id-0", "id-1"]);

        apply(&visible, &mut state, "id-0", ClickModifier::Toggle);
        assert_eq!(state.0.ids(), ["id-1"]);
    }

    #[test]
    fn test_shift_click_selects_range_in_visible_order() {
        let visible = page(5);
        let mut state = (Selection::new(), None);

        apply(&visible, &mut state, "id-1", ClickModifier::Plain);
        assert_eq!(state.1, Some(1));

        apply(&visible, &mut state, "id-3", ClickModifier::Range);
        assert_eq!(state.0.ids(), ["id-1", "id-2", "id-3"]);
        assert_eq!(state.1, Some(1));
    }

    #[test]
    fn test_range_replaces_instead_of_union() {
        let visible = page(6);
        let mut state = (Selection::new(), None);

        apply(&visible, &mut state, "id-2", ClickModifier::Plain);
        apply(&visible, &mut state, "id-5", ClickModifier::Range);
        apply(&visible, &mut state, "id-0", ClickModifier::Range);

        assert_eq!(state.0.ids(), ["id-0", "id-1", "id-2"]);
    }

    #[test]
    fn test_range_is_commutative_in_endpoints() {
        let visible = page(8);
        for a in 0..visible.len() {
            for b in 0..visible.len() {
                let mut forward = (Selection::new(), None);
                apply(&visible, &mut forward, &visible[a], ClickModifier::Plain);
                apply(&visible, &mut forward, &visible[b], ClickModifier::Range);

                let mut backward = (Selection::new(), None);
                apply(&visible, &mut backward, &visible[b], ClickModifier::Plain);
                apply(&visible, &mut backward, &visible[a], ClickModifier::Range);

                assert_eq!(forward.0, backward.0, "range({}, {})", a, b);
            }
        }
    }

    #[test]
    fn test_range_ignores_anchor_that_was_deselected() {
        let visible = page(6);
        let mut state = (Selection::new(), None);

        apply(&visible, &mut state, "id-1", ClickModifier::Plain);
        apply(&visible, &mut state, "id-3", ClickModifier::Toggle);
        apply(&visible, &mut state, "id-1", ClickModifier::Toggle);
        assert_eq!(state.0.ids(), ["id-3"]);

        apply(&visible, &mut state, "id-4", ClickModifier::Range);
        assert_eq!(state.0.ids(), ["id-3", "id-4"]);
        assert_eq!(state.1, Some(3));
    }

    #[test]
    fn test_equality_follows_insertion_order() {
        let ab: Selection = vec!["a".to_string(), "b".to_string()].into();
        let ba: Selection = vec!["b".to_string(), "a".to_string()].into();
        assert_ne!(ab, ba);
        assert_eq!(ab, ab.clone());

        let parsed: Selection = serde_json::from_str(r#"["b","a","b"]"#).unwrap();
        assert_eq!(parsed, ba);
    }

    #[test]
    fn test_large_selection_keeps_order_after_removal() {
        let mut selection: Selection = (0..20_000).map(|i| format!("id-{}", i)).collect();
        assert_eq!(selection.len(), 20_000);
        assert!(selection.remove("id-0"));
        assert!(selection.contains("id-19999"));
        assert_eq!(selection.iter().next().map(String::as_str), Some("id-1"));
    }

    #[test]
    fn test_range_on_empty_selection_acts_as_plain_click() {
        let visible = page(5);
        let change = click(&visible, &Selection::new(), None, "id-3", ClickModifier::Range).unwrap();
        assert_eq!(change.selection.ids(), ["id-3"]);
        assert_eq!(change.anchor, Some(3));
    }

    #[test]
    fn test_range_without_anchor_uses_last_selected_index() {
        let visible = page(6);
        let current: Selection = vec!["id-1".to_string(), "id-4".to_string()].into();

        let change = click(&visible, &current, None, "id-2", ClickModifier::Range).unwrap();
        assert_eq!(change.selection.ids(), ["id-2", "id-3", "id-4"]);
        assert_eq!(change.anchor, Some(4));
    }

    #[test]
    fn test_range_with_selection_off_page_collapses_to_clicked() {
        let visible = page(4);
        let current: Selection = vec!["elsewhere".to_string()].into();

        let change = click(&visible, &current, None, "id-2", ClickModifier::Range).unwrap();
        assert_eq!(change.selection.ids(), ["id-2"]);
    }

    #[test]
    fn test_plain_clicks_always_leave_singleton() {
        let visible = page(5);
        let mut state = (Selection::new(), None);
        for id in ["id-4", "id-0", "id-2", "id-2", "id-1"] {
            apply(&visible, &mut state, id, ClickModifier::Plain);
            assert_eq!(state.0.ids(), [id]);
        }
    }

    #[test]
    fn test_toggle_sequence_is_independent_of_batching() {
        let visible = page(4);
        let clicks = ["id-0", "id-2", "id-0", "id-3", "id-2", "id-1", "id-0"];

        let mut one_by_one = (Selection::new(), None);
        for id in clicks {
            apply(&visible, &mut one_by_one, id, ClickModifier::Toggle);
        }

        let mut batched = Selection::new();
        for chunk in clicks.chunks(3) {
            let mut next = batched.clone();
            for id in chunk {
                next.toggle(id);
            }
            batched = next;
        }

        assert_eq!(one_by_one.0, batched);
        assert_eq!(one_by_one.0.ids(), ["id-3", "id-1", "id-0"]);
    }

    #[test]
    fn test_toggle_anchor_rules() {
        let visible = page(4);

        let first = click(&visible, &Selection::new(), None, "id-2", ClickModifier::Toggle).unwrap();
        assert_eq!(first.anchor, Some(2));

        let second = click(&visible, &first.selection, first.anchor, "id-3", ClickModifier::Toggle).unwrap();
        assert_eq!(second.anchor, Some(2));

        let cleared = click(&visible, &first.selection, first.anchor, "id-2", ClickModifier::Toggle).unwrap();
        assert!(cleared.selection.is_empty());
        assert_eq!(cleared.anchor, None);
    }

    #[test]
    fn test_click_outside_visible_is_noop() {
        let visible = page(3);
        let current: Selection = vec!["id-1".to_string()].into();
        for modifier in [ClickModifier::Plain, ClickModifier::Toggle, ClickModifier::Range] {
            assert!(click(&visible, &current, Some(1), "missing", modifier).is_none());
        }
    }

    #[test]
    fn test_select_all_anchors_last_index() {
        let visible = page(3);
        let change = select_all(&visible);
        assert_eq!(change.selection.ids(), ["id-0", "id-1", "id-2"]);
        assert_eq!(change.anchor, Some(2));

        let empty = select_all(&[]);
        assert!(empty.selection.is_empty());
        assert_eq!(empty.anchor, None);
    }

    #[test]
    fn test_selection_rejects_duplicates() {
        let selection: Selection = vec!["a", "b", "a", "c", "b"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(selection.ids(), ["a", "b", "c"]);
        assert_eq!(selection.len(), 3);

        let json = serde_json::to_string(&selection).unwrap();
        assert_eq!(json, r#"["a","b","c"]"#);
    }

    #[test]
    fn test_modifier_from_keys() {
        assert_eq!(ClickModifier::from_keys(false, false, false), ClickModifier::Plain);
        assert_eq!(ClickModifier::from_keys(true, false, false), ClickModifier::Toggle);
        assert_eq!(ClickModifier::from_keys(false, true, false), ClickModifier::Toggle);
        assert_eq!(ClickModifier::from_keys(false, false, true), ClickModifier::Range);
        assert_eq!(ClickModifier::from_keys(true, false, true), ClickModifier::Toggle);
    }
}
