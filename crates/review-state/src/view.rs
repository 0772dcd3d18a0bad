//! Pagination and Filter Controller
//!
//! Page, search, status, category and group parameters deciding which
//! screenshots are visible. Selection is scoped to the visible view: any
//! change of these parameters resets to page 1 and clears the selection.

use serde::{Deserialize, Serialize};

use crate::store::SelectionState;

/// Status filter offered by the toolbar
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Deferred,
    LowConfidence,
    ReReview,
}

impl StatusFilter {
    pub const ALL: [StatusFilter; 5] = [
        StatusFilter::All,
        StatusFilter::Pending,
        StatusFilter::Deferred,
        StatusFilter::LowConfidence,
        StatusFilter::ReReview,
    ];

    /// Wire value, also used as `<option>` value
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Pending => "pending",
            StatusFilter::Deferred => "deferred",
            StatusFilter::LowConfidence => "low-confidence",
            StatusFilter::ReReview => "re-review",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatusFilter::All => "All",
            StatusFilter::Pending => "Pending",
            StatusFilter::Deferred => "Deferred",
            StatusFilter::LowConfidence => "Low confidence",
            StatusFilter::ReReview => "Re-review",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|filter| filter.as_str() == value)
    }
}

/// Sidebar category filter
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum CategoryFilter {
    #[default]
    All,
    /// Synthetic "not yet categorized" entry; forces the pending status filter
    Pending,
    /// A backend category, by id
    Category(String),
}

pub const MIN_GRID_DIMENSION: u32 = 1;
pub const MAX_GRID_DIMENSION: u32 = 10;

/// Grid layout; its area is the page size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridDimensions {
    columns: u32,
    rows: u32,
}

impl Default for GridDimensions {
    fn default() -> Self {
        Self { columns: 5, rows: 10 }
    }
}

impl GridDimensions {
    pub fn new(columns: u32, rows: u32) -> Self {
        Self {
            columns: columns.clamp(MIN_GRID_DIMENSION, MAX_GRID_DIMENSION),
            rows: rows.clamp(MIN_GRID_DIMENSION, MAX_GRID_DIMENSION),
        }
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn page_size(&self) -> u32 {
        self.columns * self.rows
    }
}

/// Query parameters of `GET /screenshots`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScreenshotQuery {
    pub page: u32,
    pub page_size: u32,
    pub filter: StatusFilter,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
}

/// Filter, search, category and group parameters of the grid
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewController {
    status: StatusFilter,
    search: String,
    category: CategoryFilter,
    group_id: Option<String>,
    grid: GridDimensions,
}

impl ViewController {
    pub fn new(grid: GridDimensions) -> Self {
        Self {
            grid,
            ..Default::default()
        }
    }

    pub fn status(&self) -> StatusFilter {
        self.status
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn category(&self) -> &CategoryFilter {
        &self.category
    }

    pub fn group_id(&self) -> Option<&str> {
        self.group_id.as_deref()
    }

    pub fn grid(&self) -> GridDimensions {
        self.grid
    }

    // ========================
    // Parameter changes (reset page and selection)
    // ========================

    pub fn set_search(&mut self, search: &str, selection: &mut SelectionState) -> bool {
        if self.search == search {
            return false;
        }
        self.search = search.to_string();
        reset_view(selection);
        true
    }

    pub fn set_status(&mut self, status: StatusFilter, selection: &mut SelectionState) -> bool {
        if self.status == status {
            return false;
        }
        self.status = status;
        reset_view(selection);
        true
    }

    pub fn set_category(&mut self, category: CategoryFilter, selection: &mut SelectionState) -> bool {
        if self.category == category {
            return false;
        }
        self.category = category;
        reset_view(selection);
        true
    }

    /// Apply a grid-dimension change; resets when the page size changed
    pub fn set_grid(&mut self, columns: u32, rows: u32, selection: &mut SelectionState) -> bool {
        self.grid = GridDimensions::new(columns, rows);
        if !selection.set_page_size(self.grid.page_size()) {
            return false;
        }
        reset_view(selection);
        true
    }

    /// Step through the backend's groups, wrapping at both ends
    pub fn navigate_group(
        &mut self,
        offset: i32,
        group_ids: &[String],
        current_index: usize,
        selection: &mut SelectionState,
    ) -> bool {
        if group_ids.is_empty() {
            return false;
        }
        let len = group_ids.len() as i64;
        let next = (current_index as i64 + offset as i64).rem_euclid(len) as usize;
        self.group_id = Some(group_ids[next].clone());
        reset_view(selection);
        true
    }

    // ========================
    // Paging (clears selection when the page moves)
    // ========================

    pub fn go_to_page(&self, page: u32, selection: &mut SelectionState) -> bool {
        let before = selection.page();
        selection.set_page(page);
        if selection.page() == before {
            return false;
        }
        selection.clear();
        true
    }

    pub fn next_page(&self, selection: &mut SelectionState) -> bool {
        self.go_to_page(selection.page().saturating_add(1), selection)
    }

    pub fn prev_page(&self, selection: &mut SelectionState) -> bool {
        self.go_to_page(selection.page().saturating_sub(1), selection)
    }

    // ========================
    // Query
    // ========================

    /// The pending category overrides the status filter
    pub fn effective_status(&self) -> StatusFilter {
        match self.category {
            CategoryFilter::Pending => StatusFilter::Pending,
            _ => self.status,
        }
    }

    pub fn category_param(&self) -> Option<&str> {
        match &self.category {
            CategoryFilter::Category(id) => Some(id),
            CategoryFilter::All | CategoryFilter::Pending => None,
        }
    }

    pub fn query(&self, selection: &SelectionState) -> ScreenshotQuery {
        ScreenshotQuery {
            page: selection.page(),
            page_size: selection.page_size(),
            filter: self.effective_status(),
            category: self.category_param().map(String::from),
            search: Some(self.search.trim())
                .filter(|search| !search.is_empty())
                .map(String::from),
            group_id: self.group_id.clone().filter(|id| !id.is_empty()),
        }
    }
}

fn reset_view(selection: &mut SelectionState) {
    selection.set_page(1);
    selection.clear();
}
