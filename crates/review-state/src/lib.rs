//! Review State
//!
//! Platform-independent state for the screenshot reviewer grid:
//! - selection: selection algebra (click / toggle / range / select-all)
//! - store: page-scoped selection state
//! - storage: key-value storage seam and the local selection cache
//! - persistence: remote-then-local hydration and persist-on-change
//! - view: paging, filter and group parameters
//! - colors: category color assignment
//! - settings: local user settings
//! - shortcuts: keyboard shortcut mapping

mod error;
mod selection;
mod store;
mod storage;
mod persistence;
mod view;
mod colors;
mod settings;
mod shortcuts;

pub use error::{ReviewError, ReviewResult};
pub use selection::{click, select_all, ClickModifier, Selection, SelectionChange};
pub use store::{SelectionState, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use storage::{KeyValueStorage, MemoryStorage, SelectionCache, LEGACY_SELECTION_KEYS, SELECTION_KEY};
pub use persistence::{
    normalize_state_payload, CancelToken, HydrationOutcome, HydrationSource, PendingSync,
    PersistenceCoordinator, PersistenceRecord, SelectionHost, SelectionRemote,
};
pub use view::{
    CategoryFilter, GridDimensions, ScreenshotQuery, StatusFilter, ViewController, MAX_GRID_DIMENSION,
    MIN_GRID_DIMENSION,
};
pub use colors::{fallback_color, CategoryColors, COLORS_KEY, DEFAULT_COLORS};
pub use settings::{AppSettings, DEFAULT_HIGHLIGHT_COLOR, SETTINGS_KEY};
pub use shortcuts::{shortcut_for, KeyModifiers, Shortcut};
