//! UI Components
//!
//! Leptos components of the review screen.

mod sidebar;
mod toolbar;
mod screenshot_grid;
mod batch_bar;
mod screenshot_modal;
mod settings_modal;
mod delete_confirm_button;

pub use sidebar::Sidebar;
pub use toolbar::Toolbar;
pub use screenshot_grid::ScreenshotGrid;
pub use batch_bar::BatchBar;
pub use screenshot_modal::ScreenshotModal;
pub use settings_modal::SettingsModal;
pub use delete_confirm_button::DeleteConfirmButton;
