//! Frontend Models
//!
//! Data structures matching backend entities.

use serde::{Deserialize, Serialize};

/// Review status of a screenshot (matches backend)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScreenshotStatus {
    #[default]
    Pending,
    Reviewed,
    Deferred,
    ReReview,
    Deleted,
}

/// Screenshot data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Screenshot {
    pub id: String,
    pub path: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub summary: Option<String>,
    pub primary_category: Option<String>,
    #[serde(default)]
    pub status: ScreenshotStatus,
    pub confidence: Option<f64>,
    pub ocr_text: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub defer_until: Option<String>,
    pub group_id: Option<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
    pub thumbnail: Option<String>,
    pub url: Option<String>,
}

impl Screenshot {
    pub fn title(&self) -> &str {
        self.summary
            .as_deref()
            .filter(|summary| !summary.is_empty())
            .unwrap_or(&self.path)
    }

    pub fn image_src(&self) -> String {
        self.thumbnail
            .clone()
            .or_else(|| self.url.clone())
            .unwrap_or_else(|| "/placeholder.png".to_string())
    }
}

/// Review progress counters returned with every page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Progress {
    pub total: u64,
    pub reviewed: u64,
    pub deferred: u64,
    pub re_review: u64,
    pub deleted: u64,
    pub remaining: u64,
}

/// A burst of screenshots captured close together
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupInfo {
    pub group_id: String,
    #[serde(default)]
    pub size: u32,
    pub start: Option<String>,
    pub end: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupMeta {
    pub items: Vec<GroupInfo>,
    pub current_index: usize,
}

impl GroupMeta {
    pub fn group_ids(&self) -> Vec<String> {
        self.items.iter().map(|group| group.group_id.clone()).collect()
    }
}

/// `GET /screenshots` response
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScreenshotPage {
    #[serde(default)]
    pub items: Vec<Screenshot>,
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub page_size: u32,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub progress: Progress,
    #[serde(default)]
    pub groups: GroupMeta,
}

fn first_page() -> u32 {
    1
}

/// Category data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub pending: u64,
}

/// Editable fields sent with `PUT /screenshots/{id}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreenshotUpdate {
    pub summary: Option<String>,
    pub tags: Vec<String>,
    pub primary_category: Option<String>,
    pub status: ScreenshotStatus,
    pub confidence: Option<f64>,
}

impl From<&Screenshot> for ScreenshotUpdate {
    fn from(screenshot: &Screenshot) -> Self {
        Self {
            summary: screenshot.summary.clone(),
            tags: screenshot.tags.clone(),
            primary_category: screenshot.primary_category.clone(),
            status: screenshot.status,
            confidence: screenshot.confidence,
        }
    }
}

/// Payload applied to every id of a batch update.
///
/// `primary_category` is always sent; `None` clears it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchPayload {
    pub status: ScreenshotStatus,
    pub primary_category: Option<String>,
}

impl BatchPayload {
    pub fn assign(category_id: &str) -> Self {
        Self {
            status: ScreenshotStatus::Reviewed,
            primary_category: Some(category_id.to_string()),
        }
    }

    pub fn delete() -> Self {
        Self {
            status: ScreenshotStatus::Deleted,
            primary_category: None,
        }
    }
}
