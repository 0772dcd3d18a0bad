//! Screenshot Endpoints

use log::{debug, info};
use review_state::{ReviewResult, ScreenshotQuery};
use serde::Serialize;

use super::{client, segment};
use crate::models::{BatchPayload, Screenshot, ScreenshotPage, ScreenshotUpdate};

/// Category value that sends screenshots back to review
pub const PENDING_CATEGORY: &str = "pending";

// ========================
// Argument Structs
// ========================

#[derive(Serialize)]
struct BatchArgs<'a> {
    ids: &'a [String],
    payload: &'a BatchPayload,
}

#[derive(Serialize)]
struct ReclassifyArgs<'a> {
    ids: &'a [String],
    new_category: &'a str,
}

// ========================
// Screenshot Commands
// ========================

pub async fn fetch_screenshots(query: &ScreenshotQuery) -> ReviewResult<ScreenshotPage> {
    let api = client();
    let request = api.http().get(api.config().url("/screenshots")).query(query);
    let page: ScreenshotPage = api.json(request).await?;
    debug!(
        "[API] Loaded page {} of {} ({} items)",
        page.page,
        page.total_pages,
        page.items.len()
    );
    Ok(page)
}

pub async fn update_screenshot(id: &str, update: &ScreenshotUpdate) -> ReviewResult<Screenshot> {
    let api = client();
    let url = api.config().url(&format!("/screenshots/{}", segment(id)));
    api.json(api.http().put(url).json(update)).await
}

pub async fn batch_update(ids: &[String], payload: &BatchPayload) -> ReviewResult<()> {
    let api = client();
    let request = api
        .http()
        .post(api.config().url("/screenshots/batch"))
        .json(&BatchArgs { ids, payload });
    api.execute(request).await?;
    info!("[API] Batch-updated {} screenshots", ids.len());
    Ok(())
}

/// Move screenshots back to the pending queue
pub async fn reclassify(ids: &[String], new_category: &str) -> ReviewResult<()> {
    let api = client();
    let request = api
        .http()
        .post(api.config().url("/screenshots/reclassify"))
        .json(&ReclassifyArgs { ids, new_category });
    api.execute(request).await?;
    info!("[API] Reclassified {} screenshots as {}", ids.len(), new_category);
    Ok(())
}
