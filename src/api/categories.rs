//! Category Endpoints

use review_state::ReviewResult;
use serde::Serialize;

use super::{client, segment};
use crate::models::Category;

#[derive(Serialize)]
struct NameArgs<'a> {
    name: &'a str,
}

pub async fn fetch_categories() -> ReviewResult<Vec<Category>> {
    let api = client();
    api.json(api.http().get(api.config().url("/categories"))).await
}

pub async fn create_category(name: &str) -> ReviewResult<Category> {
    let api = client();
    let request = api
        .http()
        .post(api.config().url("/categories"))
        .json(&NameArgs { name });
    api.json(request).await
}

pub async fn rename_category(id: &str, name: &str) -> ReviewResult<Category> {
    let api = client();
    let url = api.config().url(&format!("/categories/{}", segment(id)));
    api.json(api.http().put(url).json(&NameArgs { name })).await
}

pub async fn delete_category(id: &str) -> ReviewResult<()> {
    let api = client();
    let url = api.config().url(&format!("/categories/{}", segment(id)));
    api.execute(api.http().delete(url)).await?;
    Ok(())
}
