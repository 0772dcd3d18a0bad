//! Selection State Endpoints
//!
//! HTTP implementation of the persistence coordinator's remote.

use async_trait::async_trait;
use review_state::{PersistenceRecord, ReviewError, ReviewResult, SelectionRemote};
use serde_json::Value;

use super::{client, with_timeout, ApiClient};

/// `/api/state` on the reviewer backend
#[derive(Clone)]
pub struct HttpSelectionRemote {
    api: ApiClient,
}

impl HttpSelectionRemote {
    pub fn new() -> Self {
        Self { api: client() }
    }
}

#[async_trait(?Send)]
impl SelectionRemote for HttpSelectionRemote {
    async fn fetch_state(&self) -> ReviewResult<Value> {
        // the body read counts against the hydration budget too
        let timeout_ms = self.api.config().hydration_timeout_ms;
        let request = self.api.http().get(self.api.config().url("/api/state"));
        with_timeout(timeout_ms, async {
            let response = self.api.execute_within(request, timeout_ms).await?;
            response
                .json::<Value>()
                .await
                .map_err(|e| ReviewError::Malformed(e.to_string()))
        })
        .await
    }

    async fn save_state(&self, record: &PersistenceRecord) -> ReviewResult<()> {
        let request = self
            .api
            .http()
            .post(self.api.config().url("/api/state/save"))
            .json(record);
        self.api.execute(request).await?;
        Ok(())
    }

    async fn clear_state(&self) -> ReviewResult<()> {
        let request = self.api.http().post(self.api.config().url("/api/state/clear"));
        self.api.execute(request).await?;
        Ok(())
    }
}
