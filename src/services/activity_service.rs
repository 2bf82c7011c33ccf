//! Activity feed retrieval with display-ready timestamps.

use crate::api::activity_api::ActivityApi;
use crate::errors::ApiError;
use crate::models::activity_model::Activity;

pub struct ActivityService {
    api: ActivityApi,
}

impl ActivityService {
    pub fn new(api: ActivityApi) -> Self {
        Self { api }
    }

    /// Fetch the feed with each timestamp replaced by its display form.
    /// Entries keep the order the server sent.
    pub async fn fetch_activities(&self) -> Result<Vec<Activity>, ApiError> {
        let mut activities = self.api.list_activities().await?;
        for activity in &mut activities {
            activity.timestamp = activity.display_timestamp();
        }
        Ok(activities)
    }
}
