use hyper::Method;
use tracing::info;

use crate::api::{build_client, decode, send_empty, status_error, HttpClient};
use crate::errors::ApiError;
use crate::models::activity_model::Activity;

/// Client for the activity log. The API exposes it under `/users`.
pub struct ActivityApi {
    client: HttpClient,
    base_url: String,
}

impl ActivityApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: build_client(),
            base_url: base_url.into(),
        }
    }

    /// Fetch every activity entry, oldest to newest as the server sends
    /// them.
    pub async fn list_activities(&self) -> Result<Vec<Activity>, ApiError> {
        let url = format!("{}/users", self.base_url);
        let (status, body) = send_empty(&self.client, Method::GET, &url).await?;
        if !status.is_success() {
            return Err(status_error(status, &body, "activity log"));
        }
        let activities: Vec<Activity> = decode(&body)?;
        info!("Retrieved {} activities", activities.len());
        Ok(activities)
    }
}
