//! Backend access layer.
//! Defines the error taxonomy the UI must distinguish, the `ScheduleApi`
//! seam the rest of the app talks through, and the blocking HTTP client
//! implementing it against the scheduling backend.

use std::time::Duration;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::staff::Staff;
use crate::models::visit::Visit;
use crate::services::visit::VisitChange;
use crate::utils::date::date_key;

/// Failure classes surfaced to the user. The wording of each variant is what
/// ends up in the notification, so conflicts must stay distinguishable from
/// plain validation failures.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("the backend rejected the change: {0}")]
    Validation(String),
    #[error("scheduling conflict: {0}")]
    Conflict(String),
    #[error("visit no longer exists on the backend")]
    NotFound,
    #[error("backend unreachable: {0}")]
    Transport(String),
}

/// Contract with the external scheduling backend. The visit and staff
/// collections are owned over there; this app only lists and patches.
pub trait ScheduleApi: Send + Sync {
    /// All visits for the date, assigned and unassigned.
    fn visits_for(&self, date: NaiveDate) -> Result<Vec<Visit>, ApiError>;

    fn staff(&self) -> Result<Vec<Staff>, ApiError>;

    /// Apply a sparse update to one visit and return the stored result.
    fn update_visit(&self, visit_id: &str, change: &VisitChange) -> Result<Visit, ApiError>;
}

/// Blocking HTTP client for the scheduling backend.
///
/// Lives behind [`ScheduleApi`] and is only ever called from worker threads;
/// the UI thread sees results through the app event channel.
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build backend HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let response = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .query(query)
            .send()
            .map_err(|err| ApiError::Transport(err.to_string()))?;

        Self::decode(response)
    }

    fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        if status.is_success() {
            return response
                .json()
                .map_err(|err| ApiError::Transport(format!("invalid response body: {}", err)));
        }

        Err(Self::classify(status, Self::detail_of(response)))
    }

    /// Pull the human-readable `detail` field out of an error body.
    fn detail_of(response: Response) -> String {
        response
            .json::<serde_json::Value>()
            .ok()
            .and_then(|body| {
                body.get("detail")
                    .and_then(|detail| detail.as_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| "no detail provided".to_string())
    }

    /// Map an error status to the taxonomy. The backend reports overlapping
    /// assignments as a bad request whose detail names the double booking,
    /// so those are promoted to conflicts.
    fn classify(status: StatusCode, detail: String) -> ApiError {
        match status {
            StatusCode::NOT_FOUND => ApiError::NotFound,
            StatusCode::CONFLICT => ApiError::Conflict(detail),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                let lowered = detail.to_lowercase();
                if lowered.contains("double booking") || lowered.contains("overlap") {
                    ApiError::Conflict(detail)
                } else {
                    ApiError::Validation(detail)
                }
            }
            _ => ApiError::Transport(format!("HTTP {}: {}", status, detail)),
        }
    }
}

impl ScheduleApi for ApiClient {
    fn visits_for(&self, date: NaiveDate) -> Result<Vec<Visit>, ApiError> {
        self.get_json("/visits/", &[("target_date", date_key(date))])
    }

    fn staff(&self) -> Result<Vec<Staff>, ApiError> {
        self.get_json("/staff/", &[])
    }

    fn update_visit(&self, visit_id: &str, change: &VisitChange) -> Result<Visit, ApiError> {
        let response = self
            .client
            .put(format!("{}/visits/{}", self.base_url, visit_id))
            .json(change)
            .send()
            .map_err(|err| ApiError::Transport(err.to_string()))?;

        Self::decode(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_not_found() {
        let err = ApiClient::classify(StatusCode::NOT_FOUND, "gone".to_string());
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn test_classify_conflict_status() {
        let err = ApiClient::classify(StatusCode::CONFLICT, "already booked".to_string());
        assert!(matches!(err, ApiError::Conflict(_)));
    }

    #[test]
    fn test_classify_double_booking_detail_as_conflict() {
        let err = ApiClient::classify(
            StatusCode::BAD_REQUEST,
            "Double booking: overlaps 09:00-10:00".to_string(),
        );
        assert!(matches!(err, ApiError::Conflict(_)));
    }

    #[test]
    fn test_classify_plain_bad_request_as_validation() {
        let err = ApiClient::classify(StatusCode::BAD_REQUEST, "end before start".to_string());
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn test_classify_server_error_as_transport() {
        let err = ApiClient::classify(
            StatusCode::INTERNAL_SERVER_ERROR,
            "no detail provided".to_string(),
        );
        assert!(matches!(err, ApiError::Transport(_)));
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://localhost:8000/api/v1/", Duration::from_secs(5))
            .unwrap();
        assert_eq!(client.base_url, "http://localhost:8000/api/v1");
    }
}
