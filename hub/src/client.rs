//! HTTP client implementing single-endpoint delivery.

use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use hubcast_types::{Delivery, DeliveryError, Endpoint, Receipt, SubmissionRequest};

/// Default timeout for hub submissions.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default connection timeout.
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Message ingestion path on the hub.
const MSG_PATH: &str = "/api/msg";

/// Client for submitting signed envelopes to a governance hub.
///
/// Sends `POST {endpoint}/api/msg` with the envelope as the JSON body and
/// parses the hub's acknowledgment. Performs exactly one round-trip per
/// call; retry and failover live in the submission engine.
#[derive(Clone)]
pub struct HubClient {
    /// HTTP client (reusable connection pool).
    http: reqwest::Client,
}

/// Error body returned by the hub on rejection.
#[derive(Debug, Deserialize)]
struct HubErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<serde_json::Value>,
}

impl HubClient {
    /// Create a new HubClient with default timeout settings.
    pub fn new() -> Result<Self, DeliveryError> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create a HubClient with a custom request timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, DeliveryError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .build()
            .map_err(|e| {
                DeliveryError::RequestFailed(format!("failed to create HTTP client: {e}"))
            })?;
        Ok(Self { http })
    }
}

impl Delivery for HubClient {
    async fn deliver(
        &self,
        endpoint: &Endpoint,
        request: &SubmissionRequest,
    ) -> Result<Receipt, DeliveryError> {
        let url = format!("{}{MSG_PATH}", endpoint.url());
        debug!("POST {url}");

        let response = self
            .http
            .post(&url)
            .json(request.payload())
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DeliveryError::Unreachable(format!("request timed out: {e}"))
                } else if e.is_connect() {
                    DeliveryError::Unreachable(format!("connection failed: {e}"))
                } else {
                    DeliveryError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DeliveryError::Rejected(rejection_detail(status, &body)));
        }

        response.json::<Receipt>().await.map_err(|e| {
            DeliveryError::InvalidResponse(format!("failed to parse hub acknowledgment: {e}"))
        })
    }
}

/// Extract the hub's error message from a rejection body, falling back to
/// the raw status line when the body is not the hub's JSON error shape.
fn rejection_detail(status: reqwest::StatusCode, body: &str) -> String {
    match serde_json::from_str::<HubErrorBody>(body) {
        Ok(HubErrorBody {
            error: Some(error),
            error_description: Some(description),
        }) => format!("{error}: {description} (HTTP {status})"),
        Ok(HubErrorBody {
            error: Some(error), ..
        }) => format!("{error} (HTTP {status})"),
        _ => format!("HTTP status {status}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn client_creation_succeeds() {
        let client = HubClient::new().expect("client builds");
        drop(client);
    }

    #[test]
    fn client_with_custom_timeout_succeeds() {
        let client = HubClient::with_timeout(Duration::from_secs(5)).expect("client builds");
        drop(client);
    }

    #[test]
    fn rejection_detail_uses_hub_error_fields() {
        let body = r#"{"error": "unauthorized", "error_description": "wrong signature"}"#;
        let detail = rejection_detail(StatusCode::UNAUTHORIZED, body);
        assert_eq!(detail, "unauthorized: \"wrong signature\" (HTTP 401 Unauthorized)");
    }

    #[test]
    fn rejection_detail_without_description() {
        let body = r#"{"error": "client_error"}"#;
        let detail = rejection_detail(StatusCode::BAD_REQUEST, body);
        assert_eq!(detail, "client_error (HTTP 400 Bad Request)");
    }

    #[test]
    fn rejection_detail_falls_back_to_status_line() {
        let detail = rejection_detail(StatusCode::BAD_GATEWAY, "<html>nope</html>");
        assert_eq!(detail, "HTTP status 502 Bad Gateway");

        let detail = rejection_detail(StatusCode::INTERNAL_SERVER_ERROR, "{}");
        assert_eq!(detail, "HTTP status 500 Internal Server Error");
    }
}
