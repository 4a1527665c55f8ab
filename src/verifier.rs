//! Client for the `/verify-otp` endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::VerifyError;

const USER_AGENT_VALUE: &str = concat!("otpgate/", env!("CARGO_PKG_VERSION"));

/// JSON body posted to the verification endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifyRequest {
    pub otp: String,
    #[serde(rename = "sessionToken")]
    pub session_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<serde_json::Value>,
}

/// Performs one verification attempt.
#[async_trait]
pub trait OtpVerifier: Send + Sync {
    async fn verify(&self, request: VerifyRequest) -> Result<(), VerifyError>;
}

/// reqwest-backed verifier.
#[derive(Debug, Clone)]
pub struct HttpVerifier {
    client: reqwest::Client,
    url: String,
}

impl HttpVerifier {
    /// `url` is the full endpoint URL (see `Config::verify_url`).
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, VerifyError> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(default_headers)
            .build()
            .map_err(|e| VerifyError::Transport {
                message: format!("failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl OtpVerifier for HttpVerifier {
    async fn verify(&self, request: VerifyRequest) -> Result<(), VerifyError> {
        debug!(url = %self.url, has_session = request.session_token.is_some(), "posting otp");

        // `.json()` sets `Content-Type: application/json`.
        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "verification request failed");
                VerifyError::Transport {
                    message: e.to_string(),
                }
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.map_err(|e| VerifyError::Transport {
            message: e.to_string(),
        })?;
        Err(rejection(status.as_u16(), &body))
    }
}

/// Map a non-2xx response body onto a [`VerifyError`].
fn rejection(status: u16, body: &str) -> VerifyError {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            message: Some(serde_json::Value::String(message)),
        }) if !message.is_empty() => VerifyError::Rejected { status, message },
        _ => VerifyError::InvalidResponse {
            status,
            message: body.chars().take(200).collect(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_with_camel_case_token() {
        let body = serde_json::to_value(VerifyRequest {
            otp: "123456".to_string(),
            session_token: None,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"otp": "123456", "sessionToken": null}));
    }

    #[test]
    fn rejection_uses_message_field() {
        assert_eq!(
            rejection(400, r#"{"message":"OTP expired","code":7}"#),
            VerifyError::Rejected {
                status: 400,
                message: "OTP expired".to_string()
            }
        );
    }

    #[test]
    fn rejection_without_usable_message_is_invalid_response() {
        for body in [
            "",
            "<html>oops</html>",
            r#"{"error":"x"}"#,
            r#"{"message":42}"#,
            r#"{"message":""}"#,
        ] {
            assert!(
                matches!(rejection(500, body), VerifyError::InvalidResponse { status: 500, .. }),
                "body {body:?}"
            );
        }
    }
}
