use reqwest::{Response, StatusCode};
use tracing::error;

use crate::error::{ApiErrorKind, RDescribeError, Result};

/// Convert a reqwest error to an RDescribeError, handling timeout errors specially.
///
/// The request URL is stripped from the error so it never ends up in logs or
/// user-facing messages.
pub fn handle_http_error(e: reqwest::Error, provider_name: &str) -> RDescribeError {
    let e = e.without_url();
    error!(error = %e, "HTTP request to {} failed", provider_name);
    if e.is_timeout() {
        RDescribeError::Timeout
    } else {
        RDescribeError::HttpError(e)
    }
}

/// Check HTTP response status and turn an unsuccessful one into an API error.
pub async fn check_response_status(response: Response, provider_name: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let error_text = response
        .text()
        .await
        .map_err(|e| handle_http_error(e, provider_name))?;
    error!(
        status = %status,
        error = %error_text,
        "{} API returned error response", provider_name
    );
    Err(RDescribeError::api_error(
        provider_name,
        classify_status(status, error_text),
    ))
}

fn classify_status(status: StatusCode, details: String) -> ApiErrorKind {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiErrorKind::AuthenticationFailed,
        StatusCode::TOO_MANY_REQUESTS => ApiErrorKind::RateLimited,
        StatusCode::BAD_REQUEST => ApiErrorKind::BadRequest { details },
        s if s.is_server_error() => ApiErrorKind::ServerError {
            status: s.as_u16(),
            details,
        },
        s => ApiErrorKind::UnexpectedResponse {
            details: format!("HTTP {}: {}", s.as_u16(), details),
        },
    }
}

/// Macro to generate standard builder methods for model clients.
///
/// Generates `model()`, `temperature()`, `max_tokens()`, and `timeout()`.
macro_rules! impl_client_builder_methods {
    (
        client_type: $client:ty,
        model_type: $model:ty,
        provider_name: $provider:expr
    ) => {
        impl $client {
            /// Set the model to use
            #[tracing::instrument(skip(self))]
            pub fn model(mut self, model: $model) -> Self {
                tracing::debug!(
                    previous_model = ?self.config.model,
                    new_model = ?model,
                    "Setting {} model", $provider
                );
                self.config.model = model;
                self
            }

            /// Set the temperature (0.0 to 2.0, lower = more deterministic)
            #[tracing::instrument(skip(self))]
            pub fn temperature(mut self, temp: f32) -> Self {
                tracing::debug!(
                    previous_temp = self.config.temperature,
                    new_temp = temp,
                    "Setting temperature"
                );
                self.config.temperature = temp;
                self
            }

            /// Set the maximum tokens to generate
            #[tracing::instrument(skip(self))]
            pub fn max_tokens(mut self, max: u32) -> Self {
                tracing::debug!(
                    previous_max = ?self.config.max_tokens,
                    new_max = max,
                    "Setting max_tokens"
                );
                // Ensure max_tokens is at least 1 to avoid API errors
                self.config.max_tokens = Some(max.max(1));
                self
            }

            /// Set the timeout for HTTP requests.
            ///
            /// The timeout covers the whole request, including reading the body.
            #[tracing::instrument(skip(self))]
            pub fn timeout(mut self, timeout: std::time::Duration) -> Self {
                tracing::debug!(
                    previous_timeout = ?self.config.timeout,
                    new_timeout = ?timeout,
                    "Setting timeout"
                );
                self.config.timeout = Some(timeout);

                self.client = reqwest::Client::builder()
                    .timeout(timeout)
                    .build()
                    .unwrap_or_else(|e| {
                        tracing::warn!(
                            error = %e,
                            "Failed to build reqwest client with timeout, using default"
                        );
                        reqwest::Client::new()
                    });

                self
            }
        }
    };
}

pub(crate) use impl_client_builder_methods;
