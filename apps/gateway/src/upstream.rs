// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Bookhive Contributors

//! Downstream service client.
//!
//! One pooled HTTP client per process, built at startup with the configured
//! timeout policy. Every call is timeout-bound; nothing here holds a lock
//! while a request is in flight, and dropping the future (client
//! disconnect) aborts the downstream call.

use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::GatewayConfig;

/// The downstream services the gateway fronts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Users,
    Books,
    Reading,
}

impl Service {
    fn name(&self) -> &'static str {
        match self {
            Service::Users => "user-service",
            Service::Books => "book-service",
            Service::Reading => "reading-service",
        }
    }
}

/// A downstream reply relayed to the client: business status plus JSON body.
///
/// Non-2xx business replies travel through here unchanged; only transport
/// failures become [`UpstreamError`].
#[derive(Debug)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl IntoResponse for UpstreamResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("upstream {0} unreachable: {1}")]
    Unreachable(&'static str, String),

    #[error("upstream {0} timed out: {1}")]
    Timeout(&'static str, String),

    #[error("upstream {0} returned a non-JSON body: {1}")]
    InvalidResponse(&'static str, String),
}

impl UpstreamError {
    /// Transport-level failures worth a single retry on idempotent calls.
    fn is_retryable(&self) -> bool {
        matches!(
            self,
            UpstreamError::Unreachable(..) | UpstreamError::Timeout(..)
        )
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            UpstreamError::Timeout(..) => StatusCode::GATEWAY_TIMEOUT,
            UpstreamError::Unreachable(..) | UpstreamError::InvalidResponse(..) => {
                StatusCode::BAD_GATEWAY
            }
        }
    }
}

/// Pooled client for the three downstream services.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: Client,
    user_base_url: String,
    book_base_url: String,
    reading_base_url: String,
    upload_timeout: Duration,
}

impl UpstreamClient {
    pub fn new(config: &GatewayConfig) -> Result<Self, UpstreamError> {
        let http = Client::builder()
            .timeout(config.upstream_timeout)
            .build()
            .map_err(|e| {
                UpstreamError::Unreachable("gateway", format!("failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            http,
            user_base_url: config.user_service_url.clone(),
            book_base_url: config.book_service_url.clone(),
            reading_base_url: config.reading_service_url.clone(),
            upload_timeout: config.upload_timeout,
        })
    }

    /// Forward a GET. Transport failures are retried once; the request is
    /// idempotent by definition, so a duplicate is harmless.
    pub async fn get(
        &self,
        service: Service,
        path: &str,
    ) -> Result<UpstreamResponse, UpstreamError> {
        let first = self.send(service, self.http.get(self.url(service, path))).await;
        match first {
            Err(error) if error.is_retryable() => {
                warn!(service = service.name(), path, error = %error, "retrying GET after transport failure");
                self.send(service, self.http.get(self.url(service, path))).await
            }
            other => other,
        }
    }

    /// Forward a GET with the caller's Authorization header attached.
    pub async fn get_authorized(
        &self,
        service: Service,
        path: &str,
        authorization: &str,
    ) -> Result<UpstreamResponse, UpstreamError> {
        let request = self
            .http
            .get(self.url(service, path))
            .header("Authorization", authorization);
        self.send(service, request).await
    }

    /// Forward a JSON POST. Never retried: the call may not be idempotent.
    pub async fn post_json(
        &self,
        service: Service,
        path: &str,
        body: &Value,
    ) -> Result<UpstreamResponse, UpstreamError> {
        let request = self.http.post(self.url(service, path)).json(body);
        self.send(service, request).await
    }

    /// Forward a DELETE. Never retried.
    pub async fn delete(
        &self,
        service: Service,
        path: &str,
    ) -> Result<UpstreamResponse, UpstreamError> {
        self.send(service, self.http.delete(self.url(service, path)))
            .await
    }

    /// Forward a multipart POST with the longer upload timeout.
    pub async fn post_multipart(
        &self,
        service: Service,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<UpstreamResponse, UpstreamError> {
        let request = self
            .http
            .post(self.url(service, path))
            .timeout(self.upload_timeout)
            .multipart(form);
        self.send(service, request).await
    }

    fn url(&self, service: Service, path: &str) -> String {
        let base = match service {
            Service::Users => &self.user_base_url,
            Service::Books => &self.book_base_url,
            Service::Reading => &self.reading_base_url,
        };
        format!("{}{}", base.trim_end_matches('/'), path)
    }

    async fn send(
        &self,
        service: Service,
        request: reqwest::RequestBuilder,
    ) -> Result<UpstreamResponse, UpstreamError> {
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                UpstreamError::Timeout(service.name(), e.to_string())
            } else {
                UpstreamError::Unreachable(service.name(), e.to_string())
            }
        })?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| UpstreamError::Unreachable(service.name(), e.to_string()))?;

        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .map_err(|e| UpstreamError::InvalidResponse(service.name(), e.to_string()))?
        };

        debug!(
            service = service.name(),
            status = status.as_u16(),
            "downstream reply"
        );

        Ok(UpstreamResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> GatewayConfig {
        GatewayConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            token_secret: "test".to_string(),
            user_service_url: "http://localhost:8001/".to_string(),
            book_service_url: "http://localhost:8002".to_string(),
            reading_service_url: "http://localhost:8003".to_string(),
            upstream_timeout: Duration::from_secs(10),
            upload_timeout: Duration::from_secs(60),
        }
    }

    #[test]
    fn url_joins_without_duplicate_slash() {
        let client = UpstreamClient::new(&test_config()).unwrap();
        assert_eq!(
            client.url(Service::Users, "/users/login"),
            "http://localhost:8001/users/login"
        );
        assert_eq!(
            client.url(Service::Books, "/books/1/content"),
            "http://localhost:8002/books/1/content"
        );
    }

    #[test]
    fn timeouts_map_to_504_and_the_rest_to_502() {
        let timeout = UpstreamError::Timeout("book-service", "deadline".to_string());
        assert_eq!(timeout.status_code(), StatusCode::GATEWAY_TIMEOUT);
        assert!(timeout.is_retryable());

        let unreachable = UpstreamError::Unreachable("book-service", "refused".to_string());
        assert_eq!(unreachable.status_code(), StatusCode::BAD_GATEWAY);
        assert!(unreachable.is_retryable());

        let invalid = UpstreamError::InvalidResponse("book-service", "html".to_string());
        assert_eq!(invalid.status_code(), StatusCode::BAD_GATEWAY);
        assert!(!invalid.is_retryable());
    }

    #[tokio::test]
    async fn upstream_response_relays_status_and_body() {
        let response = UpstreamResponse {
            status: StatusCode::NOT_FOUND,
            body: serde_json::json!({"error": "Book not found"}),
        };
        let response = response.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(body["error"], "Book not found");
    }
}
