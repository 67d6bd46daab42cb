//! Palette generation service client.
//!
//! This module provides a lightweight client for the remote service that
//! turns a prompt and style into a list of colors. It focuses on:
//!
//! - Constructing an HTTP client with a request timeout
//! - Reading the base URL from `SWATCH_API_URL` (default `http://localhost:5001`)
//! - Validating the base URL before any request is made
//! - Issuing `POST /api/colors` and classifying failures
//!
//! The client returns the decoded JSON body untouched. Checking that it
//! actually carries a `colors` array is left to the caller.
//!
//! # Example
//!
//! ```ignore
//! use swatch_api::PaletteServiceClient;
//! use swatch_types::{GenerationRequest, Style};
//!
//! let client = PaletteServiceClient::new_from_env()?;
//! let request = GenerationRequest::new("foggy morning", Some(Style::Pastel))?;
//! let body = client.generate(&request).await?;
//! println!("{body}");
//! ```

use std::env;
use std::time::Duration;

use reqwest::{Client, Url, header};
use serde_json::Value;
use swatch_types::GenerationRequest;
use thiserror::Error;
use tracing::{debug, warn};

/// Environment variable holding the service base URL.
pub const API_URL_ENV: &str = "SWATCH_API_URL";
/// Base URL used when [`API_URL_ENV`] is unset.
pub const DEFAULT_API_URL: &str = "http://localhost:5001";
/// Environment variable holding the request timeout in seconds.
pub const HTTP_TIMEOUT_ENV: &str = "SWATCH_HTTP_TIMEOUT_SECS";
/// Request timeout used when [`HTTP_TIMEOUT_ENV`] is unset or invalid.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Path of the generation endpoint relative to the base URL.
pub const COLORS_PATH: &str = "/api/colors";

/// Errors surfaced by the generation client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The configured base URL is unusable.
    #[error("Invalid {} '{url}': {reason}", API_URL_ENV)]
    InvalidBaseUrl { url: String, reason: String },
    /// The underlying HTTP client could not be built.
    #[error("build http client: {0}")]
    Client(#[source] reqwest::Error),
    /// The service answered with a non-2xx status.
    #[error("HTTP error! status: {status}")]
    Status { status: u16, body: String },
    /// The request never produced a response (connect, timeout, ...).
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),
    /// The response body was not JSON.
    #[error("Invalid JSON response: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Thin wrapper around a configured `reqwest::Client` for the generation service.
#[derive(Debug, Clone)]
pub struct PaletteServiceClient {
    base_url: String,
    http: Client,
    user_agent: String,
}

impl PaletteServiceClient {
    /// Construct a client from [`API_URL_ENV`] and [`HTTP_TIMEOUT_ENV`].
    pub fn new_from_env() -> Result<Self, ApiError> {
        let base_url = env::var(API_URL_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.into());
        Self::with_base_url(&base_url, timeout_from_env())
    }

    /// Construct a client for an explicit base URL.
    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        validate_base_url(&base_url)?;

        let mut default_headers = header::HeaderMap::new();
        default_headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(default_headers)
            .timeout(timeout)
            .build()
            .map_err(ApiError::Client)?;

        Ok(Self {
            base_url,
            http,
            user_agent: format!("swatch/{}; {}", env!("CARGO_PKG_VERSION"), env::consts::OS),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of the generation endpoint.
    pub fn colors_url(&self) -> String {
        format!("{}{}", self.base_url, COLORS_PATH)
    }

    /// Send `request` to the generation endpoint and return the decoded JSON body.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<Value, ApiError> {
        let url = self.colors_url();
        debug!(%url, style = %request.style(), "requesting palette");

        let response = self
            .http
            .post(&url)
            .header(header::USER_AGENT, &self.user_agent)
            .json(request)
            .send()
            .await
            .map_err(ApiError::Network)?;

        let status = response.status();
        let text = response.text().await.map_err(ApiError::Network)?;
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        serde_json::from_str(&text).map_err(ApiError::Decode)
    }
}

/// Validate that a base URL is acceptable for use by the client.
///
/// The URL must parse, use `http` or `https`, and include a host.
fn validate_base_url(base: &str) -> Result<(), ApiError> {
    let invalid = |reason: String| ApiError::InvalidBaseUrl {
        url: base.to_string(),
        reason,
    };

    let parsed_base_url = Url::parse(base).map_err(|error| invalid(error.to_string()))?;
    if !matches!(parsed_base_url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}://'", parsed_base_url.scheme())));
    }
    if parsed_base_url.host_str().is_none() {
        return Err(invalid("must include a host".into()));
    }
    Ok(())
}

fn timeout_from_env() -> Duration {
    let Ok(raw) = env::var(HTTP_TIMEOUT_ENV) else {
        return DEFAULT_TIMEOUT;
    };
    match raw.trim().parse::<u64>() {
        Ok(seconds) if seconds > 0 => Duration::from_secs(seconds),
        _ => {
            warn!(value = %raw, "Ignoring invalid {}; using default", HTTP_TIMEOUT_ENV);
            DEFAULT_TIMEOUT
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::json;
    use swatch_types::Style;
    use tokio::net::TcpListener;

    async fn spawn_service(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });
        format!("http://{address}")
    }

    fn request() -> GenerationRequest {
        GenerationRequest::new("northern lights", Some(Style::Neon)).unwrap()
    }

    #[test]
    fn accepts_local_and_remote_http_urls() {
        assert!(validate_base_url("http://localhost:5001").is_ok());
        assert!(validate_base_url("https://palettes.example.com").is_ok());
    }

    #[test]
    fn rejects_unusable_base_urls() {
        assert!(matches!(validate_base_url("not a url"), Err(ApiError::InvalidBaseUrl { .. })));
        assert!(matches!(validate_base_url("ftp://example.com"), Err(ApiError::InvalidBaseUrl { .. })));
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let client = PaletteServiceClient::with_base_url("http://localhost:5001/", DEFAULT_TIMEOUT).unwrap();
        assert_eq!(client.colors_url(), "http://localhost:5001/api/colors");
    }

    #[test]
    fn env_configures_base_url_and_timeout() {
        temp_env::with_vars(
            [(API_URL_ENV, Some("http://127.0.0.1:9999")), (HTTP_TIMEOUT_ENV, Some("5"))],
            || {
                let client = PaletteServiceClient::new_from_env().unwrap();
                assert_eq!(client.base_url(), "http://127.0.0.1:9999");
                assert_eq!(timeout_from_env(), Duration::from_secs(5));
            },
        );
        temp_env::with_vars([(API_URL_ENV, None::<&str>), (HTTP_TIMEOUT_ENV, Some("soon"))], || {
            let client = PaletteServiceClient::new_from_env().unwrap();
            assert_eq!(client.base_url(), DEFAULT_API_URL);
            assert_eq!(timeout_from_env(), DEFAULT_TIMEOUT);
        });
    }

    #[tokio::test]
    async fn posts_prompt_and_style() {
        let router = Router::new().route(
            COLORS_PATH,
            post(|Json(body): Json<Value>| async move { Json(json!({"colors": ["#000000"], "echo": body})) }),
        );
        let base_url = spawn_service(router).await;
        let client = PaletteServiceClient::with_base_url(&base_url, DEFAULT_TIMEOUT).unwrap();

        let body = client.generate(&request()).await.unwrap();
        assert_eq!(body["colors"], json!(["#000000"]));
        assert_eq!(body["echo"], json!({"prompt": "northern lights", "style": "neon"}));
    }

    #[tokio::test]
    async fn non_success_status_is_reported() {
        let router = Router::new().route(COLORS_PATH, post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "overloaded") }));
        let base_url = spawn_service(router).await;
        let client = PaletteServiceClient::with_base_url(&base_url, DEFAULT_TIMEOUT).unwrap();

        let error = client.generate(&request()).await.unwrap_err();
        match &error {
            ApiError::Status { status, body } => {
                assert_eq!(*status, 503);
                assert_eq!(body, "overloaded");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(error.to_string(), "HTTP error! status: 503");
    }

    #[tokio::test]
    async fn non_json_body_is_a_decode_error() {
        let router = Router::new().route(COLORS_PATH, post(|| async { "<html>oops</html>" }));
        let base_url = spawn_service(router).await;
        let client = PaletteServiceClient::with_base_url(&base_url, DEFAULT_TIMEOUT).unwrap();

        assert!(matches!(client.generate(&request()).await, Err(ApiError::Decode(_))));
    }

    #[tokio::test]
    async fn https_base_url_starts_a_tls_handshake() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let address = listener.local_addr().unwrap();
        let first_byte = std::thread::spawn(move || {
            let (mut socket, _) = listener.accept().unwrap();
            let mut buffer = [0u8; 1];
            socket.read_exact(&mut buffer).unwrap();
            buffer[0]
        });

        let client = PaletteServiceClient::with_base_url(&format!("https://{address}"), Duration::from_secs(2)).unwrap();
        let error = client.generate(&request()).await.unwrap_err();
        assert!(matches!(error, ApiError::Network(_)));

        // 0x16 is the TLS handshake record type that opens a ClientHello.
        assert_eq!(first_byte.join().unwrap(), 0x16);
    }

    #[tokio::test]
    async fn unreachable_service_is_a_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        drop(listener);

        let client = PaletteServiceClient::with_base_url(&format!("http://{address}"), Duration::from_secs(2)).unwrap();
        let error = client.generate(&request()).await.unwrap_err();
        assert!(matches!(error, ApiError::Network(_)));
        assert!(error.to_string().starts_with("Network error:"));
    }
}
