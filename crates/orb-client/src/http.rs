//! HTTP backend abstraction for the Orb API.
//!
//! A backend performs exactly one attempt per call. The client layers retry
//! and decoding on top, so the same logic runs against the production
//! reqwest backend and the test fakes.

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use url::Url;

use crate::config::ClientSettings;
use crate::error::{OrbError, OrbResult};
use crate::parsing::{error_detail, parse_body};

// ============================================================================
// Request
// ============================================================================

/// A fully built request, ready to send.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    /// Header pairs in send order.
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl HttpRequest {
    /// First header with the given name, ignoring ASCII case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

// ============================================================================
// HTTP Backend Trait
// ============================================================================

/// Sends a request and returns the parsed JSON body of a success response.
///
/// Non-success statuses come back as errors built with the same status
/// mapping `ReqwestBackend` uses.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpBackend: Send + Sync {
    async fn send(&self, request: &HttpRequest) -> OrbResult<Value>;
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Production HTTP backend using reqwest.
pub struct ReqwestBackend {
    client: reqwest::Client,
}

impl ReqwestBackend {
    /// Create a new reqwest backend with the given settings.
    pub(crate) fn new(settings: &ClientSettings) -> OrbResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn send(&self, request: &HttpRequest) -> OrbResult<Value> {
        let mut builder = self
            .client
            .request(request.method.clone(), request.url.clone());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(ref body) = request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            parse_body(&text)
        } else {
            Err(OrbError::from_status(
                status.as_u16(),
                request.url.as_str(),
                error_detail(&text),
            ))
        }
    }
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================
