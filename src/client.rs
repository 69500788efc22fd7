//! Template service client
//!
//! One POST per call, no retries. A 2xx body is returned untouched; anything
//! else is turned into a [`TemplateError`] carrying the service's `detail`.

use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::{AppError, TemplateError};
use crate::request::TemplateRequest;

/// Base URL used when none is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Path of the generation endpoint
pub const TEMPLATE_PATH: &str = "/engine-template";

/// Anything that can turn a request into an archive.
///
/// The TUI holds this behind an `Arc` and calls it from a worker thread.
pub trait TemplateService: Send + Sync {
    fn generate(&self, request: &TemplateRequest) -> Result<Vec<u8>, TemplateError>;
}

/// HTTP client settings
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub connect_timeout: Duration,
    /// Limit on the whole request. `None` waits as long as the service takes.
    pub request_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

/// Blocking HTTP client for the template service
pub struct TemplateClient {
    client: Client,
    endpoint: String,
}

impl TemplateClient {
    /// Create a new client
    pub fn new(config: ClientConfig) -> crate::error::Result<Self> {
        let base = config.base_url.trim_end_matches('/');
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(AppError::config(format!(
                "Base URL must start with http:// or https://: {}",
                config.base_url
            )));
        }

        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AppError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: format!("{}{}", base, TEMPLATE_PATH),
        })
    }

    /// Full URL requests are sent to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl TemplateService for TemplateClient {
    fn generate(&self, request: &TemplateRequest) -> Result<Vec<u8>, TemplateError> {
        info!(
            "POST {} (engine: {}, framework: {})",
            self.endpoint, request.engine_name, request.framework
        );

        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .map_err(|e| {
                warn!("Template request could not be sent: {}", e);
                TemplateError::Transport(e)
            })?;

        let status = response.status();
        let bytes = response.bytes().map_err(|e| {
            warn!("Failed to read template response body: {}", e);
            TemplateError::Transport(e)
        })?;
        debug!("Template service answered {} with {} bytes", status, bytes.len());

        interpret_response(status, &bytes)
    }
}

/// Map a status and body to the archive bytes or an error
pub fn interpret_response(status: StatusCode, body: &[u8]) -> Result<Vec<u8>, TemplateError> {
    if status.is_success() {
        return Ok(body.to_vec());
    }

    match extract_detail(body) {
        Some(detail) => Err(TemplateError::Server { status, detail }),
        None => Err(TemplateError::UnparseableError { status }),
    }
}

/// Pull a displayable message out of an error body.
///
/// Accepts `{"detail": "text"}` and the list form
/// `{"detail": [{"loc": [...], "msg": "..."}]}` used for request validation
/// failures. Returns `None` when neither yields any text.
pub fn extract_detail(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    match value.get("detail")? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Array(entries) => {
            let parts: Vec<String> = entries.iter().filter_map(format_validation_entry).collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join("; "))
            }
        }
        _ => None,
    }
}

fn format_validation_entry(entry: &Value) -> Option<String> {
    let msg = entry.get("msg")?.as_str()?;
    let loc: Vec<String> = entry
        .get("loc")
        .and_then(Value::as_array)
        .map(|parts| {
            parts
                .iter()
                .map(|p| match p {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect()
        })
        .unwrap_or_default();

    if loc.is_empty() {
        Some(msg.to_string())
    } else {
        Some(format!("{}: {}", loc.join("."), msg))
    }
}
