//! Remote icon fetching.
//!
//! Fetches SVG documents from the Iconify HTTP API and normalizes the
//! payload before it is handed to the cache.

use std::time::Duration;

use anyhow::anyhow;
use reqwest::blocking::Client;
use reqwest::StatusCode;

use crate::error::{IconifyError, Result};
use crate::icon::IconIdentifier;

/// Default remote icon API endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.iconify.design";

/// Intrinsic sizing attributes emitted by the upstream API. Stripped from
/// every successful payload so consumers can impose their own dimensions.
const INTRINSIC_SIZE_ATTRS: &str = " width=\"1em\" height=\"1em\"";

/// Fetches icons over HTTP/HTTPS.
///
/// Holds no per-icon state; one fetcher may serve concurrent fetches for
/// different identifiers. A single failed attempt surfaces the error to
/// the caller — there is no retry at this level.
pub struct RemoteFetcher {
    endpoint: String,
    client: Client,
    timeout: Duration,
}

impl RemoteFetcher {
    /// Create a fetcher against the default endpoint with a 30-second
    /// timeout.
    pub fn new() -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT)
    }

    /// Create a fetcher against a custom endpoint.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        let timeout = Duration::from_secs(30);
        Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            client: Client::builder()
                .user_agent("iconify-cache")
                .timeout(timeout)
                .build()
                .expect("Failed to build HTTP client"),
            timeout,
        }
    }

    /// The configured endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The configured request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// The remote URL an icon is fetched from.
    pub fn icon_url(&self, icon: &IconIdentifier) -> String {
        format!("{}/{}/{}.svg", self.endpoint, icon.pack(), icon.name())
    }

    /// Fetch and normalize the SVG document for an icon.
    ///
    /// The upstream API does not reliably signal missing icons with a 404
    /// status; some responses arrive as HTTP 200 with a body of literally
    /// `404`. Both forms, and an empty body, yield
    /// [`IconifyError::IconNotFound`]. Transport failures (including
    /// timeouts) surface as [`IconifyError::Http`] instead.
    pub fn fetch(&self, icon: &IconIdentifier) -> Result<String> {
        let url = self.icon_url(icon);
        tracing::trace!("GET {}", url);

        let response = self.client.get(&url).send()?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(IconifyError::IconNotFound {
                icon: icon.to_string(),
            });
        }
        if !response.status().is_success() {
            return Err(anyhow!("HTTP {} fetching {}", response.status(), url).into());
        }

        let contents = response.text()?;
        if contents == "404" || contents.is_empty() {
            return Err(IconifyError::IconNotFound {
                icon: icon.to_string(),
            });
        }

        Ok(normalize(&contents))
    }
}

impl Default for RemoteFetcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Strip the fixed intrinsic sizing attributes from a fetched payload.
/// Payloads without the pattern pass through unchanged.
fn normalize(payload: &str) -> String {
    payload.replace(INTRINSIC_SIZE_ATTRS, "")
}
