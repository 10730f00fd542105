//! Blocking HTTP fetch.
//!
//! One configured client is built at startup and reused for every
//! cycle. The watch loop is single-threaded and issues one request at
//! a time, so the client is the blocking one.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::StatusCode;
use tracing::{debug, warn};
use url::Url;

use crate::encoding;
use crate::error::{Error, Result};

/// HTTP client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Value of the `User-Agent` header.
    pub user_agent: String,
    /// Timeout covering the whole request, in seconds.
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            // Servers shape responses by user agent; a browser-like
            // value keeps bodies comparable to what a person sees.
            user_agent: "Mozilla/5.0".to_string(),
            timeout_secs: 30,
        }
    }
}

/// A configured client for repeated page fetches.
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    /// Builds the underlying client from the configuration.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("text/html"));

        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(Error::ClientBuild)?;

        Ok(Self { client })
    }

    /// Issues one GET and returns the decoded body.
    ///
    /// A non-200 status is not an error: it is logged as a warning and
    /// reported as no body, so the cycle counts as a no-match. Transport
    /// failures are returned to the caller, which decides per mode
    /// whether they are fatal.
    pub fn fetch(&self, url: &Url) -> Result<Option<String>> {
        debug!("requesting {url}");
        let response = self.client.get(url.clone()).send()?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(
                "{} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("unknown status")
            );
            return Ok(None);
        }

        let header_charset = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(encoding::charset_from_content_type);
        let body = response.bytes()?;
        Ok(Some(encoding::decode_body(&body, header_charset.as_deref())))
    }
}
