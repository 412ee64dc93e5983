//! HTTP plumbing for the CoinGecko API.
//!
//! Queries never touch `reqwest` directly; they go through the [`Transport`]
//! trait so the wire can be swapped (tests serve canned JSON from memory).

use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;
use serde_json::Value;

use crate::error::{CoinGeckoError, RemoteError, Result};

/// Issues a single GET against the API and returns the decoded JSON body.
pub trait Transport: Send {
    /// Base URL requests are resolved against, for diagnostics.
    fn base_url(&self) -> &str;

    /// GET `path` (relative to the base URL) with the given query string.
    ///
    /// Non-2xx responses and transport failures are [`RemoteError`]s; a body
    /// that does not parse as JSON is a schema error.
    fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value>;
}

/// [`Transport`] backed by a blocking `reqwest` client.
pub struct HttpTransport {
    base_url: String,
    client: Client,
}

impl HttpTransport {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }
}

impl Transport for HttpTransport {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {} {:?}", url, query);

        let resp = self
            .client
            .get(&url)
            .query(query)
            .send()
            .map_err(RemoteError::from)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(RemoteError::Status {
                status: status.as_u16(),
                url: resp.url().to_string(),
            }
            .into());
        }

        let body = resp.text().map_err(RemoteError::from)?;
        serde_json::from_str(&body).map_err(|e| {
            CoinGeckoError::Schema(format!("response from {} is not valid JSON: {}", url, e))
        })
    }
}
