//! Transport seam: one authenticated GET returning a JSON body.
//!
//! Everything above this layer talks to a `dyn Transport`, so tests can
//! script responses without a network. [`HttpTransport`] is the reqwest
//! implementation used by the binary.

use crate::github::error::{GitHubError, GitHubResult};
use futures::future::BoxFuture;
use log::debug;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;

/// Extra request headers, name to value.
pub type Headers = BTreeMap<String, String>;

/// Media type GitHub expects on REST calls.
pub const GITHUB_JSON: &str = "application/vnd.github+json";

/// Performs GET requests and returns the decoded JSON body.
pub trait Transport: Send + Sync {
    /// GET `url` with the given extra headers.
    fn get<'a>(&'a self, url: &'a str, headers: &'a Headers) -> BoxFuture<'a, GitHubResult<Value>>;
}

/// reqwest-backed transport with optional token authentication.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    token: Option<String>,
}

impl HttpTransport {
    /// Build a transport. `timeout` bounds every request end to end.
    pub fn new(token: Option<String>, timeout: Duration) -> GitHubResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("prdash/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GitHubError::ClientSetup(e.to_string()))?;
        Ok(Self { http, token })
    }

    /// Caller headers, then the default `Accept` if the caller set none, then
    /// the token, which always owns `Authorization`.
    fn header_map(&self, headers: &Headers) -> GitHubResult<HeaderMap> {
        let mut map = HeaderMap::new();
        for (name, value) in headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| GitHubError::InvalidInput(format!("header name {name:?}: {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| GitHubError::InvalidInput(format!("header value for {name}: {e}")))?;
            map.insert(name, value);
        }
        if !map.contains_key(ACCEPT) {
            map.insert(ACCEPT, HeaderValue::from_static(GITHUB_JSON));
        }
        if let Some(token) = &self.token {
            let value = HeaderValue::from_str(&format!("token {token}"))
                .map_err(|e| GitHubError::ClientSetup(format!("token is not a valid header: {e}")))?;
            map.insert(AUTHORIZATION, value);
        }
        Ok(map)
    }

    async fn fetch(&self, url: &str, headers: &Headers) -> GitHubResult<Value> {
        let header_map = self.header_map(headers)?;
        debug!("GET {url}");

        let response = self
            .http
            .get(url)
            .headers(header_map)
            .send()
            .await
            .map_err(|e| map_reqwest_error(url, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GitHubError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| map_reqwest_error(url, &e))?;
        serde_json::from_slice(&body).map_err(|e| GitHubError::decode(url, &e))
    }
}

impl Transport for HttpTransport {
    fn get<'a>(&'a self, url: &'a str, headers: &'a Headers) -> BoxFuture<'a, GitHubResult<Value>> {
        Box::pin(self.fetch(url, headers))
    }
}

fn map_reqwest_error(url: &str, error: &reqwest::Error) -> GitHubError {
    if error.is_timeout() {
        GitHubError::Timeout {
            url: url.to_string(),
        }
    } else {
        GitHubError::Request {
            url: url.to_string(),
            message: error.to_string(),
        }
    }
}
