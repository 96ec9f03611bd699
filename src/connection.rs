//! HTTP transport and the connection that ties it to endpoints and the cache.
//!
//! [`Transport`] is the seam between the SDK and the network. The default
//! [`HttpTransport`] wraps a blocking `reqwest` client; tests substitute an
//! in-memory implementation with canned responses.

use std::cell::RefCell;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::cache::{CacheTag, QueryCache};
use crate::config::{self, Endpoints};
use crate::error::{DashboardError, Result};

/// Minimal JSON-over-HTTP interface used by every SDK component.
///
/// Implementations must treat non-2xx responses as errors
/// ([`DashboardError::Status`]) and return `Value::Null` for an empty body.
pub trait Transport: Send + Sync {
    fn get_json(&self, url: &str) -> Result<Value>;
    fn post_json(&self, url: &str, body: &Value) -> Result<Value>;
}

/// Shared handle to a transport.
pub type SharedTransport = Arc<dyn Transport>;

// ---------------------------------------------------------------------------
// HttpTransport
// ---------------------------------------------------------------------------

/// [`Transport`] backed by a blocking `reqwest` client.
pub struct HttpTransport {
    timeout: Duration,
    client: OnceLock<Client>,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            client: OnceLock::new(),
        }
    }

    /// Lazy HTTP client, created on first use.
    ///
    /// Building the blocking client spins up its own runtime, so it must not
    /// happen on an async executor thread; deferring it to the first request
    /// keeps construction safe everywhere.
    fn client(&self) -> Result<&Client> {
        if let Some(client) = self.client.get() {
            return Ok(client);
        }
        let client = Client::builder()
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(self.client.get_or_init(|| client))
    }

    fn read_body(url: &str, resp: reqwest::blocking::Response) -> Result<Value> {
        let status = resp.status();
        if !status.is_success() {
            return Err(DashboardError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        let text = resp.text()?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(config::DEFAULT_TIMEOUT)
    }
}

impl Transport for HttpTransport {
    fn get_json(&self, url: &str) -> Result<Value> {
        tracing::debug!(%url, "GET");
        let resp = self.client()?.get(url).send()?;
        Self::read_body(url, resp)
    }

    fn post_json(&self, url: &str, body: &Value) -> Result<Value> {
        tracing::debug!(%url, "POST");
        let resp = self.client()?.post(url).json(body).send()?;
        Self::read_body(url, resp)
    }
}

// ---------------------------------------------------------------------------
// Connection
// ---------------------------------------------------------------------------

/// A transport plus the resolved endpoints and the collection cache.
pub struct Connection {
    transport: SharedTransport,
    /// Where each service lives.
    pub endpoints: Endpoints,
    /// Tag-keyed cache of core API collections.
    pub cache: RefCell<QueryCache>,
}

impl Connection {
    pub fn new(endpoints: Endpoints, transport: SharedTransport) -> Self {
        Self {
            transport,
            endpoints,
            cache: RefCell::new(QueryCache::new()),
        }
    }

    pub fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    /// Clone of the shared transport handle.
    pub fn shared_transport(&self) -> SharedTransport {
        Arc::clone(&self.transport)
    }

    /// Fetch (or read from cache) the collection for `tag` and decode it.
    ///
    /// A response is cached only once it decodes, so a failed fetch leaves
    /// the previous entry (stale or not) untouched.
    pub fn load<T: DeserializeOwned>(&self, tag: CacheTag) -> Result<Vec<T>> {
        if let Some(value) = self.cache.borrow().get(tag) {
            tracing::debug!(%tag, "cache hit");
            return Ok(serde_json::from_value(value.clone())?);
        }

        let url = config::join_url(&self.endpoints.api_url, tag.path());
        let value = self.transport.get_json(&url)?;
        let decoded = serde_json::from_value(value.clone()).map_err(|e| {
            tracing::warn!(%tag, error = %e, "collection did not decode; cache kept");
            e
        })?;
        self.cache.borrow_mut().insert(tag, value);
        tracing::debug!(%tag, "cached collection");
        Ok(decoded)
    }

    /// Decode whatever is cached for `tag`, including invalidated entries.
    pub fn peek<T: DeserializeOwned>(&self, tag: CacheTag) -> Result<Option<Vec<T>>> {
        let value = self.cache.borrow().peek(tag).cloned();
        match value {
            Some(v) => Ok(Some(serde_json::from_value(v)?)),
            None => Ok(None),
        }
    }
}
