//! Business dashboard SDK for Rust.
//!
//! Provides a high-level client for the analytics dashboard's two backends:
//! the core REST API (KPIs, products, transactions) and the ML API (price
//! suggestions and chat-driven chart generation). Collections are cached per
//! tag in memory; price suggestions are joined back onto products by
//! position; chart prompts run through a single-flight chat session.
//!
//! # Quick start
//!
//! ```no_run
//! use bizdash_sdk::{ChatSession, DashboardSdk, PricingView};
//!
//! let sdk = DashboardSdk::builder().from_env().unwrap().build().unwrap();
//!
//! // Query collections
//! let products = sdk.products().list().unwrap();
//!
//! // Suggest prices for every product
//! let mut view = PricingView::new();
//! sdk.refresh_pricing(&mut view).unwrap();
//!
//! // Ask for a chart
//! let mut chat = ChatSession::new();
//! sdk.send_chat(&mut chat, "Bar Chart of revenue");
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod cache;
pub mod chat;
pub mod config;
pub mod connection;
pub mod error;
pub mod health;
pub mod models;
pub mod pricing;
pub mod queries;

#[cfg(feature = "async")]
pub use async_client::AsyncDashboardSdk;
pub use cache::{CacheTag, QueryCache};
pub use chat::{ChartClient, ChartResponse, ChatEvent, ChatSession, ChatState};
pub use config::Endpoints;
pub use connection::{Connection, HttpTransport, SharedTransport, Transport};
pub use error::{DashboardError, Result};
pub use health::{HealthCheck, HealthStatus};
pub use pricing::{CycleOutcome, PriceSuggestClient, PricingState, PricingView};

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::models::ChatMessage;

// ---------------------------------------------------------------------------
// DashboardSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`DashboardSdk`] instance.
///
/// Use [`DashboardSdk::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](DashboardSdkBuilder::build) to create the SDK.
/// Values set explicitly win over [`from_env`](DashboardSdkBuilder::from_env),
/// which wins over the defaults in [`config`].
#[derive(Default)]
pub struct DashboardSdkBuilder {
    api_url: Option<String>,
    ml_url: Option<String>,
    chart_url: Option<String>,
    timeout: Option<Duration>,
    transport: Option<SharedTransport>,
}

impl DashboardSdkBuilder {
    /// Base URL of the core REST API.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = Some(url.into());
        self
    }

    /// Base URL of the ML API.
    pub fn ml_url(mut self, url: impl Into<String>) -> Self {
        self.ml_url = Some(url.into());
        self
    }

    /// Full URL of the chart-generation endpoint.
    pub fn chart_url(mut self, url: impl Into<String>) -> Self {
        self.chart_url = Some(url.into());
        self
    }

    /// HTTP request timeout. Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Use a custom transport instead of the default `reqwest` client.
    ///
    /// The timeout setting is ignored when a transport is supplied.
    pub fn transport(mut self, transport: SharedTransport) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Fill unset values from `DASHBOARD_API_URL`, `DASHBOARD_ML_URL`,
    /// `DASHBOARD_CHART_URL` and `DASHBOARD_TIMEOUT_SECS`.
    pub fn from_env(mut self) -> Result<Self> {
        if self.api_url.is_none() {
            self.api_url = config::env_var(config::API_URL_ENV);
        }
        if self.ml_url.is_none() {
            self.ml_url = config::env_var(config::ML_URL_ENV);
        }
        if self.chart_url.is_none() {
            self.chart_url = config::env_var(config::CHART_URL_ENV);
        }
        if self.timeout.is_none() {
            self.timeout = config::env_timeout()?;
        }
        Ok(self)
    }

    /// Validate the endpoints and build the SDK.
    ///
    /// No request is made here; the HTTP client is created on first use.
    pub fn build(self) -> Result<DashboardSdk> {
        let defaults = Endpoints::default();
        let endpoints = Endpoints {
            api_url: self.api_url.unwrap_or(defaults.api_url),
            ml_url: self.ml_url.unwrap_or(defaults.ml_url),
            chart_url: self.chart_url.unwrap_or(defaults.chart_url),
        };
        endpoints.validate()?;

        let transport = match self.transport {
            Some(t) => t,
            None => Arc::new(HttpTransport::new(
                self.timeout.unwrap_or(config::DEFAULT_TIMEOUT),
            )),
        };
        Ok(DashboardSdk {
            conn: Connection::new(endpoints, transport),
        })
    }
}

// ---------------------------------------------------------------------------
// DashboardSdk
// ---------------------------------------------------------------------------

/// The main entry point for the dashboard SDK.
///
/// Wraps a [`Connection`] (which owns the transport, endpoints and query
/// cache) and exposes domain-specific interfaces as lightweight borrowing
/// wrappers.
///
/// Created via [`DashboardSdk::builder()`].
pub struct DashboardSdk {
    conn: Connection,
}

impl DashboardSdk {
    /// Create a new builder for configuring the SDK.
    pub fn builder() -> DashboardSdkBuilder {
        DashboardSdkBuilder::default()
    }

    // -- Query accessors ---------------------------------------------------

    /// Access the KPI query interface.
    pub fn kpis(&self) -> queries::KpiQuery<'_> {
        queries::KpiQuery::new(&self.conn)
    }

    /// Access the product query interface.
    pub fn products(&self) -> queries::ProductQuery<'_> {
        queries::ProductQuery::new(&self.conn)
    }

    /// Access the transaction query interface.
    pub fn transactions(&self) -> queries::TransactionQuery<'_> {
        queries::TransactionQuery::new(&self.conn)
    }

    // -- ML API clients ----------------------------------------------------

    /// Access the price suggestion client. Never cached.
    pub fn pricing(&self) -> PriceSuggestClient<'_> {
        PriceSuggestClient::new(self.conn.transport(), &self.conn.endpoints)
    }

    /// Access the chart-generation client.
    pub fn charts(&self) -> ChartClient<'_> {
        ChartClient::new(self.conn.transport(), &self.conn.endpoints)
    }

    /// Access the ML API health check.
    pub fn health(&self) -> HealthCheck<'_> {
        HealthCheck::new(self.conn.transport(), &self.conn.endpoints)
    }

    // -- Orchestration -----------------------------------------------------

    /// Load products and run one pricing cycle on `view`.
    ///
    /// A product fetch failure is returned without touching the view.
    pub fn refresh_pricing(&self, view: &mut PricingView) -> Result<CycleOutcome> {
        let products = self.products().list()?;
        view.refresh(&products, &self.pricing())
    }

    /// Submit `prompt` to `session` through the chart client.
    ///
    /// Returns the assistant reply, or `None` when the prompt was blank or a
    /// request was already in flight.
    pub fn send_chat<'s>(&self, session: &'s mut ChatSession, prompt: &str) -> Option<&'s ChatMessage> {
        session.send(&self.charts(), prompt)
    }

    // -- Cache -------------------------------------------------------------

    /// Mark `tag` stale so its next query refetches.
    pub fn invalidate(&self, tag: CacheTag) -> bool {
        self.conn.cache.borrow_mut().invalidate(tag)
    }

    /// Mark every cached collection stale.
    pub fn refresh(&self) {
        self.conn.cache.borrow_mut().invalidate_all();
        tracing::info!("dashboard cache invalidated");
    }

    pub fn is_cached(&self, tag: CacheTag) -> bool {
        self.conn.cache.borrow().is_cached(tag)
    }

    pub fn cached_at(&self, tag: CacheTag) -> Option<DateTime<Utc>> {
        self.conn.cache.borrow().fetched_at(tag)
    }

    /// The endpoints this SDK talks to.
    pub fn endpoints(&self) -> &Endpoints {
        &self.conn.endpoints
    }

    /// Return a reference to the underlying [`Connection`] for advanced usage.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for DashboardSdk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cache = self.conn.cache.borrow();
        let cached: Vec<&str> = CacheTag::ALL
            .iter()
            .filter(|t| cache.is_cached(**t))
            .map(|t| t.as_str())
            .collect();
        write!(
            f,
            "DashboardSdk(api={}, ml={}, chart={}, cached=[{}])",
            self.conn.endpoints.api_url,
            self.conn.endpoints.ml_url,
            self.conn.endpoints.chart_url,
            cached.join(", ")
        )
    }
}
