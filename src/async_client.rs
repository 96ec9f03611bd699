//! Async wrapper around [`DashboardSdk`] for use in async runtimes (Tokio, etc.).
//!
//! Runs SDK operations on a blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free.
//! Cached collection queries go through the shared SDK behind a mutex; ML
//! calls (price suggestions, charts, health) only borrow the transport and
//! endpoints, so several of them can be in flight at once.
//!
//! # Example
//!
//! ```no_run
//! use bizdash_sdk::AsyncDashboardSdk;
//!
//! #[tokio::main]
//! async fn main() {
//!     let sdk = AsyncDashboardSdk::builder().build().await.unwrap();
//!
//!     // Run any sync SDK method via closure
//!     let kpis = sdk.run(|s| s.kpis().list()).await.unwrap();
//!
//!     // Convenience method for chart generation
//!     let chart = sdk.generate_chart("Bar Chart of revenue").await.unwrap();
//! }
//! ```

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::chat::{ChartClient, ChartResponse};
use crate::config::Endpoints;
use crate::connection::SharedTransport;
use crate::error::{DashboardError, Result};
use crate::health::{HealthCheck, HealthStatus};
use crate::models::{Kpi, PriceInput, PriceSuggestion, Product, Transaction};
use crate::pricing::PriceSuggestClient;
use crate::{DashboardSdk, DashboardSdkBuilder};

fn join_error(e: tokio::task::JoinError) -> DashboardError {
    DashboardError::InvalidArgument(format!("Task join error: {e}"))
}

// ---------------------------------------------------------------------------
// AsyncDashboardSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncDashboardSdk`] instance.
///
/// Accepts the same settings as [`DashboardSdkBuilder`].
#[derive(Default)]
pub struct AsyncDashboardSdkBuilder {
    inner: DashboardSdkBuilder,
}

impl AsyncDashboardSdkBuilder {
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.inner = self.inner.api_url(url);
        self
    }

    pub fn ml_url(mut self, url: impl Into<String>) -> Self {
        self.inner = self.inner.ml_url(url);
        self
    }

    pub fn chart_url(mut self, url: impl Into<String>) -> Self {
        self.inner = self.inner.chart_url(url);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.inner = self.inner.timeout(timeout);
        self
    }

    pub fn transport(mut self, transport: SharedTransport) -> Self {
        self.inner = self.inner.transport(transport);
        self
    }

    pub fn from_env(mut self) -> Result<Self> {
        self.inner = self.inner.from_env()?;
        Ok(self)
    }

    /// Build the async SDK.
    ///
    /// Construction runs on the blocking thread pool so it won't block
    /// the async event loop.
    pub async fn build(self) -> Result<AsyncDashboardSdk> {
        let inner = self.inner;
        tokio::task::spawn_blocking(move || {
            let sdk = inner.build()?;
            Ok(AsyncDashboardSdk {
                transport: sdk.connection().shared_transport(),
                endpoints: Arc::new(sdk.endpoints().clone()),
                inner: Arc::new(Mutex::new(sdk)),
            })
        })
        .await
        .map_err(join_error)?
    }
}

// ---------------------------------------------------------------------------
// AsyncDashboardSdk
// ---------------------------------------------------------------------------

/// Async wrapper around [`DashboardSdk`].
///
/// The underlying [`DashboardSdk`] is protected by a [`Mutex`] since its
/// cache uses `RefCell` internally. The transport and endpoints are held
/// outside the lock for ML calls. Cloning shares the same SDK.
#[derive(Clone)]
pub struct AsyncDashboardSdk {
    inner: Arc<Mutex<DashboardSdk>>,
    transport: SharedTransport,
    endpoints: Arc<Endpoints>,
}

impl AsyncDashboardSdk {
    /// Create a new builder for configuring the async SDK.
    pub fn builder() -> AsyncDashboardSdkBuilder {
        AsyncDashboardSdkBuilder::default()
    }

    /// Run a sync SDK operation on the blocking thread pool.
    ///
    /// The closure receives an `&DashboardSdk` reference and should return
    /// a `Result<T>`.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&DashboardSdk) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let sdk = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let guard = sdk
                .lock()
                .map_err(|_| DashboardError::InvalidArgument("SDK lock poisoned".into()))?;
            f(&guard)
        })
        .await
        .map_err(join_error)?
    }

    /// Transport and endpoints for calls that bypass the cache and the lock.
    fn handles(&self) -> (SharedTransport, Arc<Endpoints>) {
        (Arc::clone(&self.transport), Arc::clone(&self.endpoints))
    }

    pub async fn kpis(&self) -> Result<Vec<Kpi>> {
        self.run(|s| s.kpis().list()).await
    }

    pub async fn products(&self) -> Result<Vec<Product>> {
        self.run(|s| s.products().list()).await
    }

    pub async fn transactions(&self) -> Result<Vec<Transaction>> {
        self.run(|s| s.transactions().list()).await
    }

    /// Request price suggestions without holding the SDK lock.
    ///
    /// Pair with [`PricingView::begin`](crate::PricingView::begin) and
    /// [`PricingView::complete`](crate::PricingView::complete) so overlapping
    /// cycles resolve in favour of the newest.
    pub async fn suggest_price(&self, items: Vec<PriceInput>) -> Result<Vec<PriceSuggestion>> {
        let (transport, endpoints) = self.handles();
        tokio::task::spawn_blocking(move || {
            PriceSuggestClient::new(transport.as_ref(), &endpoints).suggest_price(&items)
        })
        .await
        .map_err(join_error)?
    }

    /// Post a chart prompt without holding the SDK lock.
    pub async fn generate_chart(&self, prompt: impl Into<String>) -> Result<ChartResponse> {
        let prompt = prompt.into();
        let (transport, endpoints) = self.handles();
        tokio::task::spawn_blocking(move || {
            ChartClient::new(transport.as_ref(), &endpoints).generate(&prompt)
        })
        .await
        .map_err(join_error)?
    }

    pub async fn ping_ml(&self) -> Result<HealthStatus> {
        let (transport, endpoints) = self.handles();
        tokio::task::spawn_blocking(move || HealthCheck::new(transport.as_ref(), &endpoints).ping_ml())
            .await
            .map_err(join_error)?
    }

    /// Ping the ML API every `interval` until the returned handle is aborted.
    ///
    /// Failures are logged and the loop carries on with the next tick.
    pub fn spawn_keep_alive(&self, interval: Duration) -> tokio::task::JoinHandle<()> {
        let sdk = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                match sdk.ping_ml().await {
                    Ok(status) => tracing::debug!(message = %status.message, "ML API alive"),
                    Err(e) => tracing::warn!(error = %e, "ML API keep-alive ping failed"),
                }
            }
        })
    }

    /// Mark every cached collection stale.
    pub async fn refresh(&self) -> Result<()> {
        self.run(|s| {
            s.refresh();
            Ok(())
        })
        .await
    }

    /// Close the SDK, releasing all resources.
    ///
    /// The SDK is dropped on the blocking pool, since the blocking HTTP
    /// client cannot be dropped on an async thread.
    pub async fn close(self) -> Result<()> {
        tokio::task::spawn_blocking(move || {
            drop(self.inner);
            Ok(())
        })
        .await
        .map_err(join_error)?
    }
}
