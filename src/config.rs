use std::env;
use std::time::Duration;

use crate::error::{DashboardError, Result};

pub const DEFAULT_API_URL: &str = "http://localhost:1337";
pub const DEFAULT_ML_URL: &str = "http://localhost:8000";
pub const DEFAULT_CHART_URL: &str = "http://localhost:8000/dashboard/generate";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const API_URL_ENV: &str = "DASHBOARD_API_URL";
pub const ML_URL_ENV: &str = "DASHBOARD_ML_URL";
pub const CHART_URL_ENV: &str = "DASHBOARD_CHART_URL";
pub const TIMEOUT_ENV: &str = "DASHBOARD_TIMEOUT_SECS";

pub const KPIS_PATH: &str = "kpi/kpis/";
pub const PRODUCTS_PATH: &str = "product/products/";
pub const TRANSACTIONS_PATH: &str = "transaction/transactions/";
pub const SUGGEST_PRICE_PATH: &str = "suggest-price";

/// Read a non-empty environment variable.
pub fn env_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse the timeout variable as whole seconds.
pub fn env_timeout() -> Result<Option<Duration>> {
    match env_var(TIMEOUT_ENV) {
        None => Ok(None),
        Some(raw) => raw
            .parse::<u64>()
            .map(|secs| Some(Duration::from_secs(secs)))
            .map_err(|_| {
                DashboardError::InvalidArgument(format!("{TIMEOUT_ENV} must be whole seconds, got '{raw}'"))
            }),
    }
}

/// Join a base URL and a relative path with exactly one slash between them.
pub fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        format!("{base}/")
    } else {
        format!("{base}/{path}")
    }
}

fn validate_url(label: &str, url: &str) -> Result<()> {
    let parsed = reqwest::Url::parse(url)
        .map_err(|e| DashboardError::InvalidArgument(format!("Invalid {label} URL '{url}': {e}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(DashboardError::InvalidArgument(format!(
            "Invalid {label} URL '{url}': unsupported scheme '{other}'"
        ))),
    }
}

// ---------------------------------------------------------------------------
// Endpoints
// ---------------------------------------------------------------------------

/// The three service locations the SDK talks to.
///
/// `api_url` and `ml_url` are base URLs; `chart_url` is the full URL of the
/// chart-generation endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub api_url: String,
    pub ml_url: String,
    pub chart_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            ml_url: DEFAULT_ML_URL.to_string(),
            chart_url: DEFAULT_CHART_URL.to_string(),
        }
    }
}

impl Endpoints {
    /// Check every URL parses and uses http(s).
    pub fn validate(&self) -> Result<()> {
        validate_url("core API", &self.api_url)?;
        validate_url("ML API", &self.ml_url)?;
        validate_url("chart", &self.chart_url)
    }

    pub fn kpis(&self) -> String {
        join_url(&self.api_url, KPIS_PATH)
    }

    pub fn products(&self) -> String {
        join_url(&self.api_url, PRODUCTS_PATH)
    }

    pub fn transactions(&self) -> String {
        join_url(&self.api_url, TRANSACTIONS_PATH)
    }

    pub fn suggest_price(&self) -> String {
        join_url(&self.ml_url, SUGGEST_PRICE_PATH)
    }

    pub fn ml_root(&self) -> String {
        join_url(&self.ml_url, "")
    }

    pub fn chart(&self) -> &str {
        &self.chart_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_url_normalizes_slashes() {
        assert_eq!(join_url("http://h:1/", "/kpi/kpis/"), "http://h:1/kpi/kpis/");
        assert_eq!(join_url("http://h:1", "suggest-price"), "http://h:1/suggest-price");
        assert_eq!(join_url("http://h:1//", ""), "http://h:1/");
    }

    #[test]
    fn endpoints_resolve_collection_paths() {
        let ep = Endpoints {
            api_url: "https://api.example.com".into(),
            ml_url: "https://ml.example.com/".into(),
            chart_url: "https://ml.example.com/dashboard/generate".into(),
        };
        assert_eq!(ep.kpis(), "https://api.example.com/kpi/kpis/");
        assert_eq!(ep.products(), "https://api.example.com/product/products/");
        assert_eq!(ep.transactions(), "https://api.example.com/transaction/transactions/");
        assert_eq!(ep.suggest_price(), "https://ml.example.com/suggest-price");
        assert_eq!(ep.ml_root(), "https://ml.example.com/");
    }

    #[test]
    fn defaults_are_valid() {
        Endpoints::default().validate().unwrap();
    }

    #[test]
    fn validate_rejects_bad_urls() {
        let mut ep = Endpoints::default();
        ep.ml_url = "not a url".into();
        assert!(matches!(ep.validate(), Err(DashboardError::InvalidArgument(_))));

        let mut ep = Endpoints::default();
        ep.chart_url = "ftp://example.com/x".into();
        let err = ep.validate().unwrap_err();
        assert!(err.to_string().contains("unsupported scheme"));
    }
}
