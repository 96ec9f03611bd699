//! Liveness check for the ML API.
//!
//! Hosted ML backends may idle out between requests; pinging the root
//! endpoint reports whether it is up and keeps it warm. The async client
//! can run this periodically (see `AsyncDashboardSdk::spawn_keep_alive`).

use serde::{Deserialize, Serialize};

use crate::config::Endpoints;
use crate::connection::Transport;
use crate::error::Result;

/// Body of `GET {ml_url}/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub message: String,
}

pub struct HealthCheck<'a> {
    transport: &'a dyn Transport,
    endpoints: &'a Endpoints,
}

impl<'a> HealthCheck<'a> {
    pub fn new(transport: &'a dyn Transport, endpoints: &'a Endpoints) -> Self {
        Self {
            transport,
            endpoints,
        }
    }

    /// Ping the ML API root.
    pub fn ping_ml(&self) -> Result<HealthStatus> {
        let resp = self.transport.get_json(&self.endpoints.ml_root())?;
        if resp.is_null() {
            return Ok(HealthStatus::default());
        }
        Ok(serde_json::from_value(resp)?)
    }
}
