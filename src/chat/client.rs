use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::config::Endpoints;
use crate::connection::Transport;
use crate::error::Result;

/// Body returned by the chart-generation endpoint.
///
/// A missing (or empty) `graph` is a valid answer meaning no chart was made.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartResponse {
    #[serde(default)]
    pub graph: Option<String>,
    #[serde(default)]
    pub assistant_text: Option<String>,
}

impl ChartResponse {
    /// The base64 PNG, ignoring empty strings.
    pub fn image(&self) -> Option<&str> {
        self.graph.as_deref().filter(|g| !g.trim().is_empty())
    }
}

/// Posts prompts to the chart-generation endpoint.
pub struct ChartClient<'a> {
    transport: &'a dyn Transport,
    endpoints: &'a Endpoints,
}

impl<'a> ChartClient<'a> {
    pub fn new(transport: &'a dyn Transport, endpoints: &'a Endpoints) -> Self {
        Self {
            transport,
            endpoints,
        }
    }

    /// Send `{prompt}` and decode the reply. An empty body counts as `{}`.
    pub fn generate(&self, prompt: &str) -> Result<ChartResponse> {
        let url = self.endpoints.chart();
        let resp = self.transport.post_json(url, &json!({ "prompt": prompt }))?;
        if resp == Value::Null {
            return Ok(ChartResponse::default());
        }
        let parsed: ChartResponse = serde_json::from_value(resp)?;
        if let Some(text) = &parsed.assistant_text {
            tracing::debug!(assistant_text = %text, "chart server note");
        }
        Ok(parsed)
    }
}
