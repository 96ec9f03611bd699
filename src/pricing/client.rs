//! Client for the external pricing-suggestion service.
//!
//! Stateless request/response: every call posts the full input array to
//! `{ml_url}/suggest-price` and decodes the returned array. Nothing is cached
//! and the response length is left for the caller to check.

use crate::config::Endpoints;
use crate::connection::Transport;
use crate::error::Result;
use crate::models::{PriceInput, PriceSuggestion};

pub struct PriceSuggestClient<'a> {
    transport: &'a dyn Transport,
    endpoints: &'a Endpoints,
}

impl<'a> PriceSuggestClient<'a> {
    pub fn new(transport: &'a dyn Transport, endpoints: &'a Endpoints) -> Self {
        Self {
            transport,
            endpoints,
        }
    }

    /// Request one suggestion per input; element `i` of the response
    /// corresponds to element `i` of `items`.
    pub fn suggest_price(&self, items: &[PriceInput]) -> Result<Vec<PriceSuggestion>> {
        let url = self.endpoints.suggest_price();
        let body = serde_json::to_value(items)?;
        tracing::debug!(%url, count = items.len(), "requesting price suggestions");
        let resp = self.transport.post_json(&url, &body)?;
        Ok(serde_json::from_value(resp)?)
    }
}
