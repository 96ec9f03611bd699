use serde::{Deserialize, Serialize};

use super::amount;

// ---------------------------------------------------------------------------
// Transaction — One purchase
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(rename = "_id")]
    pub id: String,
    pub buyer: String,
    #[serde(deserialize_with = "amount")]
    pub amount: f64,
    #[serde(default)]
    pub product_ids: Vec<String>,
}

impl Transaction {
    /// Number of products in the purchase.
    pub fn product_count(&self) -> usize {
        self.product_ids.len()
    }
}
