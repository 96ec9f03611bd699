use serde::{Deserialize, Serialize};

use super::amount;
use super::transaction::Transaction;

// ---------------------------------------------------------------------------
// Product — A sellable item and the transactions that include it
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(deserialize_with = "amount")]
    pub price: f64,
    #[serde(deserialize_with = "amount")]
    pub expense: f64,
    #[serde(default)]
    pub transactions: Vec<TransactionRef>,
}

impl Product {
    /// Units sold, i.e. the number of associated transactions.
    pub fn sales_volume(&self) -> usize {
        self.transactions.len()
    }

    pub fn margin(&self) -> f64 {
        self.price - self.expense
    }
}

// ---------------------------------------------------------------------------
// TransactionRef — Either a bare id or a populated transaction
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TransactionRef {
    Id(String),
    Record(Box<Transaction>),
}

impl TransactionRef {
    pub fn id(&self) -> &str {
        match self {
            TransactionRef::Id(id) => id,
            TransactionRef::Record(tx) => &tx.id,
        }
    }
}
