use crate::cache::CacheTag;
use crate::connection::Connection;
use crate::error::{DashboardError, Result};
use crate::models::Transaction;

/// Query interface for transactions, cached under [`CacheTag::Transactions`].
pub struct TransactionQuery<'a> {
    conn: &'a Connection,
}

impl<'a> TransactionQuery<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn list(&self) -> Result<Vec<Transaction>> {
        self.conn.load(CacheTag::Transactions)
    }

    pub fn get(&self, id: &str) -> Result<Transaction> {
        self.list()?
            .into_iter()
            .find(|t| t.id == id)
            .ok_or_else(|| DashboardError::NotFound(format!("Transaction '{id}'")))
    }

    /// Transactions whose product list contains `product_id`.
    pub fn for_product(&self, product_id: &str) -> Result<Vec<Transaction>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|t| t.product_ids.iter().any(|p| p == product_id))
            .collect())
    }

    pub fn cached(&self) -> Result<Option<Vec<Transaction>>> {
        self.conn.peek(CacheTag::Transactions)
    }
}
