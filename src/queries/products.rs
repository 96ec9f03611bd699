use crate::cache::CacheTag;
use crate::connection::Connection;
use crate::error::{DashboardError, Result};
use crate::models::Product;

/// Query interface for products, cached under [`CacheTag::Products`].
pub struct ProductQuery<'a> {
    conn: &'a Connection,
}

impl<'a> ProductQuery<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Fetch every product, in the order the API returns them.
    pub fn list(&self) -> Result<Vec<Product>> {
        self.conn.load(CacheTag::Products)
    }

    pub fn get(&self, id: &str) -> Result<Product> {
        self.list()?
            .into_iter()
            .find(|p| p.id == id)
            .ok_or_else(|| DashboardError::NotFound(format!("Product '{id}'")))
    }

    /// Previously fetched products, even if invalidated since.
    pub fn cached(&self) -> Result<Option<Vec<Product>>> {
        self.conn.peek(CacheTag::Products)
    }
}
