//! KPI queries, cached under [`CacheTag::Kpis`].

use crate::cache::CacheTag;
use crate::connection::Connection;
use crate::error::{DashboardError, Result};
use crate::models::Kpi;

// ---------------------------------------------------------------------------
// KpiQuery
// ---------------------------------------------------------------------------

/// Query interface for KPI snapshots.
pub struct KpiQuery<'a> {
    conn: &'a Connection,
}

impl<'a> KpiQuery<'a> {
    /// Create a new `KpiQuery` bound to the given connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Fetch every KPI record.
    pub fn list(&self) -> Result<Vec<Kpi>> {
        self.conn.load(CacheTag::Kpis)
    }

    /// Look up a KPI record by `_id`.
    pub fn get(&self, id: &str) -> Result<Kpi> {
        self.list()?
            .into_iter()
            .find(|k| k.id == id)
            .ok_or_else(|| DashboardError::NotFound(format!("KPI '{id}'")))
    }

    /// The first KPI record, which the dashboard treats as the current period.
    pub fn current(&self) -> Result<Option<Kpi>> {
        Ok(self.list()?.into_iter().next())
    }

    /// Previously fetched KPIs, even if invalidated since.
    pub fn cached(&self) -> Result<Option<Vec<Kpi>>> {
        self.conn.peek(CacheTag::Kpis)
    }
}
