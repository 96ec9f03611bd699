//! Read queries against the core REST API.
//!
//! Each module provides a query struct that borrows from a
//! [`Connection`](crate::connection::Connection) and returns typed records.
//! Collections are served through the connection's tag-keyed cache.

pub mod kpis;
pub mod products;
pub mod transactions;

pub use kpis::KpiQuery;
pub use products::ProductQuery;
pub use transactions::TransactionQuery;
