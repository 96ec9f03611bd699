//! Positional join of products and price suggestions.
//!
//! A pricing cycle snapshots the product list, derives one [`PriceInput`] per
//! product in the same order, sends them to the ML service and zips the
//! response back by index. Cycles are numbered; only the most recently
//! started cycle may change the view, so a slow response to an old product
//! list can never overwrite the rows for a newer one.

use crate::error::{DashboardError, Result};
use crate::models::{PriceInput, PriceSuggestion, PricingRow, Product};
use crate::pricing::client::PriceSuggestClient;

/// Derive the request array for `products`, preserving order.
pub fn build_inputs(products: &[Product]) -> Vec<PriceInput> {
    products.iter().map(PriceInput::from).collect()
}

/// Zip products with suggestions by index.
///
/// Fails with [`DashboardError::LengthMismatch`] rather than truncating when
/// the two sequences differ in length.
pub fn join_rows(products: &[Product], suggestions: &[PriceSuggestion]) -> Result<Vec<PricingRow>> {
    if products.len() != suggestions.len() {
        return Err(DashboardError::LengthMismatch {
            expected: products.len(),
            actual: suggestions.len(),
        });
    }
    Ok(products
        .iter()
        .zip(suggestions)
        .map(|(product, suggestion)| PricingRow::new(product, suggestion))
        .collect())
}

// ---------------------------------------------------------------------------
// PricingState / PricingCycle
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default)]
pub enum PricingState {
    /// No products yet.
    #[default]
    Waiting,
    /// A suggestion request is in flight.
    Loading { generation: u64 },
    /// Rows are available.
    Ready,
    /// The latest cycle failed; the message is shown in place of the table.
    Failed(String),
}

/// One begin→complete pass of the view.
#[derive(Debug, Clone)]
pub struct PricingCycle {
    generation: u64,
    products: Vec<Product>,
    inputs: Vec<PriceInput>,
}

impl PricingCycle {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Request array, index-aligned with [`products`](Self::products).
    pub fn inputs(&self) -> &[PriceInput] {
        &self.inputs
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The response was joined and is now displayed.
    Applied,
    /// A newer cycle started before this one finished.
    Discarded,
    /// There were no products, so nothing was requested.
    Skipped,
}

// ---------------------------------------------------------------------------
// PricingView
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct PricingView {
    latest: u64,
    state: PricingState,
    rows: Vec<PricingRow>,
    last_products: Option<Vec<Product>>,
}

impl PricingView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &PricingState {
        &self.state
    }

    /// Joined rows of the last applied cycle; empty unless `Ready`.
    pub fn rows(&self) -> &[PricingRow] {
        &self.rows
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, PricingState::Loading { .. })
    }

    pub fn latest_generation(&self) -> u64 {
        self.latest
    }

    /// Whether `products` differs from the list the last cycle started with.
    pub fn needs_refresh(&self, products: &[Product]) -> bool {
        self.last_products.as_deref() != Some(products)
    }

    /// Start a cycle for `products`.
    ///
    /// Any cycle still in flight becomes stale. Returns `None` and goes back
    /// to `Waiting` when the list is empty.
    pub fn begin(&mut self, products: &[Product]) -> Option<PricingCycle> {
        self.latest += 1;
        self.last_products = Some(products.to_vec());

        if products.is_empty() {
            self.state = PricingState::Waiting;
            self.rows.clear();
            return None;
        }

        self.state = PricingState::Loading {
            generation: self.latest,
        };
        Some(PricingCycle {
            generation: self.latest,
            products: products.to_vec(),
            inputs: build_inputs(products),
        })
    }

    /// Apply the outcome of `cycle`'s suggestion request.
    ///
    /// Stale cycles are dropped without touching the view. For the current
    /// cycle, request failures and length mismatches put the view in
    /// `Failed`, clear the rows, and are returned to the caller.
    pub fn complete(
        &mut self,
        cycle: PricingCycle,
        result: Result<Vec<PriceSuggestion>>,
    ) -> Result<CycleOutcome> {
        if cycle.generation != self.latest {
            tracing::warn!(
                generation = cycle.generation,
                latest = self.latest,
                "discarding stale price suggestions"
            );
            return Ok(CycleOutcome::Discarded);
        }

        let joined = result.and_then(|suggestions| join_rows(&cycle.products, &suggestions));
        match joined {
            Ok(rows) => {
                tracing::info!(generation = cycle.generation, rows = rows.len(), "price suggestions ready");
                self.rows = rows;
                self.state = PricingState::Ready;
                Ok(CycleOutcome::Applied)
            }
            Err(e) => {
                self.rows.clear();
                self.state = PricingState::Failed(e.to_string());
                Err(e)
            }
        }
    }

    /// Run a full cycle synchronously.
    pub fn refresh(&mut self, products: &[Product], client: &PriceSuggestClient<'_>) -> Result<CycleOutcome> {
        let Some(cycle) = self.begin(products) else {
            return Ok(CycleOutcome::Skipped);
        };
        let result = client.suggest_price(cycle.inputs());
        self.complete(cycle, result)
    }

    /// Run a cycle only if the product list changed since the last one.
    pub fn refresh_if_changed(
        &mut self,
        products: &[Product],
        client: &PriceSuggestClient<'_>,
    ) -> Result<Option<CycleOutcome>> {
        if !self.needs_refresh(products) {
            return Ok(None);
        }
        self.refresh(products, client).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionRef;

    fn product(id: &str, price: f64, expense: f64, sales: usize) -> Product {
        Product {
            id: id.to_string(),
            price,
            expense,
            transactions: (0..sales).map(|i| TransactionRef::Id(format!("{id}-t{i}"))).collect(),
        }
    }

    fn suggestion(price: f64) -> PriceSuggestion {
        PriceSuggestion {
            suggested_price: price,
            predicted_sales: 3,
            expected_revenue: price * 3.0,
        }
    }

    #[test]
    fn inputs_follow_product_order_and_transaction_counts() {
        let products = vec![product("a", 10.0, 4.0, 3), product("b", 20.0, 9.0, 0), product("c", 5.0, 1.0, 7)];
        let inputs = build_inputs(&products);
        assert_eq!(inputs.len(), products.len());
        for (input, p) in inputs.iter().zip(&products) {
            assert_eq!(input.price, p.price);
            assert_eq!(input.expense, p.expense);
            assert_eq!(input.sales_volume, p.transactions.len() as u64);
        }
    }

    #[test]
    fn join_rejects_short_response() {
        let products = vec![product("a", 1.0, 0.5, 1), product("b", 2.0, 1.0, 1)];
        let err = join_rows(&products, &[suggestion(1.5)]).unwrap_err();
        assert!(matches!(err, DashboardError::LengthMismatch { expected: 2, actual: 1 }));
    }

    #[test]
    fn empty_products_skip_the_request() {
        let mut view = PricingView::new();
        assert!(view.begin(&[]).is_none());
        assert_eq!(view.state(), &PricingState::Waiting);
    }

    #[test]
    fn stale_completion_is_discarded() {
        let mut view = PricingView::new();
        let old = view.begin(&[product("a", 10.0, 5.0, 1)]).unwrap();
        let new = view.begin(&[product("a", 12.0, 5.0, 2)]).unwrap();

        let outcome = view.complete(new, Ok(vec![suggestion(13.0)])).unwrap();
        assert_eq!(outcome, CycleOutcome::Applied);

        let outcome = view.complete(old, Ok(vec![suggestion(99.0)])).unwrap();
        assert_eq!(outcome, CycleOutcome::Discarded);
        assert_eq!(view.rows()[0].suggested_price, 13.0);
        assert_eq!(view.rows()[0].price, 12.0);
    }

    #[test]
    fn stale_failure_does_not_clobber_ready_rows() {
        let mut view = PricingView::new();
        let old = view.begin(&[product("a", 10.0, 5.0, 1)]).unwrap();
        let new = view.begin(&[product("a", 10.0, 5.0, 1)]).unwrap();
        view.complete(new, Ok(vec![suggestion(11.0)])).unwrap();

        let outcome = view
            .complete(old, Err(DashboardError::Unreachable("down".into())))
            .unwrap();
        assert_eq!(outcome, CycleOutcome::Discarded);
        assert_eq!(view.state(), &PricingState::Ready);
    }

    #[test]
    fn needs_refresh_tracks_last_product_list() {
        let mut view = PricingView::new();
        let products = vec![product("a", 1.0, 0.5, 1)];
        assert!(view.needs_refresh(&products));
        view.begin(&products);
        assert!(!view.needs_refresh(&products));
        assert!(view.needs_refresh(&[product("a", 1.0, 0.5, 2)]));
    }
}
