use serde::{Deserialize, Serialize};

use super::product::Product;

// ---------------------------------------------------------------------------
// PriceInput — One request element for the pricing model
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceInput {
    pub price: f64,
    pub expense: f64,
    pub sales_volume: u64,
}

impl From<&Product> for PriceInput {
    fn from(product: &Product) -> Self {
        Self {
            price: product.price,
            expense: product.expense,
            sales_volume: product.sales_volume() as u64,
        }
    }
}

// ---------------------------------------------------------------------------
// PriceSuggestion — One response element, matched to its input by index
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceSuggestion {
    pub suggested_price: f64,
    pub predicted_sales: i64,
    pub expected_revenue: f64,
}

// ---------------------------------------------------------------------------
// PricingRow — Product joined with its suggestion for display
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricingRow {
    pub id: String,
    pub product_id: String,
    pub price: f64,
    pub expense: f64,
    pub sales_volume: u64,
    pub suggested_price: f64,
    pub predicted_sales: i64,
    pub expected_revenue: f64,
}

impl PricingRow {
    pub fn new(product: &Product, suggestion: &PriceSuggestion) -> Self {
        Self {
            id: product.id.clone(),
            product_id: product.id.clone(),
            price: product.price,
            expense: product.expense,
            sales_volume: product.sales_volume() as u64,
            suggested_price: suggestion.suggested_price,
            predicted_sales: suggestion.predicted_sales,
            expected_revenue: suggestion.expected_revenue,
        }
    }

    /// Difference between the suggested and the current price.
    pub fn price_delta(&self) -> f64 {
        self.suggested_price - self.price
    }
}
