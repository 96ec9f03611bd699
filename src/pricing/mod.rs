//! Price suggestions: the ML inference client and the view that joins its
//! output to the product list.

pub mod client;
pub mod view;

pub use client::PriceSuggestClient;
pub use view::{build_inputs, join_rows, CycleOutcome, PricingCycle, PricingState, PricingView};
