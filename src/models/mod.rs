pub mod chat;
pub mod kpi;
pub mod pricing;
pub mod product;
pub mod transaction;

pub use chat::*;
pub use kpi::*;
pub use pricing::*;
pub use product::*;
pub use transaction::*;

use serde::{Deserialize, Deserializer};

// ---------------------------------------------------------------------------
// Monetary amounts
// ---------------------------------------------------------------------------

/// Deserialize a monetary field that may arrive as a number or as a
/// currency string such as `"$1,250.00"`.
pub(crate) fn amount<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => parse_currency(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid monetary amount '{s}'"))),
    }
}

/// Deserialize a map of category to monetary amount.
pub(crate) fn amount_map<'de, D>(
    deserializer: D,
) -> std::result::Result<std::collections::BTreeMap<String, f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Wrapped(#[serde(deserialize_with = "amount")] f64);

    let raw: Option<std::collections::BTreeMap<String, Wrapped>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(k, Wrapped(v))| (k, v))
        .collect())
}

fn parse_currency(s: &str) -> Option<f64> {
    let cleaned: String = s
        .trim()
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | ' '))
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}
