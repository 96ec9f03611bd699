use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{amount, amount_map};

// ---------------------------------------------------------------------------
// Kpi — Aggregated financials for one reporting period
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kpi {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(deserialize_with = "amount")]
    pub total_revenue: f64,
    #[serde(deserialize_with = "amount")]
    pub total_expenses: f64,
    #[serde(deserialize_with = "amount")]
    pub total_profit: f64,
    #[serde(default, deserialize_with = "amount_map")]
    pub expenses_by_category: BTreeMap<String, f64>,
    #[serde(default)]
    pub monthly_data: Vec<MonthlyEntry>,
    #[serde(default)]
    pub daily_data: Vec<DailyEntry>,
}

// ---------------------------------------------------------------------------
// MonthlyEntry / DailyEntry — KPI time series points
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyEntry {
    pub month: String,
    #[serde(deserialize_with = "amount")]
    pub revenue: f64,
    #[serde(deserialize_with = "amount")]
    pub expenses: f64,
    #[serde(default, deserialize_with = "optional_amount")]
    pub operational_expenses: Option<f64>,
    #[serde(default, deserialize_with = "optional_amount")]
    pub non_operational_expenses: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyEntry {
    pub date: String,
    #[serde(deserialize_with = "amount")]
    pub revenue: f64,
    #[serde(deserialize_with = "amount")]
    pub expenses: f64,
}

fn optional_amount<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Wrapped(#[serde(deserialize_with = "amount")] f64);

    let raw: Option<Wrapped> = Option::deserialize(deserializer)?;
    Ok(raw.map(|Wrapped(v)| v))
}

// ---------------------------------------------------------------------------
// Flattened views
// ---------------------------------------------------------------------------

/// One `(name, value)` row of a flattened KPI dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiPoint {
    pub label: String,
    pub value: f64,
}

impl Kpi {
    /// Totals as `totalRevenue`, `totalExpenses`, `totalProfit` rows.
    pub fn totals(&self) -> Vec<KpiPoint> {
        [
            ("totalRevenue", self.total_revenue),
            ("totalExpenses", self.total_expenses),
            ("totalProfit", self.total_profit),
        ]
        .into_iter()
        .map(|(label, value)| KpiPoint {
            label: label.to_string(),
            value,
        })
        .collect()
    }

    /// Expense breakdown as `(category, value)` rows, sorted by category.
    pub fn expense_breakdown(&self) -> Vec<KpiPoint> {
        self.expenses_by_category
            .iter()
            .map(|(label, value)| KpiPoint {
                label: label.clone(),
                value: *value,
            })
            .collect()
    }

    /// Revenue minus expenses for each month, in month order.
    pub fn monthly_profit(&self) -> Vec<KpiPoint> {
        self.monthly_data
            .iter()
            .map(|m| KpiPoint {
                label: m.month.clone(),
                value: m.revenue - m.expenses,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Kpi {
        serde_json::from_value(json!({
            "_id": "k1",
            "totalRevenue": "$2,000.00",
            "totalExpenses": 1200,
            "totalProfit": 800.0,
            "expensesByCategory": {"salaries": "$500.00", "supplies": 300, "services": 400},
            "monthlyData": [
                {"month": "january", "revenue": 150, "expenses": 100, "operationalExpenses": 60, "nonOperationalExpenses": 40},
                {"month": "february", "revenue": "$90.00", "expenses": 120}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn decodes_mixed_amounts_and_missing_series() {
        let kpi = sample();
        assert_eq!(kpi.total_revenue, 2000.0);
        assert_eq!(kpi.expenses_by_category["salaries"], 500.0);
        assert_eq!(kpi.monthly_data[0].operational_expenses, Some(60.0));
        assert_eq!(kpi.monthly_data[1].operational_expenses, None);
        assert_eq!(kpi.monthly_data[1].revenue, 90.0);
        assert!(kpi.daily_data.is_empty());
    }

    #[test]
    fn totals_in_fixed_order() {
        let labels: Vec<_> = sample().totals().into_iter().map(|p| p.label).collect();
        assert_eq!(labels, ["totalRevenue", "totalExpenses", "totalProfit"]);
    }

    #[test]
    fn breakdown_and_monthly_profit() {
        let kpi = sample();
        let breakdown = kpi.expense_breakdown();
        assert_eq!(breakdown.len(), 3);
        assert_eq!(breakdown[0].label, "salaries");

        let profit = kpi.monthly_profit();
        assert_eq!(profit[0].value, 50.0);
        assert_eq!(profit[1].value, -30.0);
    }
}
