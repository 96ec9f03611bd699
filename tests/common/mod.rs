//! Shared test fixtures for the dashboard SDK integration tests.
//!
//! Provides `MockTransport`, an in-memory [`Transport`] with canned replies
//! per method and URL that records every request, plus sample documents for
//! the three core API collections.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use bizdash_sdk::{DashboardError, DashboardSdk, Result, Transport};
use serde_json::{json, Value};

pub const API: &str = "http://api.test";
pub const ML: &str = "http://ml.test";
pub const CHART: &str = "http://ml.test/dashboard/generate";

pub const KPIS_URL: &str = "http://api.test/kpi/kpis/";
pub const PRODUCTS_URL: &str = "http://api.test/product/products/";
pub const TRANSACTIONS_URL: &str = "http://api.test/transaction/transactions/";
pub const SUGGEST_URL: &str = "http://ml.test/suggest-price";

// ---------------------------------------------------------------------------
// MockTransport
// ---------------------------------------------------------------------------

/// What the mock answers with.
#[derive(Clone, Debug)]
pub enum MockReply {
    Json(Value),
    Status(u16),
    Unreachable,
    Delayed(Duration, Box<MockReply>),
}

type Responder = Arc<dyn Fn(&Value) -> MockReply + Send + Sync>;

#[derive(Clone, Debug, PartialEq)]
pub struct Recorded {
    pub method: &'static str,
    pub url: String,
    pub body: Option<Value>,
}

#[derive(Default)]
pub struct MockTransport {
    queued: Mutex<HashMap<(&'static str, String), VecDeque<MockReply>>>,
    responders: Mutex<HashMap<String, Responder>>,
    requests: Mutex<Vec<Recorded>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queue a reply for the next `GET url`.
    pub fn on_get(&self, url: &str, reply: MockReply) {
        self.queue("GET", url, reply);
    }

    /// Queue a reply for the next `POST url`.
    pub fn on_post(&self, url: &str, reply: MockReply) {
        self.queue("POST", url, reply);
    }

    /// Answer every `POST url` by computing a reply from its body.
    /// Queued replies take precedence.
    pub fn respond_post<F>(&self, url: &str, f: F)
    where
        F: Fn(&Value) -> MockReply + Send + Sync + 'static,
    {
        self.responders.lock().unwrap().insert(url.to_string(), Arc::new(f));
    }

    fn queue(&self, method: &'static str, url: &str, reply: MockReply) {
        self.queued
            .lock()
            .unwrap()
            .entry((method, url.to_string()))
            .or_default()
            .push_back(reply);
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count(&self, method: &str, url: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.method == method && r.url == url)
            .count()
    }

    fn answer(&self, method: &'static str, url: &str, body: Option<&Value>) -> Result<Value> {
        self.requests.lock().unwrap().push(Recorded {
            method,
            url: url.to_string(),
            body: body.cloned(),
        });

        let queued = self
            .queued
            .lock()
            .unwrap()
            .get_mut(&(method, url.to_string()))
            .and_then(VecDeque::pop_front);
        let reply = match queued {
            Some(reply) => reply,
            None => {
                let responder = self.responders.lock().unwrap().get(url).cloned();
                match (responder, body) {
                    (Some(f), Some(body)) => f(body),
                    _ => MockReply::Status(404),
                }
            }
        };
        resolve(reply, url)
    }
}

fn resolve(reply: MockReply, url: &str) -> Result<Value> {
    match reply {
        MockReply::Json(v) => Ok(v),
        MockReply::Status(status) => Err(DashboardError::Status {
            status,
            url: url.to_string(),
        }),
        MockReply::Unreachable => Err(DashboardError::Unreachable(format!("connection refused: {url}"))),
        MockReply::Delayed(delay, inner) => {
            std::thread::sleep(delay);
            resolve(*inner, url)
        }
    }
}

impl Transport for MockTransport {
    fn get_json(&self, url: &str) -> Result<Value> {
        self.answer("GET", url, None)
    }

    fn post_json(&self, url: &str, body: &Value) -> Result<Value> {
        self.answer("POST", url, Some(body))
    }
}

/// Build an SDK wired to `mock` with the test endpoints.
pub fn sdk_with(mock: &Arc<MockTransport>) -> DashboardSdk {
    DashboardSdk::builder()
        .api_url(API)
        .ml_url(ML)
        .chart_url(CHART)
        .transport(mock.clone())
        .build()
        .unwrap()
}

// ---------------------------------------------------------------------------
// Sample documents
// ---------------------------------------------------------------------------

pub fn sample_kpis() -> Value {
    json!([{
        "_id": "kpi-001",
        "totalRevenue": "$212,000.00",
        "totalExpenses": "$142,000.00",
        "totalProfit": "$70,000.00",
        "expensesByCategory": {
            "salaries": "$38,000.00",
            "supplies": "$56,000.00",
            "services": "$48,000.00"
        },
        "monthlyData": [
            {"month": "january", "revenue": 15000, "expenses": 10000, "operationalExpenses": 7000, "nonOperationalExpenses": 3000},
            {"month": "february", "revenue": 17000, "expenses": 12000, "operationalExpenses": 8000, "nonOperationalExpenses": 4000},
            {"month": "march", "revenue": 19000, "expenses": 11000, "operationalExpenses": 8500, "nonOperationalExpenses": 2500}
        ],
        "dailyData": [
            {"date": "2021-01-01", "revenue": 500, "expenses": 320},
            {"date": "2021-01-02", "revenue": 560, "expenses": 300}
        ]
    }])
}

pub fn sample_products() -> Value {
    json!([
        {"_id": "prod-001", "price": "$43.00", "expense": "$23.00", "transactions": ["tx-001", "tx-002", "tx-003"]},
        {"_id": "prod-002", "price": 80.5, "expense": 40.25, "transactions": []},
        {"_id": "prod-003", "price": 12, "expense": 6, "transactions": [
            {"_id": "tx-004", "buyer": "Dana", "amount": 12, "productIds": ["prod-003"]}
        ]}
    ])
}

pub fn sample_transactions() -> Value {
    json!([
        {"_id": "tx-001", "buyer": "Ann", "amount": "$43.00", "productIds": ["prod-001"]},
        {"_id": "tx-002", "buyer": "Ben", "amount": 123.5, "productIds": ["prod-001", "prod-002"]},
        {"_id": "tx-003", "buyer": "Cy", "amount": 43, "productIds": ["prod-001"]},
        {"_id": "tx-004", "buyer": "Dana", "amount": 12, "productIds": ["prod-003"]}
    ])
}

/// One suggestion per posted input: price + 1, three sales.
pub fn echo_suggestions(body: &Value) -> MockReply {
    let items = body.as_array().cloned().unwrap_or_default();
    let out: Vec<Value> = items
        .iter()
        .map(|item| {
            let price = item["price"].as_f64().unwrap_or(0.0) + 1.0;
            json!({
                "suggested_price": price,
                "predicted_sales": 3,
                "expected_revenue": price * 3.0
            })
        })
        .collect();
    MockReply::Json(Value::Array(out))
}
