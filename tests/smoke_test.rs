//! Smoke test against running services.
//!
//! Reads `DASHBOARD_API_URL`, `DASHBOARD_ML_URL` and `DASHBOARD_CHART_URL`
//! (falling back to the local defaults) and exercises every public SDK call.
//!
//! Run with:
//! ```sh
//! cargo test --test smoke_test -- --ignored --nocapture
//! ```

use bizdash_sdk::{CacheTag, ChatSession, DashboardSdk, PricingState, PricingView};

/// Counters for pass/fail reporting.
struct Counters {
    pass: usize,
    fail: usize,
}

impl Counters {
    fn check(&mut self, label: &str, condition: bool, detail: &str) {
        let status = if condition { "PASS" } else { "FAIL" };
        if condition {
            self.pass += 1;
        } else {
            self.fail += 1;
        }
        eprintln!("  [{}] {} {}", status, label, detail);
    }
}

#[test]
#[ignore]
fn smoke_test() {
    let sdk = DashboardSdk::builder().from_env().unwrap().build().unwrap();
    let mut c = Counters { pass: 0, fail: 0 };
    eprintln!("{sdk}");

    match sdk.health().ping_ml() {
        Ok(status) => c.check("ml health", true, &status.message),
        Err(e) => c.check("ml health", false, &e.to_string()),
    }

    match sdk.kpis().list() {
        Ok(kpis) => c.check("kpis", !kpis.is_empty(), &format!("{} records", kpis.len())),
        Err(e) => c.check("kpis", false, &e.to_string()),
    }
    c.check("kpis cached", sdk.is_cached(CacheTag::Kpis), "");

    let products = sdk.products().list();
    match &products {
        Ok(p) => c.check("products", !p.is_empty(), &format!("{} records", p.len())),
        Err(e) => c.check("products", false, &e.to_string()),
    }

    match sdk.transactions().list() {
        Ok(t) => c.check("transactions", !t.is_empty(), &format!("{} records", t.len())),
        Err(e) => c.check("transactions", false, &e.to_string()),
    }

    let mut view = PricingView::new();
    match sdk.refresh_pricing(&mut view) {
        Ok(outcome) => c.check(
            "pricing",
            view.state() == &PricingState::Ready,
            &format!("{outcome:?}, {} rows", view.rows().len()),
        ),
        Err(e) => c.check("pricing", false, &e.to_string()),
    }
    if let Ok(products) = &products {
        c.check("pricing rows aligned", view.rows().len() == products.len(), "");
    }

    let mut chat = ChatSession::new();
    let reply = sdk.send_chat(&mut chat, "Bar Chart of revenue");
    let detail = reply.and_then(|m| m.content()).unwrap_or("no reply").to_string();
    c.check("chart", chat.messages().len() == 2, &detail);

    eprintln!("\n  {} passed, {} failed", c.pass, c.fail);
    assert_eq!(c.fail, 0);
}
