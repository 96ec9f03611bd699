//! Command-line front end for the dashboard SDK.
//!
//! ```bash
//! # Show the KPI summary
//! bizdash kpis
//!
//! # Suggest prices for every product
//! bizdash --ml-url http://localhost:8000 suggest
//!
//! # Generate one chart and save it
//! bizdash generate "Bar Chart of revenue" --out revenue.png
//!
//! # Interactive chart chat
//! bizdash chat
//! ```

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use bizdash_sdk::chat::SUGGESTED_PROMPTS;
use bizdash_sdk::models::ChatMessage;
use bizdash_sdk::{ChatSession, DashboardSdk, PricingView, Result};
use clap::{Parser, Subcommand};
use tracing::info;

#[derive(Parser)]
#[command(
    name = "bizdash",
    about = "Business dashboard client",
    long_about = "Query KPIs, products and transactions, request price suggestions, and generate charts from prompts."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Core REST API base URL (overrides DASHBOARD_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// ML API base URL (overrides DASHBOARD_ML_URL)
    #[arg(long, global = true)]
    ml_url: Option<String>,

    /// Chart-generation endpoint URL (overrides DASHBOARD_CHART_URL)
    #[arg(long, global = true)]
    chart_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Show KPI totals, expense breakdown and monthly figures
    Kpis,
    /// List products with margin and sales volume
    Products,
    /// List transactions
    Transactions,
    /// Suggest a price for every product
    Suggest,
    /// Generate a single chart from a prompt
    Generate {
        prompt: String,
        /// Where to write the PNG, if one is returned
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Interactive chart chat
    Chat {
        /// Directory for returned chart images
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// Check the ML API is up
    Health,
}

fn build_sdk(cli: &Cli) -> Result<DashboardSdk> {
    let mut builder = DashboardSdk::builder();
    if let Some(url) = &cli.api_url {
        builder = builder.api_url(url);
    }
    if let Some(url) = &cli.ml_url {
        builder = builder.ml_url(url);
    }
    if let Some(url) = &cli.chart_url {
        builder = builder.chart_url(url);
    }
    if let Some(secs) = cli.timeout {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    builder.from_env()?.build()
}

fn print_kpis(sdk: &DashboardSdk) -> Result<()> {
    let Some(kpi) = sdk.kpis().current()? else {
        println!("No KPI records.");
        return Ok(());
    };
    println!("{:<24} {:>14}", "metric", "value");
    for point in kpi.totals() {
        println!("{:<24} {:>14.2}", point.label, point.value);
    }
    println!();
    println!("{:<24} {:>14}", "category", "expenses");
    for point in kpi.expense_breakdown() {
        println!("{:<24} {:>14.2}", point.label, point.value);
    }
    println!();
    println!("{:<12} {:>14} {:>14}", "month", "revenue", "expenses");
    for month in &kpi.monthly_data {
        println!("{:<12} {:>14.2} {:>14.2}", month.month, month.revenue, month.expenses);
    }
    Ok(())
}

fn print_products(sdk: &DashboardSdk) -> Result<()> {
    let products = sdk.products().list()?;
    println!("{:<26} {:>10} {:>10} {:>10} {:>6}", "id", "price", "expense", "margin", "sales");
    for p in &products {
        println!(
            "{:<26} {:>10.2} {:>10.2} {:>10.2} {:>6}",
            p.id,
            p.price,
            p.expense,
            p.margin(),
            p.sales_volume()
        );
    }
    info!(count = products.len(), "products listed");
    Ok(())
}

fn print_transactions(sdk: &DashboardSdk) -> Result<()> {
    let transactions = sdk.transactions().list()?;
    println!("{:<26} {:<20} {:>10} {:>8}", "id", "buyer", "amount", "items");
    for t in &transactions {
        println!("{:<26} {:<20} {:>10.2} {:>8}", t.id, t.buyer, t.amount, t.product_count());
    }
    Ok(())
}

fn print_suggestions(sdk: &DashboardSdk) -> Result<()> {
    let mut view = PricingView::new();
    sdk.refresh_pricing(&mut view)?;
    if view.rows().is_empty() {
        println!("No products to price.");
        return Ok(());
    }
    println!(
        "{:<26} {:>9} {:>9} {:>6} {:>10} {:>10} {:>12}",
        "product", "price", "expense", "sales", "suggested", "predicted", "revenue"
    );
    for row in view.rows() {
        println!(
            "{:<26} {:>9.2} {:>9.2} {:>6} {:>10.2} {:>10} {:>12.2}",
            row.product_id,
            row.price,
            row.expense,
            row.sales_volume,
            row.suggested_price,
            row.predicted_sales,
            row.expected_revenue
        );
    }
    Ok(())
}

/// Print an assistant reply and write its image to `path` when present.
fn show_reply(reply: &ChatMessage, path: Option<&Path>) -> Result<()> {
    println!("assistant> {}", reply.content().unwrap_or_default());
    if let (Some(bytes), Some(path)) = (reply.image_bytes()?, path) {
        std::fs::write(path, &bytes)?;
        println!("           chart saved to {}", path.display());
    }
    Ok(())
}

fn generate(sdk: &DashboardSdk, prompt: &str, out: Option<&Path>) -> Result<()> {
    let mut chat = ChatSession::new();
    match sdk.send_chat(&mut chat, prompt) {
        Some(reply) => show_reply(reply, out),
        None => {
            println!("Nothing to send: the prompt is empty.");
            Ok(())
        }
    }
}

fn chat_loop(sdk: &DashboardSdk, out_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(out_dir)?;
    let mut chat = ChatSession::new();
    let client = sdk.charts();
    let mut charts = 0usize;

    println!("Ask for a chart. Shortcuts:");
    for (i, prompt) in SUGGESTED_PROMPTS.iter().enumerate() {
        println!("  :{} {}", i + 1, prompt);
    }
    println!("  :q quit");

    let stdin = io::stdin();
    loop {
        print!("you> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();

        if line == ":q" {
            break;
        }
        if let Some(n) = line.strip_prefix(':').and_then(|n| n.parse::<usize>().ok()) {
            if n == 0 || !chat.use_suggestion(n - 1) {
                println!("No shortcut :{n}");
                continue;
            }
            println!("you> {}", chat.input());
        } else {
            chat.set_input(line);
        }

        let path = out_dir.join(format!("chart-{}.png", charts + 1));
        if let Some(reply) = chat.submit(&client) {
            if reply.image_base64().is_some() {
                charts += 1;
            }
            show_reply(reply, Some(path.as_path()))?;
        }
    }
    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    let sdk = build_sdk(cli)?;
    info!(%sdk, "client ready");

    match &cli.command {
        Command::Kpis => print_kpis(&sdk),
        Command::Products => print_products(&sdk),
        Command::Transactions => print_transactions(&sdk),
        Command::Suggest => print_suggestions(&sdk),
        Command::Generate { prompt, out } => generate(&sdk, prompt, out.as_deref()),
        Command::Chat { out_dir } => chat_loop(&sdk, out_dir),
        Command::Health => {
            let status = sdk.health().ping_ml()?;
            println!("ML API: {}", status.message);
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            ExitCode::FAILURE
        }
    }
}
