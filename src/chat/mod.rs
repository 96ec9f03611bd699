//! Chat-driven chart generation.
//!
//! [`ChatSession`] owns the message log and the single-flight submission
//! state; [`ChartClient`] performs the one HTTP call each submission makes.

pub mod client;
pub mod session;

pub use client::{ChartClient, ChartResponse};
pub use session::{ChartRequest, ChatEvent, ChatSession, ChatState};

/// Caption attached to every chart image.
pub const IMAGE_CAPTION: &str = "Here is your chart.";

/// Reply when the server answered without an image.
pub const NO_IMAGE_TEXT: &str = "I didn't receive an image from the server.";

/// Reply when the request failed.
pub const FAILURE_TEXT: &str = "Sorry, something went wrong while generating the chart.";

/// Prompts offered as one-click shortcuts. Picking one only fills the input.
pub const SUGGESTED_PROMPTS: [&str; 4] = [
    "Bar Chart of revenue",
    "Pie chart of expenses by category",
    "Line chart of monthly revenue and expenses",
    "Scatter plot of product price vs expense",
];
