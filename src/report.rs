//! Presentation of a ranking run: a results table, the recommendation and notes.

use analyzer::{SkippedTicker, Summary};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use configuration::UniverseEntry;
use core_types::DateWindow;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

const NOTES: [&str; 4] = [
    "The Sharpe Ratio indicates the risk-adjusted return. A higher Sharpe Ratio is preferable.",
    "Max Drawdown reflects the largest observed loss from a peak to a trough. Lower values are better.",
    "Annualized Standard Deviation provides insight into the volatility of returns.",
    "Past performance is not indicative of future results. Always conduct thorough research.",
];

fn fmt_pct(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

/// Undefined metrics (no return dispersion) render as `n/a`.
fn fmt_metric(value: Option<Decimal>) -> String {
    value.map(fmt_pct).unwrap_or_else(|| "n/a".to_string())
}

fn numeric(text: String) -> Cell {
    Cell::new(text).set_alignment(CellAlignment::Right)
}

/// The performance table, in universe order.
pub fn summary_table(summary: &Summary) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "Ticker",
            "Company Name",
            "Stock Return (%)",
            "Sharpe Ratio",
            "Max Drawdown (%)",
            "Annualized Std Dev (%)",
        ]);

    for record in summary.records() {
        table.add_row(vec![
            Cell::new(&record.ticker),
            Cell::new(&record.name),
            numeric(fmt_pct(record.total_return_pct)),
            numeric(fmt_metric(record.sharpe_ratio)),
            numeric(fmt_pct(record.max_drawdown_pct)),
            numeric(fmt_metric(record.annualized_std_dev_pct)),
        ]);
    }

    table
}

pub fn recommendation(summary: &Summary) -> String {
    let best = summary.best();
    format!(
        "The recommended stock to buy based on the highest performance over the period is {} ({}) with a stock return of {}%.",
        best.name,
        best.ticker,
        fmt_pct(best.total_return_pct)
    )
}

pub fn render_table(summary: &Summary, skipped: &[SkippedTicker], window: DateWindow) -> String {
    let mut out = format!(
        "Stock Performance Summary ({} to {})\n{}\n",
        window.start(),
        window.end(),
        summary_table(summary)
    );

    if !skipped.is_empty() {
        out.push_str("\nSkipped\n");
        for skip in skipped {
            out.push_str(&format!("  {}: {}\n", skip.ticker, skip.reason));
        }
    }

    out.push_str("\nRecommendation\n");
    out.push_str(&recommendation(summary));
    out.push_str("\n\nNotes\n");
    for (i, note) in NOTES.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, note));
    }

    out
}

#[derive(Serialize)]
struct JsonReport<'a> {
    window: DateWindow,
    summary: &'a Summary,
    skipped: &'a [SkippedTicker],
}

pub fn render_json(
    summary: &Summary,
    skipped: &[SkippedTicker],
    window: DateWindow,
) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport {
        window,
        summary,
        skipped,
    })
}

pub fn render_universe(universe: &[UniverseEntry]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec!["Ticker", "Company Name"]);
    for entry in universe {
        table.add_row(vec![entry.ticker.as_str(), entry.display_name()]);
    }
    table
}
