//! Writes a `View` out as a markdown table, JSON or CSV.

use crate::chart::{ChartSink, PieChart, TextChart};
use crate::model::{format_money, Expense};
use crate::view::View;
use crate::Result;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// The output format of a view.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Markdown table of the visible expenses, followed by the total and the category chart.
    #[default]
    Table,
    /// The whole view as pretty-printed JSON.
    Json,
    /// CSV with a header row and one row per visible expense.
    Csv,
}

serde_plain::derive_display_from_serialize!(Format);
serde_plain::derive_fromstr_from_deserialize!(Format);

const HEADERS: [&str; 5] = ["Date", "Description", "Amount", "Category", "Payment Method"];

/// A visible expense flattened to the columns of the table.
#[derive(Debug, Clone)]
struct Row {
    date: String,
    description: String,
    amount: String,
    category: String,
    payment_method: String,
}

impl From<&Expense> for Row {
    fn from(e: &Expense) -> Self {
        Self {
            date: e.date().to_string(),
            description: e.description().to_string(),
            amount: e.amount().to_string(),
            category: e.category().to_string(),
            payment_method: e.payment_method().to_string(),
        }
    }
}

impl Row {
    fn cells(&self) -> [&str; 5] {
        [
            &self.date,
            &self.description,
            &self.amount,
            &self.category,
            &self.payment_method,
        ]
    }
}

/// Writes `view` to `out` in the given format.
pub fn render(view: &View<'_>, format: Format, out: &mut impl Write) -> Result<()> {
    match format {
        Format::Table => render_table(view, out),
        Format::Json => render_json(view, out),
        Format::Csv => render_csv(view, out),
    }
}

fn render_table(view: &View<'_>, out: &mut impl Write) -> Result<()> {
    let rows: Vec<Row> = view.records().iter().map(|e| Row::from(*e)).collect();
    let mut table = String::new();
    table.push_str(&format!("| {} |\n", HEADERS.join(" | ")));
    table.push_str(&format!("|{}\n", " --- |".repeat(HEADERS.len())));
    for row in &rows {
        let cells: Vec<String> = row
            .cells()
            .iter()
            .enumerate()
            .map(|(ix, cell)| {
                // Amounts are shown in dollars, as entered.
                if ix == 2 {
                    format!("${}", escape_cell(cell))
                } else {
                    escape_cell(cell)
                }
            })
            .collect();
        table.push_str(&format!("| {} |\n", cells.join(" | ")));
    }
    write!(out, "{table}").context("Unable to write table")?;
    writeln!(out, "\nTotal Expenses: {}\n", format_money(view.total()))
        .context("Unable to write total")?;

    let chart = PieChart::from_totals(view.categories());
    TextChart::new(&mut *out).draw(&chart)
}

fn escape_cell(cell: &str) -> String {
    cell.replace('|', "\\|").replace('\n', " ")
}

fn render_json(view: &View<'_>, out: &mut impl Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, view).context("Unable to serialize view as JSON")?;
    writeln!(out).context("Unable to write JSON")?;
    Ok(())
}

fn render_csv(view: &View<'_>, out: &mut impl Write) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer
        .write_record(HEADERS)
        .context("Unable to write CSV header")?;
    for expense in view.records() {
        let row = Row::from(*expense);
        writer
            .write_record(row.cells())
            .context("Unable to write CSV row")?;
    }
    writer.flush().context("Unable to flush CSV output")?;
    Ok(())
}
