//! Pie chart data derived from the category totals, and sinks that draw it.

use crate::model::format_money;
use crate::view::CategoryTotals;
use crate::Result;
use anyhow::Context;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

/// The label of the category dataset.
pub const CHART_LABEL: &str = "Expenses by Category";

/// Width, in characters, of a slice that is the whole pie.
const BAR_WIDTH: usize = 30;

/// One slice of the pie.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Slice {
    pub label: String,
    pub value: Decimal,
    /// Percent of the whole pie, rounded to two places.
    pub share: Decimal,
}

/// The data a pie chart is drawn from.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct PieChart {
    pub label: String,
    pub slices: Vec<Slice>,
}

impl PieChart {
    pub fn from_totals(totals: &CategoryTotals) -> Self {
        let grand_total = totals.grand_total();
        let slices = totals
            .iter()
            .map(|t| Slice {
                label: t.category.clone(),
                value: t.total,
                share: share(t.total, grand_total),
            })
            .collect();
        Self {
            label: CHART_LABEL.to_string(),
            slices,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }
}

/// Percent of `grand_total` that `value` is. Saturates at the `Decimal` limits when the
/// quotient does not fit, which can only happen when categories of opposite sign cancel out.
fn share(value: Decimal, grand_total: Decimal) -> Decimal {
    if grand_total.is_zero() {
        return Decimal::ZERO;
    }
    value
        .checked_div(grand_total)
        .and_then(|fraction| fraction.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or_else(|| {
            if value.is_sign_negative() == grand_total.is_sign_negative() {
                Decimal::MAX
            } else {
                Decimal::MIN
            }
        })
        .round_dp(2)
}

/// Something that can draw a pie chart.
pub trait ChartSink {
    fn draw(&mut self, chart: &PieChart) -> Result<()>;
}

/// Draws a pie chart as text, one line per slice with a bar proportional to its share.
pub struct TextChart<W: Write> {
    out: W,
}

impl<W: Write> TextChart<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ChartSink for TextChart<W> {
    fn draw(&mut self, chart: &PieChart) -> Result<()> {
        writeln!(self.out, "{}", chart.label).context("Unable to write chart")?;
        if chart.is_empty() {
            writeln!(self.out, "  (no expenses)").context("Unable to write chart")?;
            return Ok(());
        }
        let width = chart
            .slices
            .iter()
            .map(|s| s.label.chars().count())
            .max()
            .unwrap_or_default();
        for slice in &chart.slices {
            let bar = "#".repeat(bar_len(slice.share));
            writeln!(
                self.out,
                "  {:<width$}  {:<BAR_WIDTH$}  {:>7}%  {}",
                slice.label,
                bar,
                slice.share,
                format_money(slice.value),
            )
            .context("Unable to write chart")?;
        }
        Ok(())
    }
}

fn bar_len(share: Decimal) -> usize {
    let fraction = share.to_f64().unwrap_or_default() / 100.0;
    (fraction * BAR_WIDTH as f64).round().clamp(0.0, BAR_WIDTH as f64) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PaymentMethod;
    use crate::test::{add, dec, sample_store};

    #[test]
    fn test_from_totals() {
        let store = sample_store();
        let chart = PieChart::from_totals(store.view().categories());
        assert_eq!(chart.label, CHART_LABEL);
        assert_eq!(chart.slices.len(), 2);
        assert_eq!(chart.slices[0].label, "food");
        assert_eq!(chart.slices[0].value, dec("10"));
        assert_eq!(chart.slices[0].share, dec("33.33"));
        assert_eq!(chart.slices[1].share, dec("66.67"));
    }

    #[test]
    fn test_zero_grand_total() {
        assert_eq!(share(dec("5"), Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_share_of_huge_totals() {
        let big = dec("1000000000000000000000000000");
        assert_eq!(share(big, big), dec("100"));
        assert_eq!(
            share(dec("79228162514264337593543950335"), dec("79228162514264337593543950335")),
            dec("100")
        );
        // Opposite-signed categories can leave a tiny grand total.
        assert_eq!(share(big, dec("0.0001")), Decimal::MAX);
        assert_eq!(share(-big, dec("0.0001")), Decimal::MIN);
    }

    #[test]
    fn test_chart_from_scientific_amount() {
        let mut store = crate::Store::new();
        add(&mut store, "1e27", "yacht", "2024-01-01", "toys", PaymentMethod::Credit);
        let chart = PieChart::from_totals(store.view().categories());
        assert_eq!(chart.slices[0].share, dec("100"));
        let mut sink = TextChart::new(Vec::new());
        sink.draw(&chart).unwrap();
        let text = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(text.lines().nth(1).unwrap().matches('#').count(), BAR_WIDTH);
    }

    #[test]
    fn test_bar_len() {
        assert_eq!(bar_len(dec("100")), BAR_WIDTH);
        assert_eq!(bar_len(dec("50")), BAR_WIDTH / 2);
        assert_eq!(bar_len(dec("-20")), 0);
        assert_eq!(bar_len(dec("250")), BAR_WIDTH);
    }

    #[test]
    fn test_text_chart() {
        let store = sample_store();
        let chart = PieChart::from_totals(store.view().categories());
        let mut sink = TextChart::new(Vec::new());
        sink.draw(&chart).unwrap();
        let text = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], CHART_LABEL);
        assert!(lines[1].contains("food"));
        assert!(lines[1].contains("33.33%"));
        assert!(lines[1].contains("$10.00"));
        assert!(lines[2].contains("transport"));
        assert_eq!(lines[2].matches('#').count(), 20);
    }

    #[test]
    fn test_text_chart_empty() {
        let chart = PieChart::from_totals(&CategoryTotals::default());
        let mut sink = TextChart::new(Vec::new());
        sink.draw(&chart).unwrap();
        let text = String::from_utf8(sink.into_inner()).unwrap();
        assert!(text.contains("(no expenses)"));
    }
}
