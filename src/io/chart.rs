use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::domain::{format_amount, format_date, Amount};

/// Width, in characters, of the longest bar.
pub const DEFAULT_BAR_WIDTH: usize = 40;

const BAR_CHAR: char = '#';

/// Render per-date totals as a horizontal bar chart: one bar per date,
/// scaled so the largest total spans `width` characters.
pub fn render_bar_chart(totals: &BTreeMap<NaiveDate, Amount>, width: usize) -> String {
    let mut chart = String::from("Daily Expenses\n");

    let max = totals.values().copied().max().unwrap_or(Decimal::ZERO);
    let label_width = totals
        .values()
        .map(|t| format_amount(*t).len())
        .max()
        .unwrap_or(0);

    for (date, total) in totals {
        let bar = BAR_CHAR.to_string().repeat(bar_length(*total, max, width));
        chart.push_str(&format!(
            "{} | {:>label_width$} {}\n",
            format_date(*date),
            format_amount(*total),
            bar,
        ));
    }

    chart
}

fn bar_length(total: Amount, max: Amount, width: usize) -> usize {
    if max.is_zero() || total.is_zero() {
        return 0;
    }

    // total <= max, so the ratio stays within [0, 1]
    let scaled = (total / max)
        .checked_mul(Decimal::from(width))
        .map(|bar| bar.round().to_usize().unwrap_or(width))
        .unwrap_or(width);
    // Tiny non-zero totals still get a visible bar
    scaled.max(1)
}
