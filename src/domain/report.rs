//! Monthly and annual donation reports

use crate::domain::aggregate::{DailyAggregate, DailyAggregates};
use crate::domain::period::YearMonth;
use std::collections::BTreeMap;
use std::fmt;

const HEADER: &str = "'day', 'sum', 'quantity', 'avg'";

/// One month of day aggregates, ready to be rendered
#[derive(Debug, Clone, Copy)]
pub struct MonthlyReport<'a> {
    period: YearMonth,
    days: &'a DailyAggregates,
}

impl<'a> MonthlyReport<'a> {
    pub fn new(period: YearMonth, days: &'a DailyAggregates) -> Self {
        MonthlyReport { period, days }
    }

    /// Rows in ascending day order
    fn rows(&self) -> impl Iterator<Item = String> + 'a {
        let period = self.period;
        let days = self.days;
        days.iter().map(move |(day, aggregate)| {
            format!(
                "'{}', {}, {}, {:.2}",
                period.date_key(day),
                aggregate.sum(),
                aggregate.quantity(),
                aggregate.avg()
            )
        })
    }

    /// Header line followed by one newline-terminated line per day
    pub fn to_csv(&self) -> String {
        let mut output = String::new();
        output.push_str(HEADER);
        output.push('\n');
        for row in self.rows() {
            output.push_str(&row);
            output.push('\n');
        }
        output
    }

    /// `var <name> = [ ... ];` with the last data row left without a comma
    pub fn to_array_literal(&self, var_name: &str) -> String {
        let rows: Vec<String> = self.rows().collect();
        let mut output = format!("var {} = [\n[{}],\n", var_name, HEADER);
        for (i, row) in rows.iter().enumerate() {
            let separator = if i + 1 == rows.len() { "" } else { "," };
            output.push_str(&format!("[{}]{}\n", row, separator));
        }
        output.push_str("];\n");
        output
    }
}

/// Free-function form of [`MonthlyReport::to_csv`]
pub fn to_csv(days: &DailyAggregates, period: YearMonth) -> String {
    MonthlyReport::new(period, days).to_csv()
}

/// Free-function form of [`MonthlyReport::to_array_literal`]
pub fn to_array_literal(var_name: &str, days: &DailyAggregates, period: YearMonth) -> String {
    MonthlyReport::new(period, days).to_array_literal(var_name)
}

/// Whole-year totals. Averages are deliberately absent at this level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnnualSummary {
    pub days: usize,
    pub total_quantity: u64,
    pub total_sum: u64,
}

impl AnnualSummary {
    /// Reduce days keyed by full ISO date. Totals saturate at `u64::MAX`.
    pub fn from_days(days: &BTreeMap<String, DailyAggregate>) -> Self {
        days.values().fold(
            AnnualSummary {
                days: days.len(),
                ..Default::default()
            },
            |mut acc, day| {
                acc.total_quantity = acc.total_quantity.saturating_add(day.quantity());
                acc.total_sum = acc.total_sum.saturating_add(day.sum());
                acc
            },
        )
    }
}

impl fmt::Display for AnnualSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} days of donations", self.days)?;
        writeln!(f, "Total donations: {}", self.total_sum)?;
        writeln!(f, "Total donators: {}", self.total_quantity)
    }
}
