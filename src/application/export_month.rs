//! Monthly export use case

use crate::domain::{DailyAggregates, DonationLineExtractor, MonthlyReport, YearMonth};
use crate::error::Result;
use crate::infrastructure::PageSource;
use tracing::info;

/// How a month of aggregates is rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    /// Script array bound to the given variable name
    ArrayLiteral(String),
}

impl ExportFormat {
    pub fn from_js_name(js: Option<String>) -> Self {
        match js {
            Some(name) => ExportFormat::ArrayLiteral(name),
            None => ExportFormat::Csv,
        }
    }

    pub fn render(&self, period: YearMonth, days: &DailyAggregates) -> String {
        let report = MonthlyReport::new(period, days);
        match self {
            ExportFormat::Csv => report.to_csv(),
            ExportFormat::ArrayLiteral(name) => report.to_array_literal(name),
        }
    }
}

/// Fetch a month page and extract its day aggregates
pub fn fetch_month<S: PageSource + ?Sized>(
    source: &S,
    period: YearMonth,
) -> Result<DailyAggregates> {
    let url = period.month_url(source.base_url());
    let page = source.fetch(&url)?;
    let days = DonationLineExtractor::extract(&page)?;
    info!(%url, days = days.len(), "month extracted");
    Ok(days)
}

/// Service exporting one month (or one day page) of aggregates
pub struct ExportMonthService<S: PageSource> {
    source: S,
}

impl<S: PageSource> ExportMonthService<S> {
    pub fn new(source: S) -> Self {
        ExportMonthService { source }
    }

    pub fn fetch_month(&self, period: YearMonth) -> Result<DailyAggregates> {
        fetch_month(&self.source, period)
    }

    /// Fetch a single day page. The day is checked against the calendar first.
    pub fn fetch_day(&self, period: YearMonth, day: i64) -> Result<DailyAggregates> {
        let url = period.day_url(self.source.base_url(), day)?;
        let page = self.source.fetch(&url)?;
        DonationLineExtractor::extract(&page)
    }

    /// Fetch, extract and render a month, or a single day when `day` is given
    pub fn execute(
        &self,
        period: YearMonth,
        day: Option<i64>,
        format: &ExportFormat,
    ) -> Result<String> {
        let days = match day {
            Some(day) => self.fetch_day(period, day)?,
            None => self.fetch_month(period)?,
        };
        Ok(format.render(period, &days))
    }
}
