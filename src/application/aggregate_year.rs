//! Annual aggregation use case

use crate::application::export_month::fetch_month;
use crate::domain::{AnnualSummary, DailyAggregate, YearMonth};
use crate::error::Result;
use crate::infrastructure::PageSource;
use std::collections::BTreeMap;

/// Service totalling a whole year of month pages
pub struct AggregateYearService<S: PageSource> {
    source: S,
}

impl<S: PageSource> AggregateYearService<S> {
    pub fn new(source: S) -> Self {
        AggregateYearService { source }
    }

    /// Every reported day of the year, keyed by `YYYY-MM-DD`.
    /// Months are fetched January to December; the first failure stops the run.
    pub fn collect(&self, year: u16) -> Result<BTreeMap<String, DailyAggregate>> {
        let mut all_days = BTreeMap::new();
        for period in YearMonth::months_of(year) {
            let days = fetch_month(&self.source, period)?;
            for (day, aggregate) in &days {
                all_days.insert(period.date_key(day), *aggregate);
            }
        }
        Ok(all_days)
    }

    pub fn execute(&self, year: u16) -> Result<AnnualSummary> {
        Ok(AnnualSummary::from_days(&self.collect(year)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{journal_page, StaticPages};
    use crate::error::DonsError;

    fn year_of_pages() -> StaticPages {
        let mut pages = StaticPages::default();
        for month in 1..=12u64 {
            let url = format!("http://journal.test/journal/2014-{:02}", month);
            let body = if month % 2 == 0 {
                journal_page(&[(1, month, month * 100), (15, 2, 30)])
            } else {
                journal_page(&[(3, month + 1, 50)])
            };
            pages = pages.with(&url, &body);
        }
        pages
    }

    #[test]
    fn test_totals_match_month_sums() {
        let service = AggregateYearService::new(year_of_pages());

        let mut expected_quantity = 0;
        let mut expected_sum = 0;
        for month in 1..=12u64 {
            if month % 2 == 0 {
                expected_quantity += month + 2;
                expected_sum += month * 100 + 30;
            } else {
                expected_quantity += month + 1;
                expected_sum += 50;
            }
        }

        let summary = service.execute(2014).unwrap();
        assert_eq!(summary.days, 6 * 2 + 6);
        assert_eq!(summary.total_quantity, expected_quantity);
        assert_eq!(summary.total_sum, expected_sum);
    }

    #[test]
    fn test_months_fetched_in_order() {
        let service = AggregateYearService::new(year_of_pages());
        service.collect(2014).unwrap();

        let requested = service.source.requested.borrow();
        let expected: Vec<String> = (1..=12)
            .map(|m| format!("http://journal.test/journal/2014-{:02}", m))
            .collect();
        assert_eq!(*requested, expected);
    }

    #[test]
    fn test_days_keyed_by_full_date() {
        let service = AggregateYearService::new(year_of_pages());
        let days = service.collect(2014).unwrap();
        assert!(days.contains_key("2014-01-03"));
        assert!(days.contains_key("2014-12-15"));
        assert_eq!(days["2014-02-01"].sum(), 200);
    }

    #[test]
    fn test_missing_month_stops_the_year() {
        let pages = StaticPages::default().with(
            "http://journal.test/journal/2014-01",
            &journal_page(&[(1, 1, 10)]),
        );
        let service = AggregateYearService::new(pages);
        match service.execute(2014) {
            Err(DonsError::Fetch { url, .. }) => assert!(url.ends_with("2014-02")),
            other => panic!("Expected Fetch error, got {:?}", other),
        }
    }
}
