//! Domain layer - Donation journal models and parsing

pub mod aggregate;
pub mod extractor;
pub mod markup;
pub mod period;
pub mod record;
pub mod report;

pub use aggregate::{DailyAggregate, DailyAggregates};
pub use extractor::DonationLineExtractor;
pub use period::{YearMonth, DEFAULT_BASE_URL};
pub use record::{DonationRecord, RecordSink};
pub use report::{AnnualSummary, MonthlyReport};
