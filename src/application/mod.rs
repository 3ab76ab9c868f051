//! Application layer - Use cases and orchestration

pub mod aggregate_year;
pub mod export_month;
pub mod manage_records;

pub use aggregate_year::AggregateYearService;
pub use export_month::{fetch_month, ExportFormat, ExportMonthService};
pub use manage_records::RecordService;
