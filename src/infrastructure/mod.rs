//! Infrastructure layer - External I/O and persistence

pub mod config;
pub mod fetcher;
pub mod store;

pub use config::Config;
pub use fetcher::{HttpPageSource, PageSource};
pub use store::DonationStore;
