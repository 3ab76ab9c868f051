//! dons - Donation journal statistics
//!
//! Scrapes the monthly donation journal of Wikimedia France, extracts the
//! per-day totals and exports them as CSV or a script array, and keeps a
//! small SQLite store of individual donations.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::DonsError;
