//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dons")]
#[command(about = "Parse donations data from dons.wikimedia.fr", long_about = None)]
#[command(version)]
#[command(subcommand_negates_reqs = true, allow_negative_numbers = true)]
pub struct Cli {
    /// Donation year (0-9999)
    #[arg(short, long, value_name = "YEAR", required = true)]
    pub year: Option<i64>,

    /// Donation month (1-12)
    #[arg(short, long, value_name = "MONTH", required_unless_present = "all")]
    pub month: Option<i64>,

    /// Export a single day page of the month instead of the month page
    #[arg(short, long, value_name = "DAY", requires = "month", conflicts_with = "all")]
    pub day: Option<i64>,

    /// Aggregate results of the whole year
    #[arg(short, long)]
    pub all: bool,

    /// Name of the JS var to export to (default output is CSV)
    #[arg(short, long, value_name = "NAME")]
    pub js: Option<String>,

    /// Config file (default: $DONS_CONFIG, then ./dons.toml)
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage individually recorded donations
    Records {
        /// Database file (default: `database` from the config)
        #[arg(long, value_name = "FILE")]
        db: Option<PathBuf>,

        #[command(subcommand)]
        action: RecordAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum RecordAction {
    /// Store one donation
    Add {
        /// Date in YYYY-mm-dd HH:MM:SS format
        date: String,

        /// Donator name
        name: String,

        /// Donation amount in euros
        amount: String,

        /// Free comment shown in the journal
        #[arg(default_value = "")]
        comment: String,
    },

    /// List every stored donation
    List,

    /// Drop and recreate the donations table
    Reset,
}
