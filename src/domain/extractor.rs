//! Extraction of the daily "Total des dons pour le ..." summary lines
//!
//! The journal renders each day's totals as an emphasized sentence inside a
//! table cell spanning four columns. The scanner below follows the markup
//! events of a page and only collects text while it sits inside that
//! emphasis, then decodes the sentence once the cell closes.

use crate::domain::aggregate::{day_key, DailyAggregate, DailyAggregates};
use crate::domain::markup::{MarkupDocument, MarkupEvent};
use crate::error::{DonsError, Result};
use regex::Regex;
use std::sync::OnceLock;
use tracing::{debug, warn};

/// Literal opening of a day summary sentence
pub const SUMMARY_PREFIX: &str = "Total des dons pour le";

const CELL_TAG: &str = "td";
const EMPHASIS_TAG: &str = "em";
const SUMMARY_COLSPAN: &str = "4";

/// Day, count and total in a whitespace-free summary line
fn summary_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(
            r"^Totaldesdonspourle(?P<day>\d+)\D+(?P<quantity>\d+)\D+(?P<sum>\d+)\D*$",
        )
        .unwrap()
    })
}

/// Where the scanner sits relative to the summary cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Scanning,
    InSummaryCell,
    InSummaryText,
}

/// What the scanner should do with one event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Ignore,
    Enter(ScanState),
    Append,
    CloseCell,
}

/// Transition table keyed by current state and event
fn transition(state: ScanState, event: &MarkupEvent<'_>) -> Action {
    use ScanState::*;

    match (state, event) {
        (Scanning, MarkupEvent::Start { name: CELL_TAG, .. })
            if event.attr("colspan") == Some(SUMMARY_COLSPAN) =>
        {
            Action::Enter(InSummaryCell)
        }
        (InSummaryCell, MarkupEvent::Start { name: EMPHASIS_TAG, .. }) => {
            Action::Enter(InSummaryText)
        }
        (InSummaryText, MarkupEvent::Text(_)) => Action::Append,
        (InSummaryText, MarkupEvent::End { name: EMPHASIS_TAG }) => Action::Enter(InSummaryCell),
        (InSummaryCell, MarkupEvent::End { name: CELL_TAG }) => Action::CloseCell,
        _ => Action::Ignore,
    }
}

/// Scanner accumulating day aggregates from a page's markup events
#[derive(Debug)]
pub struct DonationLineExtractor {
    state: ScanState,
    line: String,
    donations: DailyAggregates,
}

impl Default for DonationLineExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl DonationLineExtractor {
    pub fn new() -> Self {
        DonationLineExtractor {
            state: ScanState::Scanning,
            line: String::new(),
            donations: DailyAggregates::new(),
        }
    }

    /// Parse a whole page and return the days it reports
    pub fn extract(source: &str) -> Result<DailyAggregates> {
        let document = MarkupDocument::parse(source);
        let mut extractor = Self::new();
        for event in document.events() {
            extractor.feed(&event)?;
        }
        Ok(extractor.finish())
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Advance the scanner by one event
    pub fn feed(&mut self, event: &MarkupEvent<'_>) -> Result<()> {
        match transition(self.state, event) {
            Action::Ignore => {}
            Action::Enter(next) => {
                debug!(from = ?self.state, to = ?next, "summary scanner transition");
                self.state = next;
            }
            Action::Append => {
                if let MarkupEvent::Text(text) = event {
                    self.line.push_str(text);
                }
            }
            Action::CloseCell => {
                self.state = ScanState::Scanning;
                let line = std::mem::take(&mut self.line);
                self.record_line(&line)?;
            }
        }
        Ok(())
    }

    /// Days collected so far
    pub fn donations(&self) -> &DailyAggregates {
        &self.donations
    }

    pub fn finish(self) -> DailyAggregates {
        self.donations
    }

    fn record_line(&mut self, line: &str) -> Result<()> {
        if !line.starts_with(SUMMARY_PREFIX) {
            if !line.trim().is_empty() {
                debug!(line = %line, "summary cell is not a donation total, skipping");
            }
            return Ok(());
        }

        let summary = parse_donation_line(line)?;
        let key = day_key(summary.day);
        let aggregate = DailyAggregate::new(&key, summary.quantity, summary.sum)?;
        if let Some(previous) = self.donations.insert(key.clone(), aggregate) {
            warn!(
                day = %key,
                previous_quantity = previous.quantity(),
                previous_sum = previous.sum(),
                "day reported twice, keeping the later line"
            );
        }
        Ok(())
    }
}

/// Numbers read from one summary sentence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryLine {
    pub day: u32,
    pub quantity: u64,
    pub sum: u64,
}

/// Decode `Total des dons pour le <day> ... <quantity> ... <sum> ...`.
///
/// Whitespace is removed first so that amounts written with thousands
/// separators (`5 682`) read as a single number. The line must carry exactly
/// three numbers.
pub fn parse_donation_line(line: &str) -> Result<SummaryLine> {
    let compact: String = line.chars().filter(|c| !c.is_whitespace()).collect();

    let caps = summary_regex().captures(&compact).ok_or_else(|| {
        let found = compact
            .split(|c: char| !c.is_ascii_digit())
            .filter(|s| !s.is_empty())
            .count();
        DonsError::Parse(format!(
            "expected day, count and total in '{}', found {} number(s)",
            line.trim(),
            found
        ))
    })?;

    let number = |name: &str| -> Result<u64> {
        caps[name].parse::<u64>().map_err(|_| {
            DonsError::Parse(format!("{} out of range in '{}'", name, line.trim()))
        })
    };

    let day = number("day")?;
    if !(1..=31).contains(&day) {
        return Err(DonsError::Parse(format!(
            "day {} out of range in '{}'",
            day,
            line.trim()
        )));
    }

    Ok(SummaryLine {
        day: day as u32,
        quantity: number("quantity")?,
        sum: number("sum")?,
    })
}
