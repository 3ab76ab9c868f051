//! Individual named donations

use crate::error::{DonsError, Result};
use chrono::NaiveDateTime;
use std::fmt;
use std::rc::Weak;

/// Timestamp layout of a donation
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Anything a record can be saved back into
pub trait RecordSink {
    fn insert(&self, record: &DonationRecord) -> Result<()>;
}

/// Row layout shared with the store: (date, name, donation, comment)
pub type RecordRow = (String, String, f64, String);

/// A single donation as shown in the journal
#[derive(Clone)]
pub struct DonationRecord {
    date: NaiveDateTime,
    name: String,
    donation: f64,
    comment: String,
    // Non-owning: a record outliving its store just stops saving
    origin: Option<Weak<dyn RecordSink>>,
}

impl DonationRecord {
    /// Create a record, validating `date` as `YYYY-mm-dd HH:MM:SS`
    pub fn new(
        date: &str,
        name: impl Into<String>,
        donation: f64,
        comment: impl Into<String>,
    ) -> Result<Self> {
        let date = NaiveDateTime::parse_from_str(date, DATE_FORMAT).map_err(|_| {
            DonsError::Validation(format!("{} should be in YYYY-mm-dd HH:MM:SS format", date))
        })?;
        if !donation.is_finite() {
            return Err(DonsError::Validation(format!(
                "donation amount {} is not a number",
                donation
            )));
        }
        Ok(DonationRecord {
            date,
            name: name.into(),
            donation,
            comment: comment.into(),
            origin: None,
        })
    }

    /// Rebuild a record from a stored row
    pub fn from_row(row: RecordRow) -> Result<Self> {
        let (date, name, donation, comment) = row;
        Self::new(&date, name, donation, comment)
    }

    pub fn to_row(&self) -> RecordRow {
        (
            self.date_string(),
            self.name.clone(),
            self.donation,
            self.comment.clone(),
        )
    }

    /// Remember where this record can be saved to
    pub fn attach(mut self, sink: Weak<dyn RecordSink>) -> Self {
        self.origin = Some(sink);
        self
    }

    pub fn is_attached(&self) -> bool {
        self.origin
            .as_ref()
            .is_some_and(|origin| origin.strong_count() > 0)
    }

    /// Insert into the attached store. Returns false when there is none left.
    pub fn save(&self) -> Result<bool> {
        match self.origin.as_ref().and_then(Weak::upgrade) {
            Some(sink) => {
                sink.insert(self)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn date(&self) -> NaiveDateTime {
        self.date
    }

    pub fn date_string(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn donation(&self) -> f64 {
        self.donation
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }
}

/// Read a donation amount typed by a user
pub fn parse_amount(input: &str) -> Result<f64> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| DonsError::Validation(format!("'{}' is not a donation amount", input)))
}

impl PartialEq for DonationRecord {
    fn eq(&self, other: &Self) -> bool {
        self.date == other.date
            && self.name == other.name
            && self.donation == other.donation
            && self.comment == other.comment
    }
}

impl fmt::Debug for DonationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DonationRecord")
            .field("date", &self.date_string())
            .field("name", &self.name)
            .field("donation", &self.donation)
            .field("comment", &self.comment)
            .field("attached", &self.is_attached())
            .finish()
    }
}

impl fmt::Display for DonationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Donation('{}', '{}', {:?}, '{}')",
            self.date_string(),
            self.name,
            self.donation,
            self.comment
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct MemorySink {
        rows: RefCell<Vec<RecordRow>>,
    }

    impl RecordSink for MemorySink {
        fn insert(&self, record: &DonationRecord) -> Result<()> {
            self.rows.borrow_mut().push(record.to_row());
            Ok(())
        }
    }

    #[test]
    fn test_valid_record() {
        let record = DonationRecord::new("2014-05-06 12:00:05", "Pi", 50.0, "I love wiki").unwrap();
        assert_eq!(record.date_string(), "2014-05-06 12:00:05");
        assert_eq!(record.name(), "Pi");
        assert_eq!(record.donation(), 50.0);
        assert_eq!(record.comment(), "I love wiki");
        assert!(!record.is_attached());
    }

    #[test]
    fn test_malformed_dates_are_rejected() {
        for date in ["2014/05/06", "2014-05-06", "2014-13-06 12:00:00", "yesterday"] {
            match DonationRecord::new(date, "Pi", 1.0, "") {
                Err(DonsError::Validation(msg)) => assert!(msg.contains("YYYY-mm-dd HH:MM:SS")),
                other => panic!("Expected validation error for {}, got {:?}", date, other),
            }
        }
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("15").unwrap(), 15.0);
        assert_eq!(parse_amount(" 12.5 ").unwrap(), 12.5);
        assert!(parse_amount("quinze").is_err());
        assert!(parse_amount("NaN").is_err());
    }

    #[test]
    fn test_row_round_trip() {
        let record = DonationRecord::new("2014-06-08 14:15:56", "Te", 15.0, "Yeah").unwrap();
        let back = DonationRecord::from_row(record.to_row()).unwrap();
        assert_eq!(record, back);
    }

    #[test]
    fn test_display() {
        let record = DonationRecord::new("2014-06-08 14:15:56", "John", 15.0, "Thank you").unwrap();
        assert_eq!(
            record.to_string(),
            "Donation('2014-06-08 14:15:56', 'John', 15.0, 'Thank you')"
        );
    }

    #[test]
    fn test_save_goes_to_attached_sink() {
        let sink = Rc::new(MemorySink::default());
        let weak: Weak<dyn RecordSink> = Rc::downgrade(&sink) as Weak<dyn RecordSink>;
        let record = DonationRecord::new("2014-06-08 14:15:56", "Te", 15.0, "")
            .unwrap()
            .attach(weak);

        assert!(record.save().unwrap());
        assert_eq!(sink.rows.borrow().len(), 1);
    }

    #[test]
    fn test_save_without_sink_is_a_no_op() {
        let record = DonationRecord::new("2014-06-08 14:15:56", "Te", 15.0, "").unwrap();
        assert!(!record.save().unwrap());

        let sink = Rc::new(MemorySink::default());
        let weak: Weak<dyn RecordSink> = Rc::downgrade(&sink) as Weak<dyn RecordSink>;
        let record = record.attach(weak);
        drop(sink);
        assert!(!record.is_attached());
        assert!(!record.save().unwrap());
    }
}
