//! Donation record use cases

use crate::domain::record::parse_amount;
use crate::domain::DonationRecord;
use crate::error::Result;
use crate::infrastructure::DonationStore;
use std::path::Path;

/// Service for adding and listing individual donations
pub struct RecordService {
    store: DonationStore,
}

impl RecordService {
    pub fn new(store: DonationStore) -> Self {
        RecordService { store }
    }

    /// Open the store at `path`, keeping existing rows
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self::new(DonationStore::open(path, false)?))
    }

    /// Drop and recreate the donations table at `path`
    pub fn reset(path: &Path) -> Result<()> {
        DonationStore::open(path, true)?.close()
    }

    /// Validate user input, then store it. Nothing is written when validation fails.
    pub fn add(
        &self,
        date: &str,
        name: &str,
        amount: &str,
        comment: &str,
    ) -> Result<DonationRecord> {
        let donation = parse_amount(amount)?;
        let record =
            DonationRecord::new(date, name, donation, comment)?.attach(self.store.handle());
        record.save()?;
        Ok(record)
    }

    pub fn list(&self) -> Result<Vec<DonationRecord>> {
        self.store.list_all()
    }

    pub fn close(self) -> Result<()> {
        self.store.close()
    }
}
