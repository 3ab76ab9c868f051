//! Output formatting utilities

use crate::domain::DonationRecord;

/// Format stored donations for display, one per line
pub fn format_record_list(records: &[DonationRecord]) -> String {
    if records.is_empty() {
        return "No donations found\n".to_string();
    }

    let mut output = String::new();
    for record in records {
        output.push_str(&format!("{}\n", record));
    }
    output
}
