//! Formatting helper functions for the visit tracker server
//!
//! Everything here is presentation only: descriptions are shortened for
//! display but the stored records are never touched.

use chrono::NaiveDate;

use crate::jalali;
use crate::tracker::Record;

/// Description width in the table view
pub const TABLE_DESCRIPTION_WIDTH: usize = 50;
/// Description width in report rows
pub const REPORT_DESCRIPTION_WIDTH: usize = 25;

const ELLIPSIS: &str = "...";

/// Shorten `text` to `max_chars` characters, appending `...` when cut
pub fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
        None => text.to_string(),
    }
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}

/// Format records into the table view
///
/// # Arguments
/// * `records` - Records in display order
/// * `today` - Date used to derive the status of unfinished records
///
/// # Returns
/// Formatted string representation of the records
pub fn format_records(records: &[&Record], today: NaiveDate) -> String {
    if records.is_empty() {
        return "No records found".to_string();
    }

    let mut result = format!("Found {} record(s):\n\n", records.len());
    for record in records {
        result.push_str(&format!(
            "- {} | {} (status: {})\n",
            record.name,
            or_dash(&record.address),
            or_dash(record.current_status(today).label())
        ));
        result.push_str(&format!(
            "  Area: {}  Rooms: {}\n",
            or_dash(&record.area),
            or_dash(&record.rooms)
        ));
        result.push_str(&format!(
            "  Visit: {}  Next call: {}\n",
            record.visit_date,
            or_dash(&record.next_call_date)
        ));
        if !record.end_date.is_empty() {
            result.push_str(&format!("  End: {}\n", record.end_date));
        }
        if !record.description.is_empty() {
            result.push_str(&format!(
                "  Description: {}\n",
                truncate(&record.description, TABLE_DESCRIPTION_WIDTH)
            ));
        }
    }

    result
}

/// Format one record with every field in full
pub fn format_record_detail(record: &Record, today: NaiveDate) -> String {
    let status = record.current_status(today);
    let mut result = String::new();
    result.push_str(&format!("Name: {}\n", record.name));
    result.push_str(&format!("Address: {}\n", record.address));
    result.push_str(&format!("Area: {}\n", record.area));
    result.push_str(&format!("Rooms: {}\n", record.rooms));
    result.push_str(&format!("Visit date: {}\n", record.visit_date));
    result.push_str(&format!("Next call date: {}\n", record.next_call_date));
    result.push_str(&format!("Status: {}\n", status.label()));
    result.push_str(&format!("Finished: {}\n", status.is_finished()));
    result.push_str(&format!("End date: {}\n", record.end_date));
    result.push_str(&format!("Description:\n{}\n", record.description));
    result
}

/// Format records as a compact report, one row per record
pub fn format_report(records: &[&Record], today: NaiveDate) -> String {
    let mut result = format!(
        "Visit report ({} record(s), generated {})\n",
        records.len(),
        jalali::format_gregorian(today)
    );
    result.push_str(
        "name | address | area | rooms | visit date | next call | status | description | end date\n",
    );

    for record in records {
        let description = truncate(&record.description, REPORT_DESCRIPTION_WIDTH);
        let row = [
            record.name.as_str(),
            record.address.as_str(),
            record.area.as_str(),
            record.rooms.as_str(),
            record.visit_date.as_str(),
            record.next_call_date.as_str(),
            record.current_status(today).label(),
            description.as_str(),
            record.end_date.as_str(),
        ];
        result.push_str(&row.join(" | "));
        result.push('\n');
    }

    result
}
