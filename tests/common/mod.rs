//! Common test utilities for integration tests

#![allow(dead_code)]

use chrono::{Days, NaiveDate};
use tempfile::NamedTempFile;
use visit_tracker::tracker::Submission;
use visit_tracker::{JalaliDate, Record, Status, VisitTrackerHandler};

/// Fixed reference day: 2024-06-15 is 1403/03/26
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

/// Jalali text for `today()` shifted by `offset` days
pub fn jalali_days_from_today(offset: i64) -> String {
    let date = if offset >= 0 {
        today() + Days::new(offset as u64)
    } else {
        today() - Days::new(offset.unsigned_abs())
    };
    JalaliDate::from_gregorian(date).unwrap().to_string()
}

/// Create a test handler with temporary storage
pub fn get_test_handler() -> (VisitTrackerHandler, NamedTempFile) {
    let temp_file = NamedTempFile::new().unwrap();
    let handler = VisitTrackerHandler::new(temp_file.path().to_str().unwrap()).unwrap();
    (handler, temp_file)
}

/// Create a record with the fields queries look at
pub fn create_test_record(name: &str, next_call_date: &str, status: Status) -> Record {
    Record {
        name: name.to_string(),
        address: format!("{} street", name),
        visit_date: "1403/01/15".to_string(),
        next_call_date: next_call_date.to_string(),
        status,
        ..Default::default()
    }
}

/// Create a minimal open submission
pub fn create_test_submission(name: &str, address: &str, next_call_date: &str) -> Submission {
    Submission {
        name: name.to_string(),
        address: address.to_string(),
        visit_date: "1403/01/15".to_string(),
        next_call_date: next_call_date.to_string(),
        ..Default::default()
    }
}
