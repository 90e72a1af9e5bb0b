//! Status derivation from the next contact date

use chrono::NaiveDate;

use super::record::{Outcome, Status};
use crate::jalali;

/// Derive the workflow status of a record as of `today`
///
/// A finished record (`outcome` is `Some`) reports its outcome regardless of
/// dates. Otherwise a missing or unparseable next contact date means
/// [`Status::Awaiting`], a date after `today` also means `Awaiting`, and a date
/// on or before `today` means [`Status::FollowUpDue`].
pub fn derive_status(next_call_date: &str, outcome: Option<Outcome>, today: NaiveDate) -> Status {
    if let Some(outcome) = outcome {
        return outcome.into();
    }

    match jalali::parse_to_gregorian(next_call_date) {
        Some(next_call) if next_call > today => Status::Awaiting,
        Some(_) => Status::FollowUpDue,
        None => Status::Awaiting,
    }
}
