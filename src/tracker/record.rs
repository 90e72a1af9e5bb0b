use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::status::derive_status;
use crate::jalali;

/// Workflow status of a visit record
///
/// Stored on disk as the Persian label (see [`Status::label`]); the label set
/// is closed and shared with export consumers for color-coding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Status {
    /// Next contact date has arrived or passed
    FollowUpDue,
    /// No contact action currently due
    Awaiting,
    /// Finished: the customer bought
    Won,
    /// Finished: the customer was lost
    Lost,
    /// Legacy records saved without a label
    #[default]
    Unset,
}

impl Status {
    pub const AWAITING_LABEL: &'static str = "انتظار";
    pub const FOLLOW_UP_DUE_LABEL: &'static str = "در انتظار تماس مجدد";
    pub const WON_LABEL: &'static str = "خرید";
    pub const LOST_LABEL: &'static str = "از دست رفته";

    /// Persisted label for this status
    pub fn label(self) -> &'static str {
        match self {
            Status::FollowUpDue => Self::FOLLOW_UP_DUE_LABEL,
            Status::Awaiting => Self::AWAITING_LABEL,
            Status::Won => Self::WON_LABEL,
            Status::Lost => Self::LOST_LABEL,
            Status::Unset => "",
        }
    }

    /// Sort rank, most urgent first
    pub fn priority(self) -> u8 {
        match self {
            Status::FollowUpDue => 0,
            Status::Awaiting => 1,
            Status::Won => 2,
            Status::Lost => 3,
            Status::Unset => 4,
        }
    }

    pub fn is_finished(self) -> bool {
        matches!(self, Status::Won | Status::Lost)
    }

    /// The finished outcome this status represents, if any
    pub fn outcome(self) -> Option<Outcome> {
        match self {
            Status::Won => Some(Outcome::Won),
            Status::Lost => Some(Outcome::Lost),
            _ => None,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" => Ok(Status::Unset),
            Status::AWAITING_LABEL | "awaiting" => Ok(Status::Awaiting),
            Status::FOLLOW_UP_DUE_LABEL | "follow_up_due" => Ok(Status::FollowUpDue),
            Status::WON_LABEL | "won" => Ok(Status::Won),
            Status::LOST_LABEL | "lost" => Ok(Status::Lost),
            other => Err(format!(
                "Invalid status '{}'. Valid options are: awaiting, follow_up_due, won, lost",
                other
            )),
        }
    }
}

impl Serialize for Status {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Status {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(serde::de::Error::custom)
    }
}

/// Terminal outcome chosen when a record is marked finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Won,
    Lost,
}

impl From<Outcome> for Status {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Won => Status::Won,
            Outcome::Lost => Status::Lost,
        }
    }
}

impl FromStr for Outcome {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<Status>()?.outcome() {
            Some(outcome) => Ok(outcome),
            None => Err(format!(
                "Invalid outcome '{}'. Valid options are: won, lost",
                s.trim()
            )),
        }
    }
}

/// One tracked field-visit project
///
/// Field names are the persisted contract read by export tools. Dates stay as
/// the Jalali text that was entered; they are parsed on demand.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Record {
    /// Engineer name; part of the identity key
    pub name: String,
    /// Site address; part of the identity key
    pub address: String,
    pub area: String,
    pub rooms: String,
    /// Jalali visit date (YYYY/MM/DD)
    pub visit_date: String,
    /// Jalali next contact date, empty when none is scheduled
    pub next_call_date: String,
    pub status: Status,
    pub description: String,
    /// Jalali end date, only set on finished records
    pub end_date: String,
}

impl Record {
    /// Whether this record matches the (name, address) identity key
    pub fn has_key(&self, name: &str, address: &str) -> bool {
        self.name == name && self.address == address
    }

    /// Finished records carry a terminal label
    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    /// Status as of `today`
    ///
    /// Finished records keep their stored label; every other record is derived
    /// from its next contact date.
    pub fn current_status(&self, today: NaiveDate) -> Status {
        derive_status(&self.next_call_date, self.status.outcome(), today)
    }

    pub fn visit_date_gregorian(&self) -> Option<NaiveDate> {
        jalali::parse_to_gregorian(&self.visit_date)
    }

    pub fn next_call_date_gregorian(&self) -> Option<NaiveDate> {
        jalali::parse_to_gregorian(&self.next_call_date)
    }

    pub fn end_date_gregorian(&self) -> Option<NaiveDate> {
        jalali::parse_to_gregorian(&self.end_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_labels_round_trip_through_from_str() {
        for status in [
            Status::FollowUpDue,
            Status::Awaiting,
            Status::Won,
            Status::Lost,
            Status::Unset,
        ] {
            assert_eq!(status.label().parse::<Status>(), Ok(status));
        }
        assert_eq!("won".parse::<Status>(), Ok(Status::Won));
        assert!("done".parse::<Status>().is_err());
    }

    #[test]
    fn test_outcome_rejects_open_statuses() {
        assert_eq!("lost".parse::<Outcome>(), Ok(Outcome::Lost));
        assert_eq!("خرید".parse::<Outcome>(), Ok(Outcome::Won));
        assert!("awaiting".parse::<Outcome>().is_err());
        assert!("".parse::<Outcome>().is_err());
    }

    #[test]
    fn test_record_json_shape() {
        let record = Record {
            name: "Rezaei".to_string(),
            visit_date: "1403/02/10".to_string(),
            status: Status::Won,
            end_date: "1403/03/01".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(&record).unwrap();
        let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        for key in [
            "name",
            "address",
            "area",
            "rooms",
            "visit_date",
            "next_call_date",
            "status",
            "description",
            "end_date",
        ] {
            assert!(keys.contains(&key), "missing {key}");
        }
        assert_eq!(json["status"], "خرید");
    }

    #[test]
    fn test_record_tolerates_missing_fields() {
        let record: Record =
            serde_json::from_str(r#"{"name": "Karimi", "visit_date": "1403/01/15"}"#).unwrap();
        assert_eq!(record.address, "");
        assert_eq!(record.status, Status::Unset);
        assert!(!record.is_finished());
    }

    #[test]
    fn test_current_status_keeps_finished_label() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let record = Record {
            next_call_date: "1403/01/01".to_string(),
            status: Status::Lost,
            ..Default::default()
        };
        assert_eq!(record.current_status(today), Status::Lost);

        let open = Record {
            next_call_date: "1403/01/01".to_string(),
            status: Status::Awaiting,
            ..Default::default()
        };
        assert_eq!(open.current_status(today), Status::FollowUpDue);
    }
}
